//! Canonical base resolution for directory scans.
//!
//! One redirect-following request settles where the target really lives
//! (`http://example.com` → `https://www.example.com`); every path probe is then
//! built on that base rather than on the address the user typed.

use std::fmt;

use reconic_common::{info, warn};
use reqwest::{Client, Url};
use serde::Serialize;

/// Redirect-resolved root URL, without trailing slash.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CanonicalBase {
    url: String,
    redirected_from: Option<String>,
}

impl CanonicalBase {
    /// A base used exactly as given, minus trailing slashes.
    pub fn unchanged(raw: &str) -> Self {
        Self {
            url: raw.trim().trim_end_matches('/').to_string(),
            redirected_from: None,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.url
    }

    /// The slash-trimmed input, when the request ended up elsewhere.
    pub fn redirected_from(&self) -> Option<&str> {
        self.redirected_from.as_deref()
    }

    /// `<base>/<path>`.
    pub fn join(&self, path: &str) -> String {
        format!("{}/{}", self.url, path)
    }

    /// Whether `location` stays under this base.
    pub fn is_prefix_of(&self, location: &str) -> bool {
        location.starts_with(&self.url)
    }
}

impl fmt::Display for CanonicalBase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.url)
    }
}

/// Resolves the canonical base of `raw` with a single redirect-following GET.
///
/// Never fails: when the request errors the slash-trimmed input is used as is.
pub async fn resolve(client: &Client, raw: &str) -> CanonicalBase {
    let requested: CanonicalBase = CanonicalBase::unchanged(raw);

    let request_url: Url = match Url::parse(raw.trim()) {
        Ok(url) => url,
        Err(e) => {
            warn!("{raw} is not a valid URL ({e}), probing it as given");
            return requested;
        }
    };

    let response = match client.get(request_url.clone()).send().await {
        Ok(response) => response,
        Err(e) => {
            warn!("An error occurred while checking {raw}: {e}");
            return requested;
        }
    };

    if response.url() == &request_url {
        return requested;
    }

    let final_url: String = response.url().as_str().trim_end_matches('/').to_string();
    if final_url == requested.url {
        return requested;
    }

    info!("Redirect detected: {} -> {final_url}", requested.url);
    CanonicalBase {
        url: final_url,
        redirected_from: Some(requested.url),
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
