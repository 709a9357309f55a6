use std::sync::Arc;

use async_trait::async_trait;
use reconic_common::models::outcome::{Classification, ProbeOutcome};
use reconic_common::models::work::WorkItem;
use reqwest::header::LOCATION;
use reqwest::{Client, StatusCode};
use tracing::trace;

use super::Probe;
use crate::network::canonical::CanonicalBase;

const REDIRECT_STATUSES: [u16; 5] = [301, 302, 303, 307, 308];

/// GETs `<canonical base>/<path>` with redirects disabled.
///
/// The client must be built with redirects off (see [`crate::network::http::probe_client`]),
/// otherwise redirects are followed and never classified.
pub struct PathProbe {
    client: Client,
    base: Arc<CanonicalBase>,
}

impl PathProbe {
    pub fn new(client: Client, base: Arc<CanonicalBase>) -> Self {
        Self { client, base }
    }
}

#[async_trait]
impl Probe for PathProbe {
    async fn probe(&self, item: WorkItem) -> ProbeOutcome {
        let url: Option<String> = match &item {
            WorkItem::Path(path) => Some(self.base.join(path)),
            _ => None,
        };
        let Some(url) = url else {
            return ProbeOutcome::miss(item);
        };

        let response = match self.client.get(&url).send().await {
            Ok(response) => response,
            Err(e) => {
                trace!("{url}: {e}");
                return ProbeOutcome::miss(item);
            }
        };

        let location: Option<&str> = response
            .headers()
            .get(LOCATION)
            .and_then(|value| value.to_str().ok());

        if is_hit(response.status(), location, &self.base) {
            ProbeOutcome::hit(item, Classification::Url(url))
        } else {
            ProbeOutcome::miss(item)
        }
    }
}

/// 200 is a hit. A redirect is a hit only when it stays under the base;
/// anything pointing elsewhere is a false lead.
fn is_hit(status: StatusCode, location: Option<&str>, base: &CanonicalBase) -> bool {
    if status == StatusCode::OK {
        return true;
    }
    if REDIRECT_STATUSES.contains(&status.as_u16()) {
        return location.is_some_and(|location| base.is_prefix_of(location));
    }
    false
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
