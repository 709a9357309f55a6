//! Certificate transparency lookups against crt.sh.
//!
//! Every certificate logged for `*.domain` lists the names it covers in
//! `name_value`, one per line. Those names are the candidate set of a
//! subdomain liveness scan.

use std::collections::HashSet;

use reconic_common::ScanError;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

pub const CRTSH_ENDPOINT: &str = "https://crt.sh";

#[derive(Clone, Debug, Deserialize)]
pub struct CertificateEntry {
    #[serde(default)]
    pub name_value: String,
}

pub struct CrtShSource {
    client: Client,
    endpoint: String,
}

impl CrtShSource {
    pub fn new(client: Client) -> Self {
        Self {
            client,
            endpoint: CRTSH_ENDPOINT.to_string(),
        }
    }

    /// Points the source at another crt.sh-compatible endpoint.
    pub fn with_endpoint(mut self, endpoint: &str) -> Self {
        self.endpoint = endpoint.trim_end_matches('/').to_string();
        self
    }

    /// Candidate subdomains of `domain` seen in certificate logs.
    pub async fn fetch(&self, domain: &str) -> Result<Vec<String>, ScanError> {
        let domain: String = domain.trim().trim_end_matches('.').to_ascii_lowercase();

        let response = self
            .client
            .get(format!("{}/", self.endpoint))
            .query(&[("q", format!("%.{domain}")), ("output", "json".to_string())])
            .send()
            .await
            .and_then(|response| response.error_for_status())
            .map_err(|e| ScanError::CertTransparency(e.to_string()))?;

        let body: String = response
            .text()
            .await
            .map_err(|e| ScanError::CertTransparency(e.to_string()))?;

        let entries: Vec<CertificateEntry> = serde_json::from_str(&body)
            .map_err(|e| ScanError::CertTransparency(format!("unexpected response: {e}")))?;

        let names: Vec<String> = extract_subdomains(&entries, &domain);
        debug!(
            entries = entries.len(),
            names = names.len(),
            "crt.sh answered for {domain}"
        );
        Ok(names)
    }
}

/// Splits, normalizes and filters the names of `entries`.
///
/// Only names strictly under `domain` are kept; wildcards are dropped and the
/// first occurrence of each name wins.
pub fn extract_subdomains(entries: &[CertificateEntry], domain: &str) -> Vec<String> {
    let suffix: String = format!(".{}", domain.trim().to_ascii_lowercase());
    let mut seen: HashSet<String> = HashSet::new();

    entries
        .iter()
        .flat_map(|entry| entry.name_value.lines())
        .map(|name| name.trim().to_ascii_lowercase())
        .filter(|name| name.ends_with(&suffix) && name.len() > suffix.len())
        .filter(|name| !name.contains('*'))
        .filter(|name| seen.insert(name.clone()))
        .collect()
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
