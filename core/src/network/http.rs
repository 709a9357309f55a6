use std::time::Duration;

use reconic_common::ScanError;
use reqwest::Client;
use reqwest::redirect::Policy;

const USER_AGENT: &str = concat!("reconic/", env!("CARGO_PKG_VERSION"));
const MAX_REDIRECTS: usize = 10;

/// Client that reports redirects instead of following them, for path probes.
pub fn probe_client(timeout: Duration) -> Result<Client, ScanError> {
    build(timeout, Policy::none())
}

/// Client that follows redirects, for canonical base resolution and liveness checks.
pub fn redirect_client(timeout: Duration) -> Result<Client, ScanError> {
    build(timeout, Policy::limited(MAX_REDIRECTS))
}

// Certificates are not verified: targets under reconnaissance routinely serve
// self-signed or mismatched ones and the scan only looks at status codes.
fn build(timeout: Duration, redirect: Policy) -> Result<Client, ScanError> {
    Client::builder()
        .timeout(timeout)
        .redirect(redirect)
        .danger_accept_invalid_certs(true)
        .user_agent(USER_AGENT)
        .build()
        .map_err(|e| ScanError::HttpClient(e.to_string()))
}
