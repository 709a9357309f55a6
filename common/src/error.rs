use std::path::PathBuf;

use thiserror::Error;

/// Errors that abort a scan operation.
///
/// Per-probe failures (refused connections, timeouts, NXDOMAIN, transport
/// errors) never appear here: a probe that fails is simply not a hit.
#[derive(Debug, Error)]
pub enum ScanError {
    #[error("could not resolve '{host}': {source}")]
    Resolution {
        host: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to set up the DNS resolver: {0}")]
    ResolverSetup(String),

    #[error("invalid target '{target}': {reason}")]
    InvalidTarget { target: String, reason: String },

    #[error("concurrency limit must be at least 1")]
    InvalidConcurrency,

    #[error("per-probe timeout must be greater than zero")]
    InvalidTimeout,

    #[error("failed to read wordlist {}: {source}", path.display())]
    Wordlist {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid port map: {0}")]
    PortMap(String),

    #[error("failed to build HTTP client: {0}")]
    HttpClient(String),

    #[error("certificate transparency lookup failed: {0}")]
    CertTransparency(String),
}

pub type Result<T> = std::result::Result<T, ScanError>;
