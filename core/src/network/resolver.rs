use std::io;
use std::net::{IpAddr, SocketAddr};

use reconic_common::ScanError;
use tracing::debug;

/// Resolves a hostname (or IP literal) to the address a port scan connects to.
///
/// IPv4 answers are preferred. A name that does not resolve is fatal for the
/// port scan, so the error is returned before any probe is dispatched.
pub async fn resolve_target(host: &str) -> Result<IpAddr, ScanError> {
    let host: &str = host.trim().trim_start_matches('[').trim_end_matches(']');

    if let Ok(addr) = host.parse::<IpAddr>() {
        return Ok(addr);
    }

    let resolution_error = |source: io::Error| ScanError::Resolution {
        host: host.to_string(),
        source,
    };

    if host.is_empty() {
        return Err(resolution_error(io::Error::new(
            io::ErrorKind::InvalidInput,
            "empty hostname",
        )));
    }

    let addrs: Vec<SocketAddr> = tokio::net::lookup_host((host, 0))
        .await
        .map_err(resolution_error)?
        .collect();

    let addr: IpAddr = addrs
        .iter()
        .find(|addr| addr.is_ipv4())
        .or_else(|| addrs.first())
        .map(SocketAddr::ip)
        .ok_or_else(|| {
            resolution_error(io::Error::new(
                io::ErrorKind::NotFound,
                "no addresses returned",
            ))
        })?;

    debug!("{host} resolved to {addr}");
    Ok(addr)
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
