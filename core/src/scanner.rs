//! The scan operations the CLI exposes.
//!
//! Each operation resolves what it needs once (an address, a canonical base, a
//! candidate list), builds a [`ScanJob`], and hands it to the caller's
//! [`Dispatcher`] together with the matching probe. The caller owns the
//! dispatcher, so progress reporting and cancellation are decided there.

use std::net::IpAddr;
use std::num::NonZeroUsize;
use std::sync::Arc;
use std::time::Duration;

use reconic_common::models::job::ScanJob;
use reconic_common::models::target::Target;
use reconic_common::models::work::WorkItem;
use reconic_common::services::PortServiceMap;
use reconic_common::{ScanError, error, info};
use reqwest::Client;
use serde::Serialize;
use tracing::debug;

use crate::engine::{Dispatcher, ScanReport};
use crate::network::canonical::{self, CanonicalBase};
use crate::network::crtsh::CrtShSource;
use crate::network::{http, resolver};
use crate::probe::dns::{DnsProbe, NameResolver};
use crate::probe::liveness::LivenessProbe;
use crate::probe::path::PathProbe;
use crate::probe::tcp::{CONNECT_TIMEOUT, TcpConnectProbe};

pub const DIRECTORY_CONCURRENCY: usize = 100;
pub const SUBDOMAIN_CONCURRENCY: usize = 50;
pub const PATH_TIMEOUT: Duration = Duration::from_secs(20);
pub const CANONICAL_TIMEOUT: Duration = Duration::from_secs(20);
pub const LIVENESS_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Clone, Debug)]
pub struct PortScanOptions {
    pub concurrency: usize,
    pub timeout: Duration,
}

impl Default for PortScanOptions {
    fn default() -> Self {
        let concurrency: usize = std::thread::available_parallelism()
            .map(NonZeroUsize::get)
            .unwrap_or(4);
        Self {
            concurrency,
            timeout: CONNECT_TIMEOUT,
        }
    }
}

#[derive(Clone, Debug)]
pub struct DirectoryScanOptions {
    pub concurrency: usize,
    /// Per path probe.
    pub timeout: Duration,
    /// For the single canonical base request.
    pub canonical_timeout: Duration,
}

impl Default for DirectoryScanOptions {
    fn default() -> Self {
        Self {
            concurrency: DIRECTORY_CONCURRENCY,
            timeout: PATH_TIMEOUT,
            canonical_timeout: CANONICAL_TIMEOUT,
        }
    }
}

#[derive(Clone, Debug)]
pub struct SubdomainScanOptions {
    pub concurrency: usize,
    pub timeout: Duration,
    /// Check liveness over `https://` instead of `http://`.
    pub https: bool,
}

impl Default for SubdomainScanOptions {
    fn default() -> Self {
        Self {
            concurrency: SUBDOMAIN_CONCURRENCY,
            timeout: LIVENESS_TIMEOUT,
            https: false,
        }
    }
}

/// A directory scan report together with the base its paths were probed on.
#[derive(Clone, Debug, Serialize)]
pub struct DirectoryScan {
    pub base: CanonicalBase,
    pub report: ScanReport,
}

/// TCP connect scan of every port in `services`.
///
/// Fails before any probe runs when the target does not resolve.
pub async fn port_scan(
    target: &Target,
    services: Arc<PortServiceMap>,
    options: &PortScanOptions,
    dispatcher: &Dispatcher,
) -> Result<ScanReport, ScanError> {
    let addr: IpAddr = resolver::resolve_target(target.host()).await?;
    info!("Scanning {} ports on {addr}", services.len());

    let items = services.ports().map(WorkItem::Port);
    let job = ScanJob::new(target.clone(), items, options.concurrency, options.timeout)?;

    let probe = TcpConnectProbe::new(addr, Arc::clone(&services))
        .with_connect_timeout(options.timeout);
    Ok(dispatcher.run(&job, Arc::new(probe)).await)
}

/// Brute-forces `paths` under the canonical base of `target`.
pub async fn directory_scan(
    target: &Target,
    paths: &[String],
    options: &DirectoryScanOptions,
    dispatcher: &Dispatcher,
) -> Result<DirectoryScan, ScanError> {
    let redirecting: Client = http::redirect_client(options.canonical_timeout)?;
    let base: CanonicalBase = canonical::resolve(&redirecting, &target.url()).await;
    debug!("canonical base: {base}");

    let items: Vec<WorkItem> = paths
        .iter()
        .map(|path| WorkItem::path(path))
        .filter(|item| !matches!(item, WorkItem::Path(path) if path.is_empty()))
        .collect();
    let job = ScanJob::new(target.clone(), items, options.concurrency, options.timeout)?;
    info!("Probing {} paths under {base}", job.len());

    let base: Arc<CanonicalBase> = Arc::new(base);
    let probe = PathProbe::new(http::probe_client(options.timeout)?, Arc::clone(&base));
    let report: ScanReport = dispatcher.run(&job, Arc::new(probe)).await;

    Ok(DirectoryScan {
        base: Arc::unwrap_or_clone(base),
        report,
    })
}

/// Checks which of the fully qualified `candidates` answer over HTTP.
pub async fn subdomain_liveness_scan(
    target: &Target,
    candidates: &[String],
    options: &SubdomainScanOptions,
    dispatcher: &Dispatcher,
) -> Result<ScanReport, ScanError> {
    let items = candidates.iter().map(|name| WorkItem::subdomain(name));
    let job = ScanJob::new(target.clone(), items, options.concurrency, options.timeout)?;
    info!("Checking {} candidate subdomains", job.len());

    let mut probe = LivenessProbe::new(http::redirect_client(options.timeout)?);
    if options.https {
        probe = probe.with_https();
    }
    Ok(dispatcher.run(&job, Arc::new(probe)).await)
}

/// Resolves `<label>.<domain>` for every wordlist label.
pub async fn subdomain_dns_scan(
    target: &Target,
    labels: &[String],
    resolver: Arc<dyn NameResolver>,
    options: &SubdomainScanOptions,
    dispatcher: &Dispatcher,
) -> Result<ScanReport, ScanError> {
    let domain: &str = target.host().trim_end_matches('.');
    let items = labels
        .iter()
        .map(|label| label.trim().trim_end_matches('.'))
        .filter(|label| !label.is_empty())
        .map(|label| WorkItem::subdomain(&format!("{label}.{domain}")));
    let job = ScanJob::new(target.clone(), items, options.concurrency, options.timeout)?;
    info!("Resolving {} names under {domain}", job.len());

    Ok(dispatcher.run(&job, Arc::new(DnsProbe::new(resolver))).await)
}

/// Candidate subdomains of `target` from certificate transparency logs.
///
/// A failed lookup is logged and yields no candidates.
pub async fn discover_subdomains(source: &CrtShSource, target: &Target) -> Vec<String> {
    match source.fetch(target.host()).await {
        Ok(names) => {
            info!("crt.sh listed {} names for {}", names.len(), target.host());
            names
        }
        Err(e) => {
            error!("{e}");
            Vec::new()
        }
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
