use std::net::IpAddr;
use std::sync::Arc;

use async_trait::async_trait;
use hickory_resolver::TokioResolver;
use hickory_resolver::name_server::TokioConnectionProvider;
use reconic_common::ScanError;
use reconic_common::models::outcome::{Classification, ProbeOutcome};
use reconic_common::models::work::WorkItem;
use tracing::trace;

use super::Probe;

/// Forward name resolution, A and AAAA.
#[async_trait]
pub trait NameResolver: Send + Sync {
    async fn lookup(&self, name: &str) -> anyhow::Result<Vec<IpAddr>>;
}

/// [`NameResolver`] backed by hickory, configured from the system resolver settings.
pub struct HickoryResolver {
    inner: TokioResolver,
}

impl HickoryResolver {
    pub fn from_system_conf() -> Result<Self, ScanError> {
        let inner: TokioResolver = TokioResolver::builder(TokioConnectionProvider::default())
            .map_err(|e| ScanError::ResolverSetup(e.to_string()))?
            .build();
        Ok(Self { inner })
    }
}

#[async_trait]
impl NameResolver for HickoryResolver {
    async fn lookup(&self, name: &str) -> anyhow::Result<Vec<IpAddr>> {
        let lookup = self.inner.lookup_ip(name).await?;
        Ok(lookup.iter().collect())
    }
}

/// Resolves a candidate subdomain; any address makes it a hit.
///
/// NXDOMAIN, empty answers and resolver errors are all misses.
pub struct DnsProbe {
    resolver: Arc<dyn NameResolver>,
}

impl DnsProbe {
    pub fn new(resolver: Arc<dyn NameResolver>) -> Self {
        Self { resolver }
    }
}

#[async_trait]
impl Probe for DnsProbe {
    async fn probe(&self, item: WorkItem) -> ProbeOutcome {
        let name: Option<String> = match &item {
            WorkItem::Subdomain(name) => Some(name.clone()),
            _ => None,
        };
        let Some(name) = name else {
            return ProbeOutcome::miss(item);
        };

        match self.resolver.lookup(&name).await {
            Ok(mut addrs) if !addrs.is_empty() => {
                addrs.sort_unstable();
                addrs.dedup();
                ProbeOutcome::hit(item, Classification::Addresses(addrs))
            }
            Ok(_) => ProbeOutcome::miss(item),
            Err(e) => {
                trace!("{name}: {e}");
                ProbeOutcome::miss(item)
            }
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
