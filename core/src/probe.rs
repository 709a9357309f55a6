//! The **abstraction** every probe type implements.
//!
//! A probe tests one [`WorkItem`] against a target that was resolved before the
//! dispatch began (an address, a canonical base URL, a domain). Probes never
//! fail: refused connections, timeouts and transport errors are misses, and
//! only their absence from the report is observable.
//!
//! Implementations:
//! * [`tcp::TcpConnectProbe`]: port connect scan.
//! * [`path::PathProbe`]: HTTP directory brute-force.
//! * [`liveness::LivenessProbe`]: HTTP liveness of candidate subdomains.
//! * [`dns::DnsProbe`]: DNS resolution of candidate subdomains.

use async_trait::async_trait;
use reconic_common::models::outcome::ProbeOutcome;
use reconic_common::models::work::WorkItem;

pub mod dns;
pub mod liveness;
pub mod path;
pub mod tcp;

#[async_trait]
pub trait Probe: Send + Sync + 'static {
    /// Probes a single work item. Items of a kind the probe does not handle are misses.
    async fn probe(&self, item: WorkItem) -> ProbeOutcome;
}
