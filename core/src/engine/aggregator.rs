use std::collections::{BTreeMap, HashSet};
use std::net::IpAddr;

use reconic_common::models::outcome::{Classification, ProbeOutcome};
use reconic_common::models::target::Target;
use reconic_common::models::work::WorkItem;
use reconic_common::services::UNKNOWN_SERVICE;
use serde::Serialize;

use super::dispatcher::DispatchSummary;

/// Collects the hits of one dispatch.
///
/// Owned by the loop that harvests finished probes, so recording needs no lock.
/// Misses and repeated work items are dropped on the way in.
#[derive(Debug)]
pub struct ResultAggregator {
    target: Target,
    seen: HashSet<WorkItem>,
    hits: Vec<ProbeOutcome>,
}

impl ResultAggregator {
    pub fn new(target: Target) -> Self {
        Self {
            target,
            seen: HashSet::new(),
            hits: Vec::new(),
        }
    }

    /// Returns `true` when the outcome was kept.
    pub fn record(&mut self, outcome: ProbeOutcome) -> bool {
        if !outcome.is_success() || !self.seen.insert(outcome.item().clone()) {
            return false;
        }
        self.hits.push(outcome);
        true
    }

    pub fn len(&self) -> usize {
        self.hits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hits.is_empty()
    }

    /// Seals the collected hits once the dispatch has drained.
    pub fn finish(self, summary: DispatchSummary) -> ScanReport {
        ScanReport {
            target: self.target,
            hits: self.hits,
            total: summary.total,
            probed: summary.completed,
            cancelled: summary.cancelled,
        }
    }
}

/// The deduplicated hits of one scan job.
///
/// Hit order is whatever order the probes finished in; the accessors below sort.
#[derive(Clone, Debug, Serialize)]
pub struct ScanReport {
    target: Target,
    hits: Vec<ProbeOutcome>,
    total: usize,
    probed: usize,
    cancelled: bool,
}

impl ScanReport {
    pub fn target(&self) -> &Target {
        &self.target
    }

    pub fn hits(&self) -> &[ProbeOutcome] {
        &self.hits
    }

    pub fn len(&self) -> usize {
        self.hits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hits.is_empty()
    }

    pub fn contains(&self, item: &WorkItem) -> bool {
        self.hits.iter().any(|hit| hit.item() == item)
    }

    /// Number of work items in the job.
    pub fn total(&self) -> usize {
        self.total
    }

    /// Number of probes that ran to completion (hit, miss or timeout).
    pub fn probed(&self) -> usize {
        self.probed
    }

    /// Whether the stop signal cut the job short.
    pub fn is_cancelled(&self) -> bool {
        self.cancelled
    }

    /// Open ports with their service names, by port number.
    pub fn open_ports(&self) -> Vec<(u16, String)> {
        let mut ports: Vec<(u16, String)> = self
            .hits
            .iter()
            .filter_map(|hit| match (hit.item(), hit.payload()) {
                (WorkItem::Port(port), Some(Classification::Service(name))) => {
                    Some((*port, name.clone()))
                }
                (WorkItem::Port(port), _) => Some((*port, UNKNOWN_SERVICE.to_string())),
                _ => None,
            })
            .collect();
        ports.sort_unstable_by_key(|(port, _)| *port);
        ports
    }

    /// Discovered directory URLs, sorted.
    pub fn urls(&self) -> Vec<String> {
        let mut urls: Vec<String> = self
            .hits
            .iter()
            .filter_map(|hit| match hit.payload() {
                Some(Classification::Url(url)) => Some(url.clone()),
                _ => None,
            })
            .collect();
        urls.sort_unstable();
        urls
    }

    /// Subdomains that answered, sorted.
    pub fn live_subdomains(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .hits
            .iter()
            .filter_map(|hit| match hit.item() {
                WorkItem::Subdomain(name) => Some(name.clone()),
                _ => None,
            })
            .collect();
        names.sort_unstable();
        names
    }

    /// Subdomains with the addresses they resolved to.
    pub fn resolved_subdomains(&self) -> BTreeMap<String, Vec<IpAddr>> {
        self.hits
            .iter()
            .filter_map(|hit| match (hit.item(), hit.payload()) {
                (WorkItem::Subdomain(name), Some(Classification::Addresses(addrs))) => {
                    Some((name.clone(), addrs.clone()))
                }
                _ => None,
            })
            .collect()
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
