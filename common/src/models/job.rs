use std::collections::HashSet;
use std::num::NonZeroUsize;
use std::time::Duration;

use crate::error::ScanError;

use super::target::Target;
use super::work::WorkItem;

/// The bound configuration of one dispatch.
///
/// Built once per operation and read-only while the job runs. Work items are
/// deduplicated on construction, keeping the order of first appearance.
#[derive(Clone, Debug)]
pub struct ScanJob {
    target: Target,
    items: Vec<WorkItem>,
    concurrency: NonZeroUsize,
    timeout: Duration,
}

impl ScanJob {
    pub fn new<I>(
        target: Target,
        items: I,
        concurrency: usize,
        timeout: Duration,
    ) -> Result<Self, ScanError>
    where
        I: IntoIterator<Item = WorkItem>,
    {
        let concurrency = NonZeroUsize::new(concurrency).ok_or(ScanError::InvalidConcurrency)?;
        if timeout.is_zero() {
            return Err(ScanError::InvalidTimeout);
        }

        let mut seen: HashSet<WorkItem> = HashSet::new();
        let items: Vec<WorkItem> = items
            .into_iter()
            .filter(|item| seen.insert(item.clone()))
            .collect();

        Ok(Self {
            target,
            items,
            concurrency,
            timeout,
        })
    }

    pub fn target(&self) -> &Target {
        &self.target
    }

    pub fn items(&self) -> &[WorkItem] {
        &self.items
    }

    pub fn concurrency(&self) -> NonZeroUsize {
        self.concurrency
    }

    /// Upper bound for a single probe; a probe still running after it is abandoned.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
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
