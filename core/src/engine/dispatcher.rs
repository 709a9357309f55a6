//! A **sliding-window** dispatcher.
//!
//! At most `limit` probes are in flight at once. When the window is full the
//! loop waits for any one probe to finish, harvests it and admits the next
//! item, so the pool stays saturated instead of draining in batches. Every probe
//! runs as its own task on the runtime's worker threads and is abandoned (a
//! miss) once it exceeds the per-probe timeout.

use std::num::NonZeroUsize;
use std::sync::Arc;
use std::time::Duration;

use reconic_common::models::job::ScanJob;
use reconic_common::models::outcome::ProbeOutcome;
use reconic_common::models::work::WorkItem;
use tokio::task::{JoinError, JoinSet};
use tracing::{debug, error, trace};

use super::aggregator::{ResultAggregator, ScanReport};
use super::progress::{NoProgress, ProgressReporter};
use super::signal::StopSignal;
use crate::probe::Probe;

/// Progress is reported every this many submitted items.
pub const PROGRESS_INTERVAL: usize = 100;

/// How a dispatch went, independent of what it found.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DispatchSummary {
    /// Items handed to the dispatcher.
    pub total: usize,
    /// Items admitted into the window.
    pub submitted: usize,
    /// Admitted probes that finished (hit, miss or timeout).
    pub completed: usize,
    /// The stop signal ended admission early.
    pub cancelled: bool,
}

pub struct Dispatcher {
    progress: Arc<dyn ProgressReporter>,
    stop: StopSignal,
    progress_interval: usize,
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self {
            progress: Arc::new(NoProgress),
            stop: StopSignal::new(),
            progress_interval: PROGRESS_INTERVAL,
        }
    }
}

impl Dispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_progress(mut self, progress: Arc<dyn ProgressReporter>) -> Self {
        self.progress = progress;
        self
    }

    pub fn with_stop_signal(mut self, stop: StopSignal) -> Self {
        self.stop = stop;
        self
    }

    pub fn with_progress_interval(mut self, interval: usize) -> Self {
        self.progress_interval = interval.max(1);
        self
    }

    /// Runs a whole job and returns its sealed report.
    pub async fn run<P>(&self, job: &ScanJob, probe: Arc<P>) -> ScanReport
    where
        P: Probe + ?Sized,
    {
        let mut aggregator = ResultAggregator::new(job.target().clone());

        let summary: DispatchSummary = self
            .drive(job.items(), probe, job.concurrency(), job.timeout(), |outcome| {
                aggregator.record(outcome);
            })
            .await;

        debug!(
            hits = aggregator.len(),
            probed = summary.completed,
            total = summary.total,
            "dispatch drained"
        );
        aggregator.finish(summary)
    }

    /// Probes every item and returns every outcome, misses included, in completion order.
    pub async fn dispatch<P>(
        &self,
        items: &[WorkItem],
        probe: Arc<P>,
        limit: NonZeroUsize,
        timeout: Duration,
    ) -> Vec<ProbeOutcome>
    where
        P: Probe + ?Sized,
    {
        let mut outcomes: Vec<ProbeOutcome> = Vec::with_capacity(items.len());
        self.drive(items, probe, limit, timeout, |outcome| outcomes.push(outcome))
            .await;
        outcomes
    }

    async fn drive<P, F>(
        &self,
        items: &[WorkItem],
        probe: Arc<P>,
        limit: NonZeroUsize,
        timeout: Duration,
        mut sink: F,
    ) -> DispatchSummary
    where
        P: Probe + ?Sized,
        F: FnMut(ProbeOutcome),
    {
        let mut summary = DispatchSummary {
            total: items.len(),
            ..DispatchSummary::default()
        };
        let mut in_flight: JoinSet<ProbeOutcome> = JoinSet::new();

        for item in items {
            while in_flight.len() >= limit.get() {
                let Some(joined) = in_flight.join_next().await else {
                    break;
                };
                summary.completed += 1;
                harvest(joined, &mut sink);
            }

            if self.stop.is_raised() {
                debug!(submitted = summary.submitted, "stop signal raised, draining");
                summary.cancelled = true;
                break;
            }

            in_flight.spawn(run_probe(Arc::clone(&probe), item.clone(), timeout));
            summary.submitted += 1;

            if summary.submitted % self.progress_interval == 0 {
                self.progress.tick(summary.completed, summary.total);
            }
        }

        while let Some(joined) = in_flight.join_next().await {
            summary.completed += 1;
            harvest(joined, &mut sink);
        }

        self.progress.finish(summary.completed, summary.total);
        summary
    }
}

async fn run_probe<P>(probe: Arc<P>, item: WorkItem, timeout: Duration) -> ProbeOutcome
where
    P: Probe + ?Sized,
{
    match tokio::time::timeout(timeout, probe.probe(item.clone())).await {
        Ok(outcome) => outcome,
        Err(_elapsed) => {
            trace!(%item, "probe abandoned after {timeout:?}");
            ProbeOutcome::miss(item)
        }
    }
}

fn harvest<F>(joined: Result<ProbeOutcome, JoinError>, sink: &mut F)
where
    F: FnMut(ProbeOutcome),
{
    match joined {
        Ok(outcome) => sink(outcome),
        Err(e) => error!("probe task failed: {e}"),
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

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use reconic_common::models::outcome::Classification;
    use reconic_common::models::target::Target;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Hits even ports, sleeps a little and records the peak number of concurrent calls.
    #[derive(Default)]
    struct GaugeProbe {
        current: AtomicUsize,
        peak: AtomicUsize,
        calls: AtomicUsize,
    }

    #[async_trait]
    impl Probe for GaugeProbe {
        async fn probe(&self, item: WorkItem) -> ProbeOutcome {
            let now = self.current.fetch_add(1, Ordering::SeqCst) + 1;
            self.peak.fetch_max(now, Ordering::SeqCst);
            self.calls.fetch_add(1, Ordering::SeqCst);

            tokio::time::sleep(Duration::from_millis(10)).await;

            self.current.fetch_sub(1, Ordering::SeqCst);
            match item {
                WorkItem::Port(port) if port % 2 == 0 => {
                    ProbeOutcome::hit(item, Classification::Service("even".to_string()))
                }
                other => ProbeOutcome::miss(other),
            }
        }
    }

    /// Never answers for port 1, answers immediately otherwise.
    struct HangingProbe;

    #[async_trait]
    impl Probe for HangingProbe {
        async fn probe(&self, item: WorkItem) -> ProbeOutcome {
            if item == WorkItem::Port(1) {
                std::future::pending::<()>().await;
            }
            ProbeOutcome::bare_hit(item)
        }
    }

    /// Logs `start N` / `end N` per port; port 1 takes far longer than the rest.
    #[derive(Default)]
    struct OneSlowProbe {
        events: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl Probe for OneSlowProbe {
        async fn probe(&self, item: WorkItem) -> ProbeOutcome {
            let WorkItem::Port(port) = item else {
                return ProbeOutcome::miss(item);
            };
            self.events.lock().unwrap().push(format!("start {port}"));

            let delay = if port == 1 { 300 } else { 10 };
            tokio::time::sleep(Duration::from_millis(delay)).await;

            self.events.lock().unwrap().push(format!("end {port}"));
            ProbeOutcome::miss(item)
        }
    }

    #[derive(Default)]
    struct RecordingProgress {
        ticks: Mutex<Vec<(usize, usize)>>,
        finished: Mutex<Option<(usize, usize)>>,
    }

    impl ProgressReporter for RecordingProgress {
        fn tick(&self, completed: usize, total: usize) {
            self.ticks.lock().unwrap().push((completed, total));
        }

        fn finish(&self, completed: usize, total: usize) {
            self.tick(completed, total);
            *self.finished.lock().unwrap() = Some((completed, total));
        }
    }

    fn ports(range: std::ops::RangeInclusive<u16>) -> Vec<WorkItem> {
        range.map(WorkItem::Port).collect()
    }

    fn job(items: Vec<WorkItem>, limit: usize) -> ScanJob {
        let target = Target::Host {
            name: "localhost".to_string(),
        };
        ScanJob::new(target, items, limit, Duration::from_secs(5)).unwrap()
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn in_flight_never_exceeds_limit() {
        for limit in [1, 3, 16] {
            let probe = Arc::new(GaugeProbe::default());
            let report = Dispatcher::new()
                .run(&job(ports(1..=120), limit), Arc::clone(&probe))
                .await;

            assert!(
                probe.peak.load(Ordering::SeqCst) <= limit,
                "peak {} exceeded limit {limit}",
                probe.peak.load(Ordering::SeqCst)
            );
            assert_eq!(probe.calls.load(Ordering::SeqCst), 120);
            assert_eq!(report.len(), 60);
            assert_eq!(report.probed(), 120);
        }
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn window_is_kept_saturated() {
        let probe = Arc::new(GaugeProbe::default());
        Dispatcher::new()
            .run(&job(ports(1..=64), 8), Arc::clone(&probe))
            .await;

        assert_eq!(probe.peak.load(Ordering::SeqCst), 8);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn slow_item_does_not_hold_back_the_window() {
        let probe = Arc::new(OneSlowProbe::default());
        Dispatcher::new()
            .run(&job(ports(1..=6), 2), Arc::clone(&probe))
            .await;

        let events = probe.events.lock().unwrap();
        let position = |event: &str| events.iter().position(|e| e == event).unwrap();

        assert_eq!(events.len(), 12);
        assert!(
            position("start 6") < position("end 1"),
            "later items waited for the slow one: {events:?}"
        );
    }

    #[tokio::test]
    async fn hung_probe_is_abandoned_as_miss() {
        let items = ports(1..=3);
        let outcomes = Dispatcher::new()
            .dispatch(
                &items,
                Arc::new(HangingProbe),
                NonZeroUsize::new(3).unwrap(),
                Duration::from_millis(50),
            )
            .await;

        assert_eq!(outcomes.len(), 3);
        let hung = outcomes
            .iter()
            .find(|o| o.item() == &WorkItem::Port(1))
            .unwrap();
        assert!(!hung.is_success());
        assert_eq!(outcomes.iter().filter(|o| o.is_success()).count(), 2);
    }

    #[tokio::test]
    async fn raised_stop_signal_admits_nothing() {
        let stop = StopSignal::new();
        stop.raise();

        let probe = Arc::new(GaugeProbe::default());
        let report = Dispatcher::new()
            .with_stop_signal(stop)
            .run(&job(ports(1..=10), 2), Arc::clone(&probe))
            .await;

        assert!(report.is_empty());
        assert!(report.is_cancelled());
        assert_eq!(probe.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn stop_mid_scan_drains_in_flight_only() {
        struct StoppingProbe(StopSignal);

        #[async_trait]
        impl Probe for StoppingProbe {
            async fn probe(&self, item: WorkItem) -> ProbeOutcome {
                if item == WorkItem::Port(2) {
                    self.0.raise();
                }
                ProbeOutcome::bare_hit(item)
            }
        }

        let stop = StopSignal::new();
        let report = Dispatcher::new()
            .with_stop_signal(stop.clone())
            .run(&job(ports(1..=50), 1), Arc::new(StoppingProbe(stop)))
            .await;

        assert!(report.is_cancelled());
        assert_eq!(report.len(), 2);
        assert!(report.contains(&WorkItem::Port(1)));
        assert!(report.contains(&WorkItem::Port(2)));
    }

    #[tokio::test]
    async fn progress_ticks_every_interval_and_on_finish() {
        let progress = Arc::new(RecordingProgress::default());
        Dispatcher::new()
            .with_progress(progress.clone())
            .with_progress_interval(10)
            .run(&job(ports(1..=25), 4), Arc::new(GaugeProbe::default()))
            .await;

        let ticks = progress.ticks.lock().unwrap();
        assert_eq!(ticks.len(), 3);
        assert!(ticks.iter().all(|(_, total)| *total == 25));
        assert_eq!(ticks.last(), Some(&(25, 25)));
        assert_eq!(*progress.finished.lock().unwrap(), Some((25, 25)));
    }

    #[tokio::test]
    async fn cancelled_dispatch_finishes_with_partial_count() {
        let stop = StopSignal::new();
        stop.raise();
        let progress = Arc::new(RecordingProgress::default());

        Dispatcher::new()
            .with_progress(progress.clone())
            .with_stop_signal(stop)
            .run(&job(ports(1..=10), 2), Arc::new(GaugeProbe::default()))
            .await;

        assert_eq!(*progress.finished.lock().unwrap(), Some((0, 10)));
    }

    #[tokio::test]
    async fn empty_job_yields_empty_report() {
        let report = Dispatcher::new()
            .run(&job(Vec::new(), 4), Arc::new(GaugeProbe::default()))
            .await;

        assert!(report.is_empty());
        assert!(!report.is_cancelled());
        assert_eq!(report.total(), 0);
    }

    #[tokio::test]
    async fn works_through_trait_objects() {
        let probe: Arc<dyn Probe> = Arc::new(GaugeProbe::default());
        let report = Dispatcher::new().run(&job(ports(1..=4), 2), probe).await;

        assert!(report.contains(&WorkItem::Port(2)));
        assert!(report.contains(&WorkItem::Port(4)));
        assert_eq!(report.len(), 2);
    }
}
