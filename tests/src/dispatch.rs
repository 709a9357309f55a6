use std::str::FromStr;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use reconic_common::models::job::ScanJob;
use reconic_common::models::outcome::ProbeOutcome;
use reconic_common::models::target::Target;
use reconic_common::models::work::WorkItem;
use reconic_core::engine::{Dispatcher, ProgressReporter};
use reconic_core::probe::Probe;

/// Records the highest number of probes running at once; even ports are hits.
#[derive(Default)]
struct InstrumentedProbe {
    running: AtomicUsize,
    peak: AtomicUsize,
}

#[async_trait]
impl Probe for InstrumentedProbe {
    async fn probe(&self, item: WorkItem) -> ProbeOutcome {
        let now = self.running.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak.fetch_max(now, Ordering::SeqCst);
        tokio::time::sleep(Duration::from_millis(2)).await;
        self.running.fetch_sub(1, Ordering::SeqCst);

        match item {
            WorkItem::Port(port) if port % 2 == 0 => ProbeOutcome::bare_hit(item),
            _ => ProbeOutcome::miss(item),
        }
    }
}

#[derive(Default)]
struct CountingProgress {
    ticks: AtomicUsize,
    finished_with: AtomicUsize,
}

impl ProgressReporter for CountingProgress {
    fn tick(&self, _completed: usize, _total: usize) {
        self.ticks.fetch_add(1, Ordering::SeqCst);
    }

    fn finish(&self, completed: usize, _total: usize) {
        self.finished_with.store(completed, Ordering::SeqCst);
    }
}

fn job(items: usize, limit: usize) -> ScanJob {
    let target = Target::from_str("127.0.0.1").unwrap();
    let ports = (1..=items as u16).map(WorkItem::Port);
    ScanJob::new(target, ports, limit, Duration::from_secs(5)).unwrap()
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrency_ceiling_holds_on_a_multi_threaded_runtime() {
    for limit in [1, 7, 50] {
        let probe = Arc::new(InstrumentedProbe::default());
        let report = Dispatcher::new().run(&job(300, limit), probe.clone()).await;

        let peak = probe.peak.load(Ordering::SeqCst);
        assert!(peak <= limit, "peak {peak} exceeded limit {limit}");
        assert_eq!(report.len(), 150, "half of the ports are hits");
        assert_eq!(report.probed(), 300);
    }
}

#[tokio::test]
async fn progress_is_reported_every_hundred_items_and_at_the_end() {
    let progress = Arc::new(CountingProgress::default());
    let dispatcher = Dispatcher::new().with_progress(progress.clone());

    dispatcher
        .run(&job(350, 25), Arc::new(InstrumentedProbe::default()))
        .await;

    assert_eq!(progress.ticks.load(Ordering::SeqCst), 3);
    assert_eq!(progress.finished_with.load(Ordering::SeqCst), 350);
}
