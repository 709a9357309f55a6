/// Observer of dispatch progress.
///
/// Called from the dispatch loop itself, so implementations must return
/// immediately: hand the numbers off (a channel, an atomic) and render elsewhere.
pub trait ProgressReporter: Send + Sync {
    /// `completed` probes out of `total` have finished so far.
    fn tick(&self, completed: usize, total: usize);

    /// The dispatch has drained.
    fn finish(&self, completed: usize, total: usize) {
        self.tick(completed, total);
    }
}

/// Discards every tick.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoProgress;

impl ProgressReporter for NoProgress {
    fn tick(&self, _completed: usize, _total: usize) {}
}
