//! # Probe Engine
//!
//! Runs a work set through a [`Probe`](crate::probe::Probe) under a concurrency
//! ceiling and folds the outcomes into a [`ScanReport`](aggregator::ScanReport).
//!
//! * [`dispatcher`]: the sliding-window admission loop.
//! * [`aggregator`]: deduplicating collection of hits.
//! * [`progress`]: the non-blocking progress observer contract.
//! * [`signal`]: cooperative cancellation.

pub mod aggregator;
pub mod dispatcher;
pub mod progress;
pub mod signal;

pub use aggregator::{ResultAggregator, ScanReport};
pub use dispatcher::{DispatchSummary, Dispatcher};
pub use progress::{NoProgress, ProgressReporter};
pub use signal::StopSignal;
