//! # Reconic Core
//!
//! The bounded-concurrency probe engine and the scans built on it.
//!
//! * [`engine`]: dispatcher, aggregator, progress and cancellation.
//! * [`probe`]: the per-item network probes.
//! * [`network`]: one-off resolution done before a dispatch starts.
//! * [`scanner`]: port, directory and subdomain operations.

pub mod engine;
pub mod network;
pub mod probe;
pub mod scanner;
