//! # Reconic Common
//!
//! Shared vocabulary of the workspace: scan targets, work items, probe outcomes,
//! job configuration, typed errors, the port→service map, wordlist loading and
//! the logging macros every crate prints through.

pub mod config;
pub mod error;
pub mod log;
pub mod models;
pub mod services;
pub mod wordlist;

pub use error::ScanError;

#[doc(hidden)]
pub use tracing;
