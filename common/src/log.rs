//! Logging macros used across the workspace.
//!
//! They forward to `tracing` under fixed targets so the terminal formatter can
//! tell a confirmation (`success!`) apart from a plain `info!`.

pub const TARGET: &str = "reconic";
pub const SUCCESS_TARGET: &str = "reconic::success";
pub const PRINT_TARGET: &str = "reconic::print";

#[macro_export]
macro_rules! info {
    ($($arg:tt)*) => {
        $crate::tracing::info!(target: "reconic", $($arg)*)
    };
}

#[macro_export]
macro_rules! success {
    ($($arg:tt)*) => {
        $crate::tracing::info!(target: "reconic::success", $($arg)*)
    };
}

#[macro_export]
macro_rules! warn {
    ($($arg:tt)*) => {
        $crate::tracing::warn!(target: "reconic", $($arg)*)
    };
}

#[macro_export]
macro_rules! error {
    ($($arg:tt)*) => {
        $crate::tracing::error!(target: "reconic", $($arg)*)
    };
}
