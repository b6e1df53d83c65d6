//! Logging macros shared by every crate in the workspace.
//!
//! All output goes through `tracing`; the CLI formatter decides how each
//! target is rendered.

/// Target used for positive outcomes (`[+]` in the terminal).
pub const SUCCESS_TARGET: &str = "airlock::success";

/// Target used for raw, already formatted terminal lines.
pub const PRINT_TARGET: &str = "airlock::print";

#[doc(hidden)]
pub use tracing;

#[macro_export]
macro_rules! success {
    ($($arg:tt)*) => {
        $crate::log::tracing::info!(target: $crate::log::SUCCESS_TARGET, $($arg)*)
    };
}
