//! Logging facilities for ButtonKit.
//!
//! ButtonKit uses the `tracing` crate for instrumentation. Nothing is printed
//! unless the host application installs a subscriber:
//!
//! ```ignore
//! fn main() {
//!     tracing_subscriber::fmt()
//!         .with_env_filter("buttonkit=debug,buttonkit_style=trace")
//!         .init();
//! }
//! ```

/// Target names for log filtering.
///
/// Use these with `tracing` directives to filter logs by subsystem.
pub mod targets {
    /// Timer system target.
    pub const TIMER: &str = "buttonkit_core::timer";
    /// Dispatcher target.
    pub const DISPATCH: &str = "buttonkit_core::dispatch";
    /// Signal/slot system target.
    pub const SIGNAL: &str = "buttonkit_core::signal";
    /// Style resolution target.
    pub const RESOLVE: &str = "buttonkit_style::resolve";
    /// Global settings target.
    pub const SETTINGS: &str = "buttonkit_style::settings";
    /// Tap interaction target.
    pub const INTERACTION: &str = "buttonkit::interaction";
    /// Busy spinner target.
    pub const SPINNER: &str = "buttonkit::spinner";
    /// Button widget target.
    pub const BUTTON: &str = "buttonkit::button";
    /// Performance spans.
    pub const PERF: &str = "buttonkit::perf";
}

/// A guard that keeps a tracing span entered until dropped.
///
/// Useful for timing an operation under a subscriber that records span
/// durations.
#[derive(Debug)]
pub struct PerfSpan {
    #[allow(dead_code)]
    span: tracing::span::EnteredSpan,
}

impl PerfSpan {
    /// Create and enter a new performance span.
    pub fn new(name: &'static str) -> Self {
        let span = tracing::debug_span!(target: targets::PERF, "perf", operation = name);
        Self {
            span: span.entered(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn perf_span_under_subscriber() {
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::TRACE)
            .with_test_writer()
            .finish();
        tracing::subscriber::with_default(subscriber, || {
            let _span = PerfSpan::new("test_operation");
            tracing::debug!(target: targets::RESOLVE, value = 3, "inside span");
        });
    }

    #[test]
    fn targets_are_namespaced() {
        for target in [targets::TIMER, targets::DISPATCH, targets::SIGNAL] {
            assert!(target.starts_with("buttonkit_core::"));
        }
        for target in [targets::RESOLVE, targets::SETTINGS] {
            assert!(target.starts_with("buttonkit_style::"));
        }
    }
}
