//! Process-wide tracing setup for the catalog binaries and tests.

pub mod tracing;

pub use crate::tracing::TracingOptions;

/// Initialize process-wide tracing with JSON output and an `info` default filter.
///
/// Safe to call multiple times; subsequent calls are no-ops.
pub fn init() {
    tracing::init(TracingOptions::default());
}
