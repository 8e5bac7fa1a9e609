//! Tracing subscriber installation.

use tracing_subscriber::EnvFilter;

/// How the global subscriber is built. `RUST_LOG` always wins over `default_filter`.
#[derive(Debug, Clone)]
pub struct TracingOptions {
    pub default_filter: String,
    /// JSON lines when true, human-readable output otherwise.
    pub json: bool,
    /// Route output through the test harness capture.
    pub test_writer: bool,
}

impl Default for TracingOptions {
    fn default() -> Self {
        Self {
            default_filter: "info".to_string(),
            json: true,
            test_writer: false,
        }
    }
}

impl TracingOptions {
    /// Readable output captured per test, `debug` by default.
    pub fn for_tests() -> Self {
        Self {
            default_filter: "debug".to_string(),
            json: false,
            test_writer: true,
        }
    }
}

/// Install the global subscriber. Returns `false` when one was already installed.
pub fn init(options: TracingOptions) -> bool {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&options.default_filter));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false);

    match (options.json, options.test_writer) {
        (true, true) => builder.json().with_test_writer().try_init().is_ok(),
        (true, false) => builder.json().try_init().is_ok(),
        (false, true) => builder.with_test_writer().try_init().is_ok(),
        (false, false) => builder.try_init().is_ok(),
    }
}
