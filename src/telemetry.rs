//! Logging setup for the filter binary
//!
//! Installs a `tracing-subscriber` fmt layer writing to stderr, so log lines
//! never interleave with the selected identifiers printed on stdout.

use std::sync::Once;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

static INIT: Once = Once::new();

/// Install the global subscriber
///
/// `RUST_LOG` takes precedence when set. Otherwise only this crate's events
/// are shown, through the directive `random_test_filter=<default_level>`
/// built from `observability.log_level`. The first call wins; later calls
/// return without touching the installed subscriber.
///
/// # Examples
///
/// ```no_run
/// random_test_filter::telemetry::init("warn");
/// tracing::warn!("Filter starting");
/// ```
pub fn init(default_level: &str) {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(default_directive(default_level)));

        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    });
}

fn default_directive(level: &str) -> String {
    format!("random_test_filter={}", level.to_ascii_lowercase())
}
