//! Tracing configuration for test output.

use std::sync::Once;

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

static INIT: Once = Once::new();

/// Initialize tracing for tests.
///
/// Safe to call from every test; only the first call installs the
/// subscriber. Uses `RUST_LOG` if set, otherwise defaults to `info` with
/// this crate at `debug`.
pub fn init_test_tracing() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("info,xcp_conformance=debug"));

        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .with_test_writer()
                    .compact(),
            )
            .init();
    });
}
