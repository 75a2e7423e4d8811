//! Logging helpers for tests.

use tracing_subscriber::fmt;

/// Install a `tracing` subscriber that writes through the test harness.
///
/// Safe to call from every test; only the first call installs a subscriber.
pub fn init() {
    let _ = fmt()
        .with_max_level(tracing_subscriber::filter::LevelFilter::TRACE)
        .with_test_writer()
        .try_init();
}
