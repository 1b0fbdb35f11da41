//! Shared helpers for taskmill's integration tests.
//!
//! - [`bodies`]: canned task bodies plus probes that record concurrency and
//!   start/end times.
//! - [`builders`]: fluent builders for plan configs.

pub mod bodies;
pub mod builders;

use std::future::Future;
use std::sync::Once;
use std::time::Duration;

use tracing_subscriber::{EnvFilter, fmt};

/// Upper bound for a single awaited step in a test.
pub const TEST_DEADLINE: Duration = Duration::from_secs(5);

static TRACING: Once = Once::new();

/// Install a test-writer subscriber once per test binary.
///
/// Output is only shown for failing tests (or with `--nocapture`). The
/// filter comes from `TASKMILL_LOG`, then `RUST_LOG`, then `warn`.
pub fn init_tracing() {
    TRACING.call_once(|| {
        let filter = EnvFilter::try_from_env("TASKMILL_LOG")
            .or_else(|_| EnvFilter::try_from_default_env())
            .unwrap_or_else(|_| EnvFilter::new("warn"));

        // Another harness may have installed a subscriber already.
        let _ = fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .try_init();
    });
}

/// Await `f`, panicking if it takes longer than [`TEST_DEADLINE`].
///
/// With a paused clock the deadline is virtual time, so a run that waits
/// forever fails fast instead of hanging the test.
pub async fn with_timeout<F: Future>(f: F) -> F::Output {
    match tokio::time::timeout(TEST_DEADLINE, f).await {
        Ok(out) => out,
        Err(_) => panic!("test step did not finish within {TEST_DEADLINE:?}"),
    }
}
