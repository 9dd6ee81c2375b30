//! Pollers for merge-readiness and merge completion
//!
//! Both re-fetch the PR on every iteration. Time comes from `tokio::time`,
//! so tests drive them with a paused clock.

use crate::error::{Error, Result};
use crate::lifecycle::progress::ProgressCallback;
use crate::platform::PlatformService;
use std::time::Duration;
use tokio::time::{Instant, sleep};
use tracing::debug;

/// Poll until the PR's merge-readiness is clean (BOUNDED)
///
/// Returns the number of fetches it took. Once `timeout` has elapsed without
/// a clean observation the wait fails with [`Error::ChecksTimeout`].
pub async fn wait_for_clean(
    platform: &dyn PlatformService,
    pr_number: u64,
    interval: Duration,
    timeout: Duration,
    progress: &dyn ProgressCallback,
) -> Result<u32> {
    let started = Instant::now();
    let mut attempts = 0;

    loop {
        attempts += 1;
        let pr = platform.get_pr(pr_number).await?;

        if pr.mergeable_state.is_clean() {
            debug!(pr_number, attempts, "checks clean");
            return Ok(attempts);
        }

        let waited = started.elapsed();
        if waited >= timeout {
            return Err(Error::ChecksTimeout { pr_number, waited });
        }

        progress
            .on_poll(pr_number, attempts, &pr.mergeable_state.to_string())
            .await;
        debug!(pr_number, attempts, state = %pr.mergeable_state, "checks not clean yet");

        // Last fetch lands on the deadline
        sleep(interval.min(timeout - waited)).await;
    }
}

/// Poll until the PR reports merged
///
/// With `limit` unset this never gives up. With a limit it fails with
/// [`Error::MergeTimeout`] once that much time has passed.
pub async fn wait_for_merge(
    platform: &dyn PlatformService,
    pr_number: u64,
    interval: Duration,
    limit: Option<Duration>,
    progress: &dyn ProgressCallback,
) -> Result<u32> {
    let started = Instant::now();
    let mut attempts = 0;

    loop {
        attempts += 1;
        let pr = platform.get_pr(pr_number).await?;

        if pr.merged {
            debug!(pr_number, attempts, "merged");
            return Ok(attempts);
        }

        let waited = started.elapsed();
        let pause = match limit {
            Some(limit) if waited >= limit => {
                return Err(Error::MergeTimeout { pr_number, waited });
            }
            Some(limit) => interval.min(limit - waited),
            None => interval,
        };

        progress.on_poll(pr_number, attempts, "not merged").await;
        debug!(pr_number, attempts, "not merged yet");

        sleep(pause).await;
    }
}
