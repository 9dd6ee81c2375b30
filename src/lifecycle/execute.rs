//! Lifecycle execution - effectful operations
//!
//! Takes a `LifecyclePlan` (created by the pure planning functions) and runs
//! it against the platform. Every error except a failed branch-update
//! request propagates and ends the run.

use crate::error::Result;
use crate::lifecycle::plan::{LifecycleOptions, LifecyclePlan, LifecycleStep};
use crate::lifecycle::poll::{wait_for_clean, wait_for_merge};
use crate::lifecycle::progress::{LifecycleStage, ProgressCallback};
use crate::platform::PlatformService;
use tracing::{info, warn};

/// Outcome of one PR's lifecycle
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PrOutcome {
    /// PR number
    pub pr_number: u64,
    /// Whether a branch update was requested
    pub update_requested: bool,
    /// Whether that request failed (and was ignored)
    pub update_failed: bool,
    /// Merge-readiness fetches, zero when checks were not polled
    pub check_polls: u32,
    /// Merged-flag fetches
    pub merge_polls: u32,
}

/// Execute one PR's lifecycle plan (EFFECTFUL)
///
/// Returns once the PR is reported merged.
pub async fn execute_plan(
    plan: &LifecyclePlan,
    platform: &dyn PlatformService,
    options: &LifecycleOptions,
    progress: &dyn ProgressCallback,
) -> Result<PrOutcome> {
    let pr_number = plan.pr_number;
    let mut outcome = PrOutcome {
        pr_number,
        ..PrOutcome::default()
    };
    let mut checks_green = false;

    let entry = if plan.needs_update() {
        LifecycleStage::NeedsUpdate
    } else {
        LifecycleStage::UpToDate
    };
    progress.on_stage(pr_number, entry).await;

    for step in &plan.steps {
        match step {
            LifecycleStep::UpdateBranch => {
                progress
                    .on_message(&format!(
                        "🔄 PR #{pr_number} is {} its base, requesting update",
                        plan.comparison.status
                    ))
                    .await;
                outcome.update_requested = true;

                // A failed update request does not stop the lifecycle
                if let Err(e) = platform.request_branch_update(pr_number).await {
                    warn!(pr_number, error = %e, "branch update request failed, continuing");
                    progress
                        .on_message(&format!(
                            "⚠️  Branch update for PR #{pr_number} failed: {e} (continuing)"
                        ))
                        .await;
                    outcome.update_failed = true;
                }
            }
            LifecycleStep::Settle(delay) => {
                progress
                    .on_message(&format!(
                        "⏳ Waiting {}s for PR #{pr_number} to rebase...",
                        delay.as_secs()
                    ))
                    .await;
                tokio::time::sleep(*delay).await;
            }
            LifecycleStep::Approve => {
                platform.approve_pr(pr_number).await?;
                progress.on_stage(pr_number, LifecycleStage::Approved).await;
            }
            LifecycleStep::AwaitChecks => {
                progress
                    .on_stage(pr_number, LifecycleStage::AwaitingChecks)
                    .await;
                outcome.check_polls = wait_for_clean(
                    platform,
                    pr_number,
                    options.check_interval,
                    options.check_timeout,
                    progress,
                )
                .await?;
                checks_green = true;
                progress
                    .on_stage(pr_number, LifecycleStage::ChecksGreen)
                    .await;
            }
            LifecycleStep::Announce { body } => {
                if !checks_green {
                    checks_green = true;
                    progress
                        .on_stage(pr_number, LifecycleStage::ChecksGreen)
                        .await;
                }
                platform.create_pr_comment(pr_number, body).await?;
                progress
                    .on_stage(pr_number, LifecycleStage::AwaitingMerge)
                    .await;
            }
            LifecycleStep::AwaitMerge => {
                outcome.merge_polls = wait_for_merge(
                    platform,
                    pr_number,
                    options.merge_interval,
                    options.merge_timeout,
                    progress,
                )
                .await?;
                progress.on_stage(pr_number, LifecycleStage::Merged).await;
            }
        }
    }

    info!(
        pr_number,
        updated = outcome.update_requested,
        check_polls = outcome.check_polls,
        merge_polls = outcome.merge_polls,
        "PR lifecycle complete"
    );
    Ok(outcome)
}
