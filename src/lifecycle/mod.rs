//! Lifecycle engine for labeled dependency-update PRs
//!
//! Three phases:
//! 1. Gather - list open PRs, keep the labeled ones, compare each (read-only)
//! 2. Plan - create a `LifecyclePlan` per PR (pure, testable)
//! 3. Execute - update, approve, announce, and wait (effectful)
//!
//! PRs are handled one at a time in listing order. Comparison happens right
//! before each PR is executed, because landing one PR moves the base branch
//! of the next.

mod execute;
mod plan;
mod poll;
mod progress;

pub use execute::{PrOutcome, execute_plan};
pub use plan::{
    DEFAULT_COMMENT, DEFAULT_LABEL, LifecycleOptions, LifecyclePlan, LifecycleStep,
    create_lifecycle_plan, has_label, needs_update,
};
pub use poll::{wait_for_clean, wait_for_merge};
pub use progress::{LifecycleStage, NoopProgress, ProgressCallback};

use crate::error::{Error, Result};
use crate::platform::PlatformService;
use crate::types::PullRequest;
use tracing::{debug, info};

/// PRs split by the label filter
#[derive(Debug, Clone, Default)]
pub struct LabelSelection {
    /// Labeled PRs, in listing order
    pub matched: Vec<PullRequest>,
    /// Numbers of PRs without the label
    pub filtered_out: Vec<u64>,
}

/// Summary of a completed run
#[derive(Debug, Clone, Default)]
pub struct LifecycleReport {
    /// Per-PR outcomes, in processing order
    pub merged: Vec<PrOutcome>,
    /// Numbers of PRs without the label
    pub filtered_out: Vec<u64>,
}

/// Split PRs by whether they carry `label`
///
/// Labels are fetched from the platform per PR.
pub async fn select_labeled(
    platform: &dyn PlatformService,
    prs: Vec<PullRequest>,
    label: &str,
    progress: &dyn ProgressCallback,
) -> Result<LabelSelection> {
    let mut selection = LabelSelection::default();

    for pr in prs {
        progress.on_stage(pr.number, LifecycleStage::Discovered).await;
        let labels = platform.list_labels(pr.number).await?;

        if has_label(labels.as_slice(), label) {
            debug!(pr_number = pr.number, label, "PR carries marker label");
            progress.on_stage(pr.number, LifecycleStage::Labeled).await;
            selection.matched.push(pr);
        } else {
            progress
                .on_stage(pr.number, LifecycleStage::FilteredOut)
                .await;
            selection.filtered_out.push(pr.number);
        }
    }

    Ok(selection)
}

/// List open PRs and keep the labeled ones
///
/// Having no open PRs, or none with the label, is an error: a run with
/// nothing to do is treated as a failed run.
pub async fn gather_candidates(
    platform: &dyn PlatformService,
    label: &str,
    progress: &dyn ProgressCallback,
) -> Result<LabelSelection> {
    let prs = platform.list_open_prs().await?;
    if prs.is_empty() {
        return Err(Error::NoPullRequests);
    }

    let selection = select_labeled(platform, prs, label, progress).await?;
    if selection.matched.is_empty() {
        return Err(Error::NoMatchingPullRequests {
            label: label.to_string(),
        });
    }

    info!(
        matched = selection.matched.len(),
        filtered_out = selection.filtered_out.len(),
        label,
        "selected PRs"
    );
    Ok(selection)
}

/// Plan every labeled PR without executing anything
///
/// Only read-only platform calls are made. Used for dry runs and previews.
pub async fn plan_lifecycle(
    platform: &dyn PlatformService,
    options: &LifecycleOptions,
    progress: &dyn ProgressCallback,
) -> Result<Vec<LifecyclePlan>> {
    let selection = gather_candidates(platform, &options.label, progress).await?;

    let mut plans = Vec::with_capacity(selection.matched.len());
    for pr in &selection.matched {
        let comparison = platform.compare_refs(&pr.base_ref, &pr.head_ref).await?;
        plans.push(create_lifecycle_plan(pr, comparison, options));
    }
    Ok(plans)
}

/// Run the full lifecycle over every labeled PR
///
/// Stops at the first error; PRs after it are not touched.
pub async fn run_lifecycle(
    platform: &dyn PlatformService,
    options: &LifecycleOptions,
    progress: &dyn ProgressCallback,
) -> Result<LifecycleReport> {
    let selection = gather_candidates(platform, &options.label, progress).await?;
    let mut report = LifecycleReport {
        merged: Vec::with_capacity(selection.matched.len()),
        filtered_out: selection.filtered_out,
    };

    for pr in &selection.matched {
        progress
            .on_message(&format!("🔍 Checking PR #{}: {}", pr.number, pr.title))
            .await;
        let comparison = platform.compare_refs(&pr.base_ref, &pr.head_ref).await?;
        let plan = create_lifecycle_plan(pr, comparison, options);
        let outcome = execute_plan(&plan, platform, options, progress).await?;
        report.merged.push(outcome);
    }

    Ok(report)
}
