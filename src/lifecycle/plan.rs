//! Lifecycle planning - pure functions for deciding what to do with a PR
//!
//! No I/O happens here. The orchestrator fetches the comparison first and
//! hands it in, so every branch of the state machine can be unit tested.

use crate::types::{Comparison, PullRequest};
use std::time::Duration;

/// Default marker label
pub const DEFAULT_LABEL: &str = "renovate";

/// Default comment that triggers the downstream apply/merge automation
pub const DEFAULT_COMMENT: &str = "atlantis apply";

/// Policy knobs for the per-PR lifecycle
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LifecycleOptions {
    /// Marker label selecting PRs (exact, case-sensitive)
    pub label: String,
    /// Body of the comment that triggers the downstream merge
    pub comment_body: String,
    /// Time between merge-readiness polls
    pub check_interval: Duration,
    /// Upper bound on the merge-readiness wait
    pub check_timeout: Duration,
    /// Time between merged-flag polls
    pub merge_interval: Duration,
    /// Upper bound on the merged-flag wait; `None` waits forever
    pub merge_timeout: Option<Duration>,
    /// Unconditional wait after requesting a branch update
    pub settle_delay: Option<Duration>,
    /// Approve before polling checks (otherwise approve once they are clean)
    pub approve_before_checks: bool,
    /// Also poll checks when the branch was already up to date
    pub poll_checks_on_up_to_date: bool,
}

impl Default for LifecycleOptions {
    fn default() -> Self {
        Self {
            label: DEFAULT_LABEL.to_string(),
            comment_body: DEFAULT_COMMENT.to_string(),
            check_interval: Duration::from_secs(5),
            check_timeout: Duration::from_secs(120),
            merge_interval: Duration::from_secs(10),
            merge_timeout: None,
            settle_delay: None,
            approve_before_checks: true,
            poll_checks_on_up_to_date: false,
        }
    }
}

/// A single step of a PR's lifecycle
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LifecycleStep {
    /// Ask the platform to update the head branch from its base
    UpdateBranch,
    /// Sleep for a fixed time
    Settle(Duration),
    /// Submit an approving review
    Approve,
    /// Poll until merge-readiness is clean or the check timeout elapses
    AwaitChecks,
    /// Post the merge-trigger comment
    Announce {
        /// Comment body
        body: String,
    },
    /// Poll until the PR is merged
    AwaitMerge,
}

impl std::fmt::Display for LifecycleStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UpdateBranch => write!(f, "update branch from base"),
            Self::Settle(d) => write!(f, "wait {}s", d.as_secs()),
            Self::Approve => write!(f, "approve"),
            Self::AwaitChecks => write!(f, "wait for checks to be clean"),
            Self::Announce { body } => write!(f, "comment \"{body}\""),
            Self::AwaitMerge => write!(f, "wait for merge"),
        }
    }
}

/// What will happen to one labeled PR
#[derive(Debug, Clone)]
pub struct LifecyclePlan {
    /// PR number
    pub pr_number: u64,
    /// PR title (for display)
    pub pr_title: String,
    /// PR web URL (for display)
    pub pr_url: String,
    /// Comparison that decided the path
    pub comparison: Comparison,
    /// Ordered steps
    pub steps: Vec<LifecycleStep>,
}

impl LifecyclePlan {
    /// Whether the plan takes the update path
    pub fn needs_update(&self) -> bool {
        self.steps.contains(&LifecycleStep::UpdateBranch)
    }

    /// Whether the plan polls merge-readiness
    pub fn polls_checks(&self) -> bool {
        self.steps.contains(&LifecycleStep::AwaitChecks)
    }
}

/// Whether a label set carries the marker label
pub fn has_label<S: AsRef<str>>(labels: &[S], label: &str) -> bool {
    labels.iter().any(|l| l.as_ref() == label)
}

/// Whether a PR needs a branch update before it can land
pub const fn needs_update(comparison: &Comparison) -> bool {
    !comparison.status.is_up_to_date()
}

/// Create the lifecycle plan for one labeled PR (PURE)
#[must_use]
pub fn create_lifecycle_plan(
    pr: &PullRequest,
    comparison: Comparison,
    options: &LifecycleOptions,
) -> LifecyclePlan {
    let mut steps = Vec::new();
    let update = needs_update(&comparison);

    if update {
        steps.push(LifecycleStep::UpdateBranch);
        if let Some(delay) = options.settle_delay {
            steps.push(LifecycleStep::Settle(delay));
        }
    }

    // The up-to-date path assumes checks are already satisfied unless told otherwise
    let poll_checks = update || options.poll_checks_on_up_to_date;

    if poll_checks && !options.approve_before_checks {
        steps.push(LifecycleStep::AwaitChecks);
        steps.push(LifecycleStep::Approve);
    } else {
        steps.push(LifecycleStep::Approve);
        if poll_checks {
            steps.push(LifecycleStep::AwaitChecks);
        }
    }

    steps.push(LifecycleStep::Announce {
        body: options.comment_body.clone(),
    });
    steps.push(LifecycleStep::AwaitMerge);

    LifecyclePlan {
        pr_number: pr.number,
        pr_title: pr.title.clone(),
        pr_url: pr.html_url.clone(),
        comparison,
        steps,
    }
}
