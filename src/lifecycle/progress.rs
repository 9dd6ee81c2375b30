//! Progress reporting for the lifecycle

use async_trait::async_trait;

/// Lifecycle stages a PR moves through
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleStage {
    /// Listed as open
    Discovered,
    /// Missing the marker label; left alone
    FilteredOut,
    /// Carries the marker label
    Labeled,
    /// Head is ahead of base
    UpToDate,
    /// Head needs an update from base
    NeedsUpdate,
    /// Approving review submitted
    Approved,
    /// Polling merge-readiness
    AwaitingChecks,
    /// Merge-readiness is clean (or assumed clean)
    ChecksGreen,
    /// Merge-trigger comment posted, polling merged flag
    AwaitingMerge,
    /// Reported merged
    Merged,
}

impl std::fmt::Display for LifecycleStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Discovered => "discovered",
            Self::FilteredOut => "filtered out",
            Self::Labeled => "labeled",
            Self::UpToDate => "up to date",
            Self::NeedsUpdate => "needs update",
            Self::Approved => "approved",
            Self::AwaitingChecks => "awaiting checks",
            Self::ChecksGreen => "checks green",
            Self::AwaitingMerge => "awaiting merge",
            Self::Merged => "merged",
        };
        write!(f, "{name}")
    }
}

/// Receives lifecycle progress
#[async_trait]
pub trait ProgressCallback: Send + Sync {
    /// A PR entered a stage
    async fn on_stage(&self, pr_number: u64, stage: LifecycleStage);

    /// A poller observed a value that did not end the wait
    async fn on_poll(&self, _pr_number: u64, _attempt: u32, _observed: &str) {}

    /// Free-form status message
    async fn on_message(&self, message: &str);
}

/// Progress sink that discards everything
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopProgress;

#[async_trait]
impl ProgressCallback for NoopProgress {
    async fn on_stage(&self, _pr_number: u64, _stage: LifecycleStage) {}

    async fn on_message(&self, _message: &str) {}
}
