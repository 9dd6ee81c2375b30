//! Core types for renovate-pilot

/// A pull request as seen by the lifecycle
///
/// Always a fresh snapshot: pollers re-fetch it from the platform on every
/// iteration rather than holding on to an old copy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PullRequest {
    /// PR number
    pub number: u64,
    /// PR title
    pub title: String,
    /// Base branch name
    pub base_ref: String,
    /// Head branch name
    pub head_ref: String,
    /// Web URL for the PR
    pub html_url: String,
    /// Aggregate merge-readiness reported by GitHub
    pub mergeable_state: MergeableState,
    /// Whether the PR has been merged
    pub merged: bool,
}

/// GitHub's aggregate merge-readiness state for a PR
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeableState {
    /// All required checks passed and nothing blocks the merge
    Clean,
    /// Merge conflicts
    Dirty,
    /// Mergeable, but non-required checks are failing or pending
    Unstable,
    /// Blocked by branch protection (reviews, required checks)
    Blocked,
    /// Head is out of date with the base branch
    Behind,
    /// PR is a draft
    Draft,
    /// Mergeable with passing commit status and pre-receive hooks
    HasHooks,
    /// Not computed yet, or a state this tool does not know about
    Unknown,
}

impl MergeableState {
    /// Whether this state satisfies the check gate
    pub const fn is_clean(self) -> bool {
        matches!(self, Self::Clean)
    }
}

impl std::fmt::Display for MergeableState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Clean => write!(f, "clean"),
            Self::Dirty => write!(f, "dirty"),
            Self::Unstable => write!(f, "unstable"),
            Self::Blocked => write!(f, "blocked"),
            Self::Behind => write!(f, "behind"),
            Self::Draft => write!(f, "draft"),
            Self::HasHooks => write!(f, "has_hooks"),
            Self::Unknown => write!(f, "unknown"),
        }
    }
}

/// Relationship of a PR head to its base, as reported by the compare API
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompareStatus {
    /// Head contains every base commit plus its own
    Ahead,
    /// Head is missing base commits and has none of its own
    Behind,
    /// Head and base point at the same commit
    Identical,
    /// Both sides have commits the other lacks
    Diverged,
    /// Any other status string
    Unknown(String),
}

impl CompareStatus {
    /// Parse the string form used by the REST API
    pub fn from_api(value: &str) -> Self {
        match value {
            "ahead" => Self::Ahead,
            "behind" => Self::Behind,
            "identical" => Self::Identical,
            "diverged" => Self::Diverged,
            other => Self::Unknown(other.to_string()),
        }
    }

    /// Only `Ahead` lets a PR skip the branch update.
    pub const fn is_up_to_date(&self) -> bool {
        matches!(self, Self::Ahead)
    }
}

impl std::fmt::Display for CompareStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Ahead => write!(f, "ahead"),
            Self::Behind => write!(f, "behind"),
            Self::Identical => write!(f, "identical"),
            Self::Diverged => write!(f, "diverged"),
            Self::Unknown(s) => write!(f, "{s}"),
        }
    }
}

/// Result of comparing a PR's base to its head
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comparison {
    /// Relationship of head to base
    pub status: CompareStatus,
    /// Commits on head that base lacks
    pub ahead_by: u64,
    /// Commits on base that head lacks
    pub behind_by: u64,
}

/// Platform configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlatformConfig {
    /// Repository owner (user or organization)
    pub owner: String,
    /// Repository name
    pub repo: String,
    /// Custom host (None for github.com)
    pub host: Option<String>,
}

impl std::fmt::Display for PlatformConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.owner, self.repo)
    }
}
