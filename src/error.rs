//! Error types for renovate-pilot

use std::time::Duration;
use thiserror::Error;

/// Errors that abort a run
///
/// Every variant is fatal: the lifecycle has no local recovery, so any error
/// reaching `main` ends the process with a non-zero status.
#[derive(Error, Debug)]
pub enum Error {
    /// Missing or malformed repository reference or token
    #[error("configuration error: {0}")]
    Config(String),

    /// GitHub API failure reported by a raw HTTP call
    #[error("GitHub API error: {0}")]
    GitHubApi(String),

    /// GitHub API failure reported by octocrab
    #[error("GitHub API error: {0}")]
    Octocrab(#[from] octocrab::Error),

    /// Generic platform failure
    #[error("platform error: {0}")]
    Platform(String),

    /// The repository has no open pull requests
    #[error("no open pull requests found")]
    NoPullRequests,

    /// No open pull request carries the marker label
    #[error("no open pull requests found with label '{label}'")]
    NoMatchingPullRequests {
        /// The marker label that was searched for
        label: String,
    },

    /// Required checks did not turn green within the bounded wait
    #[error("checks on PR #{pr_number} did not become clean within {}s", waited.as_secs())]
    ChecksTimeout {
        /// PR being polled
        pr_number: u64,
        /// How long the poller waited
        waited: Duration,
    },

    /// The PR was not merged within the configured merge bound
    #[error("PR #{pr_number} was not merged within {}s", waited.as_secs())]
    MergeTimeout {
        /// PR being polled
        pr_number: u64,
        /// How long the poller waited
        waited: Duration,
    },

    /// Internal failure (prompt I/O and the like)
    #[error("internal error: {0}")]
    Internal(String),
}

/// Result alias using [`Error`]
pub type Result<T> = std::result::Result<T, Error>;
