//! Platform services for GitHub
//!
//! The lifecycle only ever talks to a repository through [`PlatformService`],
//! so tests can swap in a scripted double.

mod detection;
mod github;

pub use detection::parse_repo_spec;
pub use github::GitHubService;

use crate::error::Result;
use crate::types::{Comparison, PlatformConfig, PullRequest};
use async_trait::async_trait;

/// Platform service trait for the PR operations the lifecycle needs
#[async_trait]
pub trait PlatformService: Send + Sync {
    /// List every open PR, in the order the platform returns them
    async fn list_open_prs(&self) -> Result<Vec<PullRequest>>;

    /// List the label names attached to a PR
    async fn list_labels(&self, pr_number: u64) -> Result<Vec<String>>;

    /// Compare `base...head`
    async fn compare_refs(&self, base: &str, head: &str) -> Result<Comparison>;

    /// Ask the platform to bring the PR branch up to date with its base
    async fn request_branch_update(&self, pr_number: u64) -> Result<()>;

    /// Fetch a fresh snapshot of a PR, including merge state
    async fn get_pr(&self, pr_number: u64) -> Result<PullRequest>;

    /// Submit an approving review
    async fn approve_pr(&self, pr_number: u64) -> Result<()>;

    /// Create a comment on a PR
    async fn create_pr_comment(&self, pr_number: u64, body: &str) -> Result<()>;

    /// Get the platform configuration
    fn config(&self) -> &PlatformConfig;
}
