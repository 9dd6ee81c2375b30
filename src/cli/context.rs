//! Command configuration and shared context
//!
//! Resolves the repository reference and token, builds the platform service
//! and the lifecycle options. Every configuration problem surfaces here,
//! before any GitHub call is made.

use clap::Args;
use renovate_pilot::error::{Error, Result};
use renovate_pilot::lifecycle::{DEFAULT_COMMENT, DEFAULT_LABEL, LifecycleOptions};
use renovate_pilot::platform::{GitHubService, PlatformService, parse_repo_spec};
use std::time::Duration;

/// Arguments for a run
///
/// Flags take precedence over the matching environment variables.
#[derive(Args, Debug, Clone, Default)]
pub struct RunArgs {
    /// Repository as "owner/name"
    #[arg(long, env = "GITHUB_REPO")]
    pub repo: Option<String>,

    /// GitHub access token
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// GitHub Enterprise host (API at https://<host>/api/v3)
    #[arg(long, env = "GITHUB_HOST")]
    pub host: Option<String>,

    /// Label that marks PRs to land
    #[arg(long, default_value = DEFAULT_LABEL)]
    pub label: String,

    /// Comment that triggers the downstream merge
    #[arg(long, default_value = DEFAULT_COMMENT)]
    pub comment: String,

    /// Seconds between merge-readiness polls
    #[arg(
        long,
        value_name = "SECS",
        default_value_t = 5,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub check_interval: u64,

    /// Seconds to wait for checks before aborting the run
    #[arg(long, value_name = "SECS", default_value_t = 120)]
    pub check_timeout: u64,

    /// Seconds between merged-flag polls
    #[arg(
        long,
        value_name = "SECS",
        default_value_t = 10,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub merge_interval: u64,

    /// Give up waiting for a merge after this many seconds (default: wait forever)
    #[arg(long, value_name = "SECS")]
    pub merge_timeout: Option<u64>,

    /// Seconds to wait after requesting a branch update
    #[arg(long, value_name = "SECS")]
    pub settle_delay: Option<u64>,

    /// Wait for checks before approving instead of after
    #[arg(long)]
    pub checks_before_approval: bool,

    /// Also wait for checks on PRs that were already up to date
    #[arg(long)]
    pub poll_checks_when_current: bool,

    /// Show what would be done without approving, commenting or updating
    #[arg(long)]
    pub dry_run: bool,

    /// Preview the plan and prompt before executing
    #[arg(long)]
    pub confirm: bool,
}

impl RunArgs {
    /// Lifecycle policy from the flags
    pub fn lifecycle_options(&self) -> LifecycleOptions {
        LifecycleOptions {
            label: self.label.clone(),
            comment_body: self.comment.clone(),
            check_interval: Duration::from_secs(self.check_interval),
            check_timeout: Duration::from_secs(self.check_timeout),
            merge_interval: Duration::from_secs(self.merge_interval),
            merge_timeout: self.merge_timeout.map(Duration::from_secs),
            settle_delay: self.settle_delay.map(Duration::from_secs),
            approve_before_checks: !self.checks_before_approval,
            poll_checks_on_up_to_date: self.poll_checks_when_current,
        }
    }
}

/// Treat unset and blank values the same
fn required(value: Option<&str>, what: &str, flag: &str, env: &str) -> Result<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(ToString::to_string)
        .ok_or_else(|| Error::Config(format!("{what} missing: pass {flag} or set {env}")))
}

/// Shared context for a run
pub struct CommandContext {
    /// Platform service (GitHub)
    pub platform: Box<dyn PlatformService>,
    /// Lifecycle policy
    pub options: LifecycleOptions,
}

impl CommandContext {
    /// Resolve configuration and build the GitHub service
    pub fn new(args: &RunArgs) -> Result<Self> {
        let repo = required(args.repo.as_deref(), "repository", "--repo", "GITHUB_REPO")?;
        let token = required(args.token.as_deref(), "token", "--token", "GITHUB_TOKEN")?;
        let host = args
            .host
            .as_deref()
            .map(str::trim)
            .filter(|h| !h.is_empty())
            .map(ToString::to_string);

        let config = parse_repo_spec(&repo, host)?;
        let platform = GitHubService::new(&token, config)?;

        Ok(Self {
            platform: Box::new(platform),
            options: args.lifecycle_options(),
        })
    }
}
