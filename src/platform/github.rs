//! GitHub platform service implementation

use crate::error::{Error, Result};
use crate::platform::PlatformService;
use crate::types::{CompareStatus, Comparison, MergeableState, PlatformConfig, PullRequest};
use async_trait::async_trait;
use octocrab::Octocrab;
use reqwest::{Client, Url};
use serde::Deserialize;
use tracing::debug;

/// Public GitHub REST endpoint
const GITHUB_API: &str = "https://api.github.com";

/// Review event that approves a PR
const APPROVE_EVENT: &str = "APPROVE";

/// GitHub service using octocrab
pub struct GitHubService {
    client: Octocrab,
    config: PlatformConfig,
    /// Token for raw HTTP requests (commit comparison)
    token: String,
    /// HTTP client for raw requests (commit comparison)
    http_client: Client,
    /// API base URL for raw requests, without trailing slash
    api_base: String,
}

impl GitHubService {
    /// Create a new GitHub service
    ///
    /// `config.host` selects a GitHub Enterprise instance (`https://<host>/api/v3`).
    pub fn new(token: &str, config: PlatformConfig) -> Result<Self> {
        let api_base = config
            .host
            .as_ref()
            .map_or_else(|| GITHUB_API.to_string(), |h| format!("https://{h}/api/v3"));
        Self::with_api_base(token, config, &api_base)
    }

    /// Create a service against an explicit API base URL
    pub fn with_api_base(token: &str, config: PlatformConfig, api_base: &str) -> Result<Self> {
        let api_base = api_base.trim_end_matches('/').to_string();

        let client = Octocrab::builder()
            .personal_token(token.to_string())
            .base_uri(api_base.as_str())
            .map_err(|e| Error::GitHubApi(e.to_string()))?
            .build()
            .map_err(|e| Error::GitHubApi(e.to_string()))?;

        let http_client = Client::builder()
            .user_agent("renovate-pilot")
            .build()
            .map_err(|e| Error::GitHubApi(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            config,
            token: token.to_string(),
            http_client,
            api_base,
        })
    }

    fn repo_route(&self, suffix: &str) -> String {
        format!("/repos/{}/{}/{suffix}", self.config.owner, self.config.repo)
    }

    /// URL of the compare endpoint for `base...head`
    ///
    /// Ref names may contain `#`, `?` or `%`, so every path segment is
    /// percent-encoded. Slashes inside a ref stay segment separators.
    fn compare_url(&self, base: &str, head: &str) -> Result<Url> {
        let mut url = Url::parse(&self.api_base)
            .map_err(|e| Error::GitHubApi(format!("Invalid API base {}: {e}", self.api_base)))?;
        let range = format!("{base}...{head}");
        url.path_segments_mut()
            .map_err(|()| Error::GitHubApi(format!("Invalid API base {}", self.api_base)))?
            .pop_if_empty()
            .extend(["repos", self.config.owner.as_str(), self.config.repo.as_str(), "compare"])
            .extend(range.split('/'));
        Ok(url)
    }
}

/// Helper to convert octocrab PR to our `PullRequest` type
fn pr_from_octocrab(pr: &octocrab::models::pulls::PullRequest) -> PullRequest {
    use octocrab::models::pulls::MergeableState as Octo;

    let mergeable_state = match pr.mergeable_state {
        Some(Octo::Clean) => MergeableState::Clean,
        Some(Octo::Dirty) => MergeableState::Dirty,
        Some(Octo::Unstable) => MergeableState::Unstable,
        Some(Octo::Blocked) => MergeableState::Blocked,
        Some(Octo::Behind) => MergeableState::Behind,
        Some(Octo::Draft) => MergeableState::Draft,
        Some(Octo::HasHooks) => MergeableState::HasHooks,
        // MergeableState is non-exhaustive
        Some(_) | None => MergeableState::Unknown,
    };

    PullRequest {
        number: pr.number,
        title: pr.title.as_deref().unwrap_or_default().to_string(),
        base_ref: pr.base.ref_field.clone(),
        head_ref: pr.head.ref_field.clone(),
        html_url: pr
            .html_url
            .as_ref()
            .map(ToString::to_string)
            .unwrap_or_default(),
        mergeable_state,
        merged: pr.merged.unwrap_or(false) || pr.merged_at.is_some(),
    }
}

#[async_trait]
impl PlatformService for GitHubService {
    async fn list_open_prs(&self) -> Result<Vec<PullRequest>> {
        debug!(repo = %self.config, "listing open PRs");
        let page = self
            .client
            .pulls(&self.config.owner, &self.config.repo)
            .list()
            .state(octocrab::params::State::Open)
            .per_page(100)
            .send()
            .await?;

        let prs = self.client.all_pages(page).await?;
        let result: Vec<PullRequest> = prs.iter().map(pr_from_octocrab).collect();
        debug!(count = result.len(), "listed open PRs");
        Ok(result)
    }

    async fn list_labels(&self, pr_number: u64) -> Result<Vec<String>> {
        debug!(pr_number, "listing PR labels");
        let labels = self
            .client
            .issues(&self.config.owner, &self.config.repo)
            .list_labels_for_issue(pr_number)
            .per_page(100)
            .send()
            .await?;

        let result: Vec<String> = labels.items.into_iter().map(|l| l.name).collect();
        debug!(pr_number, count = result.len(), "listed PR labels");
        Ok(result)
    }

    async fn compare_refs(&self, base: &str, head: &str) -> Result<Comparison> {
        #[derive(Deserialize)]
        struct CompareResponse {
            status: String,
            #[serde(default)]
            ahead_by: u64,
            #[serde(default)]
            behind_by: u64,
        }

        debug!(base, head, "comparing refs");
        let url = self.compare_url(base, head)?;

        let response = self
            .http_client
            .get(url)
            .header("Authorization", format!("Bearer {}", self.token))
            .header("Accept", "application/vnd.github+json")
            .header("X-GitHub-Api-Version", "2022-11-28")
            .send()
            .await
            .map_err(|e| Error::GitHubApi(format!("Failed to compare {base}...{head}: {e}")))?;

        if !response.status().is_success() {
            return Err(Error::GitHubApi(format!(
                "Comparing {base}...{head} returned {}",
                response.status()
            )));
        }

        let compare: CompareResponse = response
            .json()
            .await
            .map_err(|e| Error::GitHubApi(format!("Failed to parse comparison: {e}")))?;

        let comparison = Comparison {
            status: CompareStatus::from_api(&compare.status),
            ahead_by: compare.ahead_by,
            behind_by: compare.behind_by,
        };
        debug!(
            status = %comparison.status,
            ahead_by = comparison.ahead_by,
            behind_by = comparison.behind_by,
            "compared refs"
        );
        Ok(comparison)
    }

    async fn request_branch_update(&self, pr_number: u64) -> Result<()> {
        debug!(pr_number, "requesting branch update");
        let route = self.repo_route(&format!("pulls/{pr_number}/update-branch"));
        let _: serde_json::Value = self.client.put(route, None::<&()>).await?;
        debug!(pr_number, "requested branch update");
        Ok(())
    }

    async fn get_pr(&self, pr_number: u64) -> Result<PullRequest> {
        debug!(pr_number, "getting PR");
        let pr = self
            .client
            .pulls(&self.config.owner, &self.config.repo)
            .get(pr_number)
            .await?;

        let result = pr_from_octocrab(&pr);
        debug!(
            pr_number,
            mergeable_state = %result.mergeable_state,
            merged = result.merged,
            "got PR"
        );
        Ok(result)
    }

    async fn approve_pr(&self, pr_number: u64) -> Result<()> {
        debug!(pr_number, "approving PR");
        let route = self.repo_route(&format!("pulls/{pr_number}/reviews"));
        let body = serde_json::json!({ "event": APPROVE_EVENT });
        let _: serde_json::Value = self.client.post(route, Some(&body)).await?;
        debug!(pr_number, "approved PR");
        Ok(())
    }

    async fn create_pr_comment(&self, pr_number: u64, body: &str) -> Result<()> {
        debug!(pr_number, "creating PR comment");
        self.client
            .issues(&self.config.owner, &self.config.repo)
            .create_comment(pr_number, body)
            .await?;
        debug!(pr_number, "created PR comment");
        Ok(())
    }

    fn config(&self) -> &PlatformConfig {
        &self.config
    }
}
