//! Mock platform service for testing
//!
//! These are test utilities - not all may be used in every test binary.

#![allow(dead_code)]

use async_trait::async_trait;
use renovate_pilot::error::{Error, Result};
use renovate_pilot::platform::PlatformService;
use renovate_pilot::types::{
    CompareStatus, Comparison, MergeableState, PlatformConfig, PullRequest,
};
use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::Mutex;

/// A recorded platform call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    ListOpenPrs,
    ListLabels(u64),
    Compare { base: String, head: String },
    UpdateBranch(u64),
    GetPr(u64),
    Approve(u64),
    Comment { pr_number: u64, body: String },
}

impl Call {
    /// PR number the call concerns, if any
    pub fn pr_number(&self) -> Option<u64> {
        match self {
            Self::ListOpenPrs | Self::Compare { .. } => None,
            Self::ListLabels(n)
            | Self::UpdateBranch(n)
            | Self::GetPr(n)
            | Self::Approve(n)
            | Self::Comment { pr_number: n, .. } => Some(*n),
        }
    }

    /// Whether the call changes anything on the platform
    pub fn is_mutation(&self) -> bool {
        matches!(
            self,
            Self::UpdateBranch(_) | Self::Approve(_) | Self::Comment { .. }
        )
    }
}

/// Scripted mock platform service
///
/// Manually implements `PlatformService` rather than using mockall so the
/// call log can be inspected in order.
///
/// `get_pr` answers from two scripts per PR. Until the merge-trigger comment
/// has been posted it reports `merged: false` and walks the mergeable-state
/// script; afterwards it reports `clean` and walks the merged script. The
/// last entry of a script repeats forever. Without a script a PR is clean
/// and merges on the first poll.
pub struct MockPlatformService {
    config: PlatformConfig,
    prs: Mutex<Vec<PullRequest>>,
    labels: Mutex<HashMap<u64, Vec<String>>>,
    comparisons: Mutex<HashMap<String, CompareStatus>>,
    state_scripts: Mutex<HashMap<u64, VecDeque<MergeableState>>>,
    merged_scripts: Mutex<HashMap<u64, VecDeque<bool>>>,
    announced: Mutex<HashSet<u64>>,
    calls: Mutex<Vec<Call>>,
    // Error injection
    error_on_list: Mutex<Option<String>>,
    error_on_update: Mutex<Option<String>>,
    error_on_approve: Mutex<Option<String>>,
    error_on_comment: Mutex<Option<String>>,
}

impl MockPlatformService {
    /// Create a new mock with the given config
    pub fn with_config(config: PlatformConfig) -> Self {
        Self {
            config,
            prs: Mutex::new(Vec::new()),
            labels: Mutex::new(HashMap::new()),
            comparisons: Mutex::new(HashMap::new()),
            state_scripts: Mutex::new(HashMap::new()),
            merged_scripts: Mutex::new(HashMap::new()),
            announced: Mutex::new(HashSet::new()),
            calls: Mutex::new(Vec::new()),
            error_on_list: Mutex::new(None),
            error_on_update: Mutex::new(None),
            error_on_approve: Mutex::new(None),
            error_on_comment: Mutex::new(None),
        }
    }

    /// Add an open PR with its labels and the compare status of its head
    pub fn add_pr(&self, number: u64, labels: &[&str], compare_status: &str) {
        let head = format!("renovate/dep-{number}");
        self.prs.lock().unwrap().push(make_pr(number, &head));
        self.labels
            .lock()
            .unwrap()
            .insert(number, labels.iter().map(ToString::to_string).collect());
        self.comparisons
            .lock()
            .unwrap()
            .insert(head, CompareStatus::from_api(compare_status));
    }

    /// Mergeable states reported before the merge-trigger comment
    pub fn script_states(&self, pr_number: u64, states: &[MergeableState]) {
        self.state_scripts
            .lock()
            .unwrap()
            .insert(pr_number, states.iter().copied().collect());
    }

    /// Report `merged: false` this many times after the comment, then true
    pub fn script_merge_after(&self, pr_number: u64, unmerged_polls: usize) {
        let mut script: VecDeque<bool> = std::iter::repeat_n(false, unmerged_polls).collect();
        script.push_back(true);
        self.merged_scripts.lock().unwrap().insert(pr_number, script);
    }

    /// Never report the PR as merged
    pub fn script_never_merged(&self, pr_number: u64) {
        self.merged_scripts
            .lock()
            .unwrap()
            .insert(pr_number, VecDeque::from([false]));
    }

    // === Error injection methods ===

    /// Make `list_open_prs` return an error
    pub fn fail_list(&self, msg: &str) {
        *self.error_on_list.lock().unwrap() = Some(msg.to_string());
    }

    /// Make `request_branch_update` return an error
    pub fn fail_update(&self, msg: &str) {
        *self.error_on_update.lock().unwrap() = Some(msg.to_string());
    }

    /// Make `approve_pr` return an error
    pub fn fail_approve(&self, msg: &str) {
        *self.error_on_approve.lock().unwrap() = Some(msg.to_string());
    }

    /// Make `create_pr_comment` return an error
    pub fn fail_comment(&self, msg: &str) {
        *self.error_on_comment.lock().unwrap() = Some(msg.to_string());
    }

    // === Call verification methods ===

    /// Every call, in order
    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    /// Calls concerning one PR, in order
    pub fn calls_for(&self, pr_number: u64) -> Vec<Call> {
        self.calls()
            .into_iter()
            .filter(|c| c.pr_number() == Some(pr_number))
            .collect()
    }

    /// Mutating calls concerning one PR
    pub fn mutations_for(&self, pr_number: u64) -> Vec<Call> {
        self.calls_for(pr_number)
            .into_iter()
            .filter(Call::is_mutation)
            .collect()
    }

    /// Count calls equal to `call`
    pub fn count(&self, call: &Call) -> usize {
        self.calls().iter().filter(|c| *c == call).count()
    }

    /// Position of the first call equal to `call`
    pub fn position(&self, call: &Call) -> Option<usize> {
        self.calls().iter().position(|c| c == call)
    }

    /// Assert that no mutating call was made at all
    pub fn assert_no_mutations(&self) {
        let mutations: Vec<Call> = self
            .calls()
            .into_iter()
            .filter(Call::is_mutation)
            .collect();
        assert!(
            mutations.is_empty(),
            "Expected no mutating calls but got: {mutations:?}"
        );
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }

    fn injected(slot: &Mutex<Option<String>>) -> Result<()> {
        slot.lock()
            .unwrap()
            .as_ref()
            .map_or(Ok(()), |msg| Err(Error::Platform(msg.clone())))
    }
}

/// Advance a script, repeating its last entry
fn next_scripted<T: Copy>(script: Option<&mut VecDeque<T>>, default: T) -> T {
    match script {
        Some(script) if script.len() > 1 => script.pop_front().unwrap_or(default),
        Some(script) => script.front().copied().unwrap_or(default),
        None => default,
    }
}

/// Build an open, unmerged PR against `main`
pub fn make_pr(number: u64, head: &str) -> PullRequest {
    PullRequest {
        number,
        title: format!("Update dependency {head}"),
        base_ref: "main".to_string(),
        head_ref: head.to_string(),
        html_url: format!("https://github.com/acme/widgets/pull/{number}"),
        mergeable_state: MergeableState::Unknown,
        merged: false,
    }
}

#[async_trait]
impl PlatformService for MockPlatformService {
    async fn list_open_prs(&self) -> Result<Vec<PullRequest>> {
        self.record(Call::ListOpenPrs);
        Self::injected(&self.error_on_list)?;
        Ok(self.prs.lock().unwrap().clone())
    }

    async fn list_labels(&self, pr_number: u64) -> Result<Vec<String>> {
        self.record(Call::ListLabels(pr_number));
        Ok(self
            .labels
            .lock()
            .unwrap()
            .get(&pr_number)
            .cloned()
            .unwrap_or_default())
    }

    async fn compare_refs(&self, base: &str, head: &str) -> Result<Comparison> {
        self.record(Call::Compare {
            base: base.to_string(),
            head: head.to_string(),
        });

        let status = self
            .comparisons
            .lock()
            .unwrap()
            .get(head)
            .cloned()
            .ok_or_else(|| Error::Platform(format!("compare: no response for {head}")))?;
        Ok(Comparison {
            status,
            ahead_by: 1,
            behind_by: 0,
        })
    }

    async fn request_branch_update(&self, pr_number: u64) -> Result<()> {
        self.record(Call::UpdateBranch(pr_number));
        Self::injected(&self.error_on_update)
    }

    async fn get_pr(&self, pr_number: u64) -> Result<PullRequest> {
        self.record(Call::GetPr(pr_number));

        let mut pr = self
            .prs
            .lock()
            .unwrap()
            .iter()
            .find(|p| p.number == pr_number)
            .cloned()
            .ok_or_else(|| Error::Platform(format!("get_pr: no PR #{pr_number}")))?;

        if self.announced.lock().unwrap().contains(&pr_number) {
            pr.mergeable_state = MergeableState::Clean;
            pr.merged = next_scripted(
                self.merged_scripts.lock().unwrap().get_mut(&pr_number),
                true,
            );
        } else {
            pr.mergeable_state = next_scripted(
                self.state_scripts.lock().unwrap().get_mut(&pr_number),
                MergeableState::Clean,
            );
            pr.merged = false;
        }
        Ok(pr)
    }

    async fn approve_pr(&self, pr_number: u64) -> Result<()> {
        self.record(Call::Approve(pr_number));
        Self::injected(&self.error_on_approve)
    }

    async fn create_pr_comment(&self, pr_number: u64, body: &str) -> Result<()> {
        self.record(Call::Comment {
            pr_number,
            body: body.to_string(),
        });
        Self::injected(&self.error_on_comment)?;
        self.announced.lock().unwrap().insert(pr_number);
        Ok(())
    }

    fn config(&self) -> &PlatformConfig {
        &self.config
    }
}
