//! Mock platform service for testing

#![allow(dead_code)]

use async_trait::async_trait;
use merge_pilot::error::{Error, Result};
use merge_pilot::platform::{BranchFilter, PlatformService};
use merge_pilot::types::{MergeMethod, MergeResult, ProjectCard, PullRequest, RepoIdentity, Review};
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

/// Call record for `list_open_prs`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListPrsCall {
    pub filter: BranchFilter,
    pub per_page: u8,
}

/// Call record for `merge_pr`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergePrCall {
    pub pr_number: u64,
    pub method: MergeMethod,
}

/// Simple mock platform service for testing
///
/// Features:
/// - Configurable responses per PR, branch filter, column and URL
/// - Call tracking for verification
/// - Error injection for failure path testing
#[derive(Default)]
pub struct MockPlatformService {
    // Responses
    pr_responses: Mutex<HashMap<u64, PullRequest>>,
    list_responses: Mutex<HashMap<BranchFilterKey, Vec<PullRequest>>>,
    review_responses: Mutex<HashMap<u64, Vec<Review>>>,
    card_responses: Mutex<HashMap<u64, Vec<ProjectCard>>>,
    url_responses: Mutex<HashMap<String, serde_json::Value>>,
    merge_responses: Mutex<HashMap<u64, MergeResult>>,
    // Call tracking
    get_pr_calls: Mutex<Vec<u64>>,
    list_prs_calls: Mutex<Vec<ListPrsCall>>,
    list_reviews_calls: Mutex<Vec<u64>>,
    list_cards_calls: Mutex<Vec<u64>>,
    fetch_url_calls: Mutex<Vec<String>>,
    update_branch_calls: Mutex<Vec<u64>>,
    merge_pr_calls: Mutex<Vec<MergePrCall>>,
    // Error injection
    error_on_get_pr: Mutex<HashSet<u64>>,
    error_on_list_prs: Mutex<Option<String>>,
    error_on_update_branch: Mutex<HashSet<u64>>,
}

type BranchFilterKey = String;

fn key(filter: &BranchFilter) -> BranchFilterKey {
    filter.to_string()
}

impl MockPlatformService {
    /// Create a mock with no responses configured
    pub fn new() -> Self {
        Self::default()
    }

    // === Error injection methods ===

    /// Make `get_pr` fail for one PR
    pub fn fail_get_pr(&self, pr_number: u64) {
        self.error_on_get_pr.lock().unwrap().insert(pr_number);
    }

    /// Make every `list_open_prs` call fail
    pub fn fail_list_prs(&self, msg: &str) {
        *self.error_on_list_prs.lock().unwrap() = Some(msg.to_string());
    }

    /// Make `update_branch` fail for one PR
    pub fn fail_update_branch(&self, pr_number: u64) {
        self.error_on_update_branch.lock().unwrap().insert(pr_number);
    }

    // === Response setup ===

    /// Register a PR for `get_pr`
    pub fn add_pr(&self, pr: PullRequest) {
        self.pr_responses.lock().unwrap().insert(pr.number, pr);
    }

    /// Set the open PRs returned for a base branch
    pub fn set_prs_with_base(&self, branch: &str, prs: Vec<PullRequest>) {
        self.list_responses
            .lock()
            .unwrap()
            .insert(key(&BranchFilter::Base(branch.to_string())), prs);
    }

    /// Set the open PRs returned for an `owner:branch` head
    pub fn set_prs_with_head(&self, head: &str, prs: Vec<PullRequest>) {
        self.list_responses
            .lock()
            .unwrap()
            .insert(key(&BranchFilter::Head(head.to_string())), prs);
    }

    /// Set the reviews of a PR
    pub fn set_reviews(&self, pr_number: u64, reviews: Vec<Review>) {
        self.review_responses
            .lock()
            .unwrap()
            .insert(pr_number, reviews);
    }

    /// Set the cards of a project column
    pub fn set_cards(&self, column_id: u64, cards: Vec<ProjectCard>) {
        self.card_responses.lock().unwrap().insert(column_id, cards);
    }

    /// Set the JSON returned when `url` is fetched
    pub fn set_url_response(&self, url: &str, value: serde_json::Value) {
        self.url_responses
            .lock()
            .unwrap()
            .insert(url.to_string(), value);
    }

    /// Set the response for `merge_pr` for a specific PR
    pub fn set_merge_response(&self, pr_number: u64, result: MergeResult) {
        self.merge_responses
            .lock()
            .unwrap()
            .insert(pr_number, result);
    }

    // === Call verification methods ===

    pub fn get_pr_calls(&self) -> Vec<u64> {
        self.get_pr_calls.lock().unwrap().clone()
    }

    pub fn list_prs_calls(&self) -> Vec<ListPrsCall> {
        self.list_prs_calls.lock().unwrap().clone()
    }

    pub fn list_reviews_calls(&self) -> Vec<u64> {
        self.list_reviews_calls.lock().unwrap().clone()
    }

    pub fn list_cards_calls(&self) -> Vec<u64> {
        self.list_cards_calls.lock().unwrap().clone()
    }

    pub fn fetch_url_calls(&self) -> Vec<String> {
        self.fetch_url_calls.lock().unwrap().clone()
    }

    pub fn update_branch_calls(&self) -> Vec<u64> {
        self.update_branch_calls.lock().unwrap().clone()
    }

    pub fn merge_pr_calls(&self) -> Vec<MergePrCall> {
        self.merge_pr_calls.lock().unwrap().clone()
    }

    /// Total number of remote calls of any kind
    pub fn total_calls(&self) -> usize {
        self.get_pr_calls.lock().unwrap().len()
            + self.list_prs_calls.lock().unwrap().len()
            + self.list_reviews_calls.lock().unwrap().len()
            + self.list_cards_calls.lock().unwrap().len()
            + self.fetch_url_calls.lock().unwrap().len()
            + self.update_branch_calls.lock().unwrap().len()
            + self.merge_pr_calls.lock().unwrap().len()
    }

    /// Assert that no remote call was made
    pub fn assert_no_calls(&self) {
        assert_eq!(
            self.total_calls(),
            0,
            "Expected no remote calls but got: get_pr={:?} list_prs={:?} list_reviews={:?} cards={:?} urls={:?}",
            self.get_pr_calls(),
            self.list_prs_calls(),
            self.list_reviews_calls(),
            self.list_cards_calls(),
            self.fetch_url_calls()
        );
    }
}

#[async_trait]
impl PlatformService for MockPlatformService {
    async fn get_pr(&self, pr_number: u64) -> Result<PullRequest> {
        self.get_pr_calls.lock().unwrap().push(pr_number);

        if self.error_on_get_pr.lock().unwrap().contains(&pr_number) {
            return Err(Error::Platform(format!("get_pr: PR #{pr_number} not found")));
        }

        let responses = self.pr_responses.lock().unwrap();
        responses.get(&pr_number).cloned().ok_or_else(|| {
            Error::Platform(format!("get_pr: no response configured for PR #{pr_number}"))
        })
    }

    async fn list_open_prs(&self, filter: &BranchFilter, per_page: u8) -> Result<Vec<PullRequest>> {
        self.list_prs_calls.lock().unwrap().push(ListPrsCall {
            filter: filter.clone(),
            per_page,
        });

        if let Some(msg) = self.error_on_list_prs.lock().unwrap().as_ref() {
            return Err(Error::Platform(msg.clone()));
        }

        let responses = self.list_responses.lock().unwrap();
        Ok(responses.get(&key(filter)).cloned().unwrap_or_default())
    }

    async fn list_reviews(&self, pr_number: u64) -> Result<Vec<Review>> {
        self.list_reviews_calls.lock().unwrap().push(pr_number);
        let responses = self.review_responses.lock().unwrap();
        Ok(responses.get(&pr_number).cloned().unwrap_or_default())
    }

    async fn list_project_cards(&self, column_id: u64) -> Result<Vec<ProjectCard>> {
        self.list_cards_calls.lock().unwrap().push(column_id);
        let responses = self.card_responses.lock().unwrap();
        Ok(responses.get(&column_id).cloned().unwrap_or_default())
    }

    async fn fetch_url(&self, url: &str) -> Result<serde_json::Value> {
        self.fetch_url_calls.lock().unwrap().push(url.to_string());
        let responses = self.url_responses.lock().unwrap();
        responses
            .get(url)
            .cloned()
            .ok_or_else(|| Error::Platform(format!("fetch_url: no response configured for {url}")))
    }

    async fn update_branch(&self, pr_number: u64) -> Result<()> {
        self.update_branch_calls.lock().unwrap().push(pr_number);

        if self.error_on_update_branch.lock().unwrap().contains(&pr_number) {
            return Err(Error::Update {
                number: pr_number,
                message: "merge conflict".to_string(),
            });
        }
        Ok(())
    }

    async fn merge_pr(&self, pr_number: u64, method: MergeMethod) -> Result<MergeResult> {
        self.merge_pr_calls
            .lock()
            .unwrap()
            .push(MergePrCall { pr_number, method });

        let responses = self.merge_responses.lock().unwrap();
        Ok(responses.get(&pr_number).cloned().unwrap_or(MergeResult {
            merged: true,
            sha: Some(format!("merged_sha_{pr_number}")),
            message: None,
        }))
    }
}

/// Repository every fixture lives in: `octocat/hello`
pub fn test_repo() -> RepoIdentity {
    RepoIdentity::new("octocat", "hello").unwrap()
}
