//! Platform services for GitHub
//!
//! Provides the remote reads and writes the reconciliation core depends on.

mod detection;
mod github;

pub use detection::{LocalTarget, parse_target_url};
pub use github::GitHubService;

use crate::error::Result;
use crate::types::{MergeMethod, MergeResult, ProjectCard, PullRequest, Review};
use async_trait::async_trait;

/// Which side of a pull request a branch filter applies to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BranchFilter {
    /// PRs merging into this branch
    Base(String),
    /// PRs merging from this branch, in `owner:branch` form
    Head(String),
}

impl std::fmt::Display for BranchFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Base(b) => write!(f, "base={b}"),
            Self::Head(h) => write!(f, "head={h}"),
        }
    }
}

/// Platform service trait for PR operations
#[async_trait]
pub trait PlatformService: Send + Sync {
    /// Fetch a single PR by number
    async fn get_pr(&self, pr_number: u64) -> Result<PullRequest>;

    /// List open PRs matching `filter`, most recently updated first
    ///
    /// At most `per_page` PRs are returned (first page only).
    async fn list_open_prs(&self, filter: &BranchFilter, per_page: u8) -> Result<Vec<PullRequest>>;

    /// List reviews on a PR, in the order the platform returns them
    async fn list_reviews(&self, pr_number: u64) -> Result<Vec<Review>>;

    /// List cards in a project board column
    async fn list_project_cards(&self, column_id: u64) -> Result<Vec<ProjectCard>>;

    /// GET an arbitrary API resource URL
    async fn fetch_url(&self, url: &str) -> Result<serde_json::Value>;

    /// Ask the platform to merge the base branch into the PR head
    async fn update_branch(&self, pr_number: u64) -> Result<()>;

    /// Merge a PR with the specified method
    async fn merge_pr(&self, pr_number: u64, method: MergeMethod) -> Result<MergeResult>;
}
