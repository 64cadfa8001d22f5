//! GitHub platform service implementation

use crate::error::{Error, Result};
use crate::platform::{BranchFilter, PlatformService};
use crate::types::{
    MergeMethod, MergeResult, PrState, ProjectCard, PullRequest, RepoIdentity,
    Review, ReviewState,
};
use async_trait::async_trait;
use octocrab::Octocrab;
use reqwest::header::{HeaderMap, LINK};
use reqwest::{Client, Method, RequestBuilder};
use tracing::debug;

/// GitHub service using octocrab
///
/// Pulls, reviews and merges go through octocrab; endpoints octocrab does not
/// cover well (classic project cards, update-branch, arbitrary resource URLs)
/// go through a raw HTTP client.
pub struct GitHubService {
    client: Octocrab,
    repo: RepoIdentity,
    /// Token for raw HTTP requests
    token: String,
    /// HTTP client for raw requests
    http_client: Client,
    /// API base URL for raw requests, without trailing slash
    api_base: String,
}

impl GitHubService {
    /// Create a new GitHub service
    ///
    /// `host` selects a GitHub Enterprise instance; `None` means github.com.
    pub fn new(token: &str, repo: RepoIdentity, host: Option<String>) -> Result<Self> {
        let api_base = host.as_ref().map_or_else(
            || "https://api.github.com".to_string(),
            |h| format!("https://{h}/api/v3"),
        );
        Self::with_api_base(token, repo, &api_base)
    }

    /// Create a service talking to an explicit API base URL
    pub fn with_api_base(
        token: &str,
        repo: RepoIdentity,
        api_base: &str,
    ) -> Result<Self> {
        let api_base = api_base.trim_end_matches('/').to_string();

        let client = Octocrab::builder()
            .personal_token(token.to_string())
            .base_uri(api_base.as_str())
            .map_err(|e| Error::GitHubApi(e.to_string()))?
            .build()
            .map_err(|e| Error::GitHubApi(e.to_string()))?;

        let http_client = Client::builder()
            .user_agent("merge-pilot")
            .build()
            .map_err(|e| Error::GitHubApi(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            repo,
            token: token.to_string(),
            http_client,
            api_base,
        })
    }

    fn owner(&self) -> &str {
        &self.repo.owner
    }

    fn repo(&self) -> &str {
        &self.repo.name
    }

    fn raw_request(&self, method: Method, url: &str) -> RequestBuilder {
        self.http_client
            .request(method, url)
            .header("Authorization", format!("Bearer {}", self.token))
            .header("Accept", "application/vnd.github+json")
            .header("X-GitHub-Api-Version", "2022-11-28")
    }
}

/// Helper to convert octocrab PR to our `PullRequest` type
fn pr_from_octocrab(pr: &octocrab::models::pulls::PullRequest) -> PullRequest {
    // IssueState is non-exhaustive, so use wildcard for Closed and any future variants
    let state = match pr.state {
        Some(octocrab::models::IssueState::Open) => PrState::Open,
        Some(_) if pr.merged_at.is_some() => PrState::Merged,
        Some(_) | None => PrState::Closed,
    };

    PullRequest {
        number: pr.number,
        title: pr.title.clone().unwrap_or_default(),
        html_url: pr
            .html_url
            .as_ref()
            .map(ToString::to_string)
            .unwrap_or_default(),
        base_ref: pr.base.ref_field.clone(),
        head_ref: pr.head.ref_field.clone(),
        head_sha: pr.head.sha.clone(),
        state,
        is_draft: pr.draft.unwrap_or(false),
        labels: pr
            .labels
            .as_ref()
            .map(|labels| labels.iter().map(|l| l.name.clone()).collect())
            .unwrap_or_default(),
        updated_at: pr.updated_at,
    }
}

fn review_from_octocrab(review: &octocrab::models::pulls::Review) -> Review {
    use octocrab::models::pulls::ReviewState as Remote;

    let state = match review.state {
        Some(Remote::Approved) => ReviewState::Approved,
        Some(Remote::ChangesRequested) => ReviewState::ChangesRequested,
        Some(Remote::Commented) => ReviewState::Commented,
        Some(Remote::Dismissed) => ReviewState::Dismissed,
        _ => ReviewState::Pending,
    };

    Review {
        id: review.id.0,
        author: review.user.as_ref().map(|u| u.login.clone()),
        state,
    }
}

/// Target of the `rel="next"` entry of a `Link` header, if any
fn next_page_url(headers: &HeaderMap) -> Option<String> {
    let link = headers.get(LINK)?.to_str().ok()?;
    link.split(',').find_map(|entry| {
        let (target, params) = entry.split_once(';')?;
        params
            .split(';')
            .any(|p| p.trim() == r#"rel="next""#)
            .then(|| target.trim().trim_start_matches('<').trim_end_matches('>').to_string())
    })
}

#[async_trait]
impl PlatformService for GitHubService {
    async fn get_pr(&self, pr_number: u64) -> Result<PullRequest> {
        debug!(pr_number, "getting PR");
        let pr = self
            .client
            .pulls(self.owner(), self.repo())
            .get(pr_number)
            .await?;

        let result = pr_from_octocrab(&pr);
        debug!(pr_number, state = %result.state, "got PR");
        Ok(result)
    }

    async fn list_open_prs(&self, filter: &BranchFilter, per_page: u8) -> Result<Vec<PullRequest>> {
        debug!(%filter, per_page, "listing open PRs");
        let pulls = self.client.pulls(self.owner(), self.repo());
        let builder = pulls
            .list()
            .state(octocrab::params::State::Open)
            .sort(octocrab::params::pulls::Sort::Updated)
            .direction(octocrab::params::Direction::Descending)
            .per_page(per_page);

        let page = match filter {
            BranchFilter::Base(base) => builder.base(base.clone()).send().await?,
            BranchFilter::Head(head) => builder.head(head.clone()).send().await?,
        };

        let result: Vec<PullRequest> = page.items.iter().map(pr_from_octocrab).collect();
        debug!(%filter, count = result.len(), "listed open PRs");
        Ok(result)
    }

    async fn list_reviews(&self, pr_number: u64) -> Result<Vec<Review>> {
        debug!(pr_number, "listing reviews");
        let reviews = self
            .client
            .pulls(self.owner(), self.repo())
            .list_reviews(pr_number)
            .send()
            .await?;

        let result: Vec<Review> = reviews.items.iter().map(review_from_octocrab).collect();
        debug!(pr_number, count = result.len(), "listed reviews");
        Ok(result)
    }

    async fn list_project_cards(&self, column_id: u64) -> Result<Vec<ProjectCard>> {
        debug!(column_id, "listing project cards");
        let mut next = Some(format!(
            "{}/projects/columns/{column_id}/cards?per_page=100",
            self.api_base
        ));
        let mut cards = Vec::new();

        // Follow `Link: rel="next"` until the column is exhausted
        while let Some(url) = next.take() {
            let response = self
                .raw_request(Method::GET, &url)
                .send()
                .await
                .map_err(|e| Error::GitHubApi(format!("Failed to fetch project cards: {e}")))?;

            if !response.status().is_success() {
                return Err(Error::GitHubApi(format!(
                    "Listing cards of column {column_id} returned {}",
                    response.status()
                )));
            }

            next = next_page_url(response.headers());
            let page: Vec<ProjectCard> = response
                .json()
                .await
                .map_err(|e| Error::GitHubApi(format!("Failed to parse project cards: {e}")))?;
            cards.extend(page);
        }

        debug!(column_id, count = cards.len(), "listed project cards");
        Ok(cards)
    }

    async fn fetch_url(&self, url: &str) -> Result<serde_json::Value> {
        debug!(url, "fetching resource");
        let response = self
            .raw_request(Method::GET, url)
            .send()
            .await
            .map_err(|e| Error::GitHubApi(format!("Failed to fetch {url}: {e}")))?;

        if !response.status().is_success() {
            return Err(Error::GitHubApi(format!(
                "Fetching {url} returned {}",
                response.status()
            )));
        }

        Ok(response.json().await?)
    }

    async fn update_branch(&self, pr_number: u64) -> Result<()> {
        debug!(pr_number, "updating PR branch");
        let url = format!(
            "{}/repos/{}/{}/pulls/{pr_number}/update-branch",
            self.api_base,
            self.owner(),
            self.repo()
        );

        let response = self
            .raw_request(Method::PUT, &url)
            .json(&serde_json::json!({}))
            .send()
            .await
            .map_err(|e| Error::GitHubApi(format!("Failed to update branch: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Update {
                number: pr_number,
                message: format!("{status}: {body}"),
            });
        }

        debug!(pr_number, "requested branch update");
        Ok(())
    }

    async fn merge_pr(&self, pr_number: u64, method: MergeMethod) -> Result<MergeResult> {
        debug!(pr_number, %method, "merging PR");

        let octocrab_method = match method {
            MergeMethod::Squash => octocrab::params::pulls::MergeMethod::Squash,
            MergeMethod::Merge => octocrab::params::pulls::MergeMethod::Merge,
            MergeMethod::Rebase => octocrab::params::pulls::MergeMethod::Rebase,
        };

        let result = self
            .client
            .pulls(self.owner(), self.repo())
            .merge(pr_number)
            .method(octocrab_method)
            .send()
            .await
            .map_err(|e| Error::Merge {
                number: pr_number,
                message: e.to_string(),
            })?;

        let merge_result = MergeResult {
            merged: result.merged,
            sha: result.sha,
            message: result.message,
        };

        debug!(
            pr_number,
            merged = merge_result.merged,
            sha = ?merge_result.sha,
            "merge complete"
        );
        Ok(merge_result)
    }
}
