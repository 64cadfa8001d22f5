//! Pull request discovery

use crate::error::Result;
use crate::events::pull_request_from_value;
use crate::platform::{BranchFilter, PlatformService};
use crate::types::PullRequest;
use tracing::debug;

/// Most PRs a branch-based discovery returns
pub const DISCOVERY_LIMIT: u8 = 10;

/// Prefix of refs that name branches
pub const BRANCH_REF_PREFIX: &str = "refs/heads/";

/// Fetch one PR in full by number
pub async fn fetch_pull_request(
    platform: &dyn PlatformService,
    pr_number: u64,
) -> Result<PullRequest> {
    platform.get_pr(pr_number).await
}

/// Fetch one PR in full by dereferencing its API URL
pub async fn fetch_pull_request_url(platform: &dyn PlatformService, url: &str) -> Result<PullRequest> {
    let value = platform.fetch_url(url).await?;
    pull_request_from_value(value)
}

/// Open PRs merging into `branch`, newest-updated first
pub async fn prs_with_base(platform: &dyn PlatformService, branch: &str) -> Result<Vec<PullRequest>> {
    discover(platform, BranchFilter::Base(branch.to_string())).await
}

/// Open PRs merging from `owner:branch`, newest-updated first
pub async fn prs_with_head(
    platform: &dyn PlatformService,
    owner: &str,
    branch: &str,
) -> Result<Vec<PullRequest>> {
    discover(platform, BranchFilter::Head(format!("{owner}:{branch}"))).await
}

async fn discover(platform: &dyn PlatformService, filter: BranchFilter) -> Result<Vec<PullRequest>> {
    let mut prs = platform.list_open_prs(&filter, DISCOVERY_LIMIT).await?;

    // Stable, so PRs without a timestamp keep the platform's relative order
    prs.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
    prs.truncate(usize::from(DISCOVERY_LIMIT));

    debug!(%filter, count = prs.len(), "discovered PRs");
    Ok(prs)
}
