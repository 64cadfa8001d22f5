//! Update and merge collaborators
//!
//! The reconciliation core only decides *which* PRs to act on. What "update"
//! and "merge" mean is behind [`PullRequestActions`]; [`PlatformActions`]
//! delegates both to the hosting platform.

use crate::config::Settings;
use crate::error::{Error, Result};
use crate::platform::PlatformService;
use crate::types::{PullRequest, Review};
use async_trait::async_trait;
use tracing::{debug, info};

/// The two idempotent operations applied to each PR
#[async_trait]
pub trait PullRequestActions: Send + Sync {
    /// Bring `pr` up to date with its base branch
    async fn update(&self, platform: &dyn PlatformService, pr: &PullRequest) -> Result<()>;

    /// Merge `pr` if it is eligible; `reviews` is empty when no allow-list is set
    async fn merge(
        &self,
        platform: &dyn PlatformService,
        pr: &PullRequest,
        reviews: &[Review],
    ) -> Result<()>;
}

/// Actions backed by the platform's update-branch and merge endpoints
pub struct PlatformActions {
    settings: Settings,
}

impl PlatformActions {
    /// Create actions using the invocation settings
    pub const fn new(settings: Settings) -> Self {
        Self { settings }
    }

    /// Whether an allow-listed reviewer approved, or no allow-list is set
    pub fn is_approved(&self, reviews: &[Review]) -> bool {
        if !self.settings.requires_approval() {
            return true;
        }
        reviews.iter().any(|r| {
            r.is_approval()
                && r.author
                    .as_deref()
                    .is_some_and(|login| self.settings.is_allowed_reviewer(login))
        })
    }
}

#[async_trait]
impl PullRequestActions for PlatformActions {
    async fn update(&self, platform: &dyn PlatformService, pr: &PullRequest) -> Result<()> {
        if !pr.is_actionable() {
            info!(pr_number = pr.number, state = %pr.state, draft = pr.is_draft, "PR not open for updates, skipping");
            return Ok(());
        }

        debug!(pr_number = pr.number, base = %pr.base_ref, "updating PR");
        platform.update_branch(pr.number).await
    }

    async fn merge(
        &self,
        platform: &dyn PlatformService,
        pr: &PullRequest,
        reviews: &[Review],
    ) -> Result<()> {
        if !pr.is_actionable() {
            info!(pr_number = pr.number, state = %pr.state, draft = pr.is_draft, "PR not open for merging, skipping");
            return Ok(());
        }
        if !self.is_approved(reviews) {
            info!(pr_number = pr.number, "no approval from an allowed reviewer, skipping merge");
            return Ok(());
        }

        let result = platform
            .merge_pr(pr.number, self.settings.merge_method)
            .await?;
        if !result.merged {
            return Err(Error::Merge {
                number: pr.number,
                message: result
                    .message
                    .unwrap_or_else(|| "platform declined the merge".to_string()),
            });
        }

        info!(
            pr_number = pr.number,
            sha = result.sha.as_deref().unwrap_or("(no sha)"),
            "merged PR"
        );
        Ok(())
    }
}
