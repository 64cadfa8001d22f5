//! Review gate

use super::ReconcileContext;
use crate::error::Result;
use crate::types::{PullRequest, Review};
use tracing::debug;

/// Reviews the merge step should consider for `pr`
///
/// Without a reviewer allow-list there is nothing to check approvals
/// against, so no remote call is made.
pub async fn reviews_for(ctx: &ReconcileContext<'_>, pr: &PullRequest) -> Result<Vec<Review>> {
    if !ctx.settings.requires_approval() {
        debug!(pr_number = pr.number, "no reviewer allow-list, skipping review fetch");
        return Ok(Vec::new());
    }

    ctx.platform.list_reviews(pr.number).await
}
