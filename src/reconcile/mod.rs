//! Reconciliation engine
//!
//! Resolves target pull requests and applies the update/merge pipeline:
//! 1. Discover - find affected PRs (`fetch`, `cards`)
//! 2. Gate - collect reviews when an allow-list is configured (`reviews`)
//! 3. Apply - update and/or merge each PR with per-item isolation (`batch`)

mod batch;
mod cards;
mod fetch;
mod reviews;

pub use batch::{BatchFailure, BatchMode, BatchOutcome, reconcile_batch, reconcile_pull_request};
pub use cards::filter_cards;
pub use fetch::{
    BRANCH_REF_PREFIX, DISCOVERY_LIMIT, fetch_pull_request, fetch_pull_request_url, prs_with_base,
    prs_with_head,
};
pub use reviews::reviews_for;

use crate::actions::PullRequestActions;
use crate::config::Settings;
use crate::platform::PlatformService;

/// Everything a handler needs for one invocation
#[derive(Clone, Copy)]
pub struct ReconcileContext<'a> {
    /// Remote reads and writes
    pub platform: &'a dyn PlatformService,
    /// The update and merge collaborators
    pub actions: &'a dyn PullRequestActions,
    /// Invocation settings
    pub settings: &'a Settings,
}

impl<'a> ReconcileContext<'a> {
    /// Bundle the collaborators for one invocation
    pub const fn new(
        platform: &'a dyn PlatformService,
        actions: &'a dyn PullRequestActions,
        settings: &'a Settings,
    ) -> Self {
        Self {
            platform,
            actions,
            settings,
        }
    }
}
