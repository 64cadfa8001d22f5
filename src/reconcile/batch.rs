//! Batch reconciliation - effectful operations
//!
//! Applies update and/or merge to a list of PRs. Every PR is attempted; a
//! failure is recorded against its PR and the batch moves on.

use super::{ReconcileContext, reviews_for};
use crate::error::Result;
use crate::types::PullRequest;
use tracing::{info, warn};

/// Which collaborators a batch applies
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatchMode {
    /// Refresh PRs against their base, never merge
    UpdateOnly,
    /// Refresh, then merge if eligible
    UpdateAndMerge,
    /// Merge if eligible, assuming PRs are already current
    MergeOnly,
}

impl BatchMode {
    const fn updates(self) -> bool {
        matches!(self, Self::UpdateOnly | Self::UpdateAndMerge)
    }

    const fn merges(self) -> bool {
        matches!(self, Self::UpdateAndMerge | Self::MergeOnly)
    }
}

/// A PR that failed inside a batch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchFailure {
    /// PR number
    pub pr_number: u64,
    /// Error message
    pub message: String,
}

/// Tally of a batch run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchOutcome {
    /// PRs attempted
    pub attempted: usize,
    /// PRs that completed without error
    pub reconciled: usize,
    /// PRs that failed, in visit order
    pub failures: Vec<BatchFailure>,
}

impl BatchOutcome {
    /// Record the result of one PR
    pub fn record(&mut self, pr_number: u64, result: Result<()>) {
        self.attempted += 1;
        match result {
            Ok(()) => self.reconciled += 1,
            Err(e) => {
                warn!(pr_number, error = %e, "failed to reconcile PR, continuing");
                self.failures.push(BatchFailure {
                    pr_number,
                    message: e.to_string(),
                });
            }
        }
    }

    /// Whether every attempted PR succeeded
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }

    /// PR numbers that failed
    pub fn failed_numbers(&self) -> Vec<u64> {
        self.failures.iter().map(|f| f.pr_number).collect()
    }
}

/// Run the full pipeline on one PR: update, gate, merge
///
/// Errors propagate; there is no batch to isolate against.
pub async fn reconcile_pull_request(ctx: &ReconcileContext<'_>, pr: &PullRequest) -> Result<()> {
    apply(ctx, pr, BatchMode::UpdateAndMerge).await
}

async fn apply(ctx: &ReconcileContext<'_>, pr: &PullRequest, mode: BatchMode) -> Result<()> {
    if mode.updates() {
        ctx.actions.update(ctx.platform, pr).await?;
    }
    if mode.merges() {
        let reviews = reviews_for(ctx, pr).await?;
        ctx.actions.merge(ctx.platform, pr, &reviews).await?;
    }
    Ok(())
}

/// Apply `mode` to every PR in order, isolating failures per PR
pub async fn reconcile_batch(
    ctx: &ReconcileContext<'_>,
    prs: &[PullRequest],
    mode: BatchMode,
) -> BatchOutcome {
    let mut outcome = BatchOutcome::default();

    if prs.is_empty() {
        info!(?mode, "no pull requests found, nothing to do");
        return outcome;
    }

    for pr in prs {
        let result = apply(ctx, pr, mode).await;
        outcome.record(pr.number, result);
    }

    info!(
        ?mode,
        attempted = outcome.attempted,
        reconciled = outcome.reconciled,
        failed = outcome.failures.len(),
        "batch complete"
    );
    outcome
}
