//! One reconciliation handler per event kind

use super::{
    CheckEvent, IgnoreReason, IssueCommentEvent, Outcome, PullRequestEvent, PushEvent,
    ReviewEvent, StatusEvent,
};
use crate::error::{Error, Result};
use crate::reconcile::{
    BRANCH_REF_PREFIX, BatchMode, BatchOutcome, ReconcileContext, fetch_pull_request,
    fetch_pull_request_url, filter_cards, prs_with_base, prs_with_head, reconcile_batch,
    reconcile_pull_request,
};
use crate::types::PullRequest;
use tracing::info;

/// `pull_request` actions that can change update/merge eligibility
const PULL_REQUEST_ACTIONS: [&str; 8] = [
    "labeled",
    "unlabeled",
    "synchronize",
    "opened",
    "edited",
    "ready_for_review",
    "reopened",
    "unlocked",
];

fn ignored(reason: IgnoreReason) -> Outcome {
    info!(%reason, "ignoring event");
    Outcome::Ignored(reason)
}

async fn run_single(ctx: &ReconcileContext<'_>, pr: &PullRequest) -> Result<Outcome> {
    reconcile_pull_request(ctx, pr).await?;
    Ok(Outcome::Reconciled {
        pr_number: pr.number,
    })
}

// ============================================================================
// Single-PR kinds
// ============================================================================

pub(super) async fn handle_pull_request(
    ctx: &ReconcileContext<'_>,
    event: PullRequestEvent,
) -> Result<Outcome> {
    if !PULL_REQUEST_ACTIONS.contains(&event.action.as_str()) {
        return Ok(ignored(IgnoreReason::ActionNotHandled {
            kind: "pull_request",
            action: event.action,
        }));
    }

    run_single(ctx, &event.pull_request).await
}

pub(super) async fn handle_review(
    ctx: &ReconcileContext<'_>,
    event: ReviewEvent,
) -> Result<Outcome> {
    if event.action != "submitted" {
        return Ok(ignored(IgnoreReason::ActionNotHandled {
            kind: "pull_request_review",
            action: event.action,
        }));
    }
    if !event.review_state.eq_ignore_ascii_case("approved") {
        return Ok(ignored(IgnoreReason::ReviewNotApproved {
            state: event.review_state,
        }));
    }

    run_single(ctx, &event.pull_request).await
}

pub(super) async fn handle_issue_comment(
    ctx: &ReconcileContext<'_>,
    event: IssueCommentEvent,
) -> Result<Outcome> {
    if event.action != "created" {
        return Ok(ignored(IgnoreReason::ActionNotHandled {
            kind: "issue_comment",
            action: event.action,
        }));
    }
    if !event.is_pull_request {
        return Ok(ignored(IgnoreReason::CommentNotOnPullRequest {
            issue: event.issue_number,
        }));
    }

    // The comment payload only references the PR
    let pr = fetch_pull_request(ctx.platform, event.issue_number).await?;
    run_single(ctx, &pr).await
}

// ============================================================================
// Batch kinds
// ============================================================================

pub(super) async fn handle_push(ctx: &ReconcileContext<'_>, event: PushEvent) -> Result<Outcome> {
    let Some(branch) = event.git_ref.strip_prefix(BRANCH_REF_PREFIX) else {
        return Ok(ignored(IgnoreReason::NotABranchRef {
            git_ref: event.git_ref.clone(),
        }));
    };

    if let Some(repo) = &event.repo
        && !repo.is_same(&ctx.settings.repo)
    {
        return Ok(ignored(IgnoreReason::ForeignRepository {
            repo: repo.to_string(),
        }));
    }

    info!(branch, "push to branch, updating dependent PRs");
    let prs = prs_with_base(ctx.platform, branch).await?;
    // A push to a base refreshes its dependents; merging is left to their own events
    let outcome = reconcile_batch(ctx, &prs, BatchMode::UpdateOnly).await;
    Ok(Outcome::Batch(outcome))
}

pub(super) async fn handle_status(
    ctx: &ReconcileContext<'_>,
    event: StatusEvent,
) -> Result<Outcome> {
    if event.state != "success" {
        return Ok(ignored(IgnoreReason::StatusNotSuccessful { state: event.state }));
    }
    if event.branches.is_empty() {
        return Ok(ignored(IgnoreReason::NoBranches));
    }

    let mut prs = Vec::new();
    for branch in &event.branches {
        prs.extend(prs_with_head(ctx.platform, &ctx.settings.repo.owner, branch).await?);
    }

    let outcome = reconcile_batch(ctx, &prs, BatchMode::UpdateAndMerge).await;
    Ok(Outcome::Batch(outcome))
}

pub(super) async fn handle_check(ctx: &ReconcileContext<'_>, event: CheckEvent) -> Result<Outcome> {
    if event.action != "completed" {
        return Ok(ignored(IgnoreReason::CheckNotCompleted {
            action: event.action,
        }));
    }
    if event.conclusion.as_deref() != Some("success") {
        return Ok(ignored(IgnoreReason::CheckNotSuccessful {
            conclusion: event.conclusion,
        }));
    }

    if let Some(attached) = event.pull_requests.first() {
        let pr = match attached.url.as_deref() {
            Some(url) => fetch_pull_request_url(ctx.platform, url).await?,
            None => fetch_pull_request(ctx.platform, attached.number).await?,
        };
        return run_single(ctx, &pr).await;
    }

    let Some(branch) = event.head_branch.as_deref() else {
        return Ok(ignored(IgnoreReason::NoPullRequestOrBranch));
    };

    info!(branch, "check has no attached PR, looking up by head branch");
    let prs = prs_with_head(ctx.platform, &ctx.settings.repo.owner, branch).await?;
    let outcome = reconcile_batch(ctx, &prs, BatchMode::UpdateAndMerge).await;
    Ok(Outcome::Batch(outcome))
}

pub(super) async fn handle_schedule(ctx: &ReconcileContext<'_>) -> Result<Outcome> {
    let column = ctx.settings.project_column.ok_or(Error::MissingProjectColumn)?;

    let cards = ctx.platform.list_project_cards(column).await?;
    let numbers = filter_cards(&cards, &ctx.settings.repo)?;
    info!(column, cards = cards.len(), prs = numbers.len(), "scheduled run over project column");

    let mut prs = Vec::with_capacity(numbers.len());
    let mut fetch_failures = BatchOutcome::default();
    for number in numbers {
        match fetch_pull_request(ctx.platform, number).await {
            Ok(pr) => prs.push(pr),
            Err(e) => fetch_failures.record(number, Err(e)),
        }
    }

    // PRs in the column are expected to be current already
    let mut outcome = reconcile_batch(ctx, &prs, BatchMode::MergeOnly).await;
    outcome.attempted += fetch_failures.attempted;
    outcome.failures.extend(fetch_failures.failures);
    Ok(Outcome::Batch(outcome))
}
