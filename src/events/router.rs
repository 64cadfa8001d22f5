//! Event dispatch

use super::{Event, Outcome, handlers};
use crate::error::Result;
use crate::reconcile::ReconcileContext;
use tracing::info;

/// Parse `payload` as an event of `kind` and route it
///
/// Unknown kinds fail with [`crate::error::Error::UnrecognizedEvent`].
pub async fn dispatch(ctx: &ReconcileContext<'_>, kind: &str, payload: &[u8]) -> Result<Outcome> {
    let event = Event::parse(kind, payload)?;
    route(ctx, event).await
}

/// Run the handler for `event`
pub async fn route(ctx: &ReconcileContext<'_>, event: Event) -> Result<Outcome> {
    info!(kind = %event.kind(), repo = %ctx.settings.repo, "handling event");

    match event {
        Event::Push(e) => handlers::handle_push(ctx, e).await,
        Event::Status(e) => handlers::handle_status(ctx, e).await,
        Event::PullRequest(e) => handlers::handle_pull_request(ctx, e).await,
        Event::CheckSuite(e) | Event::CheckRun(e) => handlers::handle_check(ctx, e).await,
        Event::PullRequestReview(e) => handlers::handle_review(ctx, e).await,
        Event::Schedule => handlers::handle_schedule(ctx).await,
        Event::IssueComment(e) => handlers::handle_issue_comment(ctx, e).await,
    }
}
