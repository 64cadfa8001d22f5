//! Synthetic events for manual runs against a URL

use super::{Event, PullRequestEvent, PushEvent};
use crate::error::Result;
use crate::platform::{LocalTarget, PlatformService};
use crate::reconcile::{BRANCH_REF_PREFIX, fetch_pull_request};

/// Build the event a real webhook would have delivered for `target`
///
/// A PR URL becomes an `opened` pull_request event carrying the fetched PR;
/// a branch URL becomes a push to that branch.
pub async fn synthesize_event(platform: &dyn PlatformService, target: &LocalTarget) -> Result<Event> {
    match target {
        LocalTarget::PullRequest { number, .. } => {
            let pr = fetch_pull_request(platform, *number).await?;
            Ok(Event::PullRequest(PullRequestEvent {
                action: "opened".to_string(),
                pull_request: pr,
            }))
        }
        LocalTarget::Branch { repo, branch, .. } => Ok(Event::Push(PushEvent {
            git_ref: format!("{BRANCH_REF_PREFIX}{branch}"),
            repo: Some(repo.clone()),
        })),
    }
}
