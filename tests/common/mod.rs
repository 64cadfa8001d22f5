//! Shared test fixtures

#![allow(dead_code)]

mod mock_actions;
mod mock_platform;

pub use mock_actions::{MergeCall, MockActions};
pub use mock_platform::{ListPrsCall, MergePrCall, MockPlatformService, test_repo};

use chrono::{DateTime, TimeZone, Utc};
use merge_pilot::config::Settings;
use merge_pilot::error::Result;
use merge_pilot::events::{Outcome, dispatch};
use merge_pilot::reconcile::ReconcileContext;
use merge_pilot::types::{PrState, ProjectCard, PullRequest, Review, ReviewState};

/// Settings for `octocat/hello` with no allow-list and no column
pub fn settings() -> Settings {
    Settings::for_repo(test_repo())
}

/// Timestamp `minutes` past a fixed base time
pub fn at(minutes: i64) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap() + chrono::Duration::minutes(minutes)
}

/// An open, non-draft PR
pub fn make_pr(number: u64, base: &str, head: &str) -> PullRequest {
    PullRequest {
        number,
        title: format!("PR {number}"),
        html_url: format!("https://github.com/octocat/hello/pull/{number}"),
        base_ref: base.to_string(),
        head_ref: head.to_string(),
        head_sha: format!("sha{number}"),
        state: PrState::Open,
        is_draft: false,
        labels: vec![],
        updated_at: Some(at(0)),
    }
}

/// An open PR last updated `minutes` past the base time
pub fn make_pr_updated(number: u64, base: &str, head: &str, minutes: i64) -> PullRequest {
    PullRequest {
        updated_at: Some(at(minutes)),
        ..make_pr(number, base, head)
    }
}

/// A review by `author` in `state`
pub fn make_review(id: u64, author: &str, state: ReviewState) -> Review {
    Review {
        id,
        author: Some(author.to_string()),
        state,
    }
}

/// A card referencing `owner/repo#number` through its API URL
pub fn pr_card(id: u64, owner: &str, repo: &str, number: u64) -> ProjectCard {
    ProjectCard {
        id,
        content_url: Some(format!(
            "https://api.github.com/repos/{owner}/{repo}/issues/{number}"
        )),
        note: None,
    }
}

/// A note-only card
pub fn note_card(id: u64, note: &str) -> ProjectCard {
    ProjectCard {
        id,
        content_url: None,
        note: Some(note.to_string()),
    }
}

/// Minimal `pull_request` object as embedded in webhook payloads
pub fn pr_json(number: u64, base: &str, head: &str) -> serde_json::Value {
    serde_json::json!({
        "number": number,
        "title": format!("PR {number}"),
        "html_url": format!("https://github.com/octocat/hello/pull/{number}"),
        "state": "open",
        "draft": false,
        "labels": [],
        "updated_at": "2024-05-01T12:00:00Z",
        "base": { "ref": base, "sha": "basesha" },
        "head": { "ref": head, "sha": format!("sha{number}") }
    })
}

/// Dispatch a JSON payload against the mocks
pub async fn dispatch_json(
    platform: &MockPlatformService,
    actions: &MockActions,
    settings: &Settings,
    kind: &str,
    payload: serde_json::Value,
) -> Result<Outcome> {
    let ctx = ReconcileContext::new(platform, actions, settings);
    let bytes = serde_json::to_vec(&payload).unwrap();
    dispatch(&ctx, kind, &bytes).await
}
