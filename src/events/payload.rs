//! Raw webhook payload shapes and their conversion into typed events.
//!
//! The raw structs mirror GitHub's JSON and tolerate unknown fields; the
//! conversion functions keep only what reconciliation needs.

use serde::Deserialize;

use super::{
    CheckEvent, IssueCommentEvent, PrReference, PullRequestEvent, PushEvent, ReviewEvent,
    StatusEvent,
};
use crate::error::{Error, Result};
use crate::types::{PrState, PullRequest, RepoIdentity};

#[derive(Debug, Deserialize)]
struct RawRepository {
    name: String,
    owner: RawOwner,
}

#[derive(Debug, Deserialize)]
struct RawOwner {
    login: String,
}

impl RawRepository {
    fn into_identity(self) -> Option<RepoIdentity> {
        RepoIdentity::new(self.owner.login, self.name).ok()
    }
}

/// Pull request as it appears in webhook payloads and REST responses
#[derive(Debug, Deserialize)]
pub(crate) struct RawPullRequest {
    number: u64,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    html_url: Option<String>,
    #[serde(default)]
    state: Option<String>,
    #[serde(default)]
    merged_at: Option<String>,
    #[serde(default)]
    draft: Option<bool>,
    #[serde(default)]
    labels: Vec<RawLabel>,
    #[serde(default)]
    updated_at: Option<chrono::DateTime<chrono::Utc>>,
    base: RawBranchRef,
    head: RawBranchRef,
}

#[derive(Debug, Deserialize)]
struct RawLabel {
    name: String,
}

#[derive(Debug, Deserialize)]
struct RawBranchRef {
    #[serde(rename = "ref")]
    ref_name: String,
    #[serde(default)]
    sha: String,
}

impl From<RawPullRequest> for PullRequest {
    fn from(raw: RawPullRequest) -> Self {
        let state = match raw.state.as_deref() {
            Some("open") | None => PrState::Open,
            _ if raw.merged_at.is_some() => PrState::Merged,
            _ => PrState::Closed,
        };

        Self {
            number: raw.number,
            title: raw.title.unwrap_or_default(),
            html_url: raw.html_url.unwrap_or_default(),
            base_ref: raw.base.ref_name,
            head_ref: raw.head.ref_name,
            head_sha: raw.head.sha,
            state,
            is_draft: raw.draft.unwrap_or(false),
            labels: raw.labels.into_iter().map(|l| l.name).collect(),
            updated_at: raw.updated_at,
        }
    }
}

/// Decode a REST pull request resource
pub(crate) fn pull_request_from_value(value: serde_json::Value) -> Result<PullRequest> {
    let raw: RawPullRequest = serde_json::from_value(value).map_err(|source| {
        Error::InvalidPayload {
            kind: "pull request resource".to_string(),
            source,
        }
    })?;
    Ok(raw.into())
}

fn from_slice<'a, T: Deserialize<'a>>(kind: &str, payload: &'a [u8]) -> Result<T> {
    serde_json::from_slice(payload).map_err(|source| Error::InvalidPayload {
        kind: kind.to_string(),
        source,
    })
}

// ============================================================================
// push
// ============================================================================

#[derive(Debug, Deserialize)]
struct RawPushPayload {
    #[serde(rename = "ref")]
    ref_name: String,
    #[serde(default)]
    repository: Option<RawRepository>,
}

pub(super) fn parse_push(payload: &[u8]) -> Result<PushEvent> {
    let raw: RawPushPayload = from_slice("push", payload)?;
    Ok(PushEvent {
        git_ref: raw.ref_name,
        repo: raw.repository.and_then(RawRepository::into_identity),
    })
}

// ============================================================================
// status
// ============================================================================

#[derive(Debug, Deserialize)]
struct RawStatusPayload {
    state: String,
    #[serde(default)]
    branches: Vec<RawBranch>,
}

#[derive(Debug, Deserialize)]
struct RawBranch {
    name: String,
}

pub(super) fn parse_status(payload: &[u8]) -> Result<StatusEvent> {
    let raw: RawStatusPayload = from_slice("status", payload)?;
    Ok(StatusEvent {
        state: raw.state,
        branches: raw.branches.into_iter().map(|b| b.name).collect(),
    })
}

// ============================================================================
// pull_request / pull_request_review
// ============================================================================

#[derive(Debug, Deserialize)]
struct RawPullRequestPayload {
    action: String,
    pull_request: RawPullRequest,
}

pub(super) fn parse_pull_request(payload: &[u8]) -> Result<PullRequestEvent> {
    let raw: RawPullRequestPayload = from_slice("pull_request", payload)?;
    Ok(PullRequestEvent {
        action: raw.action,
        pull_request: raw.pull_request.into(),
    })
}

#[derive(Debug, Deserialize)]
struct RawReviewPayload {
    action: String,
    review: RawReview,
    pull_request: RawPullRequest,
}

#[derive(Debug, Deserialize)]
struct RawReview {
    state: String,
}

pub(super) fn parse_review(payload: &[u8]) -> Result<ReviewEvent> {
    let raw: RawReviewPayload = from_slice("pull_request_review", payload)?;
    Ok(ReviewEvent {
        action: raw.action,
        review_state: raw.review.state,
        pull_request: raw.pull_request.into(),
    })
}

// ============================================================================
// issue_comment
// ============================================================================

#[derive(Debug, Deserialize)]
struct RawIssueCommentPayload {
    action: String,
    issue: RawIssue,
}

#[derive(Debug, Deserialize)]
struct RawIssue {
    number: u64,
    // If this field is present, the issue is actually a PR
    #[serde(default)]
    pull_request: Option<serde_json::Value>,
}

pub(super) fn parse_issue_comment(payload: &[u8]) -> Result<IssueCommentEvent> {
    let raw: RawIssueCommentPayload = from_slice("issue_comment", payload)?;
    Ok(IssueCommentEvent {
        action: raw.action,
        issue_number: raw.issue.number,
        is_pull_request: raw.issue.pull_request.is_some_and(|v| !v.is_null()),
    })
}

// ============================================================================
// check_suite / check_run
// ============================================================================

#[derive(Debug, Deserialize)]
struct RawCheckPayload {
    action: String,
    #[serde(default)]
    check_suite: Option<RawCheck>,
    #[serde(default)]
    check_run: Option<RawCheck>,
}

#[derive(Debug, Deserialize)]
struct RawCheck {
    #[serde(default)]
    conclusion: Option<String>,
    #[serde(default)]
    pull_requests: Vec<RawPrReference>,
    #[serde(default)]
    head_branch: Option<String>,
    // check_run nests its suite, which is where the head branch lives
    #[serde(default)]
    check_suite: Option<Box<RawCheck>>,
}

#[derive(Debug, Deserialize)]
struct RawPrReference {
    number: u64,
    #[serde(default)]
    url: Option<String>,
}

/// Parse either check payload into the shared shape.
///
/// The check body is read from the key matching `kind`.
pub(super) fn parse_check(kind: &str, payload: &[u8]) -> Result<CheckEvent> {
    let raw: RawCheckPayload = from_slice(kind, payload)?;
    let body = if kind == "check_run" {
        raw.check_run
    } else {
        raw.check_suite
    };
    let body = body.ok_or_else(|| Error::InvalidPayload {
        kind: kind.to_string(),
        source: serde::de::Error::missing_field("check body"),
    })?;

    let head_branch = body
        .head_branch
        .clone()
        .or_else(|| body.check_suite.as_ref().and_then(|s| s.head_branch.clone()))
        .filter(|b| !b.is_empty());

    Ok(CheckEvent {
        action: raw.action,
        conclusion: body.conclusion,
        pull_requests: body
            .pull_requests
            .into_iter()
            .map(|p| PrReference {
                number: p.number,
                url: p.url.filter(|u| !u.is_empty()),
            })
            .collect(),
        head_branch,
    })
}
