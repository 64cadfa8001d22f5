//! Repository events and their dispatch
//!
//! An invocation reacts to exactly one [`Event`]. Events are parsed from an
//! event kind (the `X-GitHub-Event` / `GITHUB_EVENT_NAME` value) plus its
//! JSON payload, then routed to the handler for that kind.

mod handlers;
mod local;
mod outcome;
mod payload;
mod router;

pub use local::synthesize_event;
pub use outcome::{IgnoreReason, Outcome};
pub(crate) use payload::pull_request_from_value;
pub use router::{dispatch, route};

use crate::error::{Error, Result};
use crate::types::{PullRequest, RepoIdentity};

/// The eight event kinds merge-pilot reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// Commits pushed to a ref
    Push,
    /// Commit status changed (legacy Status API)
    Status,
    /// Pull request lifecycle
    PullRequest,
    /// Check suite lifecycle
    CheckSuite,
    /// Check run lifecycle
    CheckRun,
    /// Review submitted, edited or dismissed
    PullRequestReview,
    /// Scheduled tick
    Schedule,
    /// Issue or PR conversation comment
    IssueComment,
}

impl EventKind {
    /// Every recognized kind
    pub const ALL: [Self; 8] = [
        Self::Push,
        Self::Status,
        Self::PullRequest,
        Self::CheckSuite,
        Self::CheckRun,
        Self::PullRequestReview,
        Self::Schedule,
        Self::IssueComment,
    ];

    /// Wire name of the kind
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Push => "push",
            Self::Status => "status",
            Self::PullRequest => "pull_request",
            Self::CheckSuite => "check_suite",
            Self::CheckRun => "check_run",
            Self::PullRequestReview => "pull_request_review",
            Self::Schedule => "schedule",
            Self::IssueComment => "issue_comment",
        }
    }

    /// Look up a kind by wire name
    pub fn parse(kind: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|k| k.as_str() == kind)
            .ok_or_else(|| Error::UnrecognizedEvent(kind.to_string()))
    }
}

impl std::fmt::Display for EventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A push to a ref
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PushEvent {
    /// Full ref, e.g. `refs/heads/main`
    pub git_ref: String,
    /// Repository the push happened in
    pub repo: Option<RepoIdentity>,
}

/// A commit status update
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusEvent {
    /// `success`, `failure`, `pending` or `error`
    pub state: String,
    /// Branches whose head is the commit
    pub branches: Vec<String>,
}

/// A pull request lifecycle event
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PullRequestEvent {
    /// e.g. `opened`, `synchronize`, `labeled`
    pub action: String,
    /// The PR as embedded in the payload
    pub pull_request: PullRequest,
}

/// A pull request review event
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewEvent {
    /// e.g. `submitted`, `dismissed`
    pub action: String,
    /// e.g. `approved`, `changes_requested`
    pub review_state: String,
    /// The reviewed PR
    pub pull_request: PullRequest,
}

/// A comment on an issue or PR conversation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssueCommentEvent {
    /// e.g. `created`, `edited`
    pub action: String,
    /// Issue (or PR) number
    pub issue_number: u64,
    /// Whether the issue is a pull request
    pub is_pull_request: bool,
}

/// Reference to a PR attached to a check
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrReference {
    /// PR number
    pub number: u64,
    /// API URL of the PR resource
    pub url: Option<String>,
}

/// Check suite or check run, aligned to one shape
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckEvent {
    /// e.g. `completed`, `requested`
    pub action: String,
    /// e.g. `success`, `failure`; absent until completed
    pub conclusion: Option<String>,
    /// PRs the check is attached to
    pub pull_requests: Vec<PrReference>,
    /// Head branch the check ran on
    pub head_branch: Option<String>,
}

/// A parsed repository event
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Commits pushed
    Push(PushEvent),
    /// Commit status changed
    Status(StatusEvent),
    /// PR lifecycle
    PullRequest(PullRequestEvent),
    /// Check suite lifecycle
    CheckSuite(CheckEvent),
    /// Check run lifecycle
    CheckRun(CheckEvent),
    /// Review lifecycle
    PullRequestReview(ReviewEvent),
    /// Scheduled tick; carries no payload
    Schedule,
    /// Conversation comment
    IssueComment(IssueCommentEvent),
}

impl Event {
    /// Parse a payload for the given event kind
    ///
    /// Unknown kinds fail with [`Error::UnrecognizedEvent`] before the payload
    /// is looked at.
    pub fn parse(kind: &str, payload: &[u8]) -> Result<Self> {
        let event = match EventKind::parse(kind)? {
            EventKind::Push => Self::Push(payload::parse_push(payload)?),
            EventKind::Status => Self::Status(payload::parse_status(payload)?),
            EventKind::PullRequest => Self::PullRequest(payload::parse_pull_request(payload)?),
            EventKind::CheckSuite => Self::CheckSuite(payload::parse_check(kind, payload)?),
            EventKind::CheckRun => Self::CheckRun(payload::parse_check(kind, payload)?),
            EventKind::PullRequestReview => {
                Self::PullRequestReview(payload::parse_review(payload)?)
            }
            EventKind::Schedule => Self::Schedule,
            EventKind::IssueComment => Self::IssueComment(payload::parse_issue_comment(payload)?),
        };
        Ok(event)
    }

    /// The kind this event was parsed as
    pub const fn kind(&self) -> EventKind {
        match self {
            Self::Push(_) => EventKind::Push,
            Self::Status(_) => EventKind::Status,
            Self::PullRequest(_) => EventKind::PullRequest,
            Self::CheckSuite(_) => EventKind::CheckSuite,
            Self::CheckRun(_) => EventKind::CheckRun,
            Self::PullRequestReview(_) => EventKind::PullRequestReview,
            Self::Schedule => EventKind::Schedule,
            Self::IssueComment(_) => EventKind::IssueComment,
        }
    }
}
