//! What an invocation did

use crate::reconcile::BatchOutcome;

/// Why an event led to no work
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IgnoreReason {
    /// The event's action is not one merge-pilot reacts to
    ActionNotHandled {
        /// Event kind
        kind: &'static str,
        /// The action label
        action: String,
    },
    /// A review was submitted without approving
    ReviewNotApproved {
        /// Review state as sent
        state: String,
    },
    /// Comment on a plain issue
    CommentNotOnPullRequest {
        /// Issue number
        issue: u64,
    },
    /// Push to something other than a branch (e.g. a tag)
    NotABranchRef {
        /// The pushed ref
        git_ref: String,
    },
    /// Push happened in a repository other than the configured one
    ForeignRepository {
        /// Repository named by the payload
        repo: String,
    },
    /// Status is not `success`
    StatusNotSuccessful {
        /// Status state as sent
        state: String,
    },
    /// Status event names no branches
    NoBranches,
    /// Check has not completed
    CheckNotCompleted {
        /// Check action as sent
        action: String,
    },
    /// Check completed without success
    CheckNotSuccessful {
        /// Conclusion as sent
        conclusion: Option<String>,
    },
    /// Check carries neither an attached PR nor a head branch
    NoPullRequestOrBranch,
}

impl std::fmt::Display for IgnoreReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ActionNotHandled { kind, action } => {
                write!(f, "{kind} action {action:?} is not handled")
            }
            Self::ReviewNotApproved { state } => write!(f, "review state is {state:?}, not approved"),
            Self::CommentNotOnPullRequest { issue } => {
                write!(f, "comment on #{issue} is not on a pull request")
            }
            Self::NotABranchRef { git_ref } => write!(f, "{git_ref} is not a branch ref"),
            Self::ForeignRepository { repo } => write!(f, "push is to {repo}, not this repository"),
            Self::StatusNotSuccessful { state } => write!(f, "status is {state:?}, not success"),
            Self::NoBranches => write!(f, "status names no branches"),
            Self::CheckNotCompleted { action } => write!(f, "check action is {action:?}, not completed"),
            Self::CheckNotSuccessful { conclusion } => match conclusion {
                Some(c) => write!(f, "check concluded {c:?}, not success"),
                None => write!(f, "check has no conclusion"),
            },
            Self::NoPullRequestOrBranch => {
                write!(f, "check has no attached pull request and no head branch")
            }
        }
    }
}

/// Result of routing one event
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Nothing was attempted
    Ignored(IgnoreReason),
    /// The single-PR pipeline ran to completion
    Reconciled {
        /// PR number
        pr_number: u64,
    },
    /// A batch ran; individual failures are inside
    Batch(BatchOutcome),
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Ignored(reason) => write!(f, "ignored: {reason}"),
            Self::Reconciled { pr_number } => write!(f, "reconciled PR #{pr_number}"),
            Self::Batch(batch) if batch.attempted == 0 => {
                write!(f, "nothing to do: no pull requests found")
            }
            Self::Batch(batch) => write!(
                f,
                "reconciled {} of {} pull request(s)",
                batch.reconciled, batch.attempted
            ),
        }
    }
}
