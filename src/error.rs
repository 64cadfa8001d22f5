//! Error types for merge-pilot

use thiserror::Error;

/// Errors that can abort a reconciliation
#[derive(Debug, Error)]
pub enum Error {
    /// Event kind outside the eight handled kinds
    #[error("unrecognized event: {0}")]
    UnrecognizedEvent(String),

    /// Local invocation URL did not match `https://<host>/<owner>/<repo>/(pull|tree)/<ref>`
    #[error("invalid target URL: {0}")]
    InvalidTargetUrl(String),

    /// Event payload could not be deserialized
    #[error("invalid {kind} payload: {source}")]
    InvalidPayload {
        /// Event kind the payload was parsed as
        kind: String,
        /// Underlying JSON error
        #[source]
        source: serde_json::Error,
    },

    /// Scheduled trigger without a configured project column
    #[error("no project column configured for scheduled run")]
    MissingProjectColumn,

    /// Repository identity is not of the form `owner/repo`
    #[error("invalid repository identity: {0:?} (expected owner/repo)")]
    InvalidRepository(String),

    /// Project card content URL does not have the expected shape
    #[error("malformed project card reference: {url} ({segments} segments)")]
    MalformedCardReference {
        /// The card's content URL
        url: String,
        /// Number of `/`-separated segments found
        segments: usize,
    },

    /// No usable token
    #[error("authentication failed: {0}")]
    Auth(String),

    /// GitHub API error
    #[error("GitHub API error: {0}")]
    GitHubApi(String),

    /// Generic platform error
    #[error("platform error: {0}")]
    Platform(String),

    /// Bringing a PR up to date failed
    #[error("update of PR #{number} failed: {message}")]
    Update {
        /// PR number
        number: u64,
        /// Failure detail
        message: String,
    },

    /// Merging a PR failed
    #[error("merge of PR #{number} failed: {message}")]
    Merge {
        /// PR number
        number: u64,
        /// Failure detail
        message: String,
    },
}

impl From<octocrab::Error> for Error {
    fn from(e: octocrab::Error) -> Self {
        Self::GitHubApi(e.to_string())
    }
}

impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Self {
        Self::GitHubApi(e.to_string())
    }
}

/// Result alias using [`Error`]
pub type Result<T> = std::result::Result<T, Error>;
