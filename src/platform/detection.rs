//! Parsing of human-supplied GitHub URLs for local runs

use crate::error::{Error, Result};
use crate::types::RepoIdentity;
use url::Url;

/// What a local invocation URL points at
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LocalTarget {
    /// `https://<host>/<owner>/<repo>/pull/<number>`
    PullRequest {
        /// Host the URL was taken from
        host: String,
        /// Repository
        repo: RepoIdentity,
        /// PR number
        number: u64,
    },
    /// `https://<host>/<owner>/<repo>/tree/<branch>`
    Branch {
        /// Host the URL was taken from
        host: String,
        /// Repository
        repo: RepoIdentity,
        /// Branch name, may contain `/`
        branch: String,
    },
}

impl LocalTarget {
    /// Repository the target lives in
    pub const fn repo(&self) -> &RepoIdentity {
        match self {
            Self::PullRequest { repo, .. } | Self::Branch { repo, .. } => repo,
        }
    }

    /// Host the target lives on
    pub fn host(&self) -> &str {
        match self {
            Self::PullRequest { host, .. } | Self::Branch { host, .. } => host,
        }
    }
}

/// Parse `https://<host>/<owner>/<repo>/(pull|tree)/<ref-or-number>`
///
/// The grammar is three literal-position segments (owner, repo, kind)
/// followed by the capture. For `tree`, the capture is every remaining
/// segment so branch names containing `/` survive.
pub fn parse_target_url(input: &str) -> Result<LocalTarget> {
    let invalid = || Error::InvalidTargetUrl(input.to_string());

    let url = Url::parse(input.trim()).map_err(|_| invalid())?;
    if url.scheme() != "https" {
        return Err(invalid());
    }
    let host = url.host_str().ok_or_else(invalid)?.to_string();

    let segments: Vec<&str> = url
        .path_segments()
        .ok_or_else(invalid)?
        .filter(|s| !s.is_empty())
        .collect();

    let [owner, name, kind, rest @ ..] = segments.as_slice() else {
        return Err(invalid());
    };
    if rest.is_empty() {
        return Err(invalid());
    }
    let repo = RepoIdentity::new(*owner, *name).map_err(|_| invalid())?;

    match *kind {
        "pull" => {
            let [number] = rest else {
                return Err(invalid());
            };
            let number = number.parse().map_err(|_| invalid())?;
            Ok(LocalTarget::PullRequest { host, repo, number })
        }
        "tree" => Ok(LocalTarget::Branch {
            host,
            repo,
            branch: rest.join("/"),
        }),
        _ => Err(invalid()),
    }
}
