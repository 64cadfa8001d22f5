//! Authentication for GitHub
//!
//! Supports environment variables and the `gh` CLI.

use crate::error::{Error, Result};
use tokio::process::Command;
use tracing::debug;

/// Source of authentication token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthSource {
    /// Token from CLI tool (gh)
    Cli,
    /// Token from environment variable
    EnvVar,
}

/// Resolved GitHub credentials
#[derive(Debug, Clone)]
pub struct GitHubAuthConfig {
    /// API token
    pub token: String,
    /// Where the token came from
    pub source: AuthSource,
}

/// Environment variables checked in order
const TOKEN_VARS: [&str; 2] = ["GITHUB_TOKEN", "GH_TOKEN"];

/// Resolve a GitHub token
///
/// Checks `GITHUB_TOKEN`, then `GH_TOKEN`, then `gh auth token`.
pub async fn get_github_auth() -> Result<GitHubAuthConfig> {
    let from_env = TOKEN_VARS
        .iter()
        .find_map(|var| std::env::var(var).ok().filter(|t| !t.trim().is_empty()));
    if let Some(token) = from_env {
        debug!("using GitHub token from environment");
        return Ok(GitHubAuthConfig {
            token: token.trim().to_string(),
            source: AuthSource::EnvVar,
        });
    }

    debug!("no token in environment, asking gh CLI");
    let output = Command::new("gh")
        .args(["auth", "token"])
        .output()
        .await
        .map_err(|e| Error::Auth(format!("no GITHUB_TOKEN set and gh CLI unavailable: {e}")))?;

    if !output.status.success() {
        return Err(Error::Auth(
            "no GITHUB_TOKEN set and `gh auth token` failed".to_string(),
        ));
    }

    let token = String::from_utf8_lossy(&output.stdout).trim().to_string();
    if token.is_empty() {
        return Err(Error::Auth("gh CLI returned an empty token".to_string()));
    }

    Ok(GitHubAuthConfig {
        token,
        source: AuthSource::Cli,
    })
}
