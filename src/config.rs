//! Per-invocation settings
//!
//! Built once from CLI flags / environment and never mutated afterwards.

use crate::error::Result;
use crate::types::{MergeMethod, RepoIdentity};

/// Read-only configuration for one invocation
#[derive(Debug, Clone)]
pub struct Settings {
    /// Repository the invocation acts on
    pub repo: RepoIdentity,
    /// Logins whose approval makes a PR eligible; empty disables the check
    pub reviewers: Vec<String>,
    /// Project board column watched by scheduled runs
    pub project_column: Option<u64>,
    /// Merge method passed to the platform
    pub merge_method: MergeMethod,
}

impl Settings {
    /// Validate raw configuration values
    pub fn new(
        repository: &str,
        reviewers: &[String],
        project_column: Option<u64>,
        merge_method: MergeMethod,
    ) -> Result<Self> {
        let repo = RepoIdentity::parse(repository)?;
        Ok(Self::for_repo(repo)
            .with_reviewers(reviewers.iter().map(String::as_str))
            .with_project_column(project_column)
            .with_merge_method(merge_method))
    }

    /// Default settings for a repository: no reviewers, no column, merge commits
    pub fn for_repo(repo: RepoIdentity) -> Self {
        Self {
            repo,
            reviewers: Vec::new(),
            project_column: None,
            merge_method: MergeMethod::default(),
        }
    }

    /// Replace the reviewer allow-list; blank entries are dropped
    #[must_use]
    pub fn with_reviewers<'a>(mut self, reviewers: impl IntoIterator<Item = &'a str>) -> Self {
        self.reviewers = reviewers
            .into_iter()
            .map(str::trim)
            .filter(|r| !r.is_empty())
            .map(String::from)
            .collect();
        self
    }

    /// Set the watched project column
    #[must_use]
    pub const fn with_project_column(mut self, column: Option<u64>) -> Self {
        self.project_column = column;
        self
    }

    /// Set the merge method
    #[must_use]
    pub const fn with_merge_method(mut self, method: MergeMethod) -> Self {
        self.merge_method = method;
        self
    }

    /// Whether an approval allow-list is configured
    pub fn requires_approval(&self) -> bool {
        !self.reviewers.is_empty()
    }

    /// Case-insensitive allow-list membership
    pub fn is_allowed_reviewer(&self, login: &str) -> bool {
        self.reviewers.iter().any(|r| r.eq_ignore_ascii_case(login))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn test_new_validates_repository() {
        let result = Settings::new("no-slash", &[], None, MergeMethod::Merge);
        assert!(matches!(result, Err(Error::InvalidRepository(_))));
    }

    #[test]
    fn test_blank_reviewers_are_dropped() {
        let reviewers = vec![" alice ".to_string(), String::new(), "bob".to_string()];
        let settings = Settings::new("o/r", &reviewers, Some(7), MergeMethod::Squash).unwrap();
        assert_eq!(settings.reviewers, vec!["alice", "bob"]);
        assert_eq!(settings.project_column, Some(7));
        assert_eq!(settings.merge_method, MergeMethod::Squash);
        assert!(settings.requires_approval());
    }

    #[test]
    fn test_reviewer_match_ignores_case() {
        let settings =
            Settings::for_repo(RepoIdentity::new("o", "r").unwrap()).with_reviewers(["Alice"]);
        assert!(settings.is_allowed_reviewer("alice"));
        assert!(!settings.is_allowed_reviewer("mallory"));
    }

    #[test]
    fn test_defaults_have_no_gate() {
        let settings = Settings::for_repo(RepoIdentity::new("o", "r").unwrap());
        assert!(!settings.requires_approval());
        assert!(settings.project_column.is_none());
    }
}
