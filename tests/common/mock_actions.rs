//! Recording update/merge collaborators

#![allow(dead_code)]

use async_trait::async_trait;
use merge_pilot::actions::PullRequestActions;
use merge_pilot::error::{Error, Result};
use merge_pilot::platform::PlatformService;
use merge_pilot::types::{PullRequest, Review};
use std::collections::HashSet;
use std::sync::Mutex;

/// Call record for `merge`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeCall {
    pub pr_number: u64,
    pub reviews: Vec<Review>,
}

/// Records which PRs were updated and merged, in order
///
/// Never talks to the platform, so any platform calls seen in a test come
/// from discovery and the review gate alone.
#[derive(Default)]
pub struct MockActions {
    update_calls: Mutex<Vec<u64>>,
    merge_calls: Mutex<Vec<MergeCall>>,
    error_on_update: Mutex<HashSet<u64>>,
    error_on_merge: Mutex<HashSet<u64>>,
}

impl MockActions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `update` fail for one PR
    pub fn fail_update(&self, pr_number: u64) {
        self.error_on_update.lock().unwrap().insert(pr_number);
    }

    /// Make `merge` fail for one PR
    pub fn fail_merge(&self, pr_number: u64) {
        self.error_on_merge.lock().unwrap().insert(pr_number);
    }

    pub fn update_calls(&self) -> Vec<u64> {
        self.update_calls.lock().unwrap().clone()
    }

    pub fn merge_calls(&self) -> Vec<MergeCall> {
        self.merge_calls.lock().unwrap().clone()
    }

    pub fn merged_numbers(&self) -> Vec<u64> {
        self.merge_calls().iter().map(|c| c.pr_number).collect()
    }

    /// Assert neither collaborator ran
    pub fn assert_untouched(&self) {
        assert!(
            self.update_calls().is_empty() && self.merge_calls().is_empty(),
            "Expected no update/merge but got updates={:?} merges={:?}",
            self.update_calls(),
            self.merged_numbers()
        );
    }
}

#[async_trait]
impl PullRequestActions for MockActions {
    async fn update(&self, _platform: &dyn PlatformService, pr: &PullRequest) -> Result<()> {
        self.update_calls.lock().unwrap().push(pr.number);

        if self.error_on_update.lock().unwrap().contains(&pr.number) {
            return Err(Error::Update {
                number: pr.number,
                message: "update rejected".to_string(),
            });
        }
        Ok(())
    }

    async fn merge(
        &self,
        _platform: &dyn PlatformService,
        pr: &PullRequest,
        reviews: &[Review],
    ) -> Result<()> {
        self.merge_calls.lock().unwrap().push(MergeCall {
            pr_number: pr.number,
            reviews: reviews.to_vec(),
        });

        if self.error_on_merge.lock().unwrap().contains(&pr.number) {
            return Err(Error::Merge {
                number: pr.number,
                message: "merge rejected".to_string(),
            });
        }
        Ok(())
    }
}
