//! Shared command context for CLI commands

use merge_pilot::actions::PlatformActions;
use merge_pilot::auth::get_github_auth;
use merge_pilot::config::Settings;
use merge_pilot::error::Result;
use merge_pilot::platform::GitHubService;
use merge_pilot::reconcile::ReconcileContext;
use tracing::debug;

/// Collaborators for one invocation
///
/// Built after the event kind and settings are validated, so client input
/// errors surface before any authentication or network work.
pub struct CommandContext {
    /// Validated settings
    pub settings: Settings,
    /// Platform service (GitHub)
    pub platform: GitHubService,
    /// Update/merge collaborators
    pub actions: PlatformActions,
}

impl CommandContext {
    /// Resolve credentials and create the platform service
    pub async fn new(settings: Settings, host: Option<String>) -> Result<Self> {
        let auth = get_github_auth().await?;
        debug!(source = ?auth.source, "resolved GitHub token");

        let platform = GitHubService::new(&auth.token, settings.repo.clone(), host)?;
        let actions = PlatformActions::new(settings.clone());

        Ok(Self {
            settings,
            platform,
            actions,
        })
    }

    /// Borrow as a reconciliation context
    pub fn reconcile(&self) -> ReconcileContext<'_> {
        ReconcileContext::new(&self.platform, &self.actions, &self.settings)
    }
}
