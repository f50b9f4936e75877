//! Client-side settings: a small key/value store owned by the console.

use async_trait::async_trait;
use std::sync::Arc;

use crate::errors::Result;

/// Set once the first-visit help dialog has been shown.
pub const HELP_DIALOG_SEEN_KEY: &str = "alreadyVisited";

/// Persistence for console settings. Reads are synchronous, writes go through the store's
/// writer.
#[async_trait]
pub trait SettingsRepositoryTrait: Send + Sync {
    fn get_setting(&self, key: &str) -> Result<Option<String>>;

    async fn set_setting(&self, key: &str, value: &str) -> Result<()>;
}

pub struct SettingsService {
    repository: Arc<dyn SettingsRepositoryTrait>,
}

impl SettingsService {
    pub fn new(repository: Arc<dyn SettingsRepositoryTrait>) -> Self {
        Self { repository }
    }

    pub fn help_dialog_seen(&self) -> Result<bool> {
        Ok(self
            .repository
            .get_setting(HELP_DIALOG_SEEN_KEY)?
            .is_some_and(|value| value == "true"))
    }

    /// True exactly once: on the first call before the flag is persisted. The flag is
    /// written as part of the call.
    pub async fn take_first_visit(&self) -> Result<bool> {
        if self.help_dialog_seen()? {
            return Ok(false);
        }
        self.repository
            .set_setting(HELP_DIALOG_SEEN_KEY, "true")
            .await?;
        log::debug!("First visit recorded");
        Ok(true)
    }
}
