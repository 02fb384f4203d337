use std::sync::Arc;

use quest_core::model::Avatar;
use storage::repository::{AVATAR_KEY, KeyValueStore};

use crate::error::PreferencesError;

/// Small learner preferences stored next to the progress blob.
#[derive(Clone)]
pub struct PreferencesService {
    kv: Arc<dyn KeyValueStore>,
}

impl PreferencesService {
    #[must_use]
    pub fn new(kv: Arc<dyn KeyValueStore>) -> Self {
        Self { kv }
    }

    /// Selected avatar, or `None` if nothing usable is stored.
    pub async fn load_avatar(&self) -> Option<Avatar> {
        let raw = match self.kv.get(AVATAR_KEY).await {
            Ok(raw) => raw?,
            Err(err) => {
                tracing::warn!(error = %err, "avatar read failed");
                return None;
            }
        };
        serde_json::from_str(&raw)
            .inspect_err(|err| tracing::warn!(error = %err, "stored avatar is malformed"))
            .ok()
    }

    /// Validate and persist the selected avatar.
    ///
    /// # Errors
    ///
    /// Returns `PreferencesError` if the id is blank or persistence fails.
    pub async fn save_avatar(&self, id: &str) -> Result<Avatar, PreferencesError> {
        let avatar = Avatar::new(id)?;
        let blob = serde_json::to_string(&avatar)?;
        self.kv.set(AVATAR_KEY, &blob).await?;
        Ok(avatar)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use storage::repository::InMemoryStore;

    #[tokio::test]
    async fn avatar_round_trips_through_storage() {
        let kv = InMemoryStore::new();
        let prefs = PreferencesService::new(Arc::new(kv.clone()));

        assert!(prefs.load_avatar().await.is_none());
        prefs.save_avatar(" owl ").await.unwrap();
        assert_eq!(kv.get(AVATAR_KEY).await.unwrap().as_deref(), Some("\"owl\""));
        assert_eq!(prefs.load_avatar().await.unwrap().id(), "owl");
    }

    #[tokio::test]
    async fn malformed_avatar_reads_as_none() {
        let kv = InMemoryStore::new();
        kv.seed(AVATAR_KEY, "owl");
        let prefs = PreferencesService::new(Arc::new(kv));
        assert!(prefs.load_avatar().await.is_none());
    }

    #[tokio::test]
    async fn blank_avatar_is_not_saved() {
        let kv = InMemoryStore::new();
        let prefs = PreferencesService::new(Arc::new(kv.clone()));
        assert!(matches!(
            prefs.save_avatar("  ").await.unwrap_err(),
            PreferencesError::Account(_)
        ));
        assert!(kv.get(AVATAR_KEY).await.unwrap().is_none());
    }
}
