use std::sync::Arc;

use quest_core::Clock;
use quest_core::model::{LevelCatalog, LevelOverview, ProgressState, SubLevelId};
use storage::repository::{KeyValueStore, PROGRESS_KEY};
use tokio::sync::Mutex;

use crate::error::ProgressStoreError;

/// Persists per-sub-level mastery as one JSON blob and serves the current view of it.
///
/// Every write is a read-modify-write of the whole map performed under a
/// single lock, so concurrent attempts on different sub-levels cannot clobber
/// each other. The in-memory copy is updated before the write goes out and is
/// never rolled back.
pub struct ProgressStore {
    clock: Clock,
    kv: Arc<dyn KeyValueStore>,
    state: Mutex<ProgressState>,
}

impl ProgressStore {
    #[must_use]
    pub fn new(clock: Clock, kv: Arc<dyn KeyValueStore>) -> Self {
        Self {
            clock,
            kv,
            state: Mutex::new(ProgressState::new()),
        }
    }

    /// Load progress, falling back to an empty map on any read or parse failure.
    ///
    /// The persisted map is merged into the in-memory copy, so updates whose
    /// write failed earlier in this process stay visible.
    pub async fn load(&self) -> ProgressState {
        let mut state = self.state.lock().await;
        let persisted = self.read_persisted().await;
        state.merge(&persisted);
        state.clone()
    }

    /// Current in-memory view without touching storage.
    pub async fn snapshot(&self) -> ProgressState {
        self.state.lock().await.clone()
    }

    /// Record one finished attempt and persist the full map before returning.
    ///
    /// Returns the best score stored for `id` after the update.
    ///
    /// # Errors
    ///
    /// Returns `ProgressStoreError::Invalid` for scores above 100 (nothing is
    /// changed). Returns `ProgressStoreError::Persist` or `Serialize` if the
    /// write fails; the in-memory state still carries the update.
    pub async fn record_attempt(
        &self,
        id: &SubLevelId,
        score: u32,
    ) -> Result<u8, ProgressStoreError> {
        let mut state = self.state.lock().await;

        let persisted = self.read_persisted().await;
        let mut next = state.clone();
        next.merge(&persisted);
        let best = next.record_attempt(id, score, self.clock.now())?;
        *state = next;

        let blob = serde_json::to_string(&*state).inspect_err(|err| {
            tracing::warn!(sub_level = %id, error = %err, "failed to serialize progress");
        })?;
        self.kv.set(PROGRESS_KEY, &blob).await.inspect_err(|err| {
            tracing::warn!(sub_level = %id, error = %err, "failed to persist progress");
        })?;

        tracing::debug!(sub_level = %id, score, best, "recorded attempt");
        Ok(best)
    }

    /// Level list read model built from a fresh `load()`.
    pub async fn overview(&self, catalog: &LevelCatalog) -> Vec<LevelOverview> {
        let state = self.load().await;
        LevelOverview::build_all(catalog, &state)
    }

    async fn read_persisted(&self) -> ProgressState {
        let raw = match self.kv.get(PROGRESS_KEY).await {
            Ok(Some(raw)) => raw,
            Ok(None) => return ProgressState::new(),
            Err(err) => {
                tracing::warn!(error = %err, "progress read failed; using empty progress");
                return ProgressState::new();
            }
        };

        serde_json::from_str(&raw).unwrap_or_else(|err| {
            tracing::warn!(error = %err, "stored progress is malformed; using empty progress");
            ProgressState::new()
        })
    }
}
