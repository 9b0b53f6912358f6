//! In-memory draft storage.
//!
//! Builds are stored as serialized JSON so the adapter behaves like a real
//! store: callers get an independent copy on every load and anything that
//! fails to round-trip surfaces as a `RepoError`.

use async_trait::async_trait;
use dashmap::DashMap;
use heroforge_domain::{BuildState, CharacterId};

use crate::infrastructure::ports::{BuildStateRepo, RepoError};

/// `BuildStateRepo` backed by a concurrent map.
#[derive(Default)]
pub struct InMemoryBuildStateRepo {
    drafts: DashMap<CharacterId, String>,
}

impl InMemoryBuildStateRepo {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.drafts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.drafts.is_empty()
    }
}

#[async_trait]
impl BuildStateRepo for InMemoryBuildStateRepo {
    async fn load(&self, id: CharacterId) -> Result<Option<BuildState>, RepoError> {
        let Some(json) = self.drafts.get(&id) else {
            return Ok(None);
        };
        let state: BuildState = serde_json::from_str(json.value())?;
        Ok(Some(state))
    }

    async fn save(&self, state: &BuildState) -> Result<(), RepoError> {
        let json = serde_json::to_string(state)?;
        self.drafts.insert(state.character_id, json);
        Ok(())
    }

    async fn delete(&self, id: CharacterId) -> Result<(), RepoError> {
        self.drafts
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| RepoError::not_found("BuildState", id))
    }
}
