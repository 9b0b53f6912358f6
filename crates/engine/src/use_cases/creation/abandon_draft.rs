//! Abandon draft use case.
//!
//! Drops an in-progress build, whether the player finished it elsewhere or
//! walked away from it.

use std::sync::Arc;

use heroforge_domain::CharacterId;

use crate::infrastructure::ports::BuildStateRepo;

use super::error::CreationError;

pub struct AbandonDraft {
    repo: Arc<dyn BuildStateRepo>,
}

impl AbandonDraft {
    pub fn new(repo: Arc<dyn BuildStateRepo>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, id: CharacterId) -> Result<(), CreationError> {
        match self.repo.delete(id).await {
            Ok(()) => {
                tracing::info!(character_id = %id, "Character draft discarded");
                Ok(())
            }
            Err(e) if e.is_not_found() => Err(CreationError::DraftNotFound(id)),
            Err(e) => Err(e.into()),
        }
    }
}
