//! Port traits for the persistence and catalog services.

use async_trait::async_trait;
use heroforge_domain::{BuildState, CharacterId, Choice, FeatureEntry};

use super::error::RepoError;

// =============================================================================
// Draft Storage
// =============================================================================

/// Persistence for in-progress builds. Called only at step boundaries.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BuildStateRepo: Send + Sync {
    async fn load(&self, id: CharacterId) -> Result<Option<BuildState>, RepoError>;
    async fn save(&self, state: &BuildState) -> Result<(), RepoError>;
    async fn delete(&self, id: CharacterId) -> Result<(), RepoError>;
}

// =============================================================================
// Catalog
// =============================================================================

/// Read-only race/class/background/item catalog.
///
/// Option lists come back fully resolved; eligibility filtering for
/// category picks happens on the catalog side.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CatalogPort: Send + Sync {
    async fn class_equipment_choices(&self, class_key: &str) -> Result<Vec<Choice>, RepoError>;
    async fn background_equipment_choices(
        &self,
        background_key: &str,
    ) -> Result<Vec<Choice>, RepoError>;
    async fn class_features(&self, class_key: &str, level: u8)
        -> Result<Vec<FeatureEntry>, RepoError>;
}
