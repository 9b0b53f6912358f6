//! Class feature choices offered during creation.

use std::sync::Arc;

use heroforge_domain::{is_selectable_feature, CharacterId, FeatureEntry};

use crate::infrastructure::ports::{BuildStateRepo, CatalogPort};

use super::error::CreationError;

/// Characters are built at level 1.
pub const CREATION_LEVEL: u8 = 1;

/// Lists the class features the player must make a pick for.
pub struct SelectableFeatures {
    repo: Arc<dyn BuildStateRepo>,
    catalog: Arc<dyn CatalogPort>,
}

impl SelectableFeatures {
    pub fn new(repo: Arc<dyn BuildStateRepo>, catalog: Arc<dyn CatalogPort>) -> Self {
        Self { repo, catalog }
    }

    /// Empty until a class is chosen.
    pub async fn execute(&self, id: CharacterId) -> Result<Vec<FeatureEntry>, CreationError> {
        let state = self
            .repo
            .load(id)
            .await?
            .ok_or(CreationError::DraftNotFound(id))?;
        let Some(class) = &state.class else {
            return Ok(Vec::new());
        };

        let features = self
            .catalog
            .class_features(&class.key, CREATION_LEVEL)
            .await?;
        Ok(features.into_iter().filter(is_selectable_feature).collect())
    }
}
