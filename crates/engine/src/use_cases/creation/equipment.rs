//! Equipment step use case.
//!
//! `begin` builds a resolver from the catalog's class and background choices
//! and replays whatever the player saved last time. `complete` persists the
//! resolver's payload once every choice is resolved.
//!
//! Choice ids are only unique within one catalog list, so every id is
//! prefixed with its source (`class:<id>`, `background:<id>`). The saved
//! payload carries the prefixed ids.

use std::sync::Arc;

use heroforge_domain::{
    step_names, BuildState, CharacterId, Choice, ChoiceResolver, SelectionPayload,
};

use crate::infrastructure::ports::{BuildStateRepo, CatalogPort, ClockPort};

use super::error::CreationError;

pub const CLASS_SOURCE: &str = "class";
pub const BACKGROUND_SOURCE: &str = "background";

/// Id a catalog choice gets inside the equipment step.
pub fn scoped_choice_id(source: &str, choice_id: &str) -> String {
    format!("{source}:{choice_id}")
}

fn scoped(source: &str, choices: Vec<Choice>) -> impl Iterator<Item = Choice> + '_ {
    choices.into_iter().map(move |mut choice| {
        choice.id = scoped_choice_id(source, &choice.id);
        choice
    })
}

/// Live selection state for one visit to the equipment step.
#[derive(Debug, Clone)]
pub struct EquipmentSession {
    pub character_id: CharacterId,
    pub resolver: ChoiceResolver,
    /// Saved picks that no longer matched the catalog
    pub dropped: usize,
}

pub struct EquipmentStep {
    repo: Arc<dyn BuildStateRepo>,
    catalog: Arc<dyn CatalogPort>,
    clock: Arc<dyn ClockPort>,
}

impl EquipmentStep {
    pub fn new(
        repo: Arc<dyn BuildStateRepo>,
        catalog: Arc<dyn CatalogPort>,
        clock: Arc<dyn ClockPort>,
    ) -> Self {
        Self {
            repo,
            catalog,
            clock,
        }
    }

    async fn load(&self, id: CharacterId) -> Result<BuildState, CreationError> {
        self.repo
            .load(id)
            .await?
            .ok_or(CreationError::DraftNotFound(id))
    }

    async fn choices_for(&self, state: &BuildState) -> Result<Vec<Choice>, CreationError> {
        let mut choices = Vec::new();
        if let Some(class) = &state.class {
            let class_choices = self.catalog.class_equipment_choices(&class.key).await?;
            choices.extend(scoped(CLASS_SOURCE, class_choices));
        }
        if let Some(background) = &state.background {
            let background_choices = self
                .catalog
                .background_equipment_choices(&background.key)
                .await?;
            choices.extend(scoped(BACKGROUND_SOURCE, background_choices));
        }
        Ok(choices)
    }

    pub async fn begin(&self, id: CharacterId) -> Result<EquipmentSession, CreationError> {
        let state = self.load(id).await?;
        let choices = self.choices_for(&state).await?;
        let saved = state.equipment.clone().unwrap_or_default();

        let seeded = ChoiceResolver::from_saved(choices, &saved)?;
        if seeded.dropped > 0 {
            tracing::warn!(
                character_id = %id,
                dropped = seeded.dropped,
                "Saved equipment selections no longer match the catalog"
            );
        }

        Ok(EquipmentSession {
            character_id: id,
            resolver: seeded.resolver,
            dropped: seeded.dropped,
        })
    }

    /// Persist the selections. The resolver is only read, so a failed save
    /// leaves the player's picks in place for a retry.
    pub async fn complete(
        &self,
        id: CharacterId,
        resolver: &ChoiceResolver,
    ) -> Result<SelectionPayload, CreationError> {
        let unresolved = resolver.unresolved_choices();
        if !unresolved.is_empty() {
            return Err(CreationError::IncompleteSelection {
                unresolved: unresolved.into_iter().map(str::to_string).collect(),
            });
        }

        let mut state = self.load(id).await?;
        let payload = resolver.to_persistable_payload();
        state.equipment = Some(payload.clone());
        state.mark_completed(step_names::EQUIPMENT);
        state.touch(self.clock.now());
        self.repo.save(&state).await?;

        tracing::info!(
            character_id = %id,
            selections = payload.selections.len(),
            "Equipment step completed"
        );
        Ok(payload)
    }
}
