//! Character creation use cases.
//!
//! Each wizard step that owns interactive state has a `begin`/`complete`
//! pair: `begin` seeds the state from the saved draft, `complete` validates
//! and persists it. Nothing is saved between those two calls. The remaining
//! steps complete through [`CompleteStep`] with a single [`StepSelection`].

use std::sync::Arc;

mod abandon_draft;
mod abilities;
mod complete_step;
mod equipment;
mod error;
mod features;
mod navigation;
mod start_draft;

pub use abandon_draft::AbandonDraft;
pub use abilities::{AbilitySession, AbilityStep};
pub use complete_step::{CompleteStep, CompletedStep, StepSelection};
pub use equipment::{
    scoped_choice_id, EquipmentSession, EquipmentStep, BACKGROUND_SOURCE, CLASS_SOURCE,
};
pub use error::CreationError;
pub use features::{SelectableFeatures, CREATION_LEVEL};
pub use navigation::{WizardNavigation, WizardProgress};
pub use start_draft::{StartDraft, StartedDraft};

/// Container for creation use cases.
pub struct CreationUseCases {
    pub start: Arc<StartDraft>,
    pub navigation: Arc<WizardNavigation>,
    pub complete: Arc<CompleteStep>,
    pub equipment: Arc<EquipmentStep>,
    pub abilities: Arc<AbilityStep>,
    pub features: Arc<SelectableFeatures>,
    pub abandon: Arc<AbandonDraft>,
}

impl CreationUseCases {
    pub fn new(
        start: Arc<StartDraft>,
        navigation: Arc<WizardNavigation>,
        complete: Arc<CompleteStep>,
        equipment: Arc<EquipmentStep>,
        abilities: Arc<AbilityStep>,
        features: Arc<SelectableFeatures>,
        abandon: Arc<AbandonDraft>,
    ) -> Self {
        Self {
            start,
            navigation,
            complete,
            equipment,
            abilities,
            features,
            abandon,
        }
    }
}
