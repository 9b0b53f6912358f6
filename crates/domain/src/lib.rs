//! Heroforge domain: the character creation wizard's core.
//!
//! - `wizard/` - step graph, visibility/skip predicates, access guard
//! - `choices/` - equipment and feature choice resolution
//! - `abilities/` - ability score methods, validity, racial modifiers
//! - `build_state` - the in-progress character the predicates read
//!
//! Everything here is synchronous and in-memory. Persistence and catalog
//! access live in the engine crate.

pub mod abilities;
pub mod build_state;
pub mod choices;
pub mod error;
pub mod ids;
pub mod value_objects;
pub mod wizard;

pub use abilities::{
    AbilityBonus, AbilityBonusChoice, AbilityMethod, AbilityRules, AbilityScoreAssigner,
    AbilityScoreSnapshot, FinalScore, ManualRange, PointBuyRules, PointCost, RacialModifiers,
};
pub use build_state::{BackgroundSelection, BuildState, ClassSelection, RaceSelection};
pub use choices::{
    is_selectable_feature, Choice, ChoiceOption, ChoiceResolver, ChoiceSelection, FeatureEntry,
    ItemGrant, ItemSelection, OptionKind, PickedItem, SeededResolver, SelectionPayload, SlotKey,
};
pub use error::DomainError;
pub use ids::CharacterId;
pub use value_objects::Ability;
pub use wizard::{
    dnd5e_creation_steps, dnd5e_step_graph, step_names, NavigationDecision, NavigationIntent,
    StepAccessGuard, StepDefinition, StepGraph, StepPredicate,
};
