//! D&D 5th Edition character creation flow.

use super::graph::StepGraph;
use super::step::StepDefinition;
use crate::build_state::BuildState;
use crate::error::DomainError;

/// Step names used by the D&D 5e flow.
pub mod step_names {
    pub const RACE: &str = "race";
    pub const SUBRACE: &str = "subrace";
    pub const CLASS: &str = "class";
    pub const SUBCLASS: &str = "subclass";
    pub const BACKGROUND: &str = "background";
    pub const ABILITIES: &str = "abilities";
    pub const RACIAL_BONUSES: &str = "racial_bonuses";
    pub const PROFICIENCIES: &str = "proficiencies";
    pub const LANGUAGES: &str = "languages";
    pub const EQUIPMENT: &str = "equipment";
    pub const SPELLS: &str = "spells";
    pub const DETAILS: &str = "details";
    pub const REVIEW: &str = "review";
}

use step_names::*;

/// The declarative step list, in wizard order.
pub fn dnd5e_creation_steps() -> Vec<StepDefinition> {
    vec![
        StepDefinition::always(RACE),
        StepDefinition::new(SUBRACE, BuildState::race_has_subraces),
        StepDefinition::always(CLASS),
        StepDefinition::new(SUBCLASS, BuildState::picks_subclass_at_creation),
        StepDefinition::always(BACKGROUND),
        StepDefinition::always(ABILITIES),
        StepDefinition::new(RACIAL_BONUSES, BuildState::offers_ability_bonus_choice),
        StepDefinition::always(PROFICIENCIES).skip_when(|s| s.skill_choice_count() == 0),
        StepDefinition::new(LANGUAGES, |s| s.language_choice_count() > 0),
        StepDefinition::always(EQUIPMENT),
        StepDefinition::new(SPELLS, BuildState::is_spellcaster),
        StepDefinition::always(DETAILS),
        StepDefinition::always(REVIEW),
    ]
}

pub fn dnd5e_step_graph() -> Result<StepGraph, DomainError> {
    StepGraph::new(dnd5e_creation_steps())
}
