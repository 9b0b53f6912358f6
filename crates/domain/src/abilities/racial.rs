use serde::{Deserialize, Serialize};

use crate::build_state::BuildState;
use crate::value_objects::Ability;

/// A flat bonus to one ability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbilityBonus {
    pub ability: Ability,
    pub amount: i32,
}

/// "Increase `count` abilities of your choice by `amount`", optionally
/// restricted to a set of abilities.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbilityBonusChoice {
    pub count: u8,
    pub amount: i32,
    /// Abilities the player may pick from; empty means any
    #[serde(default)]
    pub from: Vec<Ability>,
}

/// Racial modifiers in effect for a build: the fixed bonuses of the
/// effective race plus any choice-based bonuses the player resolved.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RacialModifiers {
    bonuses: Vec<AbilityBonus>,
}

impl RacialModifiers {
    pub fn new(bonuses: Vec<AbilityBonus>) -> Self {
        Self { bonuses }
    }

    /// Gather modifiers from the effective race (subrace over race) and the
    /// resolved bonus choices.
    pub fn from_build_state(state: &BuildState) -> Self {
        let fixed = state
            .effective_race()
            .map(|r| r.ability_bonuses.as_slice())
            .unwrap_or_default();
        let bonuses = fixed
            .iter()
            .chain(state.ability_bonus_choices.iter())
            .copied()
            .collect();
        Self { bonuses }
    }

    /// Sum of all bonuses targeting `ability`. Zero when none do.
    pub fn bonus_for(&self, ability: Ability) -> i32 {
        self.bonuses
            .iter()
            .filter(|b| b.ability == ability)
            .fold(0i32, |total, b| total.saturating_add(b.amount))
    }

    pub fn iter(&self) -> impl Iterator<Item = &AbilityBonus> {
        self.bonuses.iter()
    }
}
