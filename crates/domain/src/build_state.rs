//! The in-progress character build.
//!
//! `BuildState` is owned by the wizard host and persisted between steps.
//! Step predicates, the choice resolver and the ability assigner only ever
//! read it; the host writes it when a step completes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::abilities::{AbilityBonus, AbilityBonusChoice, AbilityScoreSnapshot};
use crate::choices::SelectionPayload;
use crate::ids::CharacterId;

/// A race or subrace as chosen from the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RaceSelection {
    pub key: String,
    pub name: String,
    #[serde(default)]
    pub has_subraces: bool,
    /// Fixed ability bonuses granted by this race
    #[serde(default)]
    pub ability_bonuses: Vec<AbilityBonus>,
    /// Choice-based ability bonuses (e.g. "+1 to two abilities of your choice")
    #[serde(default)]
    pub ability_bonus_choice: Option<AbilityBonusChoice>,
    /// Number of extra languages the player picks
    #[serde(default)]
    pub language_choices: u8,
}

/// A class as chosen from the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassSelection {
    pub key: String,
    pub name: String,
    #[serde(default)]
    pub is_spellcaster: bool,
    /// Level at which the subclass is chosen
    #[serde(default = "default_subclass_level")]
    pub subclass_level: u8,
    /// Number of skill proficiencies the player picks
    #[serde(default)]
    pub skill_choices: u8,
}

fn default_subclass_level() -> u8 {
    3
}

/// A background as chosen from the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BackgroundSelection {
    pub key: String,
    pub name: String,
    #[serde(default)]
    pub skill_choices: u8,
    #[serde(default)]
    pub language_choices: u8,
}

/// Accumulated character state for one wizard session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildState {
    pub character_id: CharacterId,
    #[serde(default)]
    pub race: Option<RaceSelection>,
    #[serde(default)]
    pub subrace: Option<RaceSelection>,
    #[serde(default)]
    pub class: Option<ClassSelection>,
    #[serde(default)]
    pub subclass: Option<String>,
    #[serde(default)]
    pub background: Option<BackgroundSelection>,
    #[serde(default)]
    pub abilities: Option<AbilityScoreSnapshot>,
    /// Ability bonuses the player resolved from the race's bonus choice
    #[serde(default)]
    pub ability_bonus_choices: Vec<AbilityBonus>,
    #[serde(default)]
    pub skill_proficiencies: Vec<String>,
    #[serde(default)]
    pub languages: Vec<String>,
    #[serde(default)]
    pub equipment: Option<SelectionPayload>,
    /// Names of steps the player has confirmed, in completion order
    #[serde(default)]
    pub completed_steps: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl BuildState {
    pub fn new(character_id: CharacterId, now: DateTime<Utc>) -> Self {
        Self {
            character_id,
            race: None,
            subrace: None,
            class: None,
            subclass: None,
            background: None,
            abilities: None,
            ability_bonus_choices: Vec::new(),
            skill_proficiencies: Vec::new(),
            languages: Vec::new(),
            equipment: None,
            completed_steps: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// The subrace if one is selected, otherwise the base race.
    pub fn effective_race(&self) -> Option<&RaceSelection> {
        self.subrace.as_ref().or(self.race.as_ref())
    }

    pub fn race_has_subraces(&self) -> bool {
        self.race.as_ref().is_some_and(|r| r.has_subraces)
    }

    pub fn is_spellcaster(&self) -> bool {
        self.class.as_ref().is_some_and(|c| c.is_spellcaster)
    }

    /// Whether the subclass is picked during creation (level 1 characters).
    pub fn picks_subclass_at_creation(&self) -> bool {
        self.class.as_ref().is_some_and(|c| c.subclass_level <= 1)
    }

    pub fn offers_ability_bonus_choice(&self) -> bool {
        self.effective_race()
            .and_then(|r| r.ability_bonus_choice.as_ref())
            .is_some_and(|c| c.count > 0)
    }

    /// Total skill proficiencies offered by class and background.
    pub fn skill_choice_count(&self) -> u32 {
        let class = self.class.as_ref().map_or(0, |c| u32::from(c.skill_choices));
        let background = self
            .background
            .as_ref()
            .map_or(0, |b| u32::from(b.skill_choices));
        class + background
    }

    /// Total extra languages offered by race, subrace and background.
    pub fn language_choice_count(&self) -> u32 {
        let race = self
            .race
            .as_ref()
            .map_or(0, |r| u32::from(r.language_choices));
        let subrace = self
            .subrace
            .as_ref()
            .map_or(0, |r| u32::from(r.language_choices));
        let background = self
            .background
            .as_ref()
            .map_or(0, |b| u32::from(b.language_choices));
        race + subrace + background
    }

    /// Change the race. Any subrace and resolved bonus choices belonged to the
    /// previous race and are cleared.
    pub fn set_race(&mut self, race: RaceSelection) {
        if self.race.as_ref().map(|r| r.key.as_str()) != Some(race.key.as_str()) {
            self.subrace = None;
            self.ability_bonus_choices.clear();
        }
        self.race = Some(race);
    }

    /// Change the subrace. Resolved bonus choices are cleared since the
    /// effective race changed.
    pub fn set_subrace(&mut self, subrace: Option<RaceSelection>) {
        if self.subrace.as_ref().map(|r| &r.key) != subrace.as_ref().map(|r| &r.key) {
            self.ability_bonus_choices.clear();
        }
        self.subrace = subrace;
    }

    /// Change the class. A subclass only makes sense for the class it was picked under.
    pub fn set_class(&mut self, class: ClassSelection) {
        if self.class.as_ref().map(|c| c.key.as_str()) != Some(class.key.as_str()) {
            self.subclass = None;
            self.equipment = None;
        }
        self.class = Some(class);
    }

    /// Change the background. Saved equipment picks include the background's
    /// choices and are cleared when the background changes.
    pub fn set_background(&mut self, background: BackgroundSelection) {
        if self.background.as_ref().map(|b| b.key.as_str()) != Some(background.key.as_str()) {
            self.equipment = None;
        }
        self.background = Some(background);
    }

    pub fn mark_completed(&mut self, step: &str) {
        if !self.is_completed(step) {
            self.completed_steps.push(step.to_string());
        }
    }

    pub fn is_completed(&self, step: &str) -> bool {
        self.completed_steps.iter().any(|s| s == step)
    }

    pub fn touch(&mut self, now: DateTime<Utc>) {
        self.updated_at = now;
    }
}
