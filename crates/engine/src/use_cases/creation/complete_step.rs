//! Complete step use case.
//!
//! Records the player's selection for one of the data-entry steps (race,
//! class, background, ...) and marks the step completed. Equipment and
//! abilities carry live session state and go through their own use cases.

use std::collections::HashSet;
use std::sync::Arc;

use heroforge_domain::{
    step_names, AbilityBonus, BackgroundSelection, BuildState, CharacterId, ClassSelection,
    DomainError, RaceSelection, StepGraph,
};
use serde::{Deserialize, Serialize};

use crate::infrastructure::ports::{BuildStateRepo, ClockPort};

use super::error::CreationError;

/// The selection made on a step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "step", content = "value")]
pub enum StepSelection {
    Race(RaceSelection),
    Subrace(RaceSelection),
    Class(ClassSelection),
    Subclass(String),
    Background(BackgroundSelection),
    RacialBonuses(Vec<AbilityBonus>),
    Proficiencies(Vec<String>),
    Languages(Vec<String>),
    /// A step with nothing to record here (spells, details, review)
    Confirm(String),
}

/// Steps whose data must arrive through a typed selection or a step use case.
const DATA_STEPS: &[&str] = &[
    step_names::RACE,
    step_names::SUBRACE,
    step_names::CLASS,
    step_names::SUBCLASS,
    step_names::BACKGROUND,
    step_names::ABILITIES,
    step_names::RACIAL_BONUSES,
    step_names::PROFICIENCIES,
    step_names::LANGUAGES,
    step_names::EQUIPMENT,
];

impl StepSelection {
    pub fn step(&self) -> &str {
        match self {
            Self::Race(_) => step_names::RACE,
            Self::Subrace(_) => step_names::SUBRACE,
            Self::Class(_) => step_names::CLASS,
            Self::Subclass(_) => step_names::SUBCLASS,
            Self::Background(_) => step_names::BACKGROUND,
            Self::RacialBonuses(_) => step_names::RACIAL_BONUSES,
            Self::Proficiencies(_) => step_names::PROFICIENCIES,
            Self::Languages(_) => step_names::LANGUAGES,
            Self::Confirm(step) => step.as_str(),
        }
    }

    fn apply(self, state: &mut BuildState) -> Result<(), DomainError> {
        match self {
            Self::Race(race) => state.set_race(race),
            Self::Subrace(subrace) => state.set_subrace(Some(subrace)),
            Self::Class(class) => state.set_class(class),
            Self::Subclass(subclass) => state.subclass = Some(subclass),
            Self::Background(background) => state.set_background(background),
            Self::RacialBonuses(bonuses) => {
                check_bonus_choices(state, &bonuses)?;
                state.ability_bonus_choices = bonuses;
            }
            Self::Proficiencies(skills) => {
                check_pick_count("skill proficiencies", &skills, state.skill_choice_count())?;
                state.skill_proficiencies = skills;
            }
            Self::Languages(languages) => {
                check_pick_count("languages", &languages, state.language_choice_count())?;
                state.languages = languages;
            }
            Self::Confirm(step) => {
                if DATA_STEPS.contains(&step.as_str()) {
                    return Err(DomainError::validation(format!(
                        "step {step} needs a selection to complete"
                    )));
                }
            }
        }
        Ok(())
    }
}

fn check_pick_count(what: &str, picks: &[String], expected: u32) -> Result<(), DomainError> {
    let distinct: HashSet<&str> = picks.iter().map(String::as_str).collect();
    if distinct.len() != picks.len() {
        return Err(DomainError::validation(format!("duplicate {what}")));
    }
    if u32::try_from(picks.len()).ok() != Some(expected) {
        return Err(DomainError::validation(format!(
            "expected {expected} {what}, got {}",
            picks.len()
        )));
    }
    Ok(())
}

fn check_bonus_choices(state: &BuildState, bonuses: &[AbilityBonus]) -> Result<(), DomainError> {
    let choice = state
        .effective_race()
        .and_then(|r| r.ability_bonus_choice.as_ref())
        .ok_or_else(|| DomainError::validation("race offers no ability bonus choice"))?;

    if bonuses.len() != usize::from(choice.count) {
        return Err(DomainError::validation(format!(
            "expected {} ability bonus choices, got {}",
            choice.count,
            bonuses.len()
        )));
    }
    let mut seen = HashSet::new();
    for bonus in bonuses {
        if !choice.from.contains(&bonus.ability) || bonus.amount != choice.amount {
            return Err(DomainError::validation(format!(
                "bonus {:+} to {} is not offered",
                bonus.amount, bonus.ability
            )));
        }
        if !seen.insert(bonus.ability) {
            return Err(DomainError::validation(format!(
                "{} chosen more than once",
                bonus.ability
            )));
        }
    }
    Ok(())
}

/// Result of completing a step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletedStep {
    pub step: String,
    /// Where Continue leads with the updated build; `None` when the wizard is done
    pub next_step: Option<String>,
}

pub struct CompleteStep {
    repo: Arc<dyn BuildStateRepo>,
    clock: Arc<dyn ClockPort>,
    graph: Arc<StepGraph>,
}

impl CompleteStep {
    pub fn new(
        repo: Arc<dyn BuildStateRepo>,
        clock: Arc<dyn ClockPort>,
        graph: Arc<StepGraph>,
    ) -> Self {
        Self { repo, clock, graph }
    }

    pub async fn execute(
        &self,
        id: CharacterId,
        selection: StepSelection,
    ) -> Result<CompletedStep, CreationError> {
        let mut state = self
            .repo
            .load(id)
            .await?
            .ok_or(CreationError::DraftNotFound(id))?;

        let step = selection.step().to_string();
        if !self.graph.is_step_accessible(&step, &state) {
            tracing::warn!(character_id = %id, step = %step, "Completion of inaccessible step");
            return Err(CreationError::StepNotAccessible(step));
        }

        selection.apply(&mut state)?;
        state.mark_completed(&step);
        state.touch(self.clock.now());
        self.repo.save(&state).await?;

        let next_step = self.graph.next_step(&step, &state).map(str::to_string);
        tracing::info!(
            character_id = %id,
            step = %step,
            next_step = ?next_step,
            "Creation step completed"
        );
        Ok(CompletedStep { step, next_step })
    }
}
