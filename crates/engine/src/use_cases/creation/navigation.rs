//! Wizard navigation use case.
//!
//! Loads the draft and answers routing questions against the step graph.
//! Navigation never writes; completion is recorded by the step use cases.

use std::sync::Arc;

use heroforge_domain::{
    BuildState, CharacterId, NavigationDecision, NavigationIntent, StepAccessGuard, StepGraph,
};
use serde::Serialize;

use crate::infrastructure::ports::BuildStateRepo;

use super::error::CreationError;

/// Progress bar data for the current step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WizardProgress {
    pub steps: Vec<String>,
    pub current_index: Option<usize>,
    pub completed: Vec<String>,
}

pub struct WizardNavigation {
    repo: Arc<dyn BuildStateRepo>,
    graph: Arc<StepGraph>,
}

impl WizardNavigation {
    pub fn new(repo: Arc<dyn BuildStateRepo>, graph: Arc<StepGraph>) -> Self {
        Self { repo, graph }
    }

    async fn load(&self, id: CharacterId) -> Result<BuildState, CreationError> {
        self.repo
            .load(id)
            .await?
            .ok_or(CreationError::DraftNotFound(id))
    }

    /// Decide whether the player may land on `target`.
    pub async fn enter(
        &self,
        id: CharacterId,
        target: &str,
        intent: NavigationIntent,
    ) -> Result<NavigationDecision, CreationError> {
        let state = self.load(id).await?;
        let decision = StepAccessGuard::new(&self.graph).guard(target, intent, &state);
        match &decision {
            NavigationDecision::Allow => {
                tracing::debug!(character_id = %id, step = %target, "Step entry allowed");
            }
            NavigationDecision::Redirect { to } => {
                tracing::debug!(character_id = %id, step = %target, redirect = %to, "Step entry redirected");
            }
            NavigationDecision::Block => {
                tracing::warn!(character_id = %id, step = %target, "No visible step to enter");
            }
        }
        Ok(decision)
    }

    /// Step the Continue button leads to. `None` means the wizard is done.
    pub async fn continue_from(
        &self,
        id: CharacterId,
        current: &str,
    ) -> Result<Option<String>, CreationError> {
        let state = self.load(id).await?;
        self.ensure_accessible(current, &state)?;
        let next = self.graph.next_step(current, &state).map(str::to_string);
        tracing::debug!(character_id = %id, step = %current, next = ?next, "Continue");
        Ok(next)
    }

    /// Step the Back button leads to. `None` on the first step.
    pub async fn back_from(
        &self,
        id: CharacterId,
        current: &str,
    ) -> Result<Option<String>, CreationError> {
        let state = self.load(id).await?;
        self.ensure_accessible(current, &state)?;
        let previous = self.graph.previous_step(current, &state).map(str::to_string);
        tracing::debug!(character_id = %id, step = %current, previous = ?previous, "Back");
        Ok(previous)
    }

    pub async fn progress(
        &self,
        id: CharacterId,
        current: &str,
    ) -> Result<WizardProgress, CreationError> {
        let state = self.load(id).await?;
        let steps: Vec<String> = self
            .graph
            .progress_steps(&state)
            .into_iter()
            .map(str::to_string)
            .collect();
        let completed = steps
            .iter()
            .filter(|s| state.is_completed(s))
            .cloned()
            .collect();
        Ok(WizardProgress {
            current_index: steps.iter().position(|s| s == current),
            steps,
            completed,
        })
    }

    fn ensure_accessible(&self, step: &str, state: &BuildState) -> Result<(), CreationError> {
        if self.graph.is_step_accessible(step, state) {
            Ok(())
        } else {
            tracing::warn!(character_id = %state.character_id, step = %step, "Navigation from inaccessible step");
            Err(CreationError::StepNotAccessible(step.to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::ports::MockBuildStateRepo;
    use chrono::Utc;
    use heroforge_domain::{dnd5e_step_graph, step_names, ClassSelection, RaceSelection};

    fn human() -> RaceSelection {
        RaceSelection {
            key: "human".into(),
            name: "Human".into(),
            has_subraces: false,
            ability_bonuses: Vec::new(),
            ability_bonus_choice: None,
            language_choices: 1,
        }
    }

    fn fighter() -> ClassSelection {
        ClassSelection {
            key: "fighter".into(),
            name: "Fighter".into(),
            is_spellcaster: false,
            subclass_level: 3,
            skill_choices: 2,
        }
    }

    fn navigation_for(state: Option<BuildState>) -> WizardNavigation {
        let mut repo = MockBuildStateRepo::new();
        repo.expect_load().returning(move |_| Ok(state.clone()));
        repo.expect_save().never();
        WizardNavigation::new(Arc::new(repo), Arc::new(dnd5e_step_graph().unwrap()))
    }

    fn human_fighter() -> BuildState {
        let mut state = BuildState::new(CharacterId::new(), Utc::now());
        state.set_race(human());
        state.set_class(fighter());
        state
    }

    #[tokio::test]
    async fn unknown_draft_is_reported() {
        let nav = navigation_for(None);
        let err = nav
            .enter(CharacterId::new(), step_names::RACE, NavigationIntent::Direct)
            .await
            .unwrap_err();
        assert!(matches!(err, CreationError::DraftNotFound(_)));
    }

    #[tokio::test]
    async fn continue_skips_hidden_steps() {
        let state = human_fighter();
        let id = state.character_id;
        let nav = navigation_for(Some(state));

        // human has no subraces; fighter picks a subclass at level 3
        let next = nav.continue_from(id, step_names::RACE).await.unwrap();
        assert_eq!(next.as_deref(), Some(step_names::CLASS));
        let next = nav.continue_from(id, step_names::CLASS).await.unwrap();
        assert_eq!(next.as_deref(), Some(step_names::BACKGROUND));
    }

    #[tokio::test]
    async fn back_from_first_step_is_none() {
        let state = human_fighter();
        let id = state.character_id;
        let nav = navigation_for(Some(state));
        assert_eq!(nav.back_from(id, step_names::RACE).await.unwrap(), None);
    }

    #[tokio::test]
    async fn navigating_from_hidden_step_is_refused() {
        let state = human_fighter();
        let id = state.character_id;
        let nav = navigation_for(Some(state));
        let err = nav.continue_from(id, step_names::SUBRACE).await.unwrap_err();
        assert!(matches!(err, CreationError::StepNotAccessible(step) if step == step_names::SUBRACE));
    }

    #[tokio::test]
    async fn entering_hidden_step_redirects() {
        let mut state = human_fighter();
        state.mark_completed(step_names::RACE);
        let id = state.character_id;
        let nav = navigation_for(Some(state));

        let decision = nav
            .enter(id, step_names::SPELLS, NavigationIntent::Direct)
            .await
            .unwrap();
        assert_eq!(
            decision,
            NavigationDecision::Redirect {
                to: step_names::CLASS.to_string()
            }
        );
    }

    #[tokio::test]
    async fn progress_lists_visible_steps() {
        let mut state = human_fighter();
        state.mark_completed(step_names::RACE);
        let id = state.character_id;
        let nav = navigation_for(Some(state));

        let progress = nav.progress(id, step_names::CLASS).await.unwrap();
        assert!(!progress.steps.iter().any(|s| s == step_names::SUBRACE));
        assert!(!progress.steps.iter().any(|s| s == step_names::SPELLS));
        assert!(progress.steps.iter().any(|s| s == step_names::LANGUAGES));
        assert_eq!(progress.current_index, Some(1));
        assert_eq!(progress.completed, vec![step_names::RACE.to_string()]);
    }
}
