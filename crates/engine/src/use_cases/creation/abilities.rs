//! Ability score step use case.

use std::sync::Arc;

use heroforge_domain::{
    step_names, AbilityRules, AbilityScoreAssigner, BuildState, CharacterId, FinalScore,
    RacialModifiers,
};

use crate::infrastructure::ports::{BuildStateRepo, ClockPort};

use super::error::CreationError;

/// Live assignment state for one visit to the abilities step.
#[derive(Debug, Clone)]
pub struct AbilitySession {
    pub character_id: CharacterId,
    pub assigner: AbilityScoreAssigner,
    /// Racial bonuses for the preview column
    pub modifiers: RacialModifiers,
}

pub struct AbilityStep {
    repo: Arc<dyn BuildStateRepo>,
    clock: Arc<dyn ClockPort>,
    rules: AbilityRules,
}

impl AbilityStep {
    pub fn new(
        repo: Arc<dyn BuildStateRepo>,
        clock: Arc<dyn ClockPort>,
        rules: AbilityRules,
    ) -> Self {
        Self { repo, clock, rules }
    }

    async fn load(&self, id: CharacterId) -> Result<BuildState, CreationError> {
        self.repo
            .load(id)
            .await?
            .ok_or(CreationError::DraftNotFound(id))
    }

    /// Resume the saved method and scores, or start on the standard array.
    pub async fn begin(&self, id: CharacterId) -> Result<AbilitySession, CreationError> {
        let state = self.load(id).await?;
        let assigner = AbilityScoreAssigner::resume(self.rules.clone(), state.abilities.as_ref());
        tracing::debug!(character_id = %id, method = %assigner.method(), "Ability step opened");
        Ok(AbilitySession {
            character_id: id,
            assigner,
            modifiers: RacialModifiers::from_build_state(&state),
        })
    }

    /// Persist the assignment and return the final scores with racial bonuses.
    pub async fn complete(
        &self,
        id: CharacterId,
        assigner: &AbilityScoreAssigner,
    ) -> Result<Vec<FinalScore>, CreationError> {
        if !assigner.is_valid() {
            return Err(CreationError::InvalidAbilityScores {
                method: assigner.method(),
            });
        }

        let mut state = self.load(id).await?;
        state.abilities = Some(assigner.snapshot());
        state.mark_completed(step_names::ABILITIES);
        state.touch(self.clock.now());
        self.repo.save(&state).await?;

        tracing::info!(
            character_id = %id,
            method = %assigner.method(),
            "Ability step completed"
        );
        Ok(assigner.final_scores(&RacialModifiers::from_build_state(&state)))
    }
}
