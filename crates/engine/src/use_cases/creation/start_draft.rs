//! Start draft use case.
//!
//! Creates an empty build and persists it so the wizard can resume later.

use std::sync::Arc;

use heroforge_domain::{BuildState, CharacterId, StepGraph};
use serde::Serialize;

use crate::infrastructure::ports::{BuildStateRepo, ClockPort};

use super::error::CreationError;

/// Result of starting a new draft.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StartedDraft {
    pub character_id: CharacterId,
    /// Where the wizard opens; `None` only for a graph with no navigable step
    pub first_step: Option<String>,
}

pub struct StartDraft {
    repo: Arc<dyn BuildStateRepo>,
    clock: Arc<dyn ClockPort>,
    graph: Arc<StepGraph>,
}

impl StartDraft {
    pub fn new(
        repo: Arc<dyn BuildStateRepo>,
        clock: Arc<dyn ClockPort>,
        graph: Arc<StepGraph>,
    ) -> Self {
        Self { repo, clock, graph }
    }

    pub async fn execute(&self) -> Result<StartedDraft, CreationError> {
        let state = BuildState::new(CharacterId::new(), self.clock.now());
        self.repo.save(&state).await?;

        let first_step = self.graph.first_step(&state).map(str::to_string);
        tracing::info!(
            character_id = %state.character_id,
            first_step = ?first_step,
            "Started character draft"
        );

        Ok(StartedDraft {
            character_id: state.character_id,
            first_step,
        })
    }
}
