//! Application state and composition.

use std::sync::Arc;

use heroforge_domain::{dnd5e_step_graph, DomainError, StepGraph};

use crate::infrastructure::{
    clock::SystemClock,
    persistence::InMemoryBuildStateRepo,
    ports::{BuildStateRepo, CatalogPort, ClockPort},
    settings::CreationSettings,
};
use crate::use_cases::creation::{
    AbandonDraft, AbilityStep, CompleteStep, EquipmentStep, SelectableFeatures, StartDraft,
    WizardNavigation,
};
use crate::use_cases::CreationUseCases;

/// Main application state.
///
/// Holds the ports, the step graph and the use cases built on them.
pub struct App {
    pub repositories: Repositories,
    pub settings: CreationSettings,
    pub graph: Arc<StepGraph>,
    pub use_cases: UseCases,
}

/// Ports injected into the use cases.
pub struct Repositories {
    pub build_state: Arc<dyn BuildStateRepo>,
    pub catalog: Arc<dyn CatalogPort>,
    pub clock: Arc<dyn ClockPort>,
}

/// Container for all use cases.
pub struct UseCases {
    pub creation: CreationUseCases,
}

impl App {
    /// Create a new App with all dependencies wired up.
    pub fn new(
        build_state: Arc<dyn BuildStateRepo>,
        catalog: Arc<dyn CatalogPort>,
        clock: Arc<dyn ClockPort>,
        settings: CreationSettings,
    ) -> Result<Self, DomainError> {
        let graph = Arc::new(dnd5e_step_graph()?);

        let creation = CreationUseCases::new(
            Arc::new(StartDraft::new(
                build_state.clone(),
                clock.clone(),
                graph.clone(),
            )),
            Arc::new(WizardNavigation::new(build_state.clone(), graph.clone())),
            Arc::new(CompleteStep::new(
                build_state.clone(),
                clock.clone(),
                graph.clone(),
            )),
            Arc::new(EquipmentStep::new(
                build_state.clone(),
                catalog.clone(),
                clock.clone(),
            )),
            Arc::new(AbilityStep::new(
                build_state.clone(),
                clock.clone(),
                settings.ability_rules.clone(),
            )),
            Arc::new(SelectableFeatures::new(build_state.clone(), catalog.clone())),
            Arc::new(AbandonDraft::new(build_state.clone())),
        );

        tracing::info!(
            steps = graph.steps().len(),
            point_buy_budget = settings.ability_rules.point_buy.budget,
            "Creation wizard ready"
        );

        Ok(Self {
            repositories: Repositories {
                build_state,
                catalog,
                clock,
            },
            settings,
            graph,
            use_cases: UseCases { creation },
        })
    }

    /// In-memory drafts, the system clock and settings from the environment.
    pub fn in_memory(catalog: Arc<dyn CatalogPort>) -> Result<Self, DomainError> {
        Self::new(
            Arc::new(InMemoryBuildStateRepo::new()),
            catalog,
            Arc::new(SystemClock::new()),
            CreationSettings::from_env(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::ports::MockCatalogPort;
    use crate::use_cases::creation::{CreationError, StepSelection};
    use heroforge_domain::{
        step_names, Ability, AbilityScoreAssigner, BackgroundSelection, ClassSelection,
        NavigationDecision, NavigationIntent, RaceSelection,
    };

    fn app() -> App {
        App::new(
            Arc::new(InMemoryBuildStateRepo::new()),
            Arc::new(MockCatalogPort::new()),
            Arc::new(SystemClock::new()),
            CreationSettings::default(),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn draft_flows_through_ability_step() {
        let app = app();
        let creation = &app.use_cases.creation;

        let started = creation.start.execute().await.unwrap();
        let id = started.character_id;

        let session = creation.abilities.begin(id).await.unwrap();
        let mut assigner: AbilityScoreAssigner = session.assigner;
        for (ability, value) in Ability::ALL.into_iter().zip([8, 10, 12, 13, 14, 15]) {
            assigner.set_score(ability, value);
        }
        let scores = creation.abilities.complete(id, &assigner).await.unwrap();
        assert_eq!(scores.len(), 6);

        let saved = app
            .repositories
            .build_state
            .load(id)
            .await
            .unwrap()
            .unwrap();
        assert!(saved.is_completed(step_names::ABILITIES));

        let progress = creation
            .navigation
            .progress(id, step_names::EQUIPMENT)
            .await
            .unwrap();
        assert_eq!(progress.completed, vec![step_names::ABILITIES.to_string()]);

        // resuming picks up the saved assignment
        let resumed = creation.abilities.begin(id).await.unwrap();
        assert_eq!(resumed.assigner.score(Ability::Cha), Some(15));

        let decision = creation
            .navigation
            .enter(id, step_names::SPELLS, NavigationIntent::Direct)
            .await
            .unwrap();
        assert!(matches!(
            decision,
            NavigationDecision::Redirect { .. }
        ));
    }

    #[tokio::test]
    async fn completed_steps_move_the_resume_point_and_abandon_ends_the_draft() {
        let app = app();
        let creation = &app.use_cases.creation;
        let id = creation.start.execute().await.unwrap().character_id;

        let redirect_for_spells = move || async move {
            creation
                .navigation
                .enter(id, step_names::SPELLS, NavigationIntent::Direct)
                .await
                .unwrap()
        };
        assert_eq!(
            redirect_for_spells().await,
            NavigationDecision::Redirect {
                to: step_names::RACE.to_string()
            }
        );

        let done = creation
            .complete
            .execute(
                id,
                StepSelection::Race(RaceSelection {
                    key: "elf".into(),
                    name: "Elf".into(),
                    has_subraces: true,
                    ability_bonuses: Vec::new(),
                    ability_bonus_choice: None,
                    language_choices: 0,
                }),
            )
            .await
            .unwrap();
        assert_eq!(done.next_step.as_deref(), Some(step_names::SUBRACE));
        assert_eq!(
            redirect_for_spells().await,
            NavigationDecision::Redirect {
                to: step_names::SUBRACE.to_string()
            }
        );

        creation
            .complete
            .execute(
                id,
                StepSelection::Subrace(RaceSelection {
                    key: "wood-elf".into(),
                    name: "Wood Elf".into(),
                    has_subraces: false,
                    ability_bonuses: Vec::new(),
                    ability_bonus_choice: None,
                    language_choices: 0,
                }),
            )
            .await
            .unwrap();
        creation
            .complete
            .execute(
                id,
                StepSelection::Class(ClassSelection {
                    key: "wizard".into(),
                    name: "Wizard".into(),
                    is_spellcaster: true,
                    subclass_level: 2,
                    skill_choices: 2,
                }),
            )
            .await
            .unwrap();
        creation
            .complete
            .execute(
                id,
                StepSelection::Background(BackgroundSelection {
                    key: "sage".into(),
                    name: "Sage".into(),
                    skill_choices: 2,
                    language_choices: 0,
                }),
            )
            .await
            .unwrap();

        // a spellcaster can now enter spells directly
        assert_eq!(redirect_for_spells().await, NavigationDecision::Allow);
        let decision = creation
            .navigation
            .enter(id, step_names::REVIEW, NavigationIntent::Direct)
            .await
            .unwrap();
        assert_eq!(decision, NavigationDecision::Allow);
        let progress = creation
            .navigation
            .progress(id, step_names::ABILITIES)
            .await
            .unwrap();
        assert_eq!(progress.completed.len(), 4);

        creation.abandon.execute(id).await.unwrap();
        let err = creation
            .navigation
            .enter(id, step_names::RACE, NavigationIntent::Direct)
            .await
            .unwrap_err();
        assert!(matches!(err, CreationError::DraftNotFound(_)));
        let err = creation.abandon.execute(id).await.unwrap_err();
        assert!(matches!(err, CreationError::DraftNotFound(_)));
    }
}
