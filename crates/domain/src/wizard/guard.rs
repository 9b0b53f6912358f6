use serde::{Deserialize, Serialize};

use super::graph::StepGraph;
use crate::build_state::BuildState;

/// How the player is trying to reach a step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NavigationIntent {
    /// Deep link, breadcrumb or back-button: explicit request for this step
    Direct,
    /// Continue button
    Forward,
    /// Back button
    Backward,
}

/// What the host should do with a navigation attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "decision")]
pub enum NavigationDecision {
    Allow,
    Redirect { to: String },
    /// No step is visible at all; nothing to redirect to
    Block,
}

/// Route-level interception for the wizard.
///
/// Blocks entry into steps whose prerequisites are unmet, and moves
/// automatic navigation past skippable steps.
#[derive(Debug, Clone, Copy)]
pub struct StepAccessGuard<'a> {
    graph: &'a StepGraph,
}

impl<'a> StepAccessGuard<'a> {
    pub fn new(graph: &'a StepGraph) -> Self {
        Self { graph }
    }

    pub fn is_step_accessible(&self, name: &str, state: &BuildState) -> bool {
        self.graph.is_step_accessible(name, state)
    }

    /// Decide whether `target` may be entered.
    pub fn guard(
        &self,
        target: &str,
        intent: NavigationIntent,
        state: &BuildState,
    ) -> NavigationDecision {
        if !self.graph.is_step_accessible(target, state) {
            return self.redirect_to_fallback(target, state);
        }

        let skipped = self
            .graph
            .step(target)
            .is_some_and(|s| s.is_skipped(state));
        if !skipped {
            return NavigationDecision::Allow;
        }

        let onward = match intent {
            NavigationIntent::Direct => return NavigationDecision::Allow,
            NavigationIntent::Forward => self.graph.next_step(target, state),
            NavigationIntent::Backward => self.graph.previous_step(target, state),
        };
        match onward {
            Some(to) => NavigationDecision::Redirect { to: to.to_string() },
            None => self.redirect_to_fallback(target, state),
        }
    }

    fn redirect_to_fallback(&self, target: &str, state: &BuildState) -> NavigationDecision {
        match self.fallback_step(state) {
            Some(to) if to == target => NavigationDecision::Allow,
            Some(to) => NavigationDecision::Redirect { to: to.to_string() },
            None => NavigationDecision::Block,
        }
    }

    /// Where the player resumes: the step after the furthest completed
    /// visible step, or the first step if nothing is completed yet.
    pub fn fallback_step(&self, state: &BuildState) -> Option<&'a str> {
        let progress = self.graph.progress_steps(state);
        let furthest = progress
            .iter()
            .rev()
            .find(|name| state.is_completed(name))
            .copied();
        match furthest {
            Some(done) => self.graph.next_step(done, state).or(Some(done)),
            None => self
                .graph
                .first_step(state)
                .or_else(|| progress.first().copied()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::build_state::fixtures::{empty_state, race};
    use crate::wizard::StepDefinition;

    fn graph() -> StepGraph {
        StepGraph::new(vec![
            StepDefinition::always("race"),
            StepDefinition::new("subrace", BuildState::race_has_subraces),
            StepDefinition::always("class"),
            StepDefinition::always("proficiencies").skip_when(|s| s.skill_choice_count() == 0),
            StepDefinition::always("review"),
        ])
        .unwrap()
    }

    #[test]
    fn allows_visible_steps() {
        let graph = graph();
        let guard = StepAccessGuard::new(&graph);
        let state = empty_state();
        assert_eq!(
            guard.guard("class", NavigationIntent::Direct, &state),
            NavigationDecision::Allow
        );
    }

    #[test]
    fn hidden_step_redirects_to_resume_point() {
        let graph = graph();
        let guard = StepAccessGuard::new(&graph);
        let mut state = empty_state();
        state.set_race(race("human", false));
        state.mark_completed("race");

        assert_eq!(
            guard.guard("subrace", NavigationIntent::Direct, &state),
            NavigationDecision::Redirect {
                to: "class".to_string()
            }
        );
    }

    #[test]
    fn unknown_step_redirects_to_first_step() {
        let graph = graph();
        let guard = StepAccessGuard::new(&graph);
        let state = empty_state();
        assert!(!guard.is_step_accessible("nowhere", &state));
        assert_eq!(
            guard.guard("nowhere", NavigationIntent::Direct, &state),
            NavigationDecision::Redirect {
                to: "race".to_string()
            }
        );
    }

    #[test]
    fn skippable_step_direct_is_allowed() {
        let graph = graph();
        let guard = StepAccessGuard::new(&graph);
        let state = empty_state();
        assert_eq!(
            guard.guard("proficiencies", NavigationIntent::Direct, &state),
            NavigationDecision::Allow
        );
    }

    #[test]
    fn skippable_step_redirects_in_direction_of_travel() {
        let graph = graph();
        let guard = StepAccessGuard::new(&graph);
        let state = empty_state();
        assert_eq!(
            guard.guard("proficiencies", NavigationIntent::Forward, &state),
            NavigationDecision::Redirect {
                to: "review".to_string()
            }
        );
        assert_eq!(
            guard.guard("proficiencies", NavigationIntent::Backward, &state),
            NavigationDecision::Redirect {
                to: "class".to_string()
            }
        );
    }

    #[test]
    fn fallback_stays_on_last_step_when_everything_is_done() {
        let graph = graph();
        let guard = StepAccessGuard::new(&graph);
        let mut state = empty_state();
        for step in ["race", "class", "proficiencies", "review"] {
            state.mark_completed(step);
        }
        assert_eq!(guard.fallback_step(&state), Some("review"));
    }

    #[test]
    fn completed_step_that_became_hidden_is_ignored() {
        let graph = graph();
        let guard = StepAccessGuard::new(&graph);
        let mut state = empty_state();
        state.set_race(race("elf", true));
        state.mark_completed("race");
        state.mark_completed("subrace");
        state.set_race(race("human", false));

        // subrace is no longer visible, so the resume point is after race
        assert_eq!(guard.fallback_step(&state), Some("class"));
    }

    #[test]
    fn empty_graph_blocks() {
        let graph = StepGraph::new(Vec::new()).unwrap();
        let guard = StepAccessGuard::new(&graph);
        assert_eq!(
            guard.guard("race", NavigationIntent::Direct, &empty_state()),
            NavigationDecision::Block
        );
    }
}
