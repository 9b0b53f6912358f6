use std::collections::HashSet;

use super::step::StepDefinition;
use crate::build_state::BuildState;
use crate::error::DomainError;

/// Ordered, declarative list of wizard steps.
///
/// Declaration order drives Continue/Back and the progress bar. All queries
/// take the build snapshot explicitly; the graph holds no state of its own.
#[derive(Debug, Clone)]
pub struct StepGraph {
    steps: Vec<StepDefinition>,
}

impl StepGraph {
    /// Build a graph. Step names must be non-empty and unique.
    pub fn new(steps: Vec<StepDefinition>) -> Result<Self, DomainError> {
        let mut seen = HashSet::new();
        for step in &steps {
            if step.name().trim().is_empty() {
                return Err(DomainError::validation("Step name cannot be empty"));
            }
            if !seen.insert(step.name()) {
                return Err(DomainError::constraint(format!(
                    "duplicate step name: {}",
                    step.name()
                )));
            }
        }
        Ok(Self { steps })
    }

    pub fn steps(&self) -> &[StepDefinition] {
        &self.steps
    }

    pub fn step(&self, name: &str) -> Option<&StepDefinition> {
        self.steps.iter().find(|s| s.name() == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.step(name).is_some()
    }

    pub fn step_names(&self) -> impl Iterator<Item = &str> {
        self.steps.iter().map(StepDefinition::name)
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.steps.iter().position(|s| s.name() == name)
    }

    /// Whether `name` may be entered right now. Unknown names and hidden
    /// steps are not accessible; skippable steps are.
    pub fn is_step_accessible(&self, name: &str, state: &BuildState) -> bool {
        self.step(name).is_some_and(|s| s.is_visible(state))
    }

    /// First visible, non-skipped step after `current`. `None` when the
    /// wizard is complete or `current` is unknown.
    pub fn next_step(&self, current: &str, state: &BuildState) -> Option<&str> {
        let start = self.position(current)?;
        self.steps[start + 1..]
            .iter()
            .find(|s| s.is_navigable(state))
            .map(StepDefinition::name)
    }

    /// First visible, non-skipped step before `current`.
    pub fn previous_step(&self, current: &str, state: &BuildState) -> Option<&str> {
        let end = self.position(current)?;
        self.steps[..end]
            .iter()
            .rev()
            .find(|s| s.is_navigable(state))
            .map(StepDefinition::name)
    }

    /// First step automatic navigation would stop at.
    pub fn first_step(&self, state: &BuildState) -> Option<&str> {
        self.steps
            .iter()
            .find(|s| s.is_navigable(state))
            .map(StepDefinition::name)
    }

    /// Visible steps in declaration order, skippable ones included.
    pub fn progress_steps(&self, state: &BuildState) -> Vec<&str> {
        self.steps
            .iter()
            .filter(|s| s.is_visible(state))
            .map(StepDefinition::name)
            .collect()
    }

    /// Zero-based position of `current` among the progress steps, with the total.
    pub fn progress_position(&self, current: &str, state: &BuildState) -> Option<(usize, usize)> {
        let steps = self.progress_steps(state);
        let index = steps.iter().position(|s| *s == current)?;
        Some((index, steps.len()))
    }
}
