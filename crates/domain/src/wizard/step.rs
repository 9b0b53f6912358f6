use std::fmt;

use crate::build_state::BuildState;

/// Pure predicate over a build snapshot. Must not panic; return `false`
/// when the data it needs is missing.
pub type StepPredicate = fn(&BuildState) -> bool;

/// One wizard step and the predicates deciding whether it is shown and
/// whether automatic navigation passes over it.
#[derive(Clone)]
pub struct StepDefinition {
    name: String,
    visible: StepPredicate,
    should_skip: Option<StepPredicate>,
}

impl StepDefinition {
    pub fn new(name: impl Into<String>, visible: StepPredicate) -> Self {
        Self {
            name: name.into(),
            visible,
            should_skip: None,
        }
    }

    /// A step that is always visible.
    pub fn always(name: impl Into<String>) -> Self {
        Self::new(name, |_| true)
    }

    /// Have Continue/Back pass over this step while `predicate` holds. The
    /// step stays directly reachable.
    pub fn skip_when(mut self, predicate: StepPredicate) -> Self {
        self.should_skip = Some(predicate);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_visible(&self, state: &BuildState) -> bool {
        (self.visible)(state)
    }

    /// Only meaningful for visible steps; hidden steps are never reachable.
    pub fn is_skipped(&self, state: &BuildState) -> bool {
        self.should_skip.is_some_and(|skip| skip(state))
    }

    /// Visible and not skipped: automatic navigation stops here.
    pub fn is_navigable(&self, state: &BuildState) -> bool {
        self.is_visible(state) && !self.is_skipped(state)
    }
}

impl fmt::Debug for StepDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StepDefinition")
            .field("name", &self.name)
            .field("skippable", &self.should_skip.is_some())
            .finish()
    }
}
