//! Creation wizard step navigation.
//!
//! [`StepGraph`] answers "what comes next" and "may this step be entered";
//! [`StepAccessGuard`] turns those answers into allow/redirect decisions for
//! the host's router.

mod dnd5e;
mod graph;
mod guard;
mod step;

pub use dnd5e::{dnd5e_creation_steps, dnd5e_step_graph, step_names};
pub use graph::StepGraph;
pub use guard::{NavigationDecision, NavigationIntent, StepAccessGuard};
pub use step::{StepDefinition, StepPredicate};
