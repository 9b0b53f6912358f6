//! Value objects shared across the wizard core.

mod ability;

pub use ability::Ability;
