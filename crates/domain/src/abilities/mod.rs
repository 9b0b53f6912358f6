//! Ability score assignment.
//!
//! Three mutually exclusive methods (standard array, point buy, manual)
//! each with their own legality rule, combined with racial modifiers from
//! the effective race to produce final scores.

mod assigner;
mod method;
mod racial;
mod rules;

pub use assigner::{AbilityScoreAssigner, AbilityScoreSnapshot, FinalScore, UNASSIGNED_FALLBACK};
pub use method::AbilityMethod;
pub use racial::{AbilityBonus, AbilityBonusChoice, RacialModifiers};
pub use rules::{AbilityRules, ManualRange, PointBuyRules, PointCost};
