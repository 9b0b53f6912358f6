use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::method::AbilityMethod;
use super::racial::RacialModifiers;
use super::rules::AbilityRules;
use crate::value_objects::Ability;

/// Base score used when a slot is still unassigned at save time.
pub const UNASSIGNED_FALLBACK: i32 = 10;

/// Persisted result of the ability step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbilityScoreSnapshot {
    pub method: AbilityMethod,
    pub scores: BTreeMap<Ability, i32>,
}

/// Base, racial bonus and total for one ability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinalScore {
    pub ability: Ability,
    pub base: i32,
    pub bonus: i32,
    pub total: i32,
}

/// Tracks the six base scores under one of three assignment methods.
///
/// Switching method discards every score and installs the new method's
/// baseline. Legality of individual values is not enforced on write; call
/// [`AbilityScoreAssigner::is_valid`] to check the whole distribution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AbilityScoreAssigner {
    rules: AbilityRules,
    method: AbilityMethod,
    scores: [Option<i32>; 6],
}

impl AbilityScoreAssigner {
    /// Fresh assigner in standard-array mode with nothing assigned.
    pub fn new(rules: AbilityRules) -> Self {
        Self::with_method(rules, AbilityMethod::default())
    }

    /// Fresh assigner starting in `method` with its baseline scores.
    pub fn with_method(rules: AbilityRules, method: AbilityMethod) -> Self {
        Self {
            rules,
            method,
            scores: [method.baseline(); 6],
        }
    }

    /// Restore a previous session. Abilities missing from the snapshot start
    /// at the method baseline.
    pub fn resume(rules: AbilityRules, snapshot: Option<&AbilityScoreSnapshot>) -> Self {
        let Some(snapshot) = snapshot else {
            return Self::new(rules);
        };
        let mut assigner = Self::with_method(rules, snapshot.method);
        for (ability, value) in &snapshot.scores {
            assigner.scores[ability.index()] = Some(*value);
        }
        assigner
    }

    pub fn method(&self) -> AbilityMethod {
        self.method
    }

    pub fn rules(&self) -> &AbilityRules {
        &self.rules
    }

    /// Switch assignment method, resetting all six scores to the new
    /// method's baseline. Returns `false` if `method` was already active.
    pub fn set_method(&mut self, method: AbilityMethod) -> bool {
        if self.method == method {
            return false;
        }
        self.method = method;
        self.scores = [method.baseline(); 6];
        true
    }

    pub fn set_score(&mut self, ability: Ability, value: i32) {
        self.scores[ability.index()] = Some(value);
    }

    /// Unassign a standard-array slot. Under other methods the slot returns
    /// to the method baseline.
    pub fn clear_score(&mut self, ability: Ability) {
        self.scores[ability.index()] = self.method.baseline();
    }

    pub fn score(&self, ability: Ability) -> Option<i32> {
        self.scores[ability.index()]
    }

    pub fn scores(&self) -> impl Iterator<Item = (Ability, Option<i32>)> + '_ {
        Ability::ALL.into_iter().map(|a| (a, self.score(a)))
    }

    /// Whether the current distribution is legal for the active method.
    pub fn is_valid(&self) -> bool {
        match self.method {
            AbilityMethod::StandardArray => {
                let mut assigned = Vec::with_capacity(6);
                for score in self.scores {
                    match score {
                        Some(v) => assigned.push(v),
                        None => return false,
                    }
                }
                let mut expected = self.rules.standard_array.clone();
                assigned.sort_unstable();
                expected.sort_unstable();
                assigned == expected
            }
            AbilityMethod::PointBuy => self
                .points_spent()
                .is_some_and(|spent| spent <= self.rules.point_buy.budget),
            AbilityMethod::Manual => self
                .scores
                .iter()
                .all(|s| s.is_some_and(|v| self.rules.manual.contains(v))),
        }
    }

    /// Points spent under point buy. `None` for other methods or when a
    /// score has no price in the cost table.
    pub fn points_spent(&self) -> Option<i32> {
        if self.method != AbilityMethod::PointBuy {
            return None;
        }
        self.scores.iter().try_fold(0i32, |spent, s| {
            let cost = s.and_then(|v| self.rules.point_buy.cost_of(v))?;
            Some(spent.saturating_add(cost))
        })
    }

    /// Remaining point-buy budget; negative when over budget.
    pub fn points_remaining(&self) -> Option<i32> {
        self.points_spent()
            .map(|spent| self.rules.point_buy.budget.saturating_sub(spent))
    }

    /// Standard-array values not yet assigned to any ability, in array order.
    /// Empty under other methods.
    pub fn unassigned_array_values(&self) -> Vec<i32> {
        if self.method != AbilityMethod::StandardArray {
            return Vec::new();
        }
        let mut remaining = self.rules.standard_array.clone();
        for value in self.scores.iter().flatten() {
            if let Some(pos) = remaining.iter().position(|v| v == value) {
                remaining.remove(pos);
            }
        }
        remaining
    }

    /// Base, bonus and total for one ability. Unassigned bases count as 10.
    pub fn final_score(&self, ability: Ability, modifiers: &RacialModifiers) -> FinalScore {
        let base = self.score(ability).unwrap_or(UNASSIGNED_FALLBACK);
        let bonus = modifiers.bonus_for(ability);
        FinalScore {
            ability,
            base,
            bonus,
            total: base.saturating_add(bonus),
        }
    }

    pub fn final_scores(&self, modifiers: &RacialModifiers) -> Vec<FinalScore> {
        Ability::ALL
            .into_iter()
            .map(|a| self.final_score(a, modifiers))
            .collect()
    }

    /// Persistable form, with unassigned bases defaulted to 10.
    pub fn snapshot(&self) -> AbilityScoreSnapshot {
        AbilityScoreSnapshot {
            method: self.method,
            scores: self
                .scores()
                .map(|(a, s)| (a, s.unwrap_or(UNASSIGNED_FALLBACK)))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::abilities::{AbilityBonus, PointCost};

    fn assigner() -> AbilityScoreAssigner {
        AbilityScoreAssigner::new(AbilityRules::default())
    }

    fn assign_all(assigner: &mut AbilityScoreAssigner, values: [i32; 6]) {
        for (ability, value) in Ability::ALL.into_iter().zip(values) {
            assigner.set_score(ability, value);
        }
    }

    #[test]
    fn starts_in_standard_array_with_nothing_assigned() {
        let a = assigner();
        assert_eq!(a.method(), AbilityMethod::StandardArray);
        assert!(a.scores().all(|(_, s)| s.is_none()));
        assert!(!a.is_valid());
    }

    #[test]
    fn switching_to_point_buy_resets_to_eight() {
        let mut a = assigner();
        assign_all(&mut a, [15, 14, 13, 12, 10, 8]);
        assert!(a.set_method(AbilityMethod::PointBuy));
        assert!(a.scores().all(|(_, s)| s == Some(8)));
    }

    #[test]
    fn switching_point_buy_to_manual_resets_to_ten() {
        let mut a = assigner();
        a.set_method(AbilityMethod::PointBuy);
        a.set_score(Ability::Str, 15);
        a.set_method(AbilityMethod::Manual);
        assert!(a.scores().all(|(_, s)| s == Some(10)));
    }

    #[test]
    fn switching_to_standard_array_clears_everything() {
        let mut a = assigner();
        a.set_method(AbilityMethod::Manual);
        a.set_score(Ability::Dex, 17);
        a.set_method(AbilityMethod::StandardArray);
        assert!(a.scores().all(|(_, s)| s.is_none()));
    }

    #[test]
    fn setting_the_active_method_keeps_scores() {
        let mut a = assigner();
        a.set_method(AbilityMethod::Manual);
        a.set_score(Ability::Dex, 17);
        assert!(!a.set_method(AbilityMethod::Manual));
        assert_eq!(a.score(Ability::Dex), Some(17));
    }

    #[test]
    fn standard_array_requires_exact_multiset() {
        let mut a = assigner();
        assign_all(&mut a, [8, 10, 12, 13, 14, 15]);
        assert!(a.is_valid());

        // 15 used twice, 8 missing
        a.set_score(Ability::Str, 15);
        assert!(!a.is_valid());

        // Value outside the array
        assign_all(&mut a, [16, 14, 13, 12, 10, 8]);
        assert!(!a.is_valid());
    }

    #[test]
    fn standard_array_with_repeated_values_allows_repeats() {
        let mut rules = AbilityRules::default();
        rules.standard_array = vec![14, 14, 13, 12, 10, 8];
        let mut a = AbilityScoreAssigner::new(rules);
        assign_all(&mut a, [14, 14, 13, 12, 10, 8]);
        assert!(a.is_valid());
    }

    #[test]
    fn unassigned_array_values_track_assignments() {
        let mut a = assigner();
        a.set_score(Ability::Str, 15);
        a.set_score(Ability::Dex, 10);
        assert_eq!(a.unassigned_array_values(), vec![14, 13, 12, 8]);
        a.clear_score(Ability::Str);
        assert_eq!(a.unassigned_array_values(), vec![15, 14, 13, 12, 8]);
    }

    #[test]
    fn point_buy_budget() {
        let mut a = assigner();
        a.set_method(AbilityMethod::PointBuy);
        assert_eq!(a.points_spent(), Some(0));
        assert!(a.is_valid());

        // 9 + 9 + 9 = 27, exactly on budget
        a.set_score(Ability::Str, 15);
        a.set_score(Ability::Dex, 15);
        a.set_score(Ability::Con, 15);
        assert_eq!(a.points_remaining(), Some(0));
        assert!(a.is_valid());

        a.set_score(Ability::Int, 9);
        assert_eq!(a.points_remaining(), Some(-1));
        assert!(!a.is_valid());
    }

    #[test]
    fn point_buy_rejects_unpriced_values() {
        let mut a = assigner();
        a.set_method(AbilityMethod::PointBuy);
        a.set_score(Ability::Str, 16);
        assert_eq!(a.points_spent(), None);
        assert!(!a.is_valid());
    }

    #[test]
    fn manual_range() {
        let mut a = assigner();
        a.set_method(AbilityMethod::Manual);
        assert!(a.is_valid());
        a.set_score(Ability::Wis, 18);
        assert!(a.is_valid());
        a.set_score(Ability::Wis, 19);
        assert!(!a.is_valid());
        a.set_score(Ability::Wis, 2);
        assert!(!a.is_valid());
    }

    #[test]
    fn final_score_adds_racial_bonus() {
        let mut a = assigner();
        a.set_score(Ability::Dex, 14);
        let modifiers = RacialModifiers::new(vec![
            AbilityBonus {
                ability: Ability::Dex,
                amount: 2,
            },
            AbilityBonus {
                ability: Ability::Dex,
                amount: 1,
            },
        ]);

        let dex = a.final_score(Ability::Dex, &modifiers);
        assert_eq!(dex.base, 14);
        assert_eq!(dex.bonus, 3);
        assert_eq!(dex.total, dex.base + dex.bonus);
    }

    #[test]
    fn final_score_defaults_unassigned_base_and_missing_bonus() {
        let a = assigner();
        let score = a.final_score(Ability::Cha, &RacialModifiers::default());
        assert_eq!(
            score,
            FinalScore {
                ability: Ability::Cha,
                base: 10,
                bonus: 0,
                total: 10
            }
        );
    }

    #[test]
    fn snapshot_and_resume() {
        let mut a = assigner();
        a.set_method(AbilityMethod::PointBuy);
        a.set_score(Ability::Str, 15);
        let snapshot = a.snapshot();
        assert_eq!(snapshot.scores.get(&Ability::Str), Some(&15));
        assert_eq!(snapshot.scores.get(&Ability::Cha), Some(&8));

        let resumed = AbilityScoreAssigner::resume(AbilityRules::default(), Some(&snapshot));
        assert_eq!(resumed.method(), AbilityMethod::PointBuy);
        assert_eq!(resumed.score(Ability::Str), Some(15));
    }

    #[test]
    fn snapshot_defaults_unassigned_to_ten() {
        let mut a = assigner();
        a.set_score(Ability::Str, 15);
        let snapshot = a.snapshot();
        assert_eq!(snapshot.scores.get(&Ability::Dex), Some(&10));
    }

    #[test]
    fn final_score_saturates_on_extreme_manual_values() {
        let mut a = AbilityScoreAssigner::with_method(AbilityRules::default(), AbilityMethod::Manual);
        a.set_score(Ability::Str, i32::MAX);
        a.set_score(Ability::Dex, i32::MIN);
        let modifiers = RacialModifiers::new(vec![
            AbilityBonus {
                ability: Ability::Str,
                amount: 2,
            },
            AbilityBonus {
                ability: Ability::Dex,
                amount: -1,
            },
        ]);

        let strength = a.final_score(Ability::Str, &modifiers);
        assert_eq!((strength.base, strength.bonus, strength.total), (i32::MAX, 2, i32::MAX));
        assert_eq!(a.final_score(Ability::Dex, &modifiers).total, i32::MIN);
        assert!(!a.is_valid());
    }

    #[test]
    fn point_buy_costs_saturate_instead_of_overflowing() {
        let mut rules = AbilityRules::default();
        rules.point_buy.costs = vec![PointCost {
            value: 8,
            cost: i32::MAX,
        }];
        let a = AbilityScoreAssigner::with_method(rules, AbilityMethod::PointBuy);
        assert_eq!(a.points_spent(), Some(i32::MAX));
        assert_eq!(a.points_remaining(), Some(27 - i32::MAX));
        assert!(!a.is_valid());
    }

    #[test]
    fn resume_without_snapshot_is_standard_array() {
        let a = AbilityScoreAssigner::resume(AbilityRules::default(), None);
        assert_eq!(a.method(), AbilityMethod::StandardArray);
    }
}
