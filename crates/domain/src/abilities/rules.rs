//! Numeric rules for ability assignment.
//!
//! These are injected rather than hardcoded so a host can load house rules
//! (a larger point budget, a different array) from configuration.

use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Point cost for a single score value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PointCost {
    pub value: i32,
    pub cost: i32,
}

/// Point-buy budget and cost curve.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PointBuyRules {
    /// Total points available
    pub budget: i32,
    /// Cost per purchasable score value; values missing from the table cannot be bought
    pub costs: Vec<PointCost>,
}

impl Default for PointBuyRules {
    fn default() -> Self {
        Self {
            budget: 27,
            costs: [(8, 0), (9, 1), (10, 2), (11, 3), (12, 4), (13, 5), (14, 7), (15, 9)]
                .into_iter()
                .map(|(value, cost)| PointCost { value, cost })
                .collect(),
        }
    }
}

impl PointBuyRules {
    /// Cost of a single score, or `None` if the value cannot be bought.
    pub fn cost_of(&self, value: i32) -> Option<i32> {
        self.costs.iter().find(|c| c.value == value).map(|c| c.cost)
    }
}

/// Inclusive range for manually entered scores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ManualRange {
    pub min: i32,
    pub max: i32,
}

impl Default for ManualRange {
    fn default() -> Self {
        Self { min: 3, max: 18 }
    }
}

impl ManualRange {
    pub fn contains(&self, value: i32) -> bool {
        (self.min..=self.max).contains(&value)
    }
}

/// All ability assignment rules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AbilityRules {
    pub standard_array: Vec<i32>,
    pub point_buy: PointBuyRules,
    pub manual: ManualRange,
}

impl Default for AbilityRules {
    fn default() -> Self {
        Self {
            standard_array: vec![15, 14, 13, 12, 10, 8],
            point_buy: PointBuyRules::default(),
            manual: ManualRange::default(),
        }
    }
}

impl AbilityRules {
    /// Check the rules are internally consistent.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.standard_array.len() != 6 {
            return Err(DomainError::validation(format!(
                "Standard array must have 6 values, got {}",
                self.standard_array.len()
            )));
        }
        if self.point_buy.budget < 0 {
            return Err(DomainError::validation("Point-buy budget cannot be negative"));
        }
        if self.point_buy.cost_of(8).is_none() {
            // Switching to point buy resets every score to 8, which must be affordable
            return Err(DomainError::validation(
                "Point-buy cost table must price the baseline score of 8",
            ));
        }
        if self.manual.min > self.manual.max {
            return Err(DomainError::validation(format!(
                "Manual range is empty: {}..={}",
                self.manual.min, self.manual.max
            )));
        }
        Ok(())
    }
}
