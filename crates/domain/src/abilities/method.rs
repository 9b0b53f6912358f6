use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::DomainError;

/// How the six base scores are being assigned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AbilityMethod {
    /// Assign each value of a fixed array to one ability.
    #[default]
    StandardArray,
    /// Spend a point budget against a cost curve.
    PointBuy,
    /// Enter each score directly.
    Manual,
}

impl AbilityMethod {
    /// Score every ability is reset to when this method is chosen.
    ///
    /// `None` means unassigned (standard array slots start empty).
    pub fn baseline(&self) -> Option<i32> {
        match self {
            Self::StandardArray => None,
            Self::PointBuy => Some(8),
            Self::Manual => Some(10),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::StandardArray => "standard_array",
            Self::PointBuy => "point_buy",
            Self::Manual => "manual",
        }
    }
}

impl fmt::Display for AbilityMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for AbilityMethod {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "standard_array" | "standard" => Ok(Self::StandardArray),
            "point_buy" | "pointbuy" => Ok(Self::PointBuy),
            "manual" => Ok(Self::Manual),
            other => Err(DomainError::parse(format!(
                "Unknown ability method: {}",
                other
            ))),
        }
    }
}
