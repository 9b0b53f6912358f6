//! Deciding which class features present an option choice.
//!
//! The catalog's `has_options` flag is authoritative. Some catalog entries
//! ship without the flag, so a name-based fallback covers the known gaps.

use serde::{Deserialize, Serialize};

/// A class feature as delivered by the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeatureEntry {
    pub name: String,
    #[serde(default)]
    pub has_options: Option<bool>,
}

/// Whether the player must choose among this feature's options.
pub fn is_selectable_feature(feature: &FeatureEntry) -> bool {
    match feature.has_options {
        Some(flag) => flag,
        None => legacy_name_fallback(&feature.name),
    }
}

// TODO: remove once the catalog sets `has_options` on every feature.
// Do not extend this list without checking the upstream catalog data.
const LEGACY_OPTION_FEATURES: &[&str] = &["Fighting Style"];

fn legacy_name_fallback(name: &str) -> bool {
    let name = name.trim();
    LEGACY_OPTION_FEATURES
        .iter()
        .any(|pattern| name.eq_ignore_ascii_case(pattern))
}
