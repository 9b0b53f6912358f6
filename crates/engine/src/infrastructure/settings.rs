//! Creation wizard settings.
//!
//! Ability rules default to the standard D&D 5e numbers. A host can replace
//! them wholesale with a JSON file, or override individual limits through
//! environment variables:
//!
//! - `HEROFORGE_ABILITY_RULES_PATH` - JSON document with `AbilityRules`
//! - `HEROFORGE_POINT_BUY_BUDGET` - point-buy budget (1..=60)
//! - `HEROFORGE_MANUAL_MIN` / `HEROFORGE_MANUAL_MAX` - manual entry range (1..=30)
//!
//! Individual overrides are applied on top of the file. Invalid values are
//! logged and ignored.

use std::path::Path;

use heroforge_domain::{AbilityRules, DomainError};

pub const ABILITY_RULES_PATH_VAR: &str = "HEROFORGE_ABILITY_RULES_PATH";
pub const POINT_BUY_BUDGET_VAR: &str = "HEROFORGE_POINT_BUY_BUDGET";
pub const MANUAL_MIN_VAR: &str = "HEROFORGE_MANUAL_MIN";
pub const MANUAL_MAX_VAR: &str = "HEROFORGE_MANUAL_MAX";

/// Settings consumed by the creation use cases.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreationSettings {
    pub ability_rules: AbilityRules,
}

impl CreationSettings {
    /// Load `.env.local` / `.env` from the working directory, then read the
    /// process environment.
    pub fn from_env() -> Self {
        load_dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build settings from an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut rules = AbilityRules::default();

        if let Some(path) = lookup(ABILITY_RULES_PATH_VAR) {
            match read_rules_file(Path::new(&path)) {
                Ok(loaded) => {
                    tracing::info!(path = %path, "Loaded ability rules file");
                    rules = loaded;
                }
                Err(e) => {
                    tracing::warn!(path = %path, error = %e, "Ignoring ability rules file");
                }
            }
        }

        if let Some(val) = lookup(POINT_BUY_BUDGET_VAR) {
            match val.trim().parse::<i32>() {
                Ok(budget) if (1..=60).contains(&budget) => {
                    rules.point_buy.budget = budget;
                    tracing::info!(budget, "Applied HEROFORGE_POINT_BUY_BUDGET environment variable");
                }
                _ => {
                    tracing::warn!(
                        value = %val,
                        "HEROFORGE_POINT_BUY_BUDGET must be an integer in 1..=60; ignoring"
                    );
                }
            }
        }

        let mut manual = rules.manual;
        for (var, slot) in [(MANUAL_MIN_VAR, &mut manual.min), (MANUAL_MAX_VAR, &mut manual.max)] {
            let Some(val) = lookup(var) else {
                continue;
            };
            match val.trim().parse::<i32>() {
                Ok(v) if (1..=30).contains(&v) => *slot = v,
                _ => {
                    tracing::warn!(var, value = %val, "Manual score limit must be an integer in 1..=30; ignoring");
                }
            }
        }
        if manual.min <= manual.max {
            rules.manual = manual;
        } else {
            tracing::warn!(
                min = manual.min,
                max = manual.max,
                "Manual score range is empty; keeping previous range"
            );
        }

        Self {
            ability_rules: rules,
        }
    }
}

/// Why a rules file was rejected.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("Failed to read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Malformed ability rules: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Invalid ability rules: {0}")]
    Invalid(#[from] DomainError),
}

/// Read and validate an `AbilityRules` JSON document.
pub fn read_rules_file(path: &Path) -> Result<AbilityRules, SettingsError> {
    let json = std::fs::read_to_string(path).map_err(|source| SettingsError::Read {
        path: path.display().to_string(),
        source,
    })?;
    let rules: AbilityRules = serde_json::from_str(&json)?;
    rules.validate()?;
    Ok(rules)
}

/// Load environment overrides, preferring local ones.
pub fn load_dotenv() {
    // dotenvy never overwrites a variable that is already set, so the first file wins
    for filename in [".env.local", ".env"] {
        let _ = dotenvy::from_filename(filename);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_without_environment() {
        let settings = CreationSettings::from_lookup(|_| None);
        assert_eq!(settings, CreationSettings::default());
    }

    #[test]
    fn applies_valid_overrides() {
        let settings = CreationSettings::from_lookup(lookup(&[
            (POINT_BUY_BUDGET_VAR, "32"),
            (MANUAL_MIN_VAR, "1"),
            (MANUAL_MAX_VAR, "20"),
        ]));
        assert_eq!(settings.ability_rules.point_buy.budget, 32);
        assert_eq!(settings.ability_rules.manual.min, 1);
        assert_eq!(settings.ability_rules.manual.max, 20);
    }

    #[test]
    fn ignores_out_of_range_and_garbage() {
        let settings = CreationSettings::from_lookup(lookup(&[
            (POINT_BUY_BUDGET_VAR, "500"),
            (MANUAL_MAX_VAR, "lots"),
        ]));
        assert_eq!(settings.ability_rules, AbilityRules::default());
    }

    #[test]
    fn rejects_inverted_manual_range() {
        let settings = CreationSettings::from_lookup(lookup(&[(MANUAL_MIN_VAR, "20")]));
        assert_eq!(settings.ability_rules.manual.min, 3);
        assert_eq!(settings.ability_rules.manual.max, 18);
    }

    #[test]
    fn loads_rules_file_and_layers_env_on_top() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"standardArray": [16, 14, 13, 12, 10, 8], "pointBuy": {{"budget": 30}}}}"#
        )
        .unwrap();
        let path = file.path().to_string_lossy().to_string();

        let settings = CreationSettings::from_lookup(lookup(&[
            (ABILITY_RULES_PATH_VAR, path.as_str()),
            (POINT_BUY_BUDGET_VAR, "28"),
        ]));
        assert_eq!(
            settings.ability_rules.standard_array,
            vec![16, 14, 13, 12, 10, 8]
        );
        assert_eq!(settings.ability_rules.point_buy.budget, 28);
    }

    #[test]
    fn invalid_rules_file_falls_back_to_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"standardArray": [15, 14]}}"#).unwrap();
        let path = file.path().to_string_lossy().to_string();

        let settings = CreationSettings::from_lookup(lookup(&[(ABILITY_RULES_PATH_VAR, path.as_str())]));
        assert_eq!(settings.ability_rules, AbilityRules::default());
    }

    #[test]
    fn missing_rules_file_falls_back_to_defaults() {
        let settings = CreationSettings::from_lookup(lookup(&[(
            ABILITY_RULES_PATH_VAR,
            "/nonexistent/heroforge-rules.json",
        )]));
        assert_eq!(settings.ability_rules, AbilityRules::default());
    }

    #[test]
    fn rules_file_errors_name_their_cause() {
        let err = read_rules_file(Path::new("/nonexistent/heroforge-rules.json")).unwrap_err();
        assert!(matches!(err, SettingsError::Read { .. }));
        assert!(err.to_string().starts_with("Failed to read /nonexistent/heroforge-rules.json"));

        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();
        let err = read_rules_file(file.path()).unwrap_err();
        assert!(matches!(err, SettingsError::Parse(_)));

        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"manual": {{"min": 18, "max": 3}}}}"#).unwrap();
        let err = read_rules_file(file.path()).unwrap_err();
        assert!(matches!(err, SettingsError::Invalid(_)));
    }
}
