//! Character creation errors.

use heroforge_domain::{AbilityMethod, CharacterId, DomainError};

use crate::infrastructure::ports::RepoError;

/// Errors that can occur while driving the creation wizard.
#[derive(Debug, thiserror::Error)]
pub enum CreationError {
    #[error("Draft not found: {0}")]
    DraftNotFound(CharacterId),
    #[error("Unresolved choices: {}", unresolved.join(", "))]
    IncompleteSelection { unresolved: Vec<String> },
    #[error("Ability scores are not valid for method {method}")]
    InvalidAbilityScores { method: AbilityMethod },
    #[error("Step not accessible: {0}")]
    StepNotAccessible(String),
    #[error("Validation error: {0}")]
    Domain(#[from] DomainError),
    #[error("Repository error: {0}")]
    Repo(#[from] RepoError),
}
