//! Use cases - User story orchestration.
//!
//! Each module contains use cases for a specific area of the wizard.

pub mod creation;

pub use creation::CreationUseCases;
