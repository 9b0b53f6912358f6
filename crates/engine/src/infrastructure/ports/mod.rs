//! Port traits for infrastructure boundaries.
//!
//! Ports exist for:
//! - Draft persistence (could swap in-memory -> database)
//! - The catalog service supplying race/class/background/item data
//! - Clock (for testing)

mod error;
mod repos;
mod testing;

pub use error::RepoError;
pub use repos::{BuildStateRepo, CatalogPort};
pub use testing::ClockPort;

#[cfg(test)]
pub use repos::{MockBuildStateRepo, MockCatalogPort};

#[cfg(test)]
pub use testing::MockClockPort;
