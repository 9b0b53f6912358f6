//! Heroforge Engine library.
//!
//! Drives the character creation wizard on top of the domain crate.
//!
//! ## Structure
//!
//! - `use_cases/` - Wizard step orchestration (start, navigate, complete steps)
//! - `infrastructure/` - Port traits, in-memory persistence, clock, settings
//! - `app` - Application composition

pub mod app;
pub mod infrastructure;
pub mod use_cases;

pub use app::App;
