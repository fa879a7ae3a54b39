//! Holocron Engine library.
//!
//! Storage, consistency checks, and the HTTP API for celestial bodies,
//! characters, and vehicles.
//!
//! ## Structure
//!
//! - `use_cases/` - Consistency checks and mutation orchestration
//! - `infrastructure/` - External dependency implementations (ports + adapters)
//! - `api/` - HTTP entry points
//! - `app` - Application composition

pub mod api;
pub mod app;
pub mod infrastructure;
pub mod use_cases;

pub use app::App;
