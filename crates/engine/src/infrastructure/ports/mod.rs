//! Port traits for infrastructure boundaries.
//!
//! These are the only abstractions in the engine. Everything else is
//! concrete types. Ports exist for:
//! - Database access (could swap SQLite -> Postgres)
//! - Clock (for testing)

mod error;
mod repos;
mod testing;

// =============================================================================
// Repository Ports
// =============================================================================
pub use repos::{CelestialBodyRepo, CharacterRepo, VehicleRepo};

// =============================================================================
// Test-Only Mock Repositories (only available during test builds)
// =============================================================================
#[cfg(test)]
pub use repos::{MockCelestialBodyRepo, MockCharacterRepo, MockVehicleRepo};

// =============================================================================
// Testing Ports
// =============================================================================
pub use testing::ClockPort;

// =============================================================================
// Error Types
// =============================================================================
pub use error::RepoError;
