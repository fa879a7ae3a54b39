//! Holocron domain: entities, drafts, field validators, and value objects.
//!
//! Nothing in this crate performs I/O. Checks that need stored state live in
//! the engine's consistency checker.

pub mod entities;
pub mod error;
pub mod ids;
pub mod validation;
pub mod value_objects;

pub use entities::{
    CelestialBody, CelestialBodyDraft, CelestialBodyFields, Character, CharacterCandidate,
    CharacterDraft, CharacterFields, EntityKind, Vehicle, VehicleCandidate, VehicleDraft,
    VehicleFields,
};
pub use error::FieldViolations;
pub use ids::{CelestialBodyId, CharacterId, VehicleId};
pub use value_objects::{Credits, CreditsError, MAX_CREDITS};
