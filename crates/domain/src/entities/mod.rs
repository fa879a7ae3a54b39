//! Entity types, their drafts, and field validators.
//!
//! Each entity comes in three shapes:
//! - the persisted entity (`CelestialBody`, ...) with its storage-assigned id,
//! - a field set without identity (`CelestialBodyFields`, ...) that storage
//!   inserts and replaces,
//! - a draft (`CelestialBodyDraft`, ...) holding a candidate state exactly as
//!   received, with optional fields so that absence stays observable.

mod celestial_body;
mod character;
mod vehicle;

use std::fmt;

pub use celestial_body::{CelestialBody, CelestialBodyDraft, CelestialBodyFields};
pub use character::{Character, CharacterCandidate, CharacterDraft, CharacterFields};
pub use vehicle::{Vehicle, VehicleCandidate, VehicleDraft, VehicleFields};

/// The three record types held by the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    CelestialBody,
    Character,
    Vehicle,
}

impl EntityKind {
    pub fn label(self) -> &'static str {
        match self {
            Self::CelestialBody => "celestial body",
            Self::Character => "character",
            Self::Vehicle => "vehicle",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
