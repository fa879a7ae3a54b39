//! Request payloads.
//!
//! Every field is optional on the wire so that an absent field can be told
//! apart from a zero or empty one. Conversion into a domain draft keeps that
//! distinction for the fields where it matters and maps missing text to the
//! empty string, which then fails the blank check.

mod celestial_body;
mod character;
mod vehicle;

use serde::Deserialize;

pub use celestial_body::CelestialBodyPayload;
pub use character::CharacterPayload;
pub use vehicle::VehiclePayload;

/// `?name=` query used by find-by-name and delete-by-name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct NameQuery {
    pub name: Option<String>,
}
