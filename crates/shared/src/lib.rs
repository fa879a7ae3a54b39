//! Holocron Shared - wire-format types for the HTTP API.
//!
//! # Design Principles
//!
//! 1. **Minimal dependencies** - only serde, chrono and the domain crate
//! 2. **No business logic** - pure data types and their conversions into drafts
//! 3. **camelCase JSON** - field names follow the public API

pub mod requests;
pub mod responses;

pub use requests::{CelestialBodyPayload, CharacterPayload, NameQuery, VehiclePayload};
pub use responses::ErrorResponse;
