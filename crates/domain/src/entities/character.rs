use serde::{Deserialize, Serialize};

use crate::error::FieldViolations;
use crate::ids::{CelestialBodyId, CharacterId, VehicleId};
use crate::validation::{require_non_blank, require_present};

/// A named character, its home body, and the vehicles it uses.
///
/// `vehicle_ids` is an ordered, denormalised list of references. Nothing
/// keeps it in step with the vehicle table after the write that set it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Character {
    pub id: CharacterId,
    pub name: String,
    pub home_body_id: CelestialBodyId,
    pub vehicle_ids: Vec<VehicleId>,
}

impl Character {
    pub fn from_fields(id: CharacterId, fields: CharacterFields) -> Self {
        Self {
            id,
            name: fields.name,
            home_body_id: fields.home_body_id,
            vehicle_ids: fields.vehicle_ids,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CharacterFields {
    pub name: String,
    pub home_body_id: CelestialBodyId,
    pub vehicle_ids: Vec<VehicleId>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CharacterDraft {
    pub name: String,
    pub home_body_id: Option<i64>,
    pub vehicle_ids: Option<Vec<i64>>,
}

/// A character draft whose fields passed validation but whose references
/// have not yet been checked against storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CharacterCandidate {
    pub name: String,
    pub home_body_ref: i64,
    pub vehicle_refs: Option<Vec<i64>>,
}

impl CharacterCandidate {
    pub fn into_fields(
        self,
        home_body_id: CelestialBodyId,
        vehicle_ids: Vec<VehicleId>,
    ) -> CharacterFields {
        CharacterFields {
            name: self.name,
            home_body_id,
            vehicle_ids,
        }
    }
}

impl CharacterDraft {
    /// Validates the name and the presence of the home body reference.
    ///
    /// The reference values themselves are range- and existence-checked
    /// later, against storage.
    pub fn validate(self) -> Result<CharacterCandidate, FieldViolations> {
        let mut violations = FieldViolations::new();
        require_non_blank(&mut violations, &self.name, "name");
        let home_body_ref = require_present(&mut violations, self.home_body_id, "homeBodyId");

        match home_body_ref {
            Some(home_body_ref) if violations.is_empty() => Ok(CharacterCandidate {
                name: self.name,
                home_body_ref,
                vehicle_refs: self.vehicle_ids,
            }),
            _ => Err(violations),
        }
    }
}
