use serde::{Deserialize, Serialize};

use crate::error::FieldViolations;
use crate::ids::VehicleId;
use crate::validation::{require_bounded_text, require_present};
use crate::value_objects::Credits;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vehicle {
    pub id: VehicleId,
    pub name: String,
    pub model: String,
    pub cost_in_credits: Credits,
}

impl Vehicle {
    pub fn from_fields(id: VehicleId, fields: VehicleFields) -> Self {
        Self {
            id,
            name: fields.name,
            model: fields.model,
            cost_in_credits: fields.cost_in_credits,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VehicleFields {
    pub name: String,
    pub model: String,
    pub cost_in_credits: Credits,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct VehicleDraft {
    pub name: String,
    pub model: String,
    pub cost_in_credits: Option<f64>,
}

/// A vehicle draft with every field present; the cost has not yet been
/// checked against the monetary format.
#[derive(Debug, Clone, PartialEq)]
pub struct VehicleCandidate {
    pub name: String,
    pub model: String,
    pub cost_in_credits: f64,
}

impl VehicleCandidate {
    pub fn into_fields(self, cost_in_credits: Credits) -> VehicleFields {
        VehicleFields {
            name: self.name,
            model: self.model,
            cost_in_credits,
        }
    }
}

impl VehicleDraft {
    pub fn validate(self) -> Result<VehicleCandidate, FieldViolations> {
        let mut violations = FieldViolations::new();
        require_bounded_text(&mut violations, &self.name, "name");
        require_bounded_text(&mut violations, &self.model, "model");
        let cost = require_present(&mut violations, self.cost_in_credits, "costInCredits");

        match cost {
            Some(cost_in_credits) if violations.is_empty() => Ok(VehicleCandidate {
                name: self.name,
                model: self.model,
                cost_in_credits,
            }),
            _ => Err(violations),
        }
    }
}
