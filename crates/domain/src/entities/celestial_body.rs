use serde::{Deserialize, Serialize};

use crate::error::FieldViolations;
use crate::ids::CelestialBodyId;
use crate::validation::{require_bounded_text, require_present};

/// A named location with a climate and a population.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CelestialBody {
    pub id: CelestialBodyId,
    pub name: String,
    pub climate: String,
    pub population: i32,
}

impl CelestialBody {
    pub fn from_fields(id: CelestialBodyId, fields: CelestialBodyFields) -> Self {
        Self {
            id,
            name: fields.name,
            climate: fields.climate,
            population: fields.population,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CelestialBodyFields {
    pub name: String,
    pub climate: String,
    pub population: i32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CelestialBodyDraft {
    pub name: String,
    pub climate: String,
    pub population: Option<i64>,
}

impl CelestialBodyDraft {
    /// Validates every field, collecting all violations.
    pub fn validate(self) -> Result<CelestialBodyFields, FieldViolations> {
        let mut violations = FieldViolations::new();
        require_bounded_text(&mut violations, &self.name, "name");
        require_bounded_text(&mut violations, &self.climate, "climate");

        let population = require_present(&mut violations, self.population, "population")
            .and_then(|population| population_in_range(&mut violations, population));

        match population {
            Some(population) if violations.is_empty() => Ok(CelestialBodyFields {
                name: self.name,
                climate: self.climate,
                population,
            }),
            _ => Err(violations),
        }
    }
}

fn population_in_range(violations: &mut FieldViolations, population: i64) -> Option<i32> {
    if population < 0 {
        violations.push("population cannot be less than 0");
        return None;
    }
    match i32::try_from(population) {
        Ok(population) => Some(population),
        Err(_) => {
            violations.push("population cannot exceed integer max");
            None
        }
    }
}
