use holocron_domain::CelestialBodyDraft;
use serde::Deserialize;

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CelestialBodyPayload {
    pub name: Option<String>,
    pub climate: Option<String>,
    pub population: Option<i64>,
}

impl From<CelestialBodyPayload> for CelestialBodyDraft {
    fn from(payload: CelestialBodyPayload) -> Self {
        Self {
            name: payload.name.unwrap_or_default(),
            climate: payload.climate.unwrap_or_default(),
            population: payload.population,
        }
    }
}
