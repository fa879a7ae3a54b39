use holocron_domain::VehicleDraft;
use serde::Deserialize;

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct VehiclePayload {
    pub name: Option<String>,
    pub model: Option<String>,
    pub cost_in_credits: Option<f64>,
}

impl From<VehiclePayload> for VehicleDraft {
    fn from(payload: VehiclePayload) -> Self {
        Self {
            name: payload.name.unwrap_or_default(),
            model: payload.model.unwrap_or_default(),
            cost_in_credits: payload.cost_in_credits,
        }
    }
}
