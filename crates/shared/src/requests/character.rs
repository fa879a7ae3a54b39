use holocron_domain::CharacterDraft;
use serde::Deserialize;

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CharacterPayload {
    pub name: Option<String>,
    pub home_body_id: Option<i64>,
    pub vehicle_ids: Option<Vec<i64>>,
}

impl From<CharacterPayload> for CharacterDraft {
    fn from(payload: CharacterPayload) -> Self {
        Self {
            name: payload.name.unwrap_or_default(),
            home_body_id: payload.home_body_id,
            vehicle_ids: payload.vehicle_ids,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn null_and_missing_vehicle_lists_stay_absent() {
        let explicit_null: CharacterPayload =
            serde_json::from_str(r#"{"name":"Rey","homeBodyId":1,"vehicleIds":null}"#)
                .expect("parse");
        let missing: CharacterPayload =
            serde_json::from_str(r#"{"name":"Rey","homeBodyId":1}"#).expect("parse");
        assert_eq!(CharacterDraft::from(explicit_null).vehicle_ids, None);
        assert_eq!(CharacterDraft::from(missing).vehicle_ids, None);
    }

    #[test]
    fn empty_vehicle_list_is_present() {
        let payload: CharacterPayload =
            serde_json::from_str(r#"{"name":"Rey","homeBodyId":1,"vehicleIds":[]}"#)
                .expect("parse");
        assert_eq!(CharacterDraft::from(payload).vehicle_ids, Some(vec![]));
    }

    #[test]
    fn zero_home_body_is_not_absent() {
        let payload: CharacterPayload =
            serde_json::from_str(r#"{"name":"Rey","homeBodyId":0,"vehicleIds":[]}"#)
                .expect("parse");
        assert_eq!(CharacterDraft::from(payload).home_body_id, Some(0));
    }
}
