//! Response envelope for failed requests.

use chrono::{DateTime, Utc};
use serde::Serialize;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Body written for every 4xx response.
///
/// `messages` lists every field violation for validation failures and holds
/// a single entry for format and conflict failures.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorResponse {
    pub timestamp: String,
    pub status: u16,
    pub error: String,
    pub messages: Vec<String>,
}

impl ErrorResponse {
    pub fn new(
        status: u16,
        error: impl Into<String>,
        messages: Vec<String>,
        at: DateTime<Utc>,
    ) -> Self {
        Self {
            timestamp: at.format(TIMESTAMP_FORMAT).to_string(),
            status,
            error: error.into(),
            messages,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn formats_timestamp_without_fraction() {
        let at = Utc
            .with_ymd_and_hms(2024, 5, 4, 13, 7, 9)
            .single()
            .expect("valid timestamp");
        let response = ErrorResponse::new(
            409,
            "Conflict",
            vec!["vehicle with name X-wing already exists".to_string()],
            at,
        );
        let json = serde_json::to_value(&response).expect("serialize");
        assert_eq!(json["timestamp"], "2024-05-04 13:07:09");
        assert_eq!(json["status"], 409);
        assert_eq!(json["messages"][0], "vehicle with name X-wing already exists");
    }
}
