//! HTTP routes.
//!
//! One resource per record type. Handlers only translate between the wire
//! format and the management use cases: path ids must be positive, name
//! queries non-blank, and every failure is written as an `ErrorResponse`.

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get},
    Json, Router,
};
use chrono::{DateTime, Utc};
use std::sync::Arc;

use holocron_domain::{
    CelestialBody, CelestialBodyId, Character, CharacterId, Vehicle, VehicleId,
};
use holocron_shared::{CelestialBodyPayload, CharacterPayload, ErrorResponse, NameQuery, VehiclePayload};

use crate::app::App;
use crate::infrastructure::ports::ClockPort;
use crate::use_cases::ManagementError;

/// Create all HTTP routes.
pub fn routes() -> Router<Arc<App>> {
    Router::new()
        .route("/api/health", get(health))
        // Celestial bodies
        .route("/api/bodies", get(list_bodies).post(create_body).put(update_body_by_name))
        .route("/api/bodies/find", get(find_body_by_name))
        .route("/api/bodies/delete", delete(delete_body_by_name))
        .route(
            "/api/bodies/{id}",
            get(get_body).put(update_body).delete(delete_body),
        )
        // Characters
        .route(
            "/api/characters",
            get(list_characters)
                .post(create_character)
                .put(update_character_by_name),
        )
        .route("/api/characters/find", get(find_character_by_name))
        .route("/api/characters/delete", delete(delete_character_by_name))
        .route(
            "/api/characters/{id}",
            get(get_character)
                .put(update_character)
                .delete(delete_character),
        )
        // Vehicles
        .route(
            "/api/vehicles",
            get(list_vehicles)
                .post(create_vehicle)
                .put(update_vehicle_by_name),
        )
        .route("/api/vehicles/find", get(find_vehicle_by_name))
        .route("/api/vehicles/delete", delete(delete_vehicle_by_name))
        .route(
            "/api/vehicles/{id}",
            get(get_vehicle).put(update_vehicle).delete(delete_vehicle),
        )
}

async fn health() -> &'static str {
    "OK"
}

// =============================================================================
// Celestial bodies
// =============================================================================

async fn create_body(
    State(app): State<Arc<App>>,
    body: Result<Json<CelestialBodyPayload>, JsonRejection>,
) -> Result<StatusCode, ApiError> {
    let draft = payload(&app, body)?.into();
    app.use_cases
        .management
        .celestial_body
        .create(draft)
        .await
        .map_err(|e| ApiError::from_management(e, app.clock.as_ref()))?;
    Ok(StatusCode::CREATED)
}

async fn list_bodies(State(app): State<Arc<App>>) -> Result<Json<Vec<CelestialBody>>, ApiError> {
    let bodies = app
        .use_cases
        .management
        .celestial_body
        .find_all()
        .await
        .map_err(|e| ApiError::from_management(e, app.clock.as_ref()))?;
    Ok(Json(bodies))
}

async fn get_body(
    State(app): State<Arc<App>>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<Option<CelestialBody>>, ApiError> {
    let id = path_id(&app, id, CelestialBodyId::try_new)?;
    let body = app
        .use_cases
        .management
        .celestial_body
        .find_by_id(id)
        .await
        .map_err(|e| ApiError::from_management(e, app.clock.as_ref()))?;
    Ok(Json(body))
}

async fn find_body_by_name(
    State(app): State<Arc<App>>,
    query: Result<Query<NameQuery>, QueryRejection>,
) -> Result<Json<Option<CelestialBody>>, ApiError> {
    let name = query_name(&app, query)?;
    let body = app
        .use_cases
        .management
        .celestial_body
        .find_by_name(&name)
        .await
        .map_err(|e| ApiError::from_management(e, app.clock.as_ref()))?;
    Ok(Json(body))
}

async fn update_body(
    State(app): State<Arc<App>>,
    id: Result<Path<i64>, PathRejection>,
    body: Result<Json<CelestialBodyPayload>, JsonRejection>,
) -> Result<StatusCode, ApiError> {
    let id = path_id(&app, id, CelestialBodyId::try_new)?;
    let draft = payload(&app, body)?.into();
    app.use_cases
        .management
        .celestial_body
        .update_by_id(id, draft)
        .await
        .map_err(|e| ApiError::from_management(e, app.clock.as_ref()))?;
    Ok(StatusCode::OK)
}

async fn update_body_by_name(
    State(app): State<Arc<App>>,
    body: Result<Json<CelestialBodyPayload>, JsonRejection>,
) -> Result<StatusCode, ApiError> {
    let draft = payload(&app, body)?.into();
    app.use_cases
        .management
        .celestial_body
        .update_by_name(draft)
        .await
        .map_err(|e| ApiError::from_management(e, app.clock.as_ref()))?;
    Ok(StatusCode::OK)
}

async fn delete_body(
    State(app): State<Arc<App>>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<StatusCode, ApiError> {
    let id = path_id(&app, id, CelestialBodyId::try_new)?;
    app.use_cases
        .management
        .celestial_body
        .delete_by_id(id)
        .await
        .map_err(|e| ApiError::from_management(e, app.clock.as_ref()))?;
    Ok(StatusCode::NO_CONTENT)
}

async fn delete_body_by_name(
    State(app): State<Arc<App>>,
    query: Result<Query<NameQuery>, QueryRejection>,
) -> Result<StatusCode, ApiError> {
    let name = query_name(&app, query)?;
    app.use_cases
        .management
        .celestial_body
        .delete_by_name(&name)
        .await
        .map_err(|e| ApiError::from_management(e, app.clock.as_ref()))?;
    Ok(StatusCode::NO_CONTENT)
}

// =============================================================================
// Characters
// =============================================================================

async fn create_character(
    State(app): State<Arc<App>>,
    body: Result<Json<CharacterPayload>, JsonRejection>,
) -> Result<StatusCode, ApiError> {
    let draft = payload(&app, body)?.into();
    app.use_cases
        .management
        .character
        .create(draft)
        .await
        .map_err(|e| ApiError::from_management(e, app.clock.as_ref()))?;
    Ok(StatusCode::CREATED)
}

async fn list_characters(State(app): State<Arc<App>>) -> Result<Json<Vec<Character>>, ApiError> {
    let characters = app
        .use_cases
        .management
        .character
        .find_all()
        .await
        .map_err(|e| ApiError::from_management(e, app.clock.as_ref()))?;
    Ok(Json(characters))
}

async fn get_character(
    State(app): State<Arc<App>>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<Option<Character>>, ApiError> {
    let id = path_id(&app, id, CharacterId::try_new)?;
    let character = app
        .use_cases
        .management
        .character
        .find_by_id(id)
        .await
        .map_err(|e| ApiError::from_management(e, app.clock.as_ref()))?;
    Ok(Json(character))
}

async fn find_character_by_name(
    State(app): State<Arc<App>>,
    query: Result<Query<NameQuery>, QueryRejection>,
) -> Result<Json<Option<Character>>, ApiError> {
    let name = query_name(&app, query)?;
    let character = app
        .use_cases
        .management
        .character
        .find_by_name(&name)
        .await
        .map_err(|e| ApiError::from_management(e, app.clock.as_ref()))?;
    Ok(Json(character))
}

async fn update_character(
    State(app): State<Arc<App>>,
    id: Result<Path<i64>, PathRejection>,
    body: Result<Json<CharacterPayload>, JsonRejection>,
) -> Result<StatusCode, ApiError> {
    let id = path_id(&app, id, CharacterId::try_new)?;
    let draft = payload(&app, body)?.into();
    app.use_cases
        .management
        .character
        .update_by_id(id, draft)
        .await
        .map_err(|e| ApiError::from_management(e, app.clock.as_ref()))?;
    Ok(StatusCode::OK)
}

async fn update_character_by_name(
    State(app): State<Arc<App>>,
    body: Result<Json<CharacterPayload>, JsonRejection>,
) -> Result<StatusCode, ApiError> {
    let draft = payload(&app, body)?.into();
    app.use_cases
        .management
        .character
        .update_by_name(draft)
        .await
        .map_err(|e| ApiError::from_management(e, app.clock.as_ref()))?;
    Ok(StatusCode::OK)
}

async fn delete_character(
    State(app): State<Arc<App>>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<StatusCode, ApiError> {
    let id = path_id(&app, id, CharacterId::try_new)?;
    app.use_cases
        .management
        .character
        .delete_by_id(id)
        .await
        .map_err(|e| ApiError::from_management(e, app.clock.as_ref()))?;
    Ok(StatusCode::NO_CONTENT)
}

async fn delete_character_by_name(
    State(app): State<Arc<App>>,
    query: Result<Query<NameQuery>, QueryRejection>,
) -> Result<StatusCode, ApiError> {
    let name = query_name(&app, query)?;
    app.use_cases
        .management
        .character
        .delete_by_name(&name)
        .await
        .map_err(|e| ApiError::from_management(e, app.clock.as_ref()))?;
    Ok(StatusCode::NO_CONTENT)
}

// =============================================================================
// Vehicles
// =============================================================================

async fn create_vehicle(
    State(app): State<Arc<App>>,
    body: Result<Json<VehiclePayload>, JsonRejection>,
) -> Result<StatusCode, ApiError> {
    let draft = payload(&app, body)?.into();
    app.use_cases
        .management
        .vehicle
        .create(draft)
        .await
        .map_err(|e| ApiError::from_management(e, app.clock.as_ref()))?;
    Ok(StatusCode::CREATED)
}

async fn list_vehicles(State(app): State<Arc<App>>) -> Result<Json<Vec<Vehicle>>, ApiError> {
    let vehicles = app
        .use_cases
        .management
        .vehicle
        .find_all()
        .await
        .map_err(|e| ApiError::from_management(e, app.clock.as_ref()))?;
    Ok(Json(vehicles))
}

async fn get_vehicle(
    State(app): State<Arc<App>>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<Option<Vehicle>>, ApiError> {
    let id = path_id(&app, id, VehicleId::try_new)?;
    let vehicle = app
        .use_cases
        .management
        .vehicle
        .find_by_id(id)
        .await
        .map_err(|e| ApiError::from_management(e, app.clock.as_ref()))?;
    Ok(Json(vehicle))
}

async fn find_vehicle_by_name(
    State(app): State<Arc<App>>,
    query: Result<Query<NameQuery>, QueryRejection>,
) -> Result<Json<Option<Vehicle>>, ApiError> {
    let name = query_name(&app, query)?;
    let vehicle = app
        .use_cases
        .management
        .vehicle
        .find_by_name(&name)
        .await
        .map_err(|e| ApiError::from_management(e, app.clock.as_ref()))?;
    Ok(Json(vehicle))
}

async fn update_vehicle(
    State(app): State<Arc<App>>,
    id: Result<Path<i64>, PathRejection>,
    body: Result<Json<VehiclePayload>, JsonRejection>,
) -> Result<StatusCode, ApiError> {
    let id = path_id(&app, id, VehicleId::try_new)?;
    let draft = payload(&app, body)?.into();
    app.use_cases
        .management
        .vehicle
        .update_by_id(id, draft)
        .await
        .map_err(|e| ApiError::from_management(e, app.clock.as_ref()))?;
    Ok(StatusCode::OK)
}

async fn update_vehicle_by_name(
    State(app): State<Arc<App>>,
    body: Result<Json<VehiclePayload>, JsonRejection>,
) -> Result<StatusCode, ApiError> {
    let draft = payload(&app, body)?.into();
    app.use_cases
        .management
        .vehicle
        .update_by_name(draft)
        .await
        .map_err(|e| ApiError::from_management(e, app.clock.as_ref()))?;
    Ok(StatusCode::OK)
}

async fn delete_vehicle(
    State(app): State<Arc<App>>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<StatusCode, ApiError> {
    let id = path_id(&app, id, VehicleId::try_new)?;
    app.use_cases
        .management
        .vehicle
        .delete_by_id(id)
        .await
        .map_err(|e| ApiError::from_management(e, app.clock.as_ref()))?;
    Ok(StatusCode::NO_CONTENT)
}

async fn delete_vehicle_by_name(
    State(app): State<Arc<App>>,
    query: Result<Query<NameQuery>, QueryRejection>,
) -> Result<StatusCode, ApiError> {
    let name = query_name(&app, query)?;
    app.use_cases
        .management
        .vehicle
        .delete_by_name(&name)
        .await
        .map_err(|e| ApiError::from_management(e, app.clock.as_ref()))?;
    Ok(StatusCode::NO_CONTENT)
}

// =============================================================================
// Extraction helpers
// =============================================================================

fn path_id<T>(
    app: &App,
    raw: Result<Path<i64>, PathRejection>,
    make: fn(i64) -> Option<T>,
) -> Result<T, ApiError> {
    raw.ok()
        .and_then(|Path(raw)| make(raw))
        .ok_or_else(|| ApiError::bad_request("id must be a positive integer", app.clock.as_ref()))
}

fn query_name(
    app: &App,
    query: Result<Query<NameQuery>, QueryRejection>,
) -> Result<String, ApiError> {
    let name = query
        .map_err(|rejection| ApiError::bad_request(rejection.body_text(), app.clock.as_ref()))?
        .0
        .name
        .filter(|name| !name.trim().is_empty());
    name.ok_or_else(|| ApiError::bad_request("name cannot be blank", app.clock.as_ref()))
}

fn payload<T>(app: &App, body: Result<Json<T>, JsonRejection>) -> Result<T, ApiError> {
    body.map(|Json(payload)| payload)
        .map_err(|rejection| ApiError::bad_request(rejection.body_text(), app.clock.as_ref()))
}

// =============================================================================
// Errors
// =============================================================================

/// A failed request, rendered as an `ErrorResponse`.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    messages: Vec<String>,
    at: DateTime<Utc>,
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>, clock: &dyn ClockPort) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            messages: vec![message.into()],
            at: clock.now(),
        }
    }

    pub fn from_management(err: ManagementError, clock: &dyn ClockPort) -> Self {
        let status = match err {
            ManagementError::Invalid(_) | ManagementError::BadFormat(_) => StatusCode::BAD_REQUEST,
            ManagementError::Conflict(_) => StatusCode::CONFLICT,
        };
        Self {
            status,
            messages: err.messages(),
            at: clock.now(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        tracing::debug!(status = %self.status, messages = ?self.messages, "Request rejected");
        let body = ErrorResponse::new(
            self.status.as_u16(),
            self.status.canonical_reason().unwrap_or_default(),
            self.messages,
            self.at,
        );
        (self.status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::clock::FixedClock;
    use crate::infrastructure::sqlite::SqliteRepositories;
    use axum::body::Body;
    use axum::http::{header, Method, Request};
    use chrono::TimeZone;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    async fn router() -> Router {
        let repos = SqliteRepositories::in_memory().await.expect("in-memory db");
        let clock = FixedClock(
            Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5)
                .single()
                .expect("valid time"),
        );
        let app = Arc::new(App::with_clock(repos, Arc::new(clock)));
        routes().with_state(app)
    }

    async fn send(router: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let mut request = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(json) => {
                request = request.header(header::CONTENT_TYPE, "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };
        let response = router
            .clone()
            .oneshot(request.body(body).expect("request"))
            .await
            .expect("response");

        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body");
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or_else(|_| json!(String::from_utf8_lossy(&bytes)))
        };
        (status, value)
    }

    fn tatooine() -> Value {
        json!({ "name": "Tatooine", "climate": "arid", "population": 200000 })
    }

    #[tokio::test]
    async fn health_reports_ok() {
        let router = router().await;
        let (status, body) = send(&router, Method::GET, "/api/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!("OK"));
    }

    #[tokio::test]
    async fn create_then_read_by_id_and_name() {
        let router = router().await;

        let (status, body) = send(&router, Method::POST, "/api/bodies", Some(tatooine())).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body, Value::Null);

        let (status, by_id) = send(&router, Method::GET, "/api/bodies/1", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            by_id,
            json!({ "id": 1, "name": "Tatooine", "climate": "arid", "population": 200000 })
        );

        let (_, by_name) = send(&router, Method::GET, "/api/bodies/find?name=Tatooine", None).await;
        assert_eq!(by_name, by_id);
    }

    #[tokio::test]
    async fn missing_record_reads_as_null() {
        let router = router().await;
        let (status, body) = send(&router, Method::GET, "/api/vehicles/42", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, Value::Null);
    }

    #[tokio::test]
    async fn field_violations_are_listed_in_the_envelope() {
        let router = router().await;
        let (status, body) = send(
            &router,
            Method::POST,
            "/api/bodies",
            Some(json!({ "climate": "", "population": -1 })),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            body,
            json!({
                "timestamp": "2024-01-02 03:04:05",
                "status": 400,
                "error": "Bad Request",
                "messages": [
                    "name cannot be blank",
                    "climate cannot be blank",
                    "population cannot be less than 0"
                ]
            })
        );
    }

    #[tokio::test]
    async fn duplicate_name_is_409() {
        let router = router().await;
        send(&router, Method::POST, "/api/bodies", Some(tatooine())).await;
        let (status, body) = send(&router, Method::POST, "/api/bodies", Some(tatooine())).await;

        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["error"], "Conflict");
        assert_eq!(
            body["messages"],
            json!(["celestial body with name Tatooine already exists"])
        );
    }

    #[tokio::test]
    async fn character_reference_failures() {
        let router = router().await;
        send(&router, Method::POST, "/api/bodies", Some(tatooine())).await;

        let (status, body) = send(
            &router,
            Method::POST,
            "/api/characters",
            Some(json!({ "name": "Luke", "homeBodyId": 0, "vehicleIds": [] })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["messages"], json!(["homeBodyId must be a positive integer"]));

        let (status, _) = send(
            &router,
            Method::POST,
            "/api/characters",
            Some(json!({ "name": "Luke", "homeBodyId": 1, "vehicleIds": [999999] })),
        )
        .await;
        assert_eq!(status, StatusCode::CONFLICT);

        let (status, body) = send(
            &router,
            Method::POST,
            "/api/characters",
            Some(json!({ "name": "Luke", "homeBodyId": 1 })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["messages"], json!(["vehicleIds cannot be null"]));

        let (status, _) = send(
            &router,
            Method::POST,
            "/api/characters",
            Some(json!({ "name": "Luke", "homeBodyId": 1, "vehicleIds": [] })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    #[tokio::test]
    async fn update_by_name_and_delete_statuses() {
        let router = router().await;
        send(
            &router,
            Method::POST,
            "/api/vehicles",
            Some(json!({ "name": "Speeder", "model": "74-Z", "costInCredits": 8000 })),
        )
        .await;

        let (status, _) = send(
            &router,
            Method::PUT,
            "/api/vehicles",
            Some(json!({ "name": "Speeder", "model": "74-Z", "costInCredits": 7500.25 })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        let (_, vehicle) = send(&router, Method::GET, "/api/vehicles/find?name=Speeder", None).await;
        assert_eq!(vehicle["costInCredits"], json!(7500.25));

        let (status, _) = send(&router, Method::DELETE, "/api/vehicles/delete?name=Speeder", None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);
        let (status, _) = send(&router, Method::DELETE, "/api/vehicles/1", None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);
    }

    #[tokio::test]
    async fn non_positive_path_id_is_400() {
        let router = router().await;
        for uri in ["/api/characters/0", "/api/characters/-4", "/api/characters/abc"] {
            let (status, body) = send(&router, Method::GET, uri, None).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
            assert_eq!(body["messages"], json!(["id must be a positive integer"]));
        }
    }

    #[tokio::test]
    async fn blank_name_query_is_400() {
        let router = router().await;
        let (status, body) = send(&router, Method::GET, "/api/bodies/find?name=%20", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["messages"], json!(["name cannot be blank"]));

        let (status, _) = send(&router, Method::DELETE, "/api/bodies/delete", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn malformed_json_is_400() {
        let router = router().await;
        let (status, body) = send(
            &router,
            Method::POST,
            "/api/characters",
            Some(json!({ "name": "Han", "homeBodyId": "one" })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["status"], 400);
    }
}
