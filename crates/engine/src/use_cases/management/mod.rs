//! Management use cases for CRUD-style operations.
//!
//! Each orchestrator runs field validation, then the consistency checks that
//! apply to the operation, and only then calls storage. The first failure
//! aborts the operation before anything is written.

use std::sync::Arc;

use holocron_domain::FieldViolations;

use crate::infrastructure::ports::RepoError;
use crate::use_cases::consistency::ConsistencyError;

mod celestial_body;
mod character;
mod vehicle;

pub use celestial_body::CelestialBodyCrud;
pub use character::CharacterCrud;
pub use vehicle::VehicleCrud;

/// Message reported for any storage failure. The detail is logged only.
pub const STORAGE_CONFLICT_MESSAGE: &str =
    "request conflicts with the current state of stored records";

/// Shared error type for management use cases.
#[derive(Debug, thiserror::Error)]
pub enum ManagementError {
    /// One or more fields failed validation; every violation is listed.
    #[error("Invalid input: {0}")]
    Invalid(FieldViolations),
    #[error("Bad format: {0}")]
    BadFormat(String),
    #[error("Conflict: {0}")]
    Conflict(String),
}

impl ManagementError {
    /// Caller-facing messages, in the order they were found.
    pub fn messages(&self) -> Vec<String> {
        match self {
            Self::Invalid(violations) => violations.messages().to_vec(),
            Self::BadFormat(message) | Self::Conflict(message) => vec![message.clone()],
        }
    }
}

impl From<FieldViolations> for ManagementError {
    fn from(violations: FieldViolations) -> Self {
        Self::Invalid(violations)
    }
}

impl From<RepoError> for ManagementError {
    fn from(err: RepoError) -> Self {
        tracing::warn!(error = %err, "Storage operation failed");
        Self::Conflict(STORAGE_CONFLICT_MESSAGE.to_string())
    }
}

impl From<ConsistencyError> for ManagementError {
    fn from(err: ConsistencyError) -> Self {
        match err {
            ConsistencyError::BadFormat(message) => Self::BadFormat(message),
            ConsistencyError::Conflict(message) => Self::Conflict(message),
            ConsistencyError::Repo(err) => err.into(),
        }
    }
}

/// Container for management use cases.
pub struct ManagementUseCases {
    pub celestial_body: Arc<CelestialBodyCrud>,
    pub character: Arc<CharacterCrud>,
    pub vehicle: Arc<VehicleCrud>,
}

impl ManagementUseCases {
    pub fn new(
        celestial_body: Arc<CelestialBodyCrud>,
        character: Arc<CharacterCrud>,
        vehicle: Arc<VehicleCrud>,
    ) -> Self {
        Self {
            celestial_body,
            character,
            vehicle,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn storage_errors_become_generic_conflicts() {
        let err: ManagementError =
            RepoError::database("vehicle.insert", "UNIQUE constraint failed: vehicles.name").into();

        assert_eq!(err.messages(), [STORAGE_CONFLICT_MESSAGE]);
        assert!(!err.to_string().contains("UNIQUE"));
    }

    #[test]
    fn field_violations_keep_every_message() {
        let mut violations = FieldViolations::new();
        violations.push("name cannot be blank");
        violations.push("climate cannot be blank");

        let err = ManagementError::from(violations);
        assert_eq!(
            err.messages(),
            ["name cannot be blank", "climate cannot be blank"]
        );
    }

    #[test]
    fn consistency_errors_keep_their_class() {
        let bad = ManagementError::from(ConsistencyError::BadFormat("bad".to_string()));
        assert!(matches!(bad, ManagementError::BadFormat(_)));

        let repo = ManagementError::from(ConsistencyError::Repo(RepoError::serialization("x")));
        assert!(matches!(repo, ManagementError::Conflict(ref m) if m == STORAGE_CONFLICT_MESSAGE));
    }
}
