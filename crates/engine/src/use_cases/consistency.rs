//! Cross-entity consistency checks.
//!
//! Every check reads storage through the repository ports and reports either
//! a bad-format value (independent of stored state) or a conflict with the
//! stored state. The vehicle reference list is checked element by element in
//! list order and the first bad element is reported.

use std::sync::Arc;

use holocron_domain::{CelestialBodyId, CharacterId, Credits, EntityKind, VehicleId};

use crate::infrastructure::ports::{CelestialBodyRepo, CharacterRepo, RepoError, VehicleRepo};

#[derive(Debug, thiserror::Error)]
pub enum ConsistencyError {
    #[error("Bad format: {0}")]
    BadFormat(String),
    #[error("Conflict: {0}")]
    Conflict(String),
    #[error("Repository error: {0}")]
    Repo(#[from] RepoError),
}

pub struct ConsistencyChecker {
    bodies: Arc<dyn CelestialBodyRepo>,
    characters: Arc<dyn CharacterRepo>,
    vehicles: Arc<dyn VehicleRepo>,
}

impl ConsistencyChecker {
    pub fn new(
        bodies: Arc<dyn CelestialBodyRepo>,
        characters: Arc<dyn CharacterRepo>,
        vehicles: Arc<dyn VehicleRepo>,
    ) -> Self {
        Self {
            bodies,
            characters,
            vehicles,
        }
    }

    /// Fails with a conflict if a record of `kind` already has `name`.
    pub async fn check_name_unique(
        &self,
        kind: EntityKind,
        name: &str,
    ) -> Result<(), ConsistencyError> {
        if self.id_by_name(kind, name).await?.is_some() {
            return Err(ConsistencyError::Conflict(format!(
                "{kind} with name {name} already exists"
            )));
        }
        Ok(())
    }

    pub async fn check_exists_by_name(
        &self,
        kind: EntityKind,
        name: &str,
    ) -> Result<(), ConsistencyError> {
        if self.id_by_name(kind, name).await?.is_none() {
            return Err(ConsistencyError::Conflict(format!(
                "{kind} with name {name} does not exist"
            )));
        }
        Ok(())
    }

    pub async fn check_exists_by_id(
        &self,
        kind: EntityKind,
        id: i64,
    ) -> Result<(), ConsistencyError> {
        if !self.exists_by_id(kind, id).await? {
            return Err(ConsistencyError::Conflict(format!(
                "{kind} with id {id} does not exist"
            )));
        }
        Ok(())
    }

    /// Fails with a conflict if `name` belongs to a record of `kind` other
    /// than the one identified by `id`. Keeping its own name is allowed.
    pub async fn check_name_available_for(
        &self,
        kind: EntityKind,
        id: i64,
        name: &str,
    ) -> Result<(), ConsistencyError> {
        match self.id_by_name(kind, name).await? {
            Some(owner) if owner != id => Err(ConsistencyError::Conflict(format!(
                "{kind} with name {name} already exists"
            ))),
            _ => Ok(()),
        }
    }

    pub async fn check_home_body_reference(
        &self,
        raw: i64,
    ) -> Result<CelestialBodyId, ConsistencyError> {
        let id = CelestialBodyId::try_new(raw).ok_or_else(|| {
            ConsistencyError::BadFormat("homeBodyId must be a positive integer".to_string())
        })?;

        if self.bodies.select_by_id(id).await?.is_none() {
            return Err(ConsistencyError::Conflict(format!(
                "{} with id {id} does not exist",
                EntityKind::CelestialBody
            )));
        }
        Ok(id)
    }

    /// Checks a character's vehicle references. An empty list is valid, an
    /// absent one is not.
    pub async fn check_vehicle_reference_list(
        &self,
        refs: Option<&[i64]>,
    ) -> Result<Vec<VehicleId>, ConsistencyError> {
        let refs = refs.ok_or_else(|| {
            ConsistencyError::BadFormat("vehicleIds cannot be null".to_string())
        })?;

        let mut ids = Vec::with_capacity(refs.len());
        for &raw in refs {
            let id = VehicleId::try_new(raw).ok_or_else(|| {
                ConsistencyError::BadFormat("vehicleIds must contain positive integers".to_string())
            })?;
            if self.vehicles.select_by_id(id).await?.is_none() {
                return Err(ConsistencyError::Conflict(format!(
                    "{} with id {id} does not exist",
                    EntityKind::Vehicle
                )));
            }
            ids.push(id);
        }
        Ok(ids)
    }

    async fn id_by_name(&self, kind: EntityKind, name: &str) -> Result<Option<i64>, RepoError> {
        Ok(match kind {
            EntityKind::CelestialBody => self
                .bodies
                .select_by_name(name)
                .await?
                .map(|body| body.id.get()),
            EntityKind::Character => self
                .characters
                .select_by_name(name)
                .await?
                .map(|character| character.id.get()),
            EntityKind::Vehicle => self
                .vehicles
                .select_by_name(name)
                .await?
                .map(|vehicle| vehicle.id.get()),
        })
    }

    async fn exists_by_id(&self, kind: EntityKind, raw: i64) -> Result<bool, RepoError> {
        Ok(match kind {
            EntityKind::CelestialBody => match CelestialBodyId::try_new(raw) {
                Some(id) => self.bodies.select_by_id(id).await?.is_some(),
                None => false,
            },
            EntityKind::Character => match CharacterId::try_new(raw) {
                Some(id) => self.characters.select_by_id(id).await?.is_some(),
                None => false,
            },
            EntityKind::Vehicle => match VehicleId::try_new(raw) {
                Some(id) => self.vehicles.select_by_id(id).await?.is_some(),
                None => false,
            },
        })
    }
}

/// Checks that `cost` fits the fixed-point credits representation.
pub fn check_monetary_format(cost: f64) -> Result<Credits, ConsistencyError> {
    Credits::try_from_amount(cost).map_err(|e| ConsistencyError::BadFormat(e.to_string()))
}
