//! Celestial body CRUD operations.

use std::sync::Arc;

use holocron_domain::{CelestialBody, CelestialBodyDraft, CelestialBodyId, EntityKind};

use crate::infrastructure::ports::CelestialBodyRepo;
use crate::use_cases::consistency::ConsistencyChecker;

use super::ManagementError;

const KIND: EntityKind = EntityKind::CelestialBody;

pub struct CelestialBodyCrud {
    repo: Arc<dyn CelestialBodyRepo>,
    checker: Arc<ConsistencyChecker>,
}

impl CelestialBodyCrud {
    pub fn new(repo: Arc<dyn CelestialBodyRepo>, checker: Arc<ConsistencyChecker>) -> Self {
        Self { repo, checker }
    }

    pub async fn create(
        &self,
        draft: CelestialBodyDraft,
    ) -> Result<CelestialBodyId, ManagementError> {
        let fields = draft
            .validate()
            .inspect_err(|violations| tracing::debug!(%violations, "Rejected celestial body"))?;
        self.checker.check_name_unique(KIND, &fields.name).await?;

        let id = self.repo.insert(&fields).await?;
        tracing::info!(body_id = %id, name = %fields.name, "Celestial body created");
        Ok(id)
    }

    pub async fn find_all(&self) -> Result<Vec<CelestialBody>, ManagementError> {
        Ok(self.repo.select_all().await?)
    }

    pub async fn find_by_id(
        &self,
        id: CelestialBodyId,
    ) -> Result<Option<CelestialBody>, ManagementError> {
        Ok(self.repo.select_by_id(id).await?)
    }

    pub async fn find_by_name(&self, name: &str) -> Result<Option<CelestialBody>, ManagementError> {
        Ok(self.repo.select_by_name(name).await?)
    }

    /// Replaces every field of the body with `id`, name included.
    pub async fn update_by_id(
        &self,
        id: CelestialBodyId,
        draft: CelestialBodyDraft,
    ) -> Result<(), ManagementError> {
        self.checker.check_exists_by_id(KIND, id.get()).await?;
        let fields = draft
            .validate()
            .inspect_err(|violations| tracing::debug!(%violations, "Rejected celestial body"))?;
        self.checker
            .check_name_available_for(KIND, id.get(), &fields.name)
            .await?;

        self.repo.update_by_id(id, &fields).await?;
        tracing::info!(body_id = %id, name = %fields.name, "Celestial body updated");
        Ok(())
    }

    /// Replaces climate and population of the body named in the draft.
    pub async fn update_by_name(&self, draft: CelestialBodyDraft) -> Result<(), ManagementError> {
        self.checker.check_exists_by_name(KIND, &draft.name).await?;
        let fields = draft
            .validate()
            .inspect_err(|violations| tracing::debug!(%violations, "Rejected celestial body"))?;

        self.repo.update_by_name(&fields).await?;
        tracing::info!(name = %fields.name, "Celestial body updated");
        Ok(())
    }

    pub async fn delete_by_id(&self, id: CelestialBodyId) -> Result<(), ManagementError> {
        self.repo.delete_by_id(id).await?;
        tracing::info!(body_id = %id, "Celestial body deleted");
        Ok(())
    }

    pub async fn delete_by_name(&self, name: &str) -> Result<(), ManagementError> {
        self.repo.delete_by_name(name).await?;
        tracing::info!(name = %name, "Celestial body deleted");
        Ok(())
    }
}
