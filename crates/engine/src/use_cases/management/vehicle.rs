//! Vehicle CRUD operations.

use std::sync::Arc;

use holocron_domain::{
    EntityKind, Vehicle, VehicleCandidate, VehicleDraft, VehicleFields, VehicleId,
};

use crate::infrastructure::ports::VehicleRepo;
use crate::use_cases::consistency::{check_monetary_format, ConsistencyChecker};

use super::ManagementError;

const KIND: EntityKind = EntityKind::Vehicle;

pub struct VehicleCrud {
    repo: Arc<dyn VehicleRepo>,
    checker: Arc<ConsistencyChecker>,
}

impl VehicleCrud {
    pub fn new(repo: Arc<dyn VehicleRepo>, checker: Arc<ConsistencyChecker>) -> Self {
        Self { repo, checker }
    }

    pub async fn create(&self, draft: VehicleDraft) -> Result<VehicleId, ManagementError> {
        let candidate = validate(draft)?;
        self.checker.check_name_unique(KIND, &candidate.name).await?;
        let fields = priced(candidate)?;

        let id = self.repo.insert(&fields).await?;
        tracing::info!(
            vehicle_id = %id,
            name = %fields.name,
            cost_in_credits = %fields.cost_in_credits,
            "Vehicle created"
        );
        Ok(id)
    }

    pub async fn find_all(&self) -> Result<Vec<Vehicle>, ManagementError> {
        Ok(self.repo.select_all().await?)
    }

    pub async fn find_by_id(&self, id: VehicleId) -> Result<Option<Vehicle>, ManagementError> {
        Ok(self.repo.select_by_id(id).await?)
    }

    pub async fn find_by_name(&self, name: &str) -> Result<Option<Vehicle>, ManagementError> {
        Ok(self.repo.select_by_name(name).await?)
    }

    pub async fn update_by_id(
        &self,
        id: VehicleId,
        draft: VehicleDraft,
    ) -> Result<(), ManagementError> {
        self.checker.check_exists_by_id(KIND, id.get()).await?;
        let candidate = validate(draft)?;
        self.checker
            .check_name_available_for(KIND, id.get(), &candidate.name)
            .await?;
        let fields = priced(candidate)?;

        self.repo.update_by_id(id, &fields).await?;
        tracing::info!(vehicle_id = %id, name = %fields.name, "Vehicle updated");
        Ok(())
    }

    pub async fn update_by_name(&self, draft: VehicleDraft) -> Result<(), ManagementError> {
        self.checker.check_exists_by_name(KIND, &draft.name).await?;
        let fields = priced(validate(draft)?)?;

        self.repo.update_by_name(&fields).await?;
        tracing::info!(name = %fields.name, "Vehicle updated");
        Ok(())
    }

    pub async fn delete_by_id(&self, id: VehicleId) -> Result<(), ManagementError> {
        self.repo.delete_by_id(id).await?;
        tracing::info!(vehicle_id = %id, "Vehicle deleted");
        Ok(())
    }

    pub async fn delete_by_name(&self, name: &str) -> Result<(), ManagementError> {
        self.repo.delete_by_name(name).await?;
        tracing::info!(name = %name, "Vehicle deleted");
        Ok(())
    }
}

fn validate(draft: VehicleDraft) -> Result<VehicleCandidate, ManagementError> {
    draft
        .validate()
        .inspect_err(|violations| tracing::debug!(%violations, "Rejected vehicle"))
        .map_err(ManagementError::from)
}

fn priced(candidate: VehicleCandidate) -> Result<VehicleFields, ManagementError> {
    let cost = check_monetary_format(candidate.cost_in_credits)?;
    Ok(candidate.into_fields(cost))
}
