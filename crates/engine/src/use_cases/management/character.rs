//! Character CRUD operations.
//!
//! Besides the name rules shared with the other record types, every write
//! checks the home body reference and then each vehicle reference, in the
//! order given.

use std::sync::Arc;

use holocron_domain::{
    Character, CharacterCandidate, CharacterDraft, CharacterFields, CharacterId, EntityKind,
};

use crate::infrastructure::ports::CharacterRepo;
use crate::use_cases::consistency::ConsistencyChecker;

use super::ManagementError;

const KIND: EntityKind = EntityKind::Character;

pub struct CharacterCrud {
    repo: Arc<dyn CharacterRepo>,
    checker: Arc<ConsistencyChecker>,
}

impl CharacterCrud {
    pub fn new(repo: Arc<dyn CharacterRepo>, checker: Arc<ConsistencyChecker>) -> Self {
        Self { repo, checker }
    }

    pub async fn create(&self, draft: CharacterDraft) -> Result<CharacterId, ManagementError> {
        let candidate = validate(draft)?;
        self.checker.check_name_unique(KIND, &candidate.name).await?;
        let fields = self.resolve_references(candidate).await?;

        let id = self.repo.insert(&fields).await?;
        tracing::info!(
            character_id = %id,
            name = %fields.name,
            home_body_id = %fields.home_body_id,
            vehicle_count = fields.vehicle_ids.len(),
            "Character created"
        );
        Ok(id)
    }

    pub async fn find_all(&self) -> Result<Vec<Character>, ManagementError> {
        Ok(self.repo.select_all().await?)
    }

    pub async fn find_by_id(&self, id: CharacterId) -> Result<Option<Character>, ManagementError> {
        Ok(self.repo.select_by_id(id).await?)
    }

    pub async fn find_by_name(&self, name: &str) -> Result<Option<Character>, ManagementError> {
        Ok(self.repo.select_by_name(name).await?)
    }

    pub async fn update_by_id(
        &self,
        id: CharacterId,
        draft: CharacterDraft,
    ) -> Result<(), ManagementError> {
        self.checker.check_exists_by_id(KIND, id.get()).await?;
        let candidate = validate(draft)?;
        self.checker
            .check_name_available_for(KIND, id.get(), &candidate.name)
            .await?;
        let fields = self.resolve_references(candidate).await?;

        self.repo.update_by_id(id, &fields).await?;
        tracing::info!(character_id = %id, name = %fields.name, "Character updated");
        Ok(())
    }

    pub async fn update_by_name(&self, draft: CharacterDraft) -> Result<(), ManagementError> {
        self.checker.check_exists_by_name(KIND, &draft.name).await?;
        let candidate = validate(draft)?;
        let fields = self.resolve_references(candidate).await?;

        self.repo.update_by_name(&fields).await?;
        tracing::info!(name = %fields.name, "Character updated");
        Ok(())
    }

    pub async fn delete_by_id(&self, id: CharacterId) -> Result<(), ManagementError> {
        self.repo.delete_by_id(id).await?;
        tracing::info!(character_id = %id, "Character deleted");
        Ok(())
    }

    pub async fn delete_by_name(&self, name: &str) -> Result<(), ManagementError> {
        self.repo.delete_by_name(name).await?;
        tracing::info!(name = %name, "Character deleted");
        Ok(())
    }

    async fn resolve_references(
        &self,
        candidate: CharacterCandidate,
    ) -> Result<CharacterFields, ManagementError> {
        let home_body_id = self
            .checker
            .check_home_body_reference(candidate.home_body_ref)
            .await?;
        let vehicle_ids = self
            .checker
            .check_vehicle_reference_list(candidate.vehicle_refs.as_deref())
            .await?;
        Ok(candidate.into_fields(home_body_id, vehicle_ids))
    }
}

fn validate(draft: CharacterDraft) -> Result<CharacterCandidate, ManagementError> {
    draft
        .validate()
        .inspect_err(|violations| tracing::debug!(%violations, "Rejected character"))
        .map_err(ManagementError::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::ports::{MockCelestialBodyRepo, MockCharacterRepo, MockVehicleRepo};
    use holocron_domain::{CelestialBody, CelestialBodyId, Credits, Vehicle, VehicleId};

    fn character_id(raw: i64) -> CharacterId {
        CharacterId::try_new(raw).expect("positive id")
    }

    fn draft(home: Option<i64>, vehicles: Option<Vec<i64>>) -> CharacterDraft {
        CharacterDraft {
            name: "Luke Skywalker".to_string(),
            home_body_id: home,
            vehicle_ids: vehicles,
        }
    }

    fn tatooine(id: CelestialBodyId) -> CelestialBody {
        CelestialBody {
            id,
            name: "Tatooine".to_string(),
            climate: "arid".to_string(),
            population: 200_000,
        }
    }

    /// Bodies with id 1 and vehicles with ids 4 and 7 exist.
    fn lookups() -> (MockCelestialBodyRepo, MockVehicleRepo) {
        let mut bodies = MockCelestialBodyRepo::new();
        bodies
            .expect_select_by_id()
            .returning(|id| Ok((id.get() == 1).then(|| tatooine(id))));

        let mut vehicles = MockVehicleRepo::new();
        vehicles.expect_select_by_id().returning(|id| {
            Ok([4, 7].contains(&id.get()).then(|| Vehicle {
                id,
                name: format!("vehicle-{id}"),
                model: "74-Z".to_string(),
                cost_in_credits: Credits::from_cents(800_000),
            }))
        });
        (bodies, vehicles)
    }

    fn crud(repo: MockCharacterRepo) -> CharacterCrud {
        let (bodies, vehicles) = lookups();
        let repo = Arc::new(repo);
        let checker = Arc::new(ConsistencyChecker::new(
            Arc::new(bodies),
            repo.clone(),
            Arc::new(vehicles),
        ));
        CharacterCrud::new(repo, checker)
    }

    fn unique_name() -> MockCharacterRepo {
        let mut repo = MockCharacterRepo::new();
        repo.expect_select_by_name().returning(|_| Ok(None));
        repo
    }

    #[tokio::test]
    async fn create_keeps_vehicle_order() {
        let mut repo = unique_name();
        repo.expect_insert()
            .withf(|fields| {
                fields.home_body_id.get() == 1
                    && fields.vehicle_ids.iter().map(|id| id.get()).eq([7, 4])
            })
            .times(1)
            .returning(|_| Ok(character_id(3)));

        let id = crud(repo)
            .create(draft(Some(1), Some(vec![7, 4])))
            .await
            .expect("created");
        assert_eq!(id, character_id(3));
    }

    #[tokio::test]
    async fn create_with_empty_vehicle_list_succeeds() {
        let mut repo = unique_name();
        repo.expect_insert()
            .withf(|fields| fields.vehicle_ids.is_empty())
            .returning(|_| Ok(character_id(1)));

        assert!(crud(repo).create(draft(Some(1), Some(vec![]))).await.is_ok());
    }

    #[tokio::test]
    async fn create_without_home_body_is_a_field_violation() {
        let result = crud(MockCharacterRepo::new())
            .create(draft(None, Some(vec![])))
            .await;

        assert!(
            matches!(result, Err(ManagementError::Invalid(ref v)) if v.messages() == ["homeBodyId cannot be null"])
        );
    }

    #[tokio::test]
    async fn create_with_zero_home_body_is_bad_format() {
        let mut repo = unique_name();
        repo.expect_insert().never();

        let result = crud(repo).create(draft(Some(0), Some(vec![]))).await;
        assert!(
            matches!(result, Err(ManagementError::BadFormat(ref m)) if m == "homeBodyId must be a positive integer")
        );
    }

    #[tokio::test]
    async fn create_with_unknown_home_body_is_a_conflict() {
        let mut repo = unique_name();
        repo.expect_insert().never();

        let result = crud(repo).create(draft(Some(99), Some(vec![]))).await;
        assert!(
            matches!(result, Err(ManagementError::Conflict(ref m)) if m == "celestial body with id 99 does not exist")
        );
    }

    #[tokio::test]
    async fn create_with_bad_vehicle_lists() {
        let cases = [
            (None, "vehicleIds cannot be null"),
            (Some(vec![-1]), "vehicleIds must contain positive integers"),
            (Some(vec![4, 999_999]), "vehicle with id 999999 does not exist"),
        ];

        for (vehicles, expected) in cases {
            let mut repo = unique_name();
            repo.expect_insert().never();

            let result = crud(repo).create(draft(Some(1), vehicles)).await;
            let messages = result.expect_err("rejected").messages();
            assert_eq!(messages, [expected]);
        }
    }

    #[tokio::test]
    async fn home_body_is_checked_before_vehicles() {
        let mut repo = unique_name();
        repo.expect_insert().never();

        let result = crud(repo).create(draft(Some(-3), Some(vec![-1]))).await;
        assert!(
            matches!(result, Err(ManagementError::BadFormat(ref m)) if m.starts_with("homeBodyId"))
        );
    }

    fn luke(id: CharacterId, name: &str) -> Character {
        Character {
            id,
            name: name.to_string(),
            home_body_id: CelestialBodyId::try_new(1).expect("id"),
            vehicle_ids: vec![],
        }
    }

    /// A stored character with id 2 owns every name it is asked about.
    fn existing() -> MockCharacterRepo {
        let mut repo = MockCharacterRepo::new();
        repo.expect_select_by_id()
            .returning(|id| Ok((id.get() == 2).then(|| luke(id, "Luke Skywalker"))));
        repo.expect_select_by_name()
            .returning(|name| Ok(Some(luke(character_id(2), name))));
        repo
    }

    fn bad_references() -> [(Option<i64>, Option<Vec<i64>>, &'static str); 5] {
        [
            (Some(0), Some(vec![]), "homeBodyId must be a positive integer"),
            (Some(99), Some(vec![]), "celestial body with id 99 does not exist"),
            (Some(1), Some(vec![-1]), "vehicleIds must contain positive integers"),
            (Some(1), Some(vec![999_999]), "vehicle with id 999999 does not exist"),
            (Some(1), None, "vehicleIds cannot be null"),
        ]
    }

    #[tokio::test]
    async fn update_by_id_rejects_bad_references() {
        for (home, vehicles, expected) in bad_references() {
            let mut repo = existing();
            repo.expect_update_by_id().never();

            let result = crud(repo)
                .update_by_id(character_id(2), draft(home, vehicles))
                .await;
            assert_eq!(result.expect_err("rejected").messages(), [expected]);
        }
    }

    #[tokio::test]
    async fn update_by_name_rejects_bad_references() {
        for (home, vehicles, expected) in bad_references() {
            let mut repo = existing();
            repo.expect_update_by_name().never();

            let result = crud(repo).update_by_name(draft(home, vehicles)).await;
            assert_eq!(result.expect_err("rejected").messages(), [expected]);
        }
    }

    #[tokio::test]
    async fn update_by_name_replaces_references() {
        let mut repo = MockCharacterRepo::new();
        repo.expect_select_by_name()
            .returning(|name| Ok(Some(luke(character_id(2), name))));
        repo.expect_update_by_name()
            .withf(|fields| {
                fields.name == "Luke Skywalker"
                    && fields.vehicle_ids == [VehicleId::try_new(4).expect("id")]
            })
            .times(1)
            .returning(|_| Ok(()));

        assert!(crud(repo)
            .update_by_name(draft(Some(1), Some(vec![4])))
            .await
            .is_ok());
    }

    #[tokio::test]
    async fn update_by_id_of_missing_character_is_a_conflict() {
        let mut repo = MockCharacterRepo::new();
        repo.expect_select_by_id().returning(|_| Ok(None));
        repo.expect_update_by_id().never();

        let result = crud(repo)
            .update_by_id(character_id(12), draft(Some(1), Some(vec![])))
            .await;
        assert!(
            matches!(result, Err(ManagementError::Conflict(ref m)) if m == "character with id 12 does not exist")
        );
    }
}
