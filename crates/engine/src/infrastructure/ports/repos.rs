//! Repository port traits, one per entity type.
//!
//! Adapters implement these as plain storage primitives. They enforce no
//! business rules: uniqueness and reference checks happen before any call
//! that writes. Update and delete keyed by a missing id or name affect
//! nothing and succeed.

use async_trait::async_trait;
use holocron_domain::{
    CelestialBody, CelestialBodyFields, CelestialBodyId, Character, CharacterFields, CharacterId,
    Vehicle, VehicleFields, VehicleId,
};

use super::error::RepoError;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CelestialBodyRepo: Send + Sync {
    async fn insert(&self, fields: &CelestialBodyFields) -> Result<CelestialBodyId, RepoError>;
    async fn select_all(&self) -> Result<Vec<CelestialBody>, RepoError>;
    async fn select_by_id(&self, id: CelestialBodyId) -> Result<Option<CelestialBody>, RepoError>;
    async fn select_by_name(&self, name: &str) -> Result<Option<CelestialBody>, RepoError>;
    /// Replaces every field, name included.
    async fn update_by_id(
        &self,
        id: CelestialBodyId,
        fields: &CelestialBodyFields,
    ) -> Result<(), RepoError>;
    /// Replaces every field except the name, which is the key.
    async fn update_by_name(&self, fields: &CelestialBodyFields) -> Result<(), RepoError>;
    async fn delete_by_id(&self, id: CelestialBodyId) -> Result<(), RepoError>;
    async fn delete_by_name(&self, name: &str) -> Result<(), RepoError>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CharacterRepo: Send + Sync {
    async fn insert(&self, fields: &CharacterFields) -> Result<CharacterId, RepoError>;
    async fn select_all(&self) -> Result<Vec<Character>, RepoError>;
    async fn select_by_id(&self, id: CharacterId) -> Result<Option<Character>, RepoError>;
    async fn select_by_name(&self, name: &str) -> Result<Option<Character>, RepoError>;
    async fn update_by_id(&self, id: CharacterId, fields: &CharacterFields)
        -> Result<(), RepoError>;
    async fn update_by_name(&self, fields: &CharacterFields) -> Result<(), RepoError>;
    async fn delete_by_id(&self, id: CharacterId) -> Result<(), RepoError>;
    async fn delete_by_name(&self, name: &str) -> Result<(), RepoError>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait VehicleRepo: Send + Sync {
    async fn insert(&self, fields: &VehicleFields) -> Result<VehicleId, RepoError>;
    async fn select_all(&self) -> Result<Vec<Vehicle>, RepoError>;
    async fn select_by_id(&self, id: VehicleId) -> Result<Option<Vehicle>, RepoError>;
    async fn select_by_name(&self, name: &str) -> Result<Option<Vehicle>, RepoError>;
    async fn update_by_id(&self, id: VehicleId, fields: &VehicleFields) -> Result<(), RepoError>;
    async fn update_by_name(&self, fields: &VehicleFields) -> Result<(), RepoError>;
    async fn delete_by_id(&self, id: VehicleId) -> Result<(), RepoError>;
    async fn delete_by_name(&self, name: &str) -> Result<(), RepoError>;
}
