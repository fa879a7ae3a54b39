//! SQLite character repository.
//!
//! The vehicle references are kept as a JSON array in a text column, in the
//! order they were supplied.

use async_trait::async_trait;
use holocron_domain::{CelestialBodyId, Character, CharacterFields, CharacterId, VehicleId};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};

use super::map_sqlx_error;
use crate::infrastructure::ports::{CharacterRepo, RepoError};

const SELECT_COLUMNS: &str = "SELECT id, name, home_body_id, vehicle_ids FROM characters";

pub struct SqliteCharacterRepo {
    pool: SqlitePool,
}

impl SqliteCharacterRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

fn encode_vehicle_ids(ids: &[VehicleId]) -> Result<String, RepoError> {
    serde_json::to_string(ids).map_err(|e| RepoError::serialization(e.to_string()))
}

fn row_to_character(row: &SqliteRow) -> Result<Character, RepoError> {
    let decode = |e: sqlx::Error| RepoError::serialization(e.to_string());

    let raw_id: i64 = row.try_get("id").map_err(decode)?;
    let id = CharacterId::try_new(raw_id)
        .ok_or_else(|| RepoError::serialization(format!("invalid character id {raw_id}")))?;

    let raw_home: i64 = row.try_get("home_body_id").map_err(decode)?;
    let home_body_id = CelestialBodyId::try_new(raw_home)
        .ok_or_else(|| RepoError::serialization(format!("invalid home body id {raw_home}")))?;

    // VehicleId deserialization rejects non-positive values.
    let vehicle_json: String = row.try_get("vehicle_ids").map_err(decode)?;
    let vehicle_ids: Vec<VehicleId> = serde_json::from_str(&vehicle_json)
        .map_err(|e| RepoError::serialization(format!("vehicle_ids: {e}")))?;

    Ok(Character {
        id,
        name: row.try_get("name").map_err(decode)?,
        home_body_id,
        vehicle_ids,
    })
}

#[async_trait]
impl CharacterRepo for SqliteCharacterRepo {
    async fn insert(&self, fields: &CharacterFields) -> Result<CharacterId, RepoError> {
        let vehicle_ids = encode_vehicle_ids(&fields.vehicle_ids)?;
        let result = sqlx::query(
            "INSERT INTO characters (name, home_body_id, vehicle_ids) VALUES (?, ?, ?)",
        )
        .bind(fields.name.as_str())
        .bind(fields.home_body_id.get())
        .bind(vehicle_ids)
        .execute(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("character.insert", e))?;

        let raw_id = result.last_insert_rowid();
        CharacterId::try_new(raw_id)
            .ok_or_else(|| RepoError::serialization(format!("invalid character id {raw_id}")))
    }

    async fn select_all(&self) -> Result<Vec<Character>, RepoError> {
        let rows = sqlx::query(&format!("{SELECT_COLUMNS} ORDER BY id"))
            .fetch_all(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("character.select_all", e))?;
        rows.iter().map(row_to_character).collect()
    }

    async fn select_by_id(&self, id: CharacterId) -> Result<Option<Character>, RepoError> {
        let row = sqlx::query(&format!("{SELECT_COLUMNS} WHERE id = ?"))
            .bind(id.get())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("character.select_by_id", e))?;
        row.as_ref().map(row_to_character).transpose()
    }

    async fn select_by_name(&self, name: &str) -> Result<Option<Character>, RepoError> {
        let row = sqlx::query(&format!("{SELECT_COLUMNS} WHERE name = ?"))
            .bind(name)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("character.select_by_name", e))?;
        row.as_ref().map(row_to_character).transpose()
    }

    async fn update_by_id(
        &self,
        id: CharacterId,
        fields: &CharacterFields,
    ) -> Result<(), RepoError> {
        let vehicle_ids = encode_vehicle_ids(&fields.vehicle_ids)?;
        sqlx::query(
            "UPDATE characters SET name = ?, home_body_id = ?, vehicle_ids = ? WHERE id = ?",
        )
        .bind(fields.name.as_str())
        .bind(fields.home_body_id.get())
        .bind(vehicle_ids)
        .bind(id.get())
        .execute(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("character.update_by_id", e))?;
        Ok(())
    }

    async fn update_by_name(&self, fields: &CharacterFields) -> Result<(), RepoError> {
        let vehicle_ids = encode_vehicle_ids(&fields.vehicle_ids)?;
        sqlx::query("UPDATE characters SET home_body_id = ?, vehicle_ids = ? WHERE name = ?")
            .bind(fields.home_body_id.get())
            .bind(vehicle_ids)
            .bind(fields.name.as_str())
            .execute(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("character.update_by_name", e))?;
        Ok(())
    }

    async fn delete_by_id(&self, id: CharacterId) -> Result<(), RepoError> {
        sqlx::query("DELETE FROM characters WHERE id = ?")
            .bind(id.get())
            .execute(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("character.delete_by_id", e))?;
        Ok(())
    }

    async fn delete_by_name(&self, name: &str) -> Result<(), RepoError> {
        sqlx::query("DELETE FROM characters WHERE name = ?")
            .bind(name)
            .execute(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("character.delete_by_name", e))?;
        Ok(())
    }
}
