//! SQLite celestial body repository.

use async_trait::async_trait;
use holocron_domain::{CelestialBody, CelestialBodyFields, CelestialBodyId};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};

use super::map_sqlx_error;
use crate::infrastructure::ports::{CelestialBodyRepo, RepoError};

const SELECT_COLUMNS: &str = "SELECT id, name, climate, population FROM celestial_bodies";

pub struct SqliteCelestialBodyRepo {
    pool: SqlitePool,
}

impl SqliteCelestialBodyRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

fn row_to_body(row: &SqliteRow) -> Result<CelestialBody, RepoError> {
    let raw_id: i64 = row
        .try_get("id")
        .map_err(|e| RepoError::serialization(e.to_string()))?;
    let id = CelestialBodyId::try_new(raw_id)
        .ok_or_else(|| RepoError::serialization(format!("invalid celestial body id {raw_id}")))?;
    Ok(CelestialBody {
        id,
        name: row
            .try_get("name")
            .map_err(|e| RepoError::serialization(e.to_string()))?,
        climate: row
            .try_get("climate")
            .map_err(|e| RepoError::serialization(e.to_string()))?,
        population: row
            .try_get("population")
            .map_err(|e| RepoError::serialization(e.to_string()))?,
    })
}

#[async_trait]
impl CelestialBodyRepo for SqliteCelestialBodyRepo {
    async fn insert(&self, fields: &CelestialBodyFields) -> Result<CelestialBodyId, RepoError> {
        let result = sqlx::query(
            "INSERT INTO celestial_bodies (name, climate, population) VALUES (?, ?, ?)",
        )
        .bind(fields.name.as_str())
        .bind(fields.climate.as_str())
        .bind(fields.population)
        .execute(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("celestial_body.insert", e))?;

        let raw_id = result.last_insert_rowid();
        CelestialBodyId::try_new(raw_id)
            .ok_or_else(|| RepoError::serialization(format!("invalid celestial body id {raw_id}")))
    }

    async fn select_all(&self) -> Result<Vec<CelestialBody>, RepoError> {
        let rows = sqlx::query(&format!("{SELECT_COLUMNS} ORDER BY id"))
            .fetch_all(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("celestial_body.select_all", e))?;
        rows.iter().map(row_to_body).collect()
    }

    async fn select_by_id(&self, id: CelestialBodyId) -> Result<Option<CelestialBody>, RepoError> {
        let row = sqlx::query(&format!("{SELECT_COLUMNS} WHERE id = ?"))
            .bind(id.get())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("celestial_body.select_by_id", e))?;
        row.as_ref().map(row_to_body).transpose()
    }

    async fn select_by_name(&self, name: &str) -> Result<Option<CelestialBody>, RepoError> {
        let row = sqlx::query(&format!("{SELECT_COLUMNS} WHERE name = ?"))
            .bind(name)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("celestial_body.select_by_name", e))?;
        row.as_ref().map(row_to_body).transpose()
    }

    async fn update_by_id(
        &self,
        id: CelestialBodyId,
        fields: &CelestialBodyFields,
    ) -> Result<(), RepoError> {
        sqlx::query(
            "UPDATE celestial_bodies SET name = ?, climate = ?, population = ? WHERE id = ?",
        )
        .bind(fields.name.as_str())
        .bind(fields.climate.as_str())
        .bind(fields.population)
        .bind(id.get())
        .execute(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("celestial_body.update_by_id", e))?;
        Ok(())
    }

    async fn update_by_name(&self, fields: &CelestialBodyFields) -> Result<(), RepoError> {
        sqlx::query("UPDATE celestial_bodies SET climate = ?, population = ? WHERE name = ?")
            .bind(fields.climate.as_str())
            .bind(fields.population)
            .bind(fields.name.as_str())
            .execute(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("celestial_body.update_by_name", e))?;
        Ok(())
    }

    async fn delete_by_id(&self, id: CelestialBodyId) -> Result<(), RepoError> {
        sqlx::query("DELETE FROM celestial_bodies WHERE id = ?")
            .bind(id.get())
            .execute(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("celestial_body.delete_by_id", e))?;
        Ok(())
    }

    async fn delete_by_name(&self, name: &str) -> Result<(), RepoError> {
        sqlx::query("DELETE FROM celestial_bodies WHERE name = ?")
            .bind(name)
            .execute(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("celestial_body.delete_by_name", e))?;
        Ok(())
    }
}
