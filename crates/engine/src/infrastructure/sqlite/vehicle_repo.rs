//! SQLite vehicle repository. Costs are stored as whole hundredths.

use async_trait::async_trait;
use holocron_domain::{Credits, Vehicle, VehicleFields, VehicleId};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};

use super::map_sqlx_error;
use crate::infrastructure::ports::{RepoError, VehicleRepo};

const SELECT_COLUMNS: &str = "SELECT id, name, model, cost_in_cents FROM vehicles";

pub struct SqliteVehicleRepo {
    pool: SqlitePool,
}

impl SqliteVehicleRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

fn row_to_vehicle(row: &SqliteRow) -> Result<Vehicle, RepoError> {
    let decode = |e: sqlx::Error| RepoError::serialization(e.to_string());
    let raw_id: i64 = row.try_get("id").map_err(decode)?;
    let id = VehicleId::try_new(raw_id)
        .ok_or_else(|| RepoError::serialization(format!("invalid vehicle id {raw_id}")))?;
    let cents: i64 = row.try_get("cost_in_cents").map_err(decode)?;
    Ok(Vehicle {
        id,
        name: row.try_get("name").map_err(decode)?,
        model: row.try_get("model").map_err(decode)?,
        cost_in_credits: Credits::from_cents(cents),
    })
}

#[async_trait]
impl VehicleRepo for SqliteVehicleRepo {
    async fn insert(&self, fields: &VehicleFields) -> Result<VehicleId, RepoError> {
        let result =
            sqlx::query("INSERT INTO vehicles (name, model, cost_in_cents) VALUES (?, ?, ?)")
                .bind(fields.name.as_str())
                .bind(fields.model.as_str())
                .bind(fields.cost_in_credits.cents())
                .execute(&self.pool)
                .await
                .map_err(|e| map_sqlx_error("vehicle.insert", e))?;

        let raw_id = result.last_insert_rowid();
        VehicleId::try_new(raw_id)
            .ok_or_else(|| RepoError::serialization(format!("invalid vehicle id {raw_id}")))
    }

    async fn select_all(&self) -> Result<Vec<Vehicle>, RepoError> {
        let rows = sqlx::query(&format!("{SELECT_COLUMNS} ORDER BY id"))
            .fetch_all(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("vehicle.select_all", e))?;
        rows.iter().map(row_to_vehicle).collect()
    }

    async fn select_by_id(&self, id: VehicleId) -> Result<Option<Vehicle>, RepoError> {
        let row = sqlx::query(&format!("{SELECT_COLUMNS} WHERE id = ?"))
            .bind(id.get())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("vehicle.select_by_id", e))?;
        row.as_ref().map(row_to_vehicle).transpose()
    }

    async fn select_by_name(&self, name: &str) -> Result<Option<Vehicle>, RepoError> {
        let row = sqlx::query(&format!("{SELECT_COLUMNS} WHERE name = ?"))
            .bind(name)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("vehicle.select_by_name", e))?;
        row.as_ref().map(row_to_vehicle).transpose()
    }

    async fn update_by_id(&self, id: VehicleId, fields: &VehicleFields) -> Result<(), RepoError> {
        sqlx::query("UPDATE vehicles SET name = ?, model = ?, cost_in_cents = ? WHERE id = ?")
            .bind(fields.name.as_str())
            .bind(fields.model.as_str())
            .bind(fields.cost_in_credits.cents())
            .bind(id.get())
            .execute(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("vehicle.update_by_id", e))?;
        Ok(())
    }

    async fn update_by_name(&self, fields: &VehicleFields) -> Result<(), RepoError> {
        sqlx::query("UPDATE vehicles SET model = ?, cost_in_cents = ? WHERE name = ?")
            .bind(fields.model.as_str())
            .bind(fields.cost_in_credits.cents())
            .bind(fields.name.as_str())
            .execute(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("vehicle.update_by_name", e))?;
        Ok(())
    }

    async fn delete_by_id(&self, id: VehicleId) -> Result<(), RepoError> {
        sqlx::query("DELETE FROM vehicles WHERE id = ?")
            .bind(id.get())
            .execute(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("vehicle.delete_by_id", e))?;
        Ok(())
    }

    async fn delete_by_name(&self, name: &str) -> Result<(), RepoError> {
        sqlx::query("DELETE FROM vehicles WHERE name = ?")
            .bind(name)
            .execute(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("vehicle.delete_by_name", e))?;
        Ok(())
    }
}
