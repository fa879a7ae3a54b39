//! SQLite implementations of the repository ports.

use std::sync::Arc;

use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;

use crate::infrastructure::ports::RepoError;

mod celestial_body_repo;
mod character_repo;
mod schema;
mod vehicle_repo;

pub use celestial_body_repo::SqliteCelestialBodyRepo;
pub use character_repo::SqliteCharacterRepo;
pub use schema::ensure_schema;
pub use vehicle_repo::SqliteVehicleRepo;


/// All SQLite repositories sharing one connection pool.
pub struct SqliteRepositories {
    pub celestial_body: Arc<SqliteCelestialBodyRepo>,
    pub character: Arc<SqliteCharacterRepo>,
    pub vehicle: Arc<SqliteVehicleRepo>,
}

impl SqliteRepositories {
    /// Connects to `database_url` and ensures the schema exists.
    pub async fn connect(database_url: &str) -> Result<Self, RepoError> {
        let pool = SqlitePool::connect(database_url)
            .await
            .map_err(|e| RepoError::database("connect", e))?;
        Self::from_pool(pool).await
    }

    /// A private in-memory database. A single connection keeps every query
    /// on the same database.
    pub async fn in_memory() -> Result<Self, RepoError> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .map_err(|e| RepoError::database("connect", e))?;
        Self::from_pool(pool).await
    }

    pub async fn from_pool(pool: SqlitePool) -> Result<Self, RepoError> {
        ensure_schema(&pool).await?;
        Ok(Self {
            celestial_body: Arc::new(SqliteCelestialBodyRepo::new(pool.clone())),
            character: Arc::new(SqliteCharacterRepo::new(pool.clone())),
            vehicle: Arc::new(SqliteVehicleRepo::new(pool)),
        })
    }
}

/// Maps a driver error, keeping unique-index violations distinguishable.
fn map_sqlx_error(operation: &'static str, err: sqlx::Error) -> RepoError {
    match err.as_database_error() {
        Some(db_err) if db_err.is_unique_violation() => {
            RepoError::constraint(format!("{operation}: {db_err}"))
        }
        _ => RepoError::database(operation, err),
    }
}
