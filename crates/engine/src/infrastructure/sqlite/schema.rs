//! Table definitions.
//!
//! `characters.home_body_id` and `characters.vehicle_ids` carry
//! no foreign keys: the vehicle list is a JSON array of ids, and reference
//! integrity is checked by the application before each write.

use sqlx::SqlitePool;

use crate::infrastructure::ports::RepoError;

const TABLES: [&str; 3] = [
    r#"
    CREATE TABLE IF NOT EXISTS celestial_bodies (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL UNIQUE,
        climate TEXT NOT NULL,
        population INTEGER NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS vehicles (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL UNIQUE,
        model TEXT NOT NULL,
        cost_in_cents INTEGER NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS characters (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL UNIQUE,
        home_body_id INTEGER NOT NULL,
        vehicle_ids TEXT NOT NULL DEFAULT '[]'
    )
    "#,
];

/// Creates the tables if they do not exist. Safe to call on every startup.
pub async fn ensure_schema(pool: &SqlitePool) -> Result<(), RepoError> {
    for statement in TABLES {
        sqlx::query(statement)
            .execute(pool)
            .await
            .map_err(|e| RepoError::database("ensure_schema", e))?;
    }

    tracing::info!("SQLite schema initialized");
    Ok(())
}
