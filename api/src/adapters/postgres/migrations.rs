//! Schema migrations
//!
//! Plain SQL files under `api/migrations/`, embedded at compile time and
//! applied in order. Every statement is idempotent.

use sea_orm::{ConnectionTrait, DatabaseConnection};

use crate::error::DomainError;

const MIGRATIONS: &[(&str, &str)] = &[(
    "0001_initial_schema",
    include_str!("../../../migrations/0001_initial_schema.sql"),
)];

/// Apply all embedded migrations
pub async fn run_migrations(db: &DatabaseConnection) -> Result<(), DomainError> {
    for (name, sql) in MIGRATIONS {
        tracing::info!("Applying migration {}", name);
        db.execute_unprepared(sql)
            .await
            .map_err(|e| DomainError::Database(format!("migration {} failed: {}", name, e)))?;
    }
    Ok(())
}
