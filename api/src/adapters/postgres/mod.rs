//! PostgreSQL adapters
//!
//! Implementations of repository traits using SeaORM and PostgreSQL.

pub mod migrations;
pub mod order_repo;
pub mod product_repo;


pub use migrations::run_migrations;
pub use order_repo::PostgresOrderRepository;
pub use product_repo::PostgresProductRepository;

use sea_orm::{DbErr, SqlErr};

use crate::error::DomainError;

/// Classify a SeaORM error: constraint violations keep their meaning,
/// everything else is a plain storage failure.
pub(crate) fn map_db_err(e: DbErr) -> DomainError {
    match e.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(msg)) => DomainError::AlreadyExists(msg),
        Some(SqlErr::ForeignKeyConstraintViolation(msg)) => DomainError::Validation(msg),
        _ => DomainError::Database(e.to_string()),
    }
}
