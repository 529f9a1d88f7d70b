//! SeaORM entities
//!
//! Table models for the PostgreSQL schema in `migrations/`.
//! Domain code never sees these; adapters convert them into `domain::entities`.

pub mod order_line_items;
pub mod orders;
pub mod products;
