//! HTTP handlers
//!
//! Axum request handlers for the API endpoints.

pub mod orders;
pub mod products;

pub use orders::{create_order, delete_order, get_order, list_orders, replace_line_items};
pub use products::{create_product, get_product, list_products};

use serde::Deserialize;

/// Query parameters for list endpoints
#[derive(Debug, Deserialize)]
pub struct PageQuery {
    #[serde(default = "default_limit")]
    pub limit: i64,
    #[serde(default)]
    pub offset: i64,
}

fn default_limit() -> i64 {
    20
}
