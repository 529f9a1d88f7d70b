//! Repository port traits
//!
//! These traits define the interface for data persistence.
//! Implementations are provided by adapters (e.g., PostgreSQL).

use async_trait::async_trait;

use crate::domain::entities::{
    NewOrder, NewOrderLineItem, NewProduct, Order, OrderId, Product, ProductId,
};
use crate::error::DomainError;

/// Repository for Product entities
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Persist a new product, assigning its identifier
    async fn create(&self, product: &NewProduct) -> Result<Product, DomainError>;

    /// Find a product by ID
    async fn find_by_id(&self, id: &ProductId) -> Result<Option<Product>, DomainError>;

    /// Find all products whose IDs are in `ids`. Missing IDs are skipped.
    async fn find_by_ids(&self, ids: &[ProductId]) -> Result<Vec<Product>, DomainError>;

    /// List products, newest first
    async fn find_all(&self, limit: i64, offset: i64) -> Result<Vec<Product>, DomainError>;
}

/// Repository for Order aggregates
///
/// Every write covers the order and all of its line items atomically.
#[async_trait]
pub trait OrderRepository: Send + Sync {
    /// Persist an order and its line items in one transaction
    ///
    /// Fails with `DomainError::AlreadyExists` if the order number is taken.
    async fn create(&self, order: &NewOrder) -> Result<Order, DomainError>;

    /// Find an order (with line items in submission order) by ID
    async fn find_by_id(&self, id: &OrderId) -> Result<Option<Order>, DomainError>;

    /// Find an order by its order number
    async fn find_by_order_number(&self, order_number: &str)
        -> Result<Option<Order>, DomainError>;

    /// List orders, newest first
    async fn find_all(&self, limit: i64, offset: i64) -> Result<Vec<Order>, DomainError>;

    /// Replace all line items of an order in one transaction
    async fn replace_line_items(
        &self,
        id: &OrderId,
        line_items: &[NewOrderLineItem],
    ) -> Result<Order, DomainError>;

    /// Delete an order and all of its line items in one transaction
    async fn delete(&self, id: &OrderId) -> Result<(), DomainError>;
}
