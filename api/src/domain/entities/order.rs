//! Order domain entity
//!
//! An order is an aggregate: it owns an ordered list of line items which
//! are created, replaced and deleted together with it.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::product::ProductId;

/// Unique identifier for an order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OrderId(pub Uuid);

impl OrderId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for OrderId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Uuid> for OrderId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for OrderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unique identifier for an order line item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OrderLineItemId(pub Uuid);

impl OrderLineItemId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for OrderLineItemId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for OrderLineItemId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A line of an order. Has no lifecycle outside its order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderLineItem {
    pub id: OrderLineItemId,
    pub product_id: ProductId,
    /// Zero-based index in submission order
    pub position: i32,
    pub quantity: i32,
    pub unit_price: Decimal,
}

impl OrderLineItem {
    pub fn subtotal(&self) -> Decimal {
        self.unit_price * Decimal::from(self.quantity)
    }
}

/// A persisted order together with its line items
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Order {
    pub id: OrderId,
    pub order_number: String,
    pub line_items: Vec<OrderLineItem>,
    pub created_at: DateTime<Utc>,
}

impl Order {
    /// Sum of all line item subtotals
    pub fn total(&self) -> Decimal {
        self.line_items.iter().map(OrderLineItem::subtotal).sum()
    }

    /// Total number of units across all line items
    pub fn item_count(&self) -> i64 {
        self.line_items.iter().map(|i| i64::from(i.quantity)).sum()
    }
}

/// A validated line item ready to be persisted.
/// Position is implied by its index in `NewOrder::line_items`.
#[derive(Debug, Clone, PartialEq)]
pub struct NewOrderLineItem {
    pub product_id: ProductId,
    pub quantity: i32,
    pub unit_price: Decimal,
}

/// Data needed to create a new order
#[derive(Debug, Clone, PartialEq)]
pub struct NewOrder {
    pub order_number: String,
    pub line_items: Vec<NewOrderLineItem>,
}

/// Generate an order number for requests that don't supply one
pub fn generate_order_number() -> String {
    format!("ORD-{}", Uuid::new_v4().simple()).to_uppercase()
}
