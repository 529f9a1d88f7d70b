//! Test fixtures
//!
//! Factory functions for creating test data with sensible defaults.
//! Each fixture function creates a valid entity that can be customized.

use chrono::Utc;
use rust_decimal::Decimal;

use crate::domain::entities::{
    NewOrderLineItem, Order, OrderId, OrderLineItem, OrderLineItemId, Product, ProductId,
};

/// Create a test product with default values
pub fn test_product() -> Product {
    Product {
        id: ProductId::new(),
        name: "Pen".to_string(),
        description: Some("Blue ink".to_string()),
        price: Decimal::new(150, 2),
        created_at: Utc::now(),
    }
}

/// Create a test product with a specific name and price in cents
pub fn test_product_priced(name: &str, cents: i64) -> Product {
    Product {
        id: ProductId::new(),
        name: name.to_string(),
        description: None,
        price: Decimal::new(cents, 2),
        created_at: Utc::now(),
    }
}

/// Create a new line item for a product at its list price
pub fn test_new_line_item(product: &Product, quantity: i32) -> NewOrderLineItem {
    NewOrderLineItem {
        product_id: product.id,
        quantity,
        unit_price: product.price,
    }
}

/// Create a persisted order with one line item per (product, quantity) pair
pub fn test_order(order_number: &str, lines: &[(&Product, i32)]) -> Order {
    Order {
        id: OrderId::new(),
        order_number: order_number.to_string(),
        line_items: lines
            .iter()
            .enumerate()
            .map(|(position, (product, quantity))| OrderLineItem {
                id: OrderLineItemId::new(),
                product_id: product.id,
                position: position as i32,
                quantity: *quantity,
                unit_price: product.price,
            })
            .collect(),
        created_at: Utc::now(),
    }
}
