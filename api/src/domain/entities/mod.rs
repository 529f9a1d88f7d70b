//! Domain entities
//!
//! Pure domain models representing core business concepts.
//! These are separate from the SeaORM entities in the `entity` module.

pub mod order;
pub mod product;

pub use order::{
    generate_order_number, NewOrder, NewOrderLineItem, Order, OrderId, OrderLineItem,
    OrderLineItemId,
};
pub use product::{NewProduct, Product, ProductId};
