//! Order service
//!
//! Builds order aggregates from line item inputs and persists them through
//! the order repository. Line items reference existing products; a missing
//! unit price falls back to the product's current price.

use std::collections::HashMap;
use std::sync::Arc;

use rust_decimal::Decimal;

use super::{page_bounds, validate_price};
use crate::domain::entities::{
    generate_order_number, NewOrder, NewOrderLineItem, Order, OrderId, Product, ProductId,
};
use crate::domain::ports::{OrderRepository, ProductRepository};
use crate::error::{AppError, DomainError};

/// Maximum order number length, matching the `t_orders.order_number` column
pub const MAX_ORDER_NUMBER_LEN: usize = 64;

/// Maximum number of line items in one order
pub const MAX_LINE_ITEMS: usize = 100;

/// One requested line of an order, before validation
#[derive(Debug, Clone, Default)]
pub struct LineItemInput {
    pub product_id: Option<ProductId>,
    pub quantity: Option<i32>,
    pub unit_price: Option<Decimal>,
}

/// Service for managing orders
pub struct OrderService<OR, PR>
where
    OR: OrderRepository + ?Sized,
    PR: ProductRepository + ?Sized,
{
    orders: Arc<OR>,
    products: Arc<PR>,
}

impl<OR, PR> OrderService<OR, PR>
where
    OR: OrderRepository + ?Sized,
    PR: ProductRepository + ?Sized,
{
    pub fn new(orders: Arc<OR>, products: Arc<PR>) -> Self {
        Self { orders, products }
    }

    /// Create an order with its line items
    ///
    /// The order number is generated when not supplied. The whole aggregate
    /// is written atomically; a duplicate order number fails with
    /// `DomainError::AlreadyExists`.
    pub async fn create_order(
        &self,
        order_number: Option<&str>,
        line_items: &[LineItemInput],
    ) -> Result<Order, AppError> {
        let order_number = match order_number {
            Some(number) => validate_order_number(number)?,
            None => generate_order_number(),
        };

        let line_items = self.resolve_line_items(line_items).await?;

        if self
            .orders
            .find_by_order_number(&order_number)
            .await?
            .is_some()
        {
            return Err(DomainError::AlreadyExists(format!(
                "Order number '{}' already exists",
                order_number
            ))
            .into());
        }

        let order = self
            .orders
            .create(&NewOrder {
                order_number,
                line_items,
            })
            .await?;

        tracing::info!(
            "Created order {} ({}) with {} line items",
            order.id,
            order.order_number,
            order.line_items.len()
        );

        Ok(order)
    }

    /// Get an order by ID
    pub async fn get_order(&self, id: &OrderId) -> Result<Order, AppError> {
        self.orders
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::NotFound(format!("Order {} not found", id)).into())
    }

    /// List orders, newest first
    pub async fn list_orders(&self, limit: i64, offset: i64) -> Result<Vec<Order>, AppError> {
        let (limit, offset) = page_bounds(limit, offset);
        Ok(self.orders.find_all(limit, offset).await?)
    }

    /// Replace every line item of an order
    pub async fn replace_line_items(
        &self,
        id: &OrderId,
        line_items: &[LineItemInput],
    ) -> Result<Order, AppError> {
        let line_items = self.resolve_line_items(line_items).await?;
        let order = self.orders.replace_line_items(id, &line_items).await?;

        tracing::info!(
            "Replaced line items of order {} ({} items)",
            order.id,
            order.line_items.len()
        );

        Ok(order)
    }

    /// Delete an order together with its line items
    pub async fn delete_order(&self, id: &OrderId) -> Result<(), AppError> {
        self.orders.delete(id).await?;
        tracing::info!("Deleted order {}", id);
        Ok(())
    }

    /// Validate line item inputs and fill in unit prices from the catalog
    async fn resolve_line_items(
        &self,
        inputs: &[LineItemInput],
    ) -> Result<Vec<NewOrderLineItem>, AppError> {
        if inputs.is_empty() {
            return Err(invalid("an order needs at least one line item"));
        }
        if inputs.len() > MAX_LINE_ITEMS {
            return Err(invalid(&format!(
                "an order may have at most {} line items",
                MAX_LINE_ITEMS
            )));
        }

        let mut checked = Vec::with_capacity(inputs.len());
        for (index, input) in inputs.iter().enumerate() {
            let product_id = input
                .product_id
                .ok_or_else(|| invalid(&format!("line_items[{}].product_id is required", index)))?;
            let quantity = input
                .quantity
                .ok_or_else(|| invalid(&format!("line_items[{}].quantity is required", index)))?;
            if quantity <= 0 {
                return Err(invalid(&format!(
                    "line_items[{}].quantity must be positive",
                    index
                )));
            }
            let unit_price = input
                .unit_price
                .map(|price| validate_price(&format!("line_items[{}].unit_price", index), price))
                .transpose()?;

            checked.push((product_id, quantity, unit_price));
        }

        let mut ids: Vec<ProductId> = checked.iter().map(|(id, _, _)| *id).collect();
        ids.sort_by_key(|id| id.0);
        ids.dedup();

        let catalog: HashMap<ProductId, Product> = self
            .products
            .find_by_ids(&ids)
            .await?
            .into_iter()
            .map(|p| (p.id, p))
            .collect();

        checked
            .into_iter()
            .map(|(product_id, quantity, unit_price)| -> Result<_, AppError> {
                let product = catalog
                    .get(&product_id)
                    .ok_or_else(|| invalid(&format!("unknown product {}", product_id)))?;
                Ok(NewOrderLineItem {
                    product_id,
                    quantity,
                    unit_price: unit_price.unwrap_or(product.price),
                })
            })
            .collect()
    }
}

fn validate_order_number(number: &str) -> Result<String, AppError> {
    let number = number.trim();
    if number.is_empty() {
        return Err(invalid("order_number must not be blank"));
    }
    if number.chars().count() > MAX_ORDER_NUMBER_LEN {
        return Err(invalid(&format!(
            "order_number must be at most {} characters",
            MAX_ORDER_NUMBER_LEN
        )));
    }
    Ok(number.to_string())
}

fn invalid(msg: &str) -> AppError {
    AppError::Domain(DomainError::Validation(msg.to_string()))
}
