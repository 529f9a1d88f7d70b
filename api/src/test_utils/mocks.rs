//! Mock implementations of port traits
//!
//! These are in-memory implementations that can be configured for testing.
//! They store data in memory and allow tests to verify behavior.

use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::domain::entities::{
    NewOrder, NewOrderLineItem, NewProduct, Order, OrderId, OrderLineItem, OrderLineItemId,
    Product, ProductId,
};
use crate::domain::ports::{OrderRepository, ProductRepository};
use crate::error::DomainError;

// ============================================================================
// In-Memory Product Repository
// ============================================================================

#[derive(Default)]
pub struct InMemoryProductRepository {
    products: Arc<RwLock<HashMap<ProductId, Product>>>,
    fail_writes: bool,
}

impl InMemoryProductRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// A repository whose writes always fail with a storage error
    pub fn failing() -> Self {
        Self {
            fail_writes: true,
            ..Self::default()
        }
    }

    /// Pre-populate with a product for testing
    pub fn with_product(self, product: Product) -> Self {
        self.products.write().unwrap().insert(product.id, product);
        self
    }

    /// Number of stored products
    pub fn count(&self) -> usize {
        self.products.read().unwrap().len()
    }
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn create(&self, new_product: &NewProduct) -> Result<Product, DomainError> {
        if self.fail_writes {
            return Err(DomainError::Database("connection refused".to_string()));
        }

        let product = Product {
            id: ProductId::new(),
            name: new_product.name.clone(),
            description: new_product.description.clone(),
            price: new_product.price,
            created_at: Utc::now(),
        };

        self.products
            .write()
            .unwrap()
            .insert(product.id, product.clone());

        Ok(product)
    }

    async fn find_by_id(&self, id: &ProductId) -> Result<Option<Product>, DomainError> {
        Ok(self.products.read().unwrap().get(id).cloned())
    }

    async fn find_by_ids(&self, ids: &[ProductId]) -> Result<Vec<Product>, DomainError> {
        let products = self.products.read().unwrap();
        Ok(ids.iter().filter_map(|id| products.get(id).cloned()).collect())
    }

    async fn find_all(&self, limit: i64, offset: i64) -> Result<Vec<Product>, DomainError> {
        let mut products: Vec<Product> = self.products.read().unwrap().values().cloned().collect();
        products.sort_by(|a, b| (b.created_at, b.id.0).cmp(&(a.created_at, a.id.0)));
        Ok(products
            .into_iter()
            .skip(offset as usize)
            .take(limit as usize)
            .collect())
    }
}

// ============================================================================
// In-Memory Order Repository
// ============================================================================

#[derive(Default)]
pub struct InMemoryOrderRepository {
    orders: Arc<RwLock<HashMap<OrderId, Order>>>,
    fail_writes: bool,
}

impl InMemoryOrderRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// A repository whose writes always fail with a storage error
    pub fn failing() -> Self {
        Self {
            fail_writes: true,
            ..Self::default()
        }
    }

    /// Pre-populate with an order for testing
    pub fn with_order(self, order: Order) -> Self {
        self.orders.write().unwrap().insert(order.id, order);
        self
    }

    /// Number of stored orders
    pub fn count(&self) -> usize {
        self.orders.read().unwrap().len()
    }

    /// Number of stored line items across all orders
    pub fn line_item_count(&self) -> usize {
        self.orders
            .read()
            .unwrap()
            .values()
            .map(|o| o.line_items.len())
            .sum()
    }
}

fn build_line_items(line_items: &[NewOrderLineItem]) -> Vec<OrderLineItem> {
    line_items
        .iter()
        .enumerate()
        .map(|(position, item)| OrderLineItem {
            id: OrderLineItemId::new(),
            product_id: item.product_id,
            position: position as i32,
            quantity: item.quantity,
            unit_price: item.unit_price,
        })
        .collect()
}

#[async_trait]
impl OrderRepository for InMemoryOrderRepository {
    async fn create(&self, new_order: &NewOrder) -> Result<Order, DomainError> {
        if self.fail_writes {
            return Err(DomainError::Database("connection refused".to_string()));
        }

        let mut orders = self.orders.write().unwrap();
        if orders
            .values()
            .any(|o| o.order_number == new_order.order_number)
        {
            return Err(DomainError::AlreadyExists(format!(
                "Order number '{}' already exists",
                new_order.order_number
            )));
        }

        let order = Order {
            id: OrderId::new(),
            order_number: new_order.order_number.clone(),
            line_items: build_line_items(&new_order.line_items),
            created_at: Utc::now(),
        };
        orders.insert(order.id, order.clone());

        Ok(order)
    }

    async fn find_by_id(&self, id: &OrderId) -> Result<Option<Order>, DomainError> {
        Ok(self.orders.read().unwrap().get(id).cloned())
    }

    async fn find_by_order_number(
        &self,
        order_number: &str,
    ) -> Result<Option<Order>, DomainError> {
        Ok(self
            .orders
            .read()
            .unwrap()
            .values()
            .find(|o| o.order_number == order_number)
            .cloned())
    }

    async fn find_all(&self, limit: i64, offset: i64) -> Result<Vec<Order>, DomainError> {
        let mut orders: Vec<Order> = self.orders.read().unwrap().values().cloned().collect();
        orders.sort_by(|a, b| (b.created_at, b.id.0).cmp(&(a.created_at, a.id.0)));
        Ok(orders
            .into_iter()
            .skip(offset as usize)
            .take(limit as usize)
            .collect())
    }

    async fn replace_line_items(
        &self,
        id: &OrderId,
        line_items: &[NewOrderLineItem],
    ) -> Result<Order, DomainError> {
        if self.fail_writes {
            return Err(DomainError::Database("connection refused".to_string()));
        }

        let mut orders = self.orders.write().unwrap();
        let order = orders
            .get_mut(id)
            .ok_or_else(|| DomainError::NotFound(format!("Order {} not found", id)))?;
        order.line_items = build_line_items(line_items);

        Ok(order.clone())
    }

    async fn delete(&self, id: &OrderId) -> Result<(), DomainError> {
        if self.fail_writes {
            return Err(DomainError::Database("connection refused".to_string()));
        }

        match self.orders.write().unwrap().remove(id) {
            Some(_) => Ok(()),
            None => Err(DomainError::NotFound(format!("Order {} not found", id))),
        }
    }
}
