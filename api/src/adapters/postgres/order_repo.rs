//! PostgreSQL adapter for OrderRepository
//!
//! An order and its line items are always written inside one transaction.
//! Reads that touch both tables run in a read-only REPEATABLE READ
//! transaction so a concurrent delete never yields a half-loaded order.

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    AccessMode, ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection,
    DatabaseTransaction, EntityTrait, IsolationLevel, LoaderTrait, QueryFilter, QueryOrder,
    QuerySelect, Set, TransactionTrait,
};
use uuid::Uuid;

use super::map_db_err;
use crate::domain::entities::{
    NewOrder, NewOrderLineItem, Order, OrderId, OrderLineItem, OrderLineItemId, ProductId,
};
use crate::domain::ports::OrderRepository;
use crate::entity::{order_line_items, orders};
use crate::error::DomainError;

/// PostgreSQL implementation of OrderRepository
pub struct PostgresOrderRepository {
    db: DatabaseConnection,
}

impl PostgresOrderRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn begin_write(&self) -> Result<DatabaseTransaction, DomainError> {
        self.db
            .begin()
            .await
            .map_err(|e| DomainError::Database(e.to_string()))
    }

    async fn begin_read(&self) -> Result<DatabaseTransaction, DomainError> {
        self.db
            .begin_with_config(
                Some(IsolationLevel::RepeatableRead),
                Some(AccessMode::ReadOnly),
            )
            .await
            .map_err(|e| DomainError::Database(e.to_string()))
    }
}

/// Insert line items for an order, numbering them by their index
async fn insert_line_items<C>(
    conn: &C,
    order_id: Uuid,
    line_items: &[NewOrderLineItem],
) -> Result<Vec<order_line_items::Model>, DomainError>
where
    C: ConnectionTrait,
{
    let mut inserted = Vec::with_capacity(line_items.len());

    for (position, item) in line_items.iter().enumerate() {
        let model = order_line_items::ActiveModel {
            id: Set(Uuid::new_v4()),
            order_id: Set(order_id),
            product_id: Set(item.product_id.0),
            position: Set(position as i32),
            quantity: Set(item.quantity),
            unit_price: Set(item.unit_price),
        };

        inserted.push(model.insert(conn).await.map_err(map_db_err)?);
    }

    Ok(inserted)
}

/// Load the line items of a single order in submission order
async fn load_line_items<C>(
    conn: &C,
    order_id: Uuid,
) -> Result<Vec<order_line_items::Model>, DomainError>
where
    C: ConnectionTrait,
{
    order_line_items::Entity::find()
        .filter(order_line_items::Column::OrderId.eq(order_id))
        .order_by_asc(order_line_items::Column::Position)
        .all(conn)
        .await
        .map_err(|e| DomainError::Database(e.to_string()))
}

#[async_trait]
impl OrderRepository for PostgresOrderRepository {
    async fn create(&self, order: &NewOrder) -> Result<Order, DomainError> {
        let id = Uuid::new_v4();
        let now = Utc::now().fixed_offset();

        let txn = self.begin_write().await?;

        let model = orders::ActiveModel {
            id: Set(id),
            order_number: Set(order.order_number.clone()),
            created_at: Set(now),
        };

        let order_model = model.insert(&txn).await.map_err(|e| match map_db_err(e) {
            DomainError::AlreadyExists(_) => DomainError::AlreadyExists(format!(
                "Order number '{}' already exists",
                order.order_number
            )),
            other => other,
        })?;

        let items = insert_line_items(&txn, id, &order.line_items).await?;

        txn.commit()
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        tracing::debug!(
            "Persisted order {} with {} line items",
            order_model.order_number,
            items.len()
        );

        Ok(assemble(order_model, items))
    }

    async fn find_by_id(&self, id: &OrderId) -> Result<Option<Order>, DomainError> {
        let txn = self.begin_read().await?;

        let Some(order_model) = orders::Entity::find_by_id(id.0)
            .one(&txn)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?
        else {
            return Ok(None);
        };

        let items = load_line_items(&txn, order_model.id).await?;

        txn.commit()
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(Some(assemble(order_model, items)))
    }

    async fn find_by_order_number(
        &self,
        order_number: &str,
    ) -> Result<Option<Order>, DomainError> {
        let txn = self.begin_read().await?;

        let Some(order_model) = orders::Entity::find()
            .filter(orders::Column::OrderNumber.eq(order_number))
            .one(&txn)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?
        else {
            return Ok(None);
        };

        let items = load_line_items(&txn, order_model.id).await?;

        txn.commit()
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(Some(assemble(order_model, items)))
    }

    async fn find_all(&self, limit: i64, offset: i64) -> Result<Vec<Order>, DomainError> {
        let txn = self.begin_read().await?;

        let order_models = orders::Entity::find()
            .order_by_desc(orders::Column::CreatedAt)
            .order_by_desc(orders::Column::Id)
            .offset(offset as u64)
            .limit(limit as u64)
            .all(&txn)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        let items = order_models
            .load_many(order_line_items::Entity, &txn)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        txn.commit()
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(order_models
            .into_iter()
            .zip(items)
            .map(|(order, items)| assemble(order, items))
            .collect())
    }

    async fn replace_line_items(
        &self,
        id: &OrderId,
        line_items: &[NewOrderLineItem],
    ) -> Result<Order, DomainError> {
        let txn = self.begin_write().await?;

        let order_model = orders::Entity::find_by_id(id.0)
            .lock_exclusive()
            .one(&txn)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?
            .ok_or_else(|| DomainError::NotFound(format!("Order {} not found", id)))?;

        order_line_items::Entity::delete_many()
            .filter(order_line_items::Column::OrderId.eq(id.0))
            .exec(&txn)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        let items = insert_line_items(&txn, id.0, line_items).await?;

        txn.commit()
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(assemble(order_model, items))
    }

    async fn delete(&self, id: &OrderId) -> Result<(), DomainError> {
        let txn = self.begin_write().await?;

        // The foreign key cascades too; deleting children first keeps the
        // behaviour independent of how the schema was created.
        let removed_items = order_line_items::Entity::delete_many()
            .filter(order_line_items::Column::OrderId.eq(id.0))
            .exec(&txn)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        let result = orders::Entity::delete_by_id(id.0)
            .exec(&txn)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        if result.rows_affected == 0 {
            // Dropping the transaction rolls it back
            return Err(DomainError::NotFound(format!("Order {} not found", id)));
        }

        txn.commit()
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        tracing::debug!(
            "Deleted order {} and {} line items",
            id,
            removed_items.rows_affected
        );

        Ok(())
    }
}

/// Build the domain aggregate from an order row and its line item rows
fn assemble(order: orders::Model, mut items: Vec<order_line_items::Model>) -> Order {
    items.sort_by_key(|item| item.position);

    Order {
        id: OrderId(order.id),
        order_number: order.order_number,
        line_items: items.into_iter().map(|m| m.into()).collect(),
        created_at: order.created_at.with_timezone(&Utc),
    }
}

/// Convert SeaORM model to domain entity
impl From<order_line_items::Model> for OrderLineItem {
    fn from(model: order_line_items::Model) -> Self {
        OrderLineItem {
            id: OrderLineItemId(model.id),
            product_id: ProductId(model.product_id),
            position: model.position,
            quantity: model.quantity,
            unit_price: model.unit_price,
        }
    }
}
