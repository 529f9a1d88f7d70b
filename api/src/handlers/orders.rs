//! Order handlers
//!
//! Endpoints for creating, reading, updating and deleting orders.
//! Line items are only ever addressed through their order.

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    Json,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::PageQuery;
use crate::app::LineItemInput;
use crate::domain::entities::{Order, OrderId, OrderLineItem, ProductId};
use crate::error::AppError;
use crate::AppState;

/// One line of an order request
#[derive(Debug, Deserialize)]
pub struct LineItemRequest {
    pub product_id: Option<Uuid>,
    pub quantity: Option<i32>,
    /// Defaults to the product's current price
    pub unit_price: Option<Decimal>,
}

impl From<&LineItemRequest> for LineItemInput {
    fn from(request: &LineItemRequest) -> Self {
        LineItemInput {
            product_id: request.product_id.map(ProductId),
            quantity: request.quantity,
            unit_price: request.unit_price,
        }
    }
}

/// Request body for order creation
#[derive(Debug, Deserialize)]
pub struct OrderRequest {
    /// Generated when absent
    pub order_number: Option<String>,
    #[serde(default)]
    pub line_items: Vec<LineItemRequest>,
}

/// Request body for replacing an order's line items
#[derive(Debug, Deserialize)]
pub struct ReplaceLineItemsRequest {
    #[serde(default)]
    pub line_items: Vec<LineItemRequest>,
}

#[derive(Debug, Serialize)]
pub struct LineItemResponse {
    pub id: String,
    pub product_id: String,
    pub position: i32,
    pub quantity: i32,
    pub unit_price: Decimal,
    pub subtotal: Decimal,
}

impl From<OrderLineItem> for LineItemResponse {
    fn from(item: OrderLineItem) -> Self {
        LineItemResponse {
            id: item.id.to_string(),
            product_id: item.product_id.to_string(),
            position: item.position,
            quantity: item.quantity,
            unit_price: item.unit_price,
            subtotal: item.subtotal(),
        }
    }
}

/// Order as returned by the API
#[derive(Debug, Serialize)]
pub struct OrderResponse {
    pub id: String,
    pub order_number: String,
    pub line_items: Vec<LineItemResponse>,
    pub item_count: i64,
    pub total: Decimal,
    pub created_at: String,
}

impl From<Order> for OrderResponse {
    fn from(order: Order) -> Self {
        let total = order.total();
        let item_count = order.item_count();
        OrderResponse {
            id: order.id.to_string(),
            order_number: order.order_number,
            line_items: order.line_items.into_iter().map(Into::into).collect(),
            item_count,
            total,
            created_at: order.created_at.to_rfc3339(),
        }
    }
}

fn line_item_inputs(requests: &[LineItemRequest]) -> Vec<LineItemInput> {
    requests.iter().map(Into::into).collect()
}

/// POST /api/orders
///
/// Create an order with its line items. Returns 201 with the stored order.
pub async fn create_order(
    State(state): State<AppState>,
    payload: Result<Json<OrderRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<OrderResponse>), AppError> {
    let Json(request) = payload?;
    let order = state
        .order_service
        .create_order(
            request.order_number.as_deref(),
            &line_item_inputs(&request.line_items),
        )
        .await?;

    Ok((StatusCode::CREATED, Json(order.into())))
}

/// GET /api/orders
///
/// List orders, newest first.
pub async fn list_orders(
    State(state): State<AppState>,
    query: Result<Query<PageQuery>, QueryRejection>,
) -> Result<Json<Vec<OrderResponse>>, AppError> {
    let Query(query) = query?;
    let orders = state
        .order_service
        .list_orders(query.limit, query.offset)
        .await?;

    Ok(Json(orders.into_iter().map(Into::into).collect()))
}

/// GET /api/orders/:id
pub async fn get_order(
    State(state): State<AppState>,
    path: Result<Path<Uuid>, PathRejection>,
) -> Result<Json<OrderResponse>, AppError> {
    let Path(id) = path?;
    let order = state.order_service.get_order(&OrderId(id)).await?;
    Ok(Json(order.into()))
}

/// PUT /api/orders/:id/line-items
///
/// Replace all line items of an order.
pub async fn replace_line_items(
    State(state): State<AppState>,
    path: Result<Path<Uuid>, PathRejection>,
    payload: Result<Json<ReplaceLineItemsRequest>, JsonRejection>,
) -> Result<Json<OrderResponse>, AppError> {
    let Path(id) = path?;
    let Json(request) = payload?;
    let order = state
        .order_service
        .replace_line_items(&OrderId(id), &line_item_inputs(&request.line_items))
        .await?;

    Ok(Json(order.into()))
}

/// DELETE /api/orders/:id
///
/// Delete an order and its line items.
pub async fn delete_order(
    State(state): State<AppState>,
    path: Result<Path<Uuid>, PathRejection>,
) -> Result<StatusCode, AppError> {
    let Path(id) = path?;
    state.order_service.delete_order(&OrderId(id)).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{test_order, test_product_priced};

    #[test]
    fn parse_order_request() {
        let product_id = Uuid::new_v4();
        let json = format!(
            r#"{{"order_number":"ORD-1","line_items":[{{"product_id":"{}","quantity":2}},{{"product_id":"{}","quantity":3,"unit_price":0.99}}]}}"#,
            product_id, product_id
        );
        let request: OrderRequest = serde_json::from_str(&json).unwrap();

        assert_eq!(request.order_number.as_deref(), Some("ORD-1"));
        assert_eq!(request.line_items.len(), 2);
        assert_eq!(request.line_items[0].quantity, Some(2));
        assert!(request.line_items[0].unit_price.is_none());
        assert_eq!(request.line_items[1].unit_price, Some(Decimal::new(99, 2)));

        let inputs = line_item_inputs(&request.line_items);
        assert_eq!(inputs[0].product_id, Some(ProductId(product_id)));
    }

    #[test]
    fn parse_order_request_without_line_items() {
        let request: OrderRequest = serde_json::from_str("{}").unwrap();
        assert!(request.order_number.is_none());
        assert!(request.line_items.is_empty());
    }

    #[test]
    fn parse_order_request_rejects_fractional_quantity() {
        let json = r#"{"line_items":[{"product_id":null,"quantity":1.5}]}"#;
        let result: Result<OrderRequest, _> = serde_json::from_str(json);
        assert!(result.is_err());
    }

    #[test]
    fn order_response_includes_totals() {
        let pen = test_product_priced("Pen", 150);
        let ink = test_product_priced("Ink", 1000);
        let order = test_order("ORD-1", &[(&pen, 2), (&ink, 3)]);

        let response = OrderResponse::from(order);
        assert_eq!(response.order_number, "ORD-1");
        assert_eq!(response.item_count, 5);
        assert_eq!(response.total, Decimal::new(3300, 2));
        assert_eq!(response.line_items[0].subtotal, Decimal::new(300, 2));
        assert_eq!(response.line_items[1].position, 1);

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["total"].as_f64(), Some(33.0));
        assert_eq!(json["line_items"][1]["quantity"], 3);
    }
}
