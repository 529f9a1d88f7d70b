//! Product handlers
//!
//! Endpoints for creating and reading catalog products.

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
use crate::domain::entities::{Product, ProductId};
use crate::error::AppError;
use crate::AppState;

/// Request body for product creation
///
/// Fields are optional at the decoding level; the service reports missing
/// ones as validation errors.
#[derive(Debug, Deserialize)]
pub struct ProductRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<Decimal>,
}

/// Product as returned by the API
#[derive(Debug, Serialize)]
pub struct ProductResponse {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub created_at: String,
}

impl From<Product> for ProductResponse {
    fn from(product: Product) -> Self {
        ProductResponse {
            id: product.id.to_string(),
            name: product.name,
            description: product.description,
            price: product.price,
            created_at: product.created_at.to_rfc3339(),
        }
    }
}

/// POST /api/products
///
/// Create a product. Returns 201 with the stored product and its generated id.
pub async fn create_product(
    State(state): State<AppState>,
    payload: Result<Json<ProductRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<ProductResponse>), AppError> {
    let Json(request) = payload?;
    let product = state
        .product_service
        .create_product(
            request.name.as_deref(),
            request.description.as_deref(),
            request.price,
        )
        .await?;

    Ok((StatusCode::CREATED, Json(product.into())))
}

/// GET /api/products
///
/// List products, newest first.
pub async fn list_products(
    State(state): State<AppState>,
    query: Result<Query<PageQuery>, QueryRejection>,
) -> Result<Json<Vec<ProductResponse>>, AppError> {
    let Query(query) = query?;
    let products = state
        .product_service
        .list_products(query.limit, query.offset)
        .await?;

    Ok(Json(products.into_iter().map(Into::into).collect()))
}

/// GET /api/products/:id
pub async fn get_product(
    State(state): State<AppState>,
    path: Result<Path<Uuid>, PathRejection>,
) -> Result<Json<ProductResponse>, AppError> {
    let Path(id) = path?;
    let product = state.product_service.get_product(&ProductId(id)).await?;
    Ok(Json(product.into()))
}
