//! Product service
//!
//! Validates product requests and hands them to the product repository.

use std::sync::Arc;

use rust_decimal::Decimal;

use super::{page_bounds, validate_price};
use crate::domain::entities::{NewProduct, Product, ProductId};
use crate::domain::ports::ProductRepository;
use crate::error::{AppError, DomainError};

/// Maximum product name length, matching the `products.name` column
pub const MAX_NAME_LEN: usize = 255;

/// Maximum product description length
pub const MAX_DESCRIPTION_LEN: usize = 2000;

/// Service for managing products
pub struct ProductService<PR>
where
    PR: ProductRepository + ?Sized,
{
    products: Arc<PR>,
}

impl<PR> ProductService<PR>
where
    PR: ProductRepository + ?Sized,
{
    pub fn new(products: Arc<PR>) -> Self {
        Self { products }
    }

    /// Create a new product
    ///
    /// Every field arrives optional so that a missing field is reported as a
    /// validation error rather than a decoding failure.
    pub async fn create_product(
        &self,
        name: Option<&str>,
        description: Option<&str>,
        price: Option<Decimal>,
    ) -> Result<Product, AppError> {
        let name = name
            .map(str::trim)
            .ok_or_else(|| invalid("name is required"))?;
        if name.is_empty() {
            return Err(invalid("name must not be blank"));
        }
        if name.chars().count() > MAX_NAME_LEN {
            return Err(invalid(&format!(
                "name must be at most {} characters",
                MAX_NAME_LEN
            )));
        }

        if let Some(description) = description {
            if description.chars().count() > MAX_DESCRIPTION_LEN {
                return Err(invalid(&format!(
                    "description must be at most {} characters",
                    MAX_DESCRIPTION_LEN
                )));
            }
        }

        let price = price.ok_or_else(|| invalid("price is required"))?;
        let price = validate_price("price", price)?;

        let new_product = NewProduct {
            name: name.to_string(),
            description: description.map(str::to_string),
            price,
        };

        let product = self.products.create(&new_product).await?;
        tracing::info!("Created product {} ({})", product.id, product.name);

        Ok(product)
    }

    /// Get a product by ID
    pub async fn get_product(&self, id: &ProductId) -> Result<Product, AppError> {
        self.products
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::NotFound(format!("Product {} not found", id)).into())
    }

    /// List products, newest first
    pub async fn list_products(&self, limit: i64, offset: i64) -> Result<Vec<Product>, AppError> {
        let (limit, offset) = page_bounds(limit, offset);
        Ok(self.products.find_all(limit, offset).await?)
    }
}

fn invalid(msg: &str) -> AppError {
    AppError::Domain(DomainError::Validation(msg.to_string()))
}
