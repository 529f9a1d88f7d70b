//! Application layer
//!
//! Contains use cases and service orchestration.
//! Services validate input, build domain aggregates and delegate to ports.

pub mod order_service;
pub mod product_service;

pub use order_service::{LineItemInput, OrderService};
pub use product_service::ProductService;

use rust_decimal::Decimal;

use crate::error::{AppError, DomainError};

/// Largest page a list endpoint returns
pub const MAX_PAGE_SIZE: i64 = 100;

/// Money columns are NUMERIC(19, 2): 17 integer digits, 2 fractional
const MAX_PRICE_DIGITS: u32 = 17;

/// Clamp list pagination to sane bounds
pub(crate) fn page_bounds(limit: i64, offset: i64) -> (i64, i64) {
    (limit.clamp(1, MAX_PAGE_SIZE), offset.max(0))
}

/// Check that a monetary amount fits the schema and return it normalized
pub(crate) fn validate_price(field: &str, price: Decimal) -> Result<Decimal, AppError> {
    let price = price.normalize();

    if price.is_sign_negative() && !price.is_zero() {
        return Err(DomainError::Validation(format!("{} must not be negative", field)).into());
    }
    if price.scale() > 2 {
        return Err(DomainError::Validation(format!(
            "{} must have at most 2 decimal places",
            field
        ))
        .into());
    }
    if price >= Decimal::from(10_i64.pow(MAX_PRICE_DIGITS)) {
        return Err(DomainError::Validation(format!("{} is too large", field)).into());
    }

    Ok(price)
}
