//! Test utilities
//!
//! Manual mock implementations and test fixtures for unit testing.
//!
//! The in-memory repositories honour the same contracts as the PostgreSQL
//! adapters (unique order numbers, line items owned by their order), so the
//! services and the full HTTP router can be exercised without a database.

pub mod fixtures;
pub mod mocks;

pub use fixtures::*;
pub use mocks::*;
