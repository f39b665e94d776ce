//! Shared test utilities for the claims intake test suite
//!
//! Provides a fluent `ClaimBuilder` for candidate construction and an
//! `InMemoryClaimStore` that honors the full `ClaimStore` contract
//! (soft-delete filtering, audit stamping, claim-number uniqueness), so
//! service and handler logic can be exercised without a database.

pub mod builders;
pub mod store;

pub use builders::ClaimBuilder;
pub use store::InMemoryClaimStore;
