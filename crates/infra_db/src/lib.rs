//! Database infrastructure layer
//!
//! PostgreSQL persistence for the claims intake system using SQLx. The
//! `PgClaimStore` implements the `ClaimStore` port from `domain_claims`:
//! every read carries the soft-delete predicate, every write stamps its
//! audit fields and appends an `audit_logs` row in the same transaction.
//!
//! The schema lives in the repository's `migrations/` directory and is
//! applied out of band (CI or deploy tooling); the server only verifies
//! connectivity at startup.

pub mod error;
pub mod pool;
pub mod repositories;

pub use error::DatabaseError;
pub use pool::{create_pool, create_pool_from_url, DatabaseConfig, DatabasePool};
pub use repositories::claims::PgClaimStore;
