//! Claims intake domain
//!
//! This crate owns the claim lifecycle: the `Claim` entity and its candidate
//! form, the declarative input validator, the `ClaimStore` port with its
//! audit write contract, and the `ClaimService` that orchestrates
//! create/read/update/soft-delete against any store implementation.

pub mod audit;
pub mod claim;
pub mod error;
pub mod service;
pub mod store;
pub mod validation;

pub use audit::{AuditAction, AuditContext, AuditEntry};
pub use claim::{generate_claim_number, Claim, ClaimCandidate, ClaimStatus};
pub use error::{ParseStatusError, StoreError};
pub use service::ClaimService;
pub use store::ClaimStore;
pub use validation::{ClaimValidator, FieldViolation, ValidationResult};
