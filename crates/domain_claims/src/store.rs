//! Claim store port
//!
//! Implementations own durable persistence, the soft-delete read filter, and
//! audit stamping. The contract here is what the rest of the system relies
//! on; the Postgres implementation lives in `infra_db`.

use async_trait::async_trait;

use crate::audit::AuditContext;
use crate::claim::{Claim, ClaimCandidate};
use crate::error::StoreError;

/// Durable persistence of claims with transparent audit stamping and
/// soft-delete filtering.
///
/// Invariants every implementation must hold:
///
/// - Reads exclude soft-deleted rows unconditionally; a deleted id behaves
///   exactly like a never-existing one.
/// - Listing orders by filed date descending, ties broken by insertion
///   order.
/// - Every write stamps audit fields from the operation kind, the wall
///   clock, and `ctx` - never from the candidate - and appends one audit
///   entry atomically with the primary write.
/// - Claim numbers are unique across all rows ever created; soft-deleted
///   rows still occupy the uniqueness space.
#[async_trait]
pub trait ClaimStore: Send + Sync {
    /// Persists a new claim, stamping `created_at`/`created_by`.
    ///
    /// Fails with `StoreError::DuplicateClaimNumber` when the candidate's
    /// claim number collides with any existing row.
    async fn insert(
        &self,
        candidate: &ClaimCandidate,
        ctx: &AuditContext,
    ) -> Result<Claim, StoreError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<Claim>, StoreError>;

    async fn find_by_claim_number(&self, number: &str) -> Result<Option<Claim>, StoreError>;

    async fn list_all(&self) -> Result<Vec<Claim>, StoreError>;

    /// Exact, case-sensitive equality on the stored status string; unknown
    /// strings match nothing.
    async fn list_by_status(&self, status: &str) -> Result<Vec<Claim>, StoreError>;

    /// Replaces all mutable fields on the existing row, stamping
    /// `updated_at`/`updated_by`. The candidate never contributes the claim
    /// number or creation stamps. Returns `None` when the id is absent or
    /// already soft-deleted.
    async fn update(
        &self,
        id: i64,
        candidate: &ClaimCandidate,
        ctx: &AuditContext,
    ) -> Result<Option<Claim>, StoreError>;

    /// Flips `is_deleted` and stamps `deleted_at`/`deleted_by`, leaving the
    /// row physically present. Returns `false` when the id is absent or
    /// already deleted; the operation is idempotent.
    async fn soft_delete(&self, id: i64, ctx: &AuditContext) -> Result<bool, StoreError>;
}
