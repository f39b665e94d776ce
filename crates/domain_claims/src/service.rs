//! Claim lifecycle service
//!
//! Business policy around the store: claim-number generation on create,
//! load-before-update, and thin read pass-throughs. Input validation happens
//! before requests reach this service.

use tracing::{info, warn};

use crate::audit::AuditContext;
use crate::claim::{generate_claim_number, Claim, ClaimCandidate};
use crate::error::StoreError;
use crate::store::ClaimStore;

/// Orchestrates claim operations against a `ClaimStore`
#[derive(Debug, Clone)]
pub struct ClaimService<S> {
    store: S,
}

impl<S: ClaimStore> ClaimService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Creates a claim, generating a claim number when the caller left it
    /// blank.
    ///
    /// Generation is collision-tolerant rather than collision-free: the
    /// store's uniqueness constraint is the authoritative guard, and a
    /// collision surfaces as `StoreError::DuplicateClaimNumber` for the
    /// caller to retry.
    pub async fn create_claim(
        &self,
        mut candidate: ClaimCandidate,
        ctx: &AuditContext,
    ) -> Result<Claim, StoreError> {
        if candidate.has_blank_claim_number() {
            candidate.claim_number = Some(generate_claim_number());
        }

        let claim = self.store.insert(&candidate, ctx).await?;
        info!(
            claim_id = claim.id,
            claim_number = %claim.claim_number,
            "created claim"
        );
        Ok(claim)
    }

    /// Replaces the mutable fields of an existing claim.
    ///
    /// Returns `None` when the id has no visible match. The claim number and
    /// creation stamps always come from the existing row, never from
    /// `candidate`.
    pub async fn update_claim(
        &self,
        id: i64,
        candidate: ClaimCandidate,
        ctx: &AuditContext,
    ) -> Result<Option<Claim>, StoreError> {
        if self.store.find_by_id(id).await?.is_none() {
            warn!(claim_id = id, "update target not found");
            return Ok(None);
        }

        let updated = self.store.update(id, &candidate, ctx).await?;
        if updated.is_some() {
            info!(claim_id = id, "updated claim");
        }
        Ok(updated)
    }

    /// Soft-deletes a claim. Returns `false` when the id is absent or the
    /// claim is already deleted.
    pub async fn delete_claim(&self, id: i64, ctx: &AuditContext) -> Result<bool, StoreError> {
        let deleted = self.store.soft_delete(id, ctx).await?;
        if deleted {
            info!(claim_id = id, "soft-deleted claim");
        } else {
            warn!(claim_id = id, "delete target not found");
        }
        Ok(deleted)
    }

    pub async fn get_claim(&self, id: i64) -> Result<Option<Claim>, StoreError> {
        self.store.find_by_id(id).await
    }

    pub async fn get_claim_by_number(&self, number: &str) -> Result<Option<Claim>, StoreError> {
        self.store.find_by_claim_number(number).await
    }

    pub async fn get_all_claims(&self) -> Result<Vec<Claim>, StoreError> {
        self.store.list_all().await
    }

    pub async fn get_claims_by_status(&self, status: &str) -> Result<Vec<Claim>, StoreError> {
        self.store.list_by_status(status).await
    }
}
