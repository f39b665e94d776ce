//! In-memory claim store
//!
//! A test double for the `ClaimStore` port that implements the same
//! contract as the Postgres store: soft-delete filtering on every read,
//! audit stamping on every write, claim-number uniqueness across deleted
//! rows, and one audit entry per state change.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::Utc;

use domain_claims::{
    AuditAction, AuditContext, AuditEntry, Claim, ClaimCandidate, ClaimStore, StoreError,
};

#[derive(Debug, Default)]
struct Inner {
    claims: Vec<Claim>,
    audit_log: Vec<AuditEntry>,
    next_id: i64,
}

/// Thread-safe in-memory `ClaimStore`
#[derive(Debug, Clone, Default)]
pub struct InMemoryClaimStore {
    inner: Arc<Mutex<Inner>>,
}

impl InMemoryClaimStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// All recorded audit entries, oldest first
    pub fn audit_entries(&self) -> Vec<AuditEntry> {
        self.inner.lock().unwrap().audit_log.clone()
    }

    /// Every stored row, deleted ones included; for asserting that soft
    /// deletes keep rows physically present
    pub fn raw_rows(&self) -> Vec<Claim> {
        self.inner.lock().unwrap().claims.clone()
    }
}

fn from_candidate(id: i64, candidate: &ClaimCandidate) -> Result<Claim, StoreError> {
    let status = candidate.parsed_status()?;
    Ok(Claim {
        id,
        claim_number: candidate.claim_number.clone().unwrap_or_default(),
        claimant_name: candidate.claimant_name.clone(),
        claimant_email: candidate.claimant_email.clone(),
        claimant_phone: candidate.claimant_phone.clone(),
        claim_amount: candidate.claim_amount,
        incident_date: candidate.incident_date,
        filed_date: candidate.filed_date,
        status,
        description: candidate.description.clone(),
        notes: candidate.notes.clone(),
        created_at: Utc::now(),
        created_by: None,
        updated_at: None,
        updated_by: None,
        is_deleted: false,
        deleted_at: None,
        deleted_by: None,
    })
}

#[async_trait]
impl ClaimStore for InMemoryClaimStore {
    async fn insert(
        &self,
        candidate: &ClaimCandidate,
        ctx: &AuditContext,
    ) -> Result<Claim, StoreError> {
        let mut inner = self.inner.lock().unwrap();
        let number = candidate.claim_number.clone().unwrap_or_default();

        // Deleted rows still occupy the uniqueness space
        if inner.claims.iter().any(|c| c.claim_number == number) {
            return Err(StoreError::DuplicateClaimNumber(number));
        }

        inner.next_id += 1;
        let now = Utc::now();
        let mut claim = from_candidate(inner.next_id, candidate)?;
        claim.created_at = now;
        claim.created_by = Some(ctx.actor.clone());

        inner.audit_log.push(AuditEntry::for_claim(
            AuditAction::Created,
            claim.id,
            None,
            claim.snapshot(),
            ctx,
            now,
        ));
        inner.claims.push(claim.clone());
        Ok(claim)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Claim>, StoreError> {
        let inner = self.inner.lock().unwrap();
        Ok(inner
            .claims
            .iter()
            .find(|c| c.id == id && !c.is_deleted)
            .cloned())
    }

    async fn find_by_claim_number(&self, number: &str) -> Result<Option<Claim>, StoreError> {
        let inner = self.inner.lock().unwrap();
        Ok(inner
            .claims
            .iter()
            .find(|c| c.claim_number == number && !c.is_deleted)
            .cloned())
    }

    async fn list_all(&self) -> Result<Vec<Claim>, StoreError> {
        let inner = self.inner.lock().unwrap();
        let mut visible: Vec<Claim> = inner
            .claims
            .iter()
            .filter(|c| !c.is_deleted)
            .cloned()
            .collect();
        // Filed date descending, insertion order breaking ties
        visible.sort_by(|a, b| b.filed_date.cmp(&a.filed_date).then(a.id.cmp(&b.id)));
        Ok(visible)
    }

    async fn list_by_status(&self, status: &str) -> Result<Vec<Claim>, StoreError> {
        let all = self.list_all().await?;
        Ok(all
            .into_iter()
            .filter(|c| c.status.as_str() == status)
            .collect())
    }

    async fn update(
        &self,
        id: i64,
        candidate: &ClaimCandidate,
        ctx: &AuditContext,
    ) -> Result<Option<Claim>, StoreError> {
        let status = candidate.parsed_status()?;
        let mut guard = self.inner.lock().unwrap();
        let inner = &mut *guard;
        let now = Utc::now();

        let Some(existing) = inner.claims.iter_mut().find(|c| c.id == id && !c.is_deleted)
        else {
            return Ok(None);
        };

        let old_snapshot = existing.snapshot();
        existing.claimant_name = candidate.claimant_name.clone();
        existing.claimant_email = candidate.claimant_email.clone();
        existing.claimant_phone = candidate.claimant_phone.clone();
        existing.claim_amount = candidate.claim_amount;
        existing.incident_date = candidate.incident_date;
        existing.filed_date = candidate.filed_date;
        existing.status = status;
        existing.description = candidate.description.clone();
        existing.notes = candidate.notes.clone();
        existing.updated_at = Some(now);
        existing.updated_by = Some(ctx.actor.clone());

        let updated = existing.clone();
        inner.audit_log.push(AuditEntry::for_claim(
            AuditAction::Updated,
            id,
            old_snapshot,
            updated.snapshot(),
            ctx,
            now,
        ));
        Ok(Some(updated))
    }

    async fn soft_delete(&self, id: i64, ctx: &AuditContext) -> Result<bool, StoreError> {
        let mut guard = self.inner.lock().unwrap();
        let inner = &mut *guard;
        let now = Utc::now();

        let Some(existing) = inner.claims.iter_mut().find(|c| c.id == id && !c.is_deleted)
        else {
            return Ok(false);
        };

        let old_snapshot = existing.snapshot();
        existing.is_deleted = true;
        existing.deleted_at = Some(now);
        existing.deleted_by = Some(ctx.actor.clone());
        let new_snapshot = existing.snapshot();

        inner.audit_log.push(AuditEntry::for_claim(
            AuditAction::Deleted,
            id,
            old_snapshot,
            new_snapshot,
            ctx,
            now,
        ));
        Ok(true)
    }
}
