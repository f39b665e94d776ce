//! Postgres claim store
//!
//! Implements the `ClaimStore` port. Two rules hold everywhere in this
//! module:
//!
//! - every SELECT carries `is_deleted = FALSE`; there is no read path that
//!   can see a soft-deleted row
//! - every write runs in a transaction that also appends its audit row, so
//!   the claim mutation and the audit trail commit together

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::{FromRow, PgPool};
use tracing::debug;

use domain_claims::{
    AuditAction, AuditContext, AuditEntry, Claim, ClaimCandidate, ClaimStore, StoreError,
};

use crate::error::DatabaseError;
use crate::repositories::audit::record_audit;

const SELECT_CLAIM: &str = r#"
    SELECT id, claim_number, claimant_name, claimant_email, claimant_phone,
           claim_amount, incident_date, filed_date, status, description, notes,
           created_at, created_by, updated_at, updated_by,
           is_deleted, deleted_at, deleted_by
    FROM claims
"#;

/// `ClaimStore` backed by PostgreSQL
#[derive(Debug, Clone)]
pub struct PgClaimStore {
    pool: PgPool,
}

impl PgClaimStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Raw claims row; `status` stays a string until decoded into the domain
/// entity
#[derive(Debug, Clone, FromRow)]
struct ClaimRow {
    id: i64,
    claim_number: String,
    claimant_name: String,
    claimant_email: String,
    claimant_phone: String,
    claim_amount: Decimal,
    incident_date: DateTime<Utc>,
    filed_date: DateTime<Utc>,
    status: String,
    description: String,
    notes: Option<String>,
    created_at: DateTime<Utc>,
    created_by: Option<String>,
    updated_at: Option<DateTime<Utc>>,
    updated_by: Option<String>,
    is_deleted: bool,
    deleted_at: Option<DateTime<Utc>>,
    deleted_by: Option<String>,
}

impl TryFrom<ClaimRow> for Claim {
    type Error = DatabaseError;

    fn try_from(row: ClaimRow) -> Result<Self, Self::Error> {
        let status = row
            .status
            .parse()
            .map_err(|_| DatabaseError::Serialization(format!("bad status '{}'", row.status)))?;
        Ok(Claim {
            id: row.id,
            claim_number: row.claim_number,
            claimant_name: row.claimant_name,
            claimant_email: row.claimant_email,
            claimant_phone: row.claimant_phone,
            claim_amount: row.claim_amount,
            incident_date: row.incident_date,
            filed_date: row.filed_date,
            status,
            description: row.description,
            notes: row.notes,
            created_at: row.created_at,
            created_by: row.created_by,
            updated_at: row.updated_at,
            updated_by: row.updated_by,
            is_deleted: row.is_deleted,
            deleted_at: row.deleted_at,
            deleted_by: row.deleted_by,
        })
    }
}

fn rows_to_claims(rows: Vec<ClaimRow>) -> Result<Vec<Claim>, StoreError> {
    rows.into_iter()
        .map(|row| Claim::try_from(row).map_err(StoreError::from))
        .collect()
}

#[async_trait::async_trait]
impl ClaimStore for PgClaimStore {
    async fn insert(
        &self,
        candidate: &ClaimCandidate,
        ctx: &AuditContext,
    ) -> Result<Claim, StoreError> {
        let status = candidate.parsed_status()?;
        let now = Utc::now();
        let mut tx = self.pool.begin().await.map_err(DatabaseError::from)?;

        let row: ClaimRow = sqlx::query_as(
            r#"
            INSERT INTO claims (
                claim_number, claimant_name, claimant_email, claimant_phone,
                claim_amount, incident_date, filed_date, status, description,
                notes, created_at, created_by, is_deleted
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, FALSE)
            RETURNING id, claim_number, claimant_name, claimant_email, claimant_phone,
                      claim_amount, incident_date, filed_date, status, description, notes,
                      created_at, created_by, updated_at, updated_by,
                      is_deleted, deleted_at, deleted_by
            "#,
        )
        .bind(candidate.claim_number.as_deref().unwrap_or_default())
        .bind(&candidate.claimant_name)
        .bind(&candidate.claimant_email)
        .bind(&candidate.claimant_phone)
        .bind(candidate.claim_amount)
        .bind(candidate.incident_date)
        .bind(candidate.filed_date)
        .bind(status.as_str())
        .bind(&candidate.description)
        .bind(&candidate.notes)
        .bind(now)
        .bind(&ctx.actor)
        .fetch_one(&mut *tx)
        .await
        .map_err(DatabaseError::from)?;

        let claim = Claim::try_from(row).map_err(StoreError::from)?;
        let entry =
            AuditEntry::for_claim(AuditAction::Created, claim.id, None, claim.snapshot(), ctx, now);
        record_audit(&mut tx, &entry).await?;

        tx.commit().await.map_err(DatabaseError::from)?;
        debug!(claim_id = claim.id, "inserted claim");
        Ok(claim)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Claim>, StoreError> {
        let row: Option<ClaimRow> =
            sqlx::query_as(&format!("{SELECT_CLAIM} WHERE id = $1 AND is_deleted = FALSE"))
                .bind(id)
                .fetch_optional(&self.pool)
                .await
                .map_err(DatabaseError::from)?;

        row.map(Claim::try_from)
            .transpose()
            .map_err(StoreError::from)
    }

    async fn find_by_claim_number(&self, number: &str) -> Result<Option<Claim>, StoreError> {
        let row: Option<ClaimRow> = sqlx::query_as(&format!(
            "{SELECT_CLAIM} WHERE claim_number = $1 AND is_deleted = FALSE"
        ))
        .bind(number)
        .fetch_optional(&self.pool)
        .await
        .map_err(DatabaseError::from)?;

        row.map(Claim::try_from)
            .transpose()
            .map_err(StoreError::from)
    }

    async fn list_all(&self) -> Result<Vec<Claim>, StoreError> {
        let rows: Vec<ClaimRow> = sqlx::query_as(&format!(
            "{SELECT_CLAIM} WHERE is_deleted = FALSE ORDER BY filed_date DESC, id ASC"
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(DatabaseError::from)?;

        rows_to_claims(rows)
    }

    async fn list_by_status(&self, status: &str) -> Result<Vec<Claim>, StoreError> {
        let rows: Vec<ClaimRow> = sqlx::query_as(&format!(
            "{SELECT_CLAIM} WHERE is_deleted = FALSE AND status = $1 \
             ORDER BY filed_date DESC, id ASC"
        ))
        .bind(status)
        .fetch_all(&self.pool)
        .await
        .map_err(DatabaseError::from)?;

        rows_to_claims(rows)
    }

    async fn update(
        &self,
        id: i64,
        candidate: &ClaimCandidate,
        ctx: &AuditContext,
    ) -> Result<Option<Claim>, StoreError> {
        let status = candidate.parsed_status()?;
        let now = Utc::now();
        let mut tx = self.pool.begin().await.map_err(DatabaseError::from)?;

        let old: Option<ClaimRow> = sqlx::query_as(&format!(
            "{SELECT_CLAIM} WHERE id = $1 AND is_deleted = FALSE FOR UPDATE"
        ))
        .bind(id)
        .fetch_optional(&mut *tx)
        .await
        .map_err(DatabaseError::from)?;

        let Some(old) = old else {
            return Ok(None);
        };
        let old = Claim::try_from(old).map_err(StoreError::from)?;

        let row: ClaimRow = sqlx::query_as(
            r#"
            UPDATE claims
            SET claimant_name = $2, claimant_email = $3, claimant_phone = $4,
                claim_amount = $5, incident_date = $6, filed_date = $7,
                status = $8, description = $9, notes = $10,
                updated_at = $11, updated_by = $12
            WHERE id = $1
            RETURNING id, claim_number, claimant_name, claimant_email, claimant_phone,
                      claim_amount, incident_date, filed_date, status, description, notes,
                      created_at, created_by, updated_at, updated_by,
                      is_deleted, deleted_at, deleted_by
            "#,
        )
        .bind(id)
        .bind(&candidate.claimant_name)
        .bind(&candidate.claimant_email)
        .bind(&candidate.claimant_phone)
        .bind(candidate.claim_amount)
        .bind(candidate.incident_date)
        .bind(candidate.filed_date)
        .bind(status.as_str())
        .bind(&candidate.description)
        .bind(&candidate.notes)
        .bind(now)
        .bind(&ctx.actor)
        .fetch_one(&mut *tx)
        .await
        .map_err(DatabaseError::from)?;

        let updated = Claim::try_from(row).map_err(StoreError::from)?;
        let entry = AuditEntry::for_claim(
            AuditAction::Updated,
            id,
            old.snapshot(),
            updated.snapshot(),
            ctx,
            now,
        );
        record_audit(&mut tx, &entry).await?;

        tx.commit().await.map_err(DatabaseError::from)?;
        debug!(claim_id = id, "updated claim");
        Ok(Some(updated))
    }

    async fn soft_delete(&self, id: i64, ctx: &AuditContext) -> Result<bool, StoreError> {
        let now = Utc::now();
        let mut tx = self.pool.begin().await.map_err(DatabaseError::from)?;

        let old: Option<ClaimRow> = sqlx::query_as(&format!(
            "{SELECT_CLAIM} WHERE id = $1 AND is_deleted = FALSE FOR UPDATE"
        ))
        .bind(id)
        .fetch_optional(&mut *tx)
        .await
        .map_err(DatabaseError::from)?;

        let Some(old) = old else {
            return Ok(false);
        };
        let old = Claim::try_from(old).map_err(StoreError::from)?;

        let row: ClaimRow = sqlx::query_as(
            r#"
            UPDATE claims
            SET is_deleted = TRUE, deleted_at = $2, deleted_by = $3
            WHERE id = $1
            RETURNING id, claim_number, claimant_name, claimant_email, claimant_phone,
                      claim_amount, incident_date, filed_date, status, description, notes,
                      created_at, created_by, updated_at, updated_by,
                      is_deleted, deleted_at, deleted_by
            "#,
        )
        .bind(id)
        .bind(now)
        .bind(&ctx.actor)
        .fetch_one(&mut *tx)
        .await
        .map_err(DatabaseError::from)?;

        let deleted = Claim::try_from(row).map_err(StoreError::from)?;
        let entry = AuditEntry::for_claim(
            AuditAction::Deleted,
            id,
            old.snapshot(),
            deleted.snapshot(),
            ctx,
            now,
        );
        record_audit(&mut tx, &entry).await?;

        tx.commit().await.map_err(DatabaseError::from)?;
        debug!(claim_id = id, "soft-deleted claim");
        Ok(true)
    }
}
