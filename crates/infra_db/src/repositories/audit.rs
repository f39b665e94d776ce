//! Audit log persistence
//!
//! The single write-interception hook: every state-changing claim operation
//! calls `record_audit` inside its own transaction, so the audit row and the
//! primary write commit or roll back together. Rows are append-only.

use sqlx::{Postgres, Transaction};

use domain_claims::AuditEntry;

use crate::error::DatabaseError;

/// Appends one audit row within the caller's transaction
pub(crate) async fn record_audit(
    tx: &mut Transaction<'_, Postgres>,
    entry: &AuditEntry,
) -> Result<(), DatabaseError> {
    sqlx::query(
        r#"
        INSERT INTO audit_logs (
            entity_type, entity_id, action, old_values, new_values,
            changed_by, changed_at, ip_address, user_agent
        ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
        "#,
    )
    .bind(&entry.entity_type)
    .bind(entry.entity_id)
    .bind(entry.action.as_str())
    .bind(&entry.old_values)
    .bind(&entry.new_values)
    .bind(&entry.changed_by)
    .bind(entry.changed_at)
    .bind(&entry.ip_address)
    .bind(&entry.user_agent)
    .execute(&mut **tx)
    .await?;

    Ok(())
}
