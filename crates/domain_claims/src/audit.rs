//! Audit write contract
//!
//! Every state-changing store operation appends one `AuditEntry` in the same
//! transaction as the primary write. Entries are append-only: never updated,
//! never deleted, queried only by reporting tools.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Entity type name recorded on claim audit rows
pub const CLAIM_ENTITY: &str = "Claim";

/// The operation kind behind an audit row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AuditAction {
    Created,
    Updated,
    Deleted,
}

impl AuditAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            AuditAction::Created => "Created",
            AuditAction::Updated => "Updated",
            AuditAction::Deleted => "Deleted",
        }
    }
}

impl std::fmt::Display for AuditAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identity of the acting principal plus request metadata
///
/// Threaded explicitly through every store write; audit stamps come from
/// here and from the wall clock at persist time, never from the caller's
/// payload or any ambient lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditContext {
    /// Authenticated principal (JWT subject), or "system" for jobs
    pub actor: String,
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
}

impl AuditContext {
    pub fn new(actor: impl Into<String>) -> Self {
        Self {
            actor: actor.into(),
            ip_address: None,
            user_agent: None,
        }
    }

    /// Context for non-interactive writes (seeding, maintenance jobs)
    pub fn system() -> Self {
        Self::new("system")
    }

    pub fn with_request_meta(
        mut self,
        ip_address: Option<String>,
        user_agent: Option<String>,
    ) -> Self {
        self.ip_address = ip_address;
        self.user_agent = user_agent;
        self
    }
}

/// One append-only audit row
///
/// Snapshots are JSON-serialized strings of the entity before and after the
/// write; inserts carry no `old_values` and deletes keep both sides so the
/// flag flip is visible.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditEntry {
    pub entity_type: String,
    pub entity_id: i64,
    pub action: AuditAction,
    pub old_values: Option<String>,
    pub new_values: Option<String>,
    pub changed_by: String,
    pub changed_at: DateTime<Utc>,
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
}

impl AuditEntry {
    pub fn for_claim(
        action: AuditAction,
        entity_id: i64,
        old_values: Option<String>,
        new_values: Option<String>,
        ctx: &AuditContext,
        changed_at: DateTime<Utc>,
    ) -> Self {
        Self {
            entity_type: CLAIM_ENTITY.to_string(),
            entity_id,
            action,
            old_values,
            new_values,
            changed_by: ctx.actor.clone(),
            changed_at,
            ip_address: ctx.ip_address.clone(),
            user_agent: ctx.user_agent.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_display() {
        assert_eq!(AuditAction::Created.to_string(), "Created");
        assert_eq!(AuditAction::Updated.to_string(), "Updated");
        assert_eq!(AuditAction::Deleted.to_string(), "Deleted");
    }

    #[test]
    fn test_entry_carries_context() {
        let ctx = AuditContext::new("adjuster-7")
            .with_request_meta(Some("10.0.0.8".into()), Some("curl/8.5".into()));

        let entry = AuditEntry::for_claim(
            AuditAction::Updated,
            42,
            Some("{}".into()),
            Some("{}".into()),
            &ctx,
            Utc::now(),
        );

        assert_eq!(entry.entity_type, CLAIM_ENTITY);
        assert_eq!(entry.entity_id, 42);
        assert_eq!(entry.changed_by, "adjuster-7");
        assert_eq!(entry.ip_address.as_deref(), Some("10.0.0.8"));
        assert_eq!(entry.user_agent.as_deref(), Some("curl/8.5"));
    }
}
