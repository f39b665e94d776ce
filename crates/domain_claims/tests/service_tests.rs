//! Lifecycle tests for `ClaimService` against the in-memory store

use chrono::{Days, Utc};
use rust_decimal_macros::dec;

use domain_claims::{AuditAction, AuditContext, ClaimService, ClaimStatus, StoreError};
use test_utils::{ClaimBuilder, InMemoryClaimStore};

fn service() -> (ClaimService<InMemoryClaimStore>, InMemoryClaimStore) {
    let store = InMemoryClaimStore::new();
    (ClaimService::new(store.clone()), store)
}

fn ctx() -> AuditContext {
    AuditContext::new("adjuster-1")
}

mod create {
    use super::*;

    #[tokio::test]
    async fn assigns_id_and_creation_stamps() {
        let (service, _) = service();

        let claim = service
            .create_claim(ClaimBuilder::new().build(), &ctx())
            .await
            .unwrap();

        assert!(claim.id > 0);
        assert!(!claim.claim_number.is_empty());
        assert_eq!(claim.created_by.as_deref(), Some("adjuster-1"));
        assert!(claim.updated_at.is_none());
        assert!(claim.updated_by.is_none());
        assert!(!claim.is_deleted);
    }

    #[tokio::test]
    async fn generates_number_when_blank() {
        let (service, _) = service();

        let claim = service
            .create_claim(ClaimBuilder::new().build(), &ctx())
            .await
            .unwrap();

        // CLM-YYYYMMDD-NNNN
        let parts: Vec<&str> = claim.claim_number.split('-').collect();
        assert_eq!(parts[0], "CLM");
        assert_eq!(parts[1].len(), 8);
        assert_eq!(parts[2].len(), 4);
        assert!(parts[1..].iter().all(|p| p.chars().all(|c| c.is_ascii_digit())));
    }

    #[tokio::test]
    async fn generates_number_when_whitespace_only() {
        let (service, _) = service();

        let claim = service
            .create_claim(ClaimBuilder::new().claim_number("   ").build(), &ctx())
            .await
            .unwrap();

        assert!(claim.claim_number.starts_with("CLM-"));
    }

    #[tokio::test]
    async fn keeps_caller_supplied_number() {
        let (service, _) = service();

        let claim = service
            .create_claim(
                ClaimBuilder::new().claim_number("CLM-20240101-1234").build(),
                &ctx(),
            )
            .await
            .unwrap();

        assert_eq!(claim.claim_number, "CLM-20240101-1234");
    }

    #[tokio::test]
    async fn rejects_duplicate_number() {
        let (service, _) = service();
        let candidate = ClaimBuilder::new().claim_number("CLM-20240101-1234").build();

        service.create_claim(candidate.clone(), &ctx()).await.unwrap();
        let err = service.create_claim(candidate, &ctx()).await.unwrap_err();

        assert!(matches!(err, StoreError::DuplicateClaimNumber(_)));
    }

    #[tokio::test]
    async fn deleted_rows_still_occupy_number_space() {
        let (service, _) = service();
        let candidate = ClaimBuilder::new().claim_number("CLM-20240101-9999").build();

        let claim = service.create_claim(candidate.clone(), &ctx()).await.unwrap();
        assert!(service.delete_claim(claim.id, &ctx()).await.unwrap());

        let err = service.create_claim(candidate, &ctx()).await.unwrap_err();
        assert!(err.is_duplicate());
    }

    #[tokio::test]
    async fn writes_created_audit_entry() {
        let (service, store) = service();

        let claim = service
            .create_claim(ClaimBuilder::new().build(), &ctx())
            .await
            .unwrap();

        let entries = store.audit_entries();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].action, AuditAction::Created);
        assert_eq!(entries[0].entity_id, claim.id);
        assert_eq!(entries[0].changed_by, "adjuster-1");
        assert!(entries[0].old_values.is_none());
        assert!(entries[0]
            .new_values
            .as_deref()
            .unwrap()
            .contains(&claim.claim_number));
    }
}

mod read {
    use super::*;

    #[tokio::test]
    async fn get_claim_returns_none_for_unknown_id() {
        let (service, _) = service();
        assert!(service.get_claim(999).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn get_claim_by_number_finds_visible_claims() {
        let (service, _) = service();
        let created = service
            .create_claim(ClaimBuilder::new().build(), &ctx())
            .await
            .unwrap();

        let found = service
            .get_claim_by_number(&created.claim_number)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(found.id, created.id);
    }

    #[tokio::test]
    async fn list_orders_by_filed_date_descending() {
        let (service, _) = service();
        let now = Utc::now();

        for days_ago in [10u64, 2, 6] {
            service
                .create_claim(
                    ClaimBuilder::new()
                        .incident_date(now - Days::new(days_ago + 5))
                        .filed_date(now - Days::new(days_ago))
                        .build(),
                    &ctx(),
                )
                .await
                .unwrap();
        }

        let claims = service.get_all_claims().await.unwrap();
        let filed: Vec<_> = claims.iter().map(|c| c.filed_date).collect();
        let mut sorted = filed.clone();
        sorted.sort_by(|a, b| b.cmp(a));
        assert_eq!(filed, sorted);
    }

    #[tokio::test]
    async fn list_breaks_filed_date_ties_by_insertion_order() {
        let (service, _) = service();
        let filed = Utc::now() - Days::new(3);

        let first = service
            .create_claim(ClaimBuilder::new().filed_date(filed).build(), &ctx())
            .await
            .unwrap();
        let second = service
            .create_claim(ClaimBuilder::new().filed_date(filed).build(), &ctx())
            .await
            .unwrap();

        let ids: Vec<_> = service
            .get_all_claims()
            .await
            .unwrap()
            .iter()
            .map(|c| c.id)
            .collect();
        assert_eq!(ids, vec![first.id, second.id]);
    }

    #[tokio::test]
    async fn status_filter_is_exact_and_case_sensitive() {
        let (service, _) = service();

        service
            .create_claim(ClaimBuilder::new().status("Pending").build(), &ctx())
            .await
            .unwrap();
        service
            .create_claim(ClaimBuilder::new().status("Approved").build(), &ctx())
            .await
            .unwrap();

        let pending = service.get_claims_by_status("Pending").await.unwrap();
        assert_eq!(pending.len(), 1);
        assert_eq!(pending[0].status, ClaimStatus::Pending);

        assert!(service.get_claims_by_status("pending").await.unwrap().is_empty());
        assert!(service.get_claims_by_status("Escalated").await.unwrap().is_empty());
    }
}

mod update {
    use super::*;

    #[tokio::test]
    async fn replaces_mutable_fields_and_stamps() {
        let (service, _) = service();
        let created = service
            .create_claim(ClaimBuilder::new().build(), &ctx())
            .await
            .unwrap();

        let editor = AuditContext::new("adjuster-2");
        let updated = service
            .update_claim(
                created.id,
                ClaimBuilder::new()
                    .claimant_name("John Q. Public")
                    .amount(dec!(6000.00))
                    .status("Approved")
                    .notes("approved after inspection")
                    .build(),
                &editor,
            )
            .await
            .unwrap()
            .unwrap();

        assert_eq!(updated.claimant_name, "John Q. Public");
        assert_eq!(updated.claim_amount, dec!(6000.00));
        assert_eq!(updated.status, ClaimStatus::Approved);
        assert_eq!(updated.notes.as_deref(), Some("approved after inspection"));
        assert_eq!(updated.updated_by.as_deref(), Some("adjuster-2"));
        assert!(updated.updated_at.is_some());
        // Creation metadata survives the replace
        assert_eq!(updated.claim_number, created.claim_number);
        assert_eq!(updated.created_at, created.created_at);
        assert_eq!(updated.created_by, created.created_by);
    }

    #[tokio::test]
    async fn candidate_claim_number_is_ignored() {
        let (service, _) = service();
        let created = service
            .create_claim(ClaimBuilder::new().build(), &ctx())
            .await
            .unwrap();

        let updated = service
            .update_claim(
                created.id,
                ClaimBuilder::new().claim_number("CLM-99999999-0000").build(),
                &ctx(),
            )
            .await
            .unwrap()
            .unwrap();

        assert_eq!(updated.claim_number, created.claim_number);
    }

    #[tokio::test]
    async fn returns_none_for_unknown_id() {
        let (service, _) = service();
        let result = service
            .update_claim(424242, ClaimBuilder::new().build(), &ctx())
            .await
            .unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn writes_updated_audit_entry_with_both_snapshots() {
        let (service, store) = service();
        let created = service
            .create_claim(ClaimBuilder::new().build(), &ctx())
            .await
            .unwrap();

        service
            .update_claim(
                created.id,
                ClaimBuilder::new().status("Denied").build(),
                &ctx(),
            )
            .await
            .unwrap();

        let entry = store.audit_entries().pop().unwrap();
        assert_eq!(entry.action, AuditAction::Updated);
        assert!(entry.old_values.as_deref().unwrap().contains("Pending"));
        assert!(entry.new_values.as_deref().unwrap().contains("Denied"));
    }
}

mod soft_delete {
    use super::*;

    #[tokio::test]
    async fn hides_claim_from_all_read_paths() {
        let (service, store) = service();
        let created = service
            .create_claim(ClaimBuilder::new().build(), &ctx())
            .await
            .unwrap();

        assert!(service.delete_claim(created.id, &ctx()).await.unwrap());

        assert!(service.get_claim(created.id).await.unwrap().is_none());
        assert!(service
            .get_claim_by_number(&created.claim_number)
            .await
            .unwrap()
            .is_none());
        assert!(service.get_all_claims().await.unwrap().is_empty());
        assert!(service
            .get_claims_by_status("Pending")
            .await
            .unwrap()
            .is_empty());

        // The row is still physically present for audit purposes
        let rows = store.raw_rows();
        assert_eq!(rows.len(), 1);
        assert!(rows[0].is_deleted);
        assert!(rows[0].deleted_at.is_some());
        assert_eq!(rows[0].deleted_by.as_deref(), Some("adjuster-1"));
    }

    #[tokio::test]
    async fn is_idempotent() {
        let (service, _) = service();
        let created = service
            .create_claim(ClaimBuilder::new().build(), &ctx())
            .await
            .unwrap();

        assert!(service.delete_claim(created.id, &ctx()).await.unwrap());
        assert!(!service.delete_claim(created.id, &ctx()).await.unwrap());
        assert!(!service.delete_claim(987654, &ctx()).await.unwrap());
    }

    #[tokio::test]
    async fn updating_a_deleted_claim_reports_not_found() {
        let (service, _) = service();
        let created = service
            .create_claim(ClaimBuilder::new().build(), &ctx())
            .await
            .unwrap();
        service.delete_claim(created.id, &ctx()).await.unwrap();

        let result = service
            .update_claim(created.id, ClaimBuilder::new().build(), &ctx())
            .await
            .unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn writes_deleted_audit_entry() {
        let (service, store) = service();
        let created = service
            .create_claim(ClaimBuilder::new().build(), &ctx())
            .await
            .unwrap();

        service.delete_claim(created.id, &ctx()).await.unwrap();

        let entry = store.audit_entries().pop().unwrap();
        assert_eq!(entry.action, AuditAction::Deleted);
        assert_eq!(entry.entity_id, created.id);
        assert!(entry.old_values.is_some());
        assert!(entry.new_values.as_deref().unwrap().contains("\"is_deleted\":true"));
    }
}

mod scenario {
    use super::*;

    /// Create with amount 5000, update status and amount, delete; every
    /// step observable through the service's read paths.
    #[tokio::test]
    async fn full_claim_lifecycle() {
        let (service, store) = service();
        let now = Utc::now();

        let created = service
            .create_claim(
                ClaimBuilder::new()
                    .amount(dec!(5000.00))
                    .incident_date(now - Days::new(30))
                    .filed_date(now)
                    .status("Pending")
                    .build(),
                &ctx(),
            )
            .await
            .unwrap();
        assert_eq!(created.claim_amount, dec!(5000.00));
        assert!(created.claim_number.starts_with("CLM-"));

        service
            .update_claim(
                created.id,
                ClaimBuilder::new()
                    .amount(dec!(6000.00))
                    .incident_date(now - Days::new(30))
                    .filed_date(now)
                    .status("Approved")
                    .build(),
                &ctx(),
            )
            .await
            .unwrap()
            .unwrap();

        let fetched = service.get_claim(created.id).await.unwrap().unwrap();
        assert_eq!(fetched.status, ClaimStatus::Approved);
        assert_eq!(fetched.claim_amount, dec!(6000.00));

        assert!(service.delete_claim(created.id, &ctx()).await.unwrap());
        assert!(service.get_claim(created.id).await.unwrap().is_none());

        let actions: Vec<_> = store.audit_entries().iter().map(|e| e.action).collect();
        assert_eq!(
            actions,
            vec![AuditAction::Created, AuditAction::Updated, AuditAction::Deleted]
        );
    }
}
