//! Claims DTOs and wire mapping
//!
//! Pure translation between the camelCase wire representation and the
//! internal entity. No validation or business logic here; the mapping
//! boundary exists so internal-only fields never leak onto the wire.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use domain_claims::{Claim, ClaimCandidate};

fn default_status() -> String {
    "Pending".to_string()
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateClaimRequest {
    /// Business key; generated by the service when absent or blank
    #[serde(default)]
    pub claim_number: Option<String>,
    pub claimant_name: String,
    pub claimant_email: String,
    #[serde(default)]
    pub claimant_phone: String,
    pub claim_amount: Decimal,
    pub incident_date: DateTime<Utc>,
    pub filed_date: DateTime<Utc>,
    #[serde(default = "default_status")]
    pub status: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub notes: Option<String>,
}

impl From<CreateClaimRequest> for ClaimCandidate {
    fn from(request: CreateClaimRequest) -> Self {
        ClaimCandidate {
            claim_number: request.claim_number,
            claimant_name: request.claimant_name,
            claimant_email: request.claimant_email,
            claimant_phone: request.claimant_phone,
            claim_amount: request.claim_amount,
            incident_date: request.incident_date,
            filed_date: request.filed_date,
            status: request.status,
            description: request.description,
            notes: request.notes,
        }
    }
}

/// Update payload; carries no claim number - the business key and creation
/// stamps always come from the existing row
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateClaimRequest {
    pub claimant_name: String,
    pub claimant_email: String,
    #[serde(default)]
    pub claimant_phone: String,
    pub claim_amount: Decimal,
    pub incident_date: DateTime<Utc>,
    pub filed_date: DateTime<Utc>,
    pub status: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub notes: Option<String>,
}

impl From<UpdateClaimRequest> for ClaimCandidate {
    fn from(request: UpdateClaimRequest) -> Self {
        ClaimCandidate {
            claim_number: None,
            claimant_name: request.claimant_name,
            claimant_email: request.claimant_email,
            claimant_phone: request.claimant_phone,
            claim_amount: request.claim_amount,
            incident_date: request.incident_date,
            filed_date: request.filed_date,
            status: request.status,
            description: request.description,
            notes: request.notes,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClaimDto {
    pub id: i64,
    pub claim_number: String,
    pub claimant_name: String,
    pub claimant_email: String,
    pub claimant_phone: String,
    pub claim_amount: Decimal,
    pub incident_date: DateTime<Utc>,
    pub filed_date: DateTime<Utc>,
    pub status: String,
    pub description: String,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<Claim> for ClaimDto {
    fn from(claim: Claim) -> Self {
        ClaimDto {
            id: claim.id,
            claim_number: claim.claim_number,
            claimant_name: claim.claimant_name,
            claimant_email: claim.claimant_email,
            claimant_phone: claim.claimant_phone,
            claim_amount: claim.claim_amount,
            incident_date: claim.incident_date,
            filed_date: claim.filed_date,
            status: claim.status.as_str().to_string(),
            description: claim.description,
            notes: claim.notes,
            created_at: claim.created_at,
            updated_at: claim.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_create_request_deserializes_camel_case_with_defaults() {
        let json = r#"{
            "claimantName": "Jane Doe",
            "claimantEmail": "jane@example.com",
            "claimAmount": "5000.00",
            "incidentDate": "2026-07-01T00:00:00Z",
            "filedDate": "2026-07-15T00:00:00Z"
        }"#;

        let request: CreateClaimRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.status, "Pending");
        assert!(request.claim_number.is_none());
        assert!(request.claimant_phone.is_empty());
        assert_eq!(request.claim_amount, dec!(5000.00));
    }

    #[test]
    fn test_dto_serializes_camel_case_and_status_string() {
        let claim = domain_claims::Claim {
            id: 3,
            claim_number: "CLM-20260715-1234".to_string(),
            claimant_name: "Jane Doe".to_string(),
            claimant_email: "jane@example.com".to_string(),
            claimant_phone: String::new(),
            claim_amount: dec!(5000.00),
            incident_date: Utc::now(),
            filed_date: Utc::now(),
            status: domain_claims::ClaimStatus::UnderReview,
            description: String::new(),
            notes: None,
            created_at: Utc::now(),
            created_by: Some("csr-1".to_string()),
            updated_at: None,
            updated_by: None,
            is_deleted: false,
            deleted_at: None,
            deleted_by: None,
        };

        let value = serde_json::to_value(ClaimDto::from(claim)).unwrap();
        assert_eq!(value["claimNumber"], "CLM-20260715-1234");
        assert_eq!(value["status"], "Under Review");
        // Internal audit-only fields never reach the wire
        assert!(value.get("isDeleted").is_none());
        assert!(value.get("createdBy").is_none());
    }

    #[test]
    fn test_update_request_never_contributes_claim_number() {
        let json = r#"{
            "claimantName": "Jane Doe",
            "claimantEmail": "jane@example.com",
            "claimAmount": "100.00",
            "incidentDate": "2026-07-01T00:00:00Z",
            "filedDate": "2026-07-15T00:00:00Z",
            "status": "Approved"
        }"#;

        let request: UpdateClaimRequest = serde_json::from_str(json).unwrap();
        let candidate: ClaimCandidate = request.into();
        assert!(candidate.claim_number.is_none());
        assert_eq!(candidate.status, "Approved");
    }
}
