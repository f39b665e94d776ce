//! Claim entity and candidate form

use chrono::{DateTime, Utc};
use rand::Rng;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::ParseStatusError;

/// Claim status
///
/// Stored and exposed as its display string ("Under Review", not
/// "UnderReview"), matching the wire contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ClaimStatus {
    /// Newly filed, awaiting triage
    Pending,
    /// Assigned to an adjuster
    UnderReview,
    /// Approved for payment
    Approved,
    /// Denied
    Denied,
    /// Settled and closed
    Closed,
}

impl ClaimStatus {
    /// All recognized statuses, in lifecycle order
    pub const ALL: [ClaimStatus; 5] = [
        ClaimStatus::Pending,
        ClaimStatus::UnderReview,
        ClaimStatus::Approved,
        ClaimStatus::Denied,
        ClaimStatus::Closed,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ClaimStatus::Pending => "Pending",
            ClaimStatus::UnderReview => "Under Review",
            ClaimStatus::Approved => "Approved",
            ClaimStatus::Denied => "Denied",
            ClaimStatus::Closed => "Closed",
        }
    }
}

impl std::fmt::Display for ClaimStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ClaimStatus {
    type Err = ParseStatusError;

    /// Exact, case-sensitive match against the five recognized values
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ClaimStatus::ALL
            .iter()
            .copied()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| ParseStatusError(s.to_string()))
    }
}

/// An insurance claim record
///
/// The audit fields (`created_*`, `updated_*`, `deleted_*`, `is_deleted`)
/// are managed exclusively by the store; callers never set them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claim {
    /// System-assigned identifier, immutable after insert
    pub id: i64,
    /// Human-facing business key, unique across all rows ever created
    pub claim_number: String,
    pub claimant_name: String,
    pub claimant_email: String,
    pub claimant_phone: String,
    pub claim_amount: Decimal,
    pub incident_date: DateTime<Utc>,
    pub filed_date: DateTime<Utc>,
    pub status: ClaimStatus,
    pub description: String,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub created_by: Option<String>,
    pub updated_at: Option<DateTime<Utc>>,
    pub updated_by: Option<String>,
    pub is_deleted: bool,
    pub deleted_at: Option<DateTime<Utc>>,
    pub deleted_by: Option<String>,
}

impl Claim {
    /// JSON snapshot for audit records
    pub fn snapshot(&self) -> Option<String> {
        serde_json::to_string(self).ok()
    }
}

/// Client-settable claim fields, as they arrive from the wire
///
/// `status` stays a raw string here so the validator can report an
/// unrecognized value alongside other field violations instead of failing
/// at deserialization.
#[derive(Debug, Clone, PartialEq)]
pub struct ClaimCandidate {
    /// Business key; generated by the service when blank or absent
    pub claim_number: Option<String>,
    pub claimant_name: String,
    pub claimant_email: String,
    pub claimant_phone: String,
    pub claim_amount: Decimal,
    pub incident_date: DateTime<Utc>,
    pub filed_date: DateTime<Utc>,
    pub status: String,
    pub description: String,
    pub notes: Option<String>,
}

impl ClaimCandidate {
    /// Parses the status string; safe to call after validation
    pub fn parsed_status(&self) -> Result<ClaimStatus, ParseStatusError> {
        self.status.parse()
    }

    /// Whether the caller left the business key blank
    pub fn has_blank_claim_number(&self) -> bool {
        self.claim_number
            .as_deref()
            .map_or(true, |number| number.trim().is_empty())
    }
}

/// Generates a claim number: `CLM-<UTC date>-<4 digit random>`
///
/// The random range is narrow (1000..=9999), so collisions within a day are
/// possible; the store's unique index is the authoritative guard.
pub fn generate_claim_number() -> String {
    let date = Utc::now().format("%Y%m%d");
    let suffix: u32 = rand::rng().random_range(1000..=9999);
    format!("CLM-{date}-{suffix}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_status_display_round_trip() {
        for status in ClaimStatus::ALL {
            let parsed: ClaimStatus = status.as_str().parse().unwrap();
            assert_eq!(parsed, status);
        }
    }

    #[test]
    fn test_status_parse_rejects_unknown() {
        assert!("Rejected".parse::<ClaimStatus>().is_err());
        assert!("pending".parse::<ClaimStatus>().is_err());
        assert!("UNDER REVIEW".parse::<ClaimStatus>().is_err());
        assert!("".parse::<ClaimStatus>().is_err());
    }

    #[test]
    fn test_status_parse_is_case_sensitive() {
        assert_eq!("Under Review".parse::<ClaimStatus>().unwrap(), ClaimStatus::UnderReview);
        assert!("under review".parse::<ClaimStatus>().is_err());
    }

    #[test]
    fn test_generated_claim_number_shape() {
        let number = generate_claim_number();
        let parts: Vec<&str> = number.split('-').collect();

        assert_eq!(parts.len(), 3);
        assert_eq!(parts[0], "CLM");
        assert_eq!(parts[1].len(), 8);
        assert!(parts[1].chars().all(|c| c.is_ascii_digit()));
        assert_eq!(parts[2].len(), 4);
        assert!(parts[2].chars().all(|c| c.is_ascii_digit()));
    }

    proptest! {
        /// Every generated number matches CLM-\d{8}-\d{4}, regardless of
        /// when or how often generation runs
        #[test]
        fn prop_generated_numbers_always_well_formed(_seed in 0u32..1000) {
            let number = generate_claim_number();
            let suffix = number.rsplit('-').next().unwrap();
            let value: u32 = suffix.parse().unwrap();

            prop_assert!(number.starts_with("CLM-"));
            prop_assert_eq!(number.len(), "CLM-00000000-0000".len());
            prop_assert!((1000..=9999).contains(&value));
        }
    }
}
