//! Test data builders

use chrono::{DateTime, Days, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use domain_claims::ClaimCandidate;

/// Fluent builder for `ClaimCandidate` values
///
/// Defaults are valid: a five-thousand-dollar pending claim filed yesterday
/// for an incident a month ago.
#[derive(Debug, Clone)]
pub struct ClaimBuilder {
    claim_number: Option<String>,
    claimant_name: String,
    claimant_email: String,
    claimant_phone: String,
    claim_amount: Decimal,
    incident_date: DateTime<Utc>,
    filed_date: DateTime<Utc>,
    status: String,
    description: String,
    notes: Option<String>,
}

impl Default for ClaimBuilder {
    fn default() -> Self {
        let now = Utc::now();
        Self {
            claim_number: None,
            claimant_name: "Jane Doe".to_string(),
            claimant_email: "jane.doe@example.com".to_string(),
            claimant_phone: "555-0134".to_string(),
            claim_amount: dec!(5000.00),
            incident_date: now - Days::new(30),
            filed_date: now - Days::new(1),
            status: "Pending".to_string(),
            description: "Hail damage to roof".to_string(),
            notes: None,
        }
    }
}

impl ClaimBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn claim_number(mut self, number: impl Into<String>) -> Self {
        self.claim_number = Some(number.into());
        self
    }

    pub fn claimant_name(mut self, name: impl Into<String>) -> Self {
        self.claimant_name = name.into();
        self
    }

    pub fn claimant_email(mut self, email: impl Into<String>) -> Self {
        self.claimant_email = email.into();
        self
    }

    pub fn claimant_phone(mut self, phone: impl Into<String>) -> Self {
        self.claimant_phone = phone.into();
        self
    }

    pub fn amount(mut self, amount: Decimal) -> Self {
        self.claim_amount = amount;
        self
    }

    pub fn incident_date(mut self, date: DateTime<Utc>) -> Self {
        self.incident_date = date;
        self
    }

    pub fn filed_date(mut self, date: DateTime<Utc>) -> Self {
        self.filed_date = date;
        self
    }

    pub fn status(mut self, status: impl Into<String>) -> Self {
        self.status = status.into();
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    pub fn build(self) -> ClaimCandidate {
        ClaimCandidate {
            claim_number: self.claim_number,
            claimant_name: self.claimant_name,
            claimant_email: self.claimant_email,
            claimant_phone: self.claimant_phone,
            claim_amount: self.claim_amount,
            incident_date: self.incident_date,
            filed_date: self.filed_date,
            status: self.status,
            description: self.description,
            notes: self.notes,
        }
    }
}
