//! Claim input validation
//!
//! Declarative rule set applied before a create/update request reaches the
//! lifecycle service. All rules are evaluated independently so a single
//! request reports every violated field, not just the first.
//!
//! # Rules
//!
//! - claimantName: required, at most 200 characters
//! - claimantEmail: required, valid email syntax, at most 200 characters
//! - claimantPhone: when present, at most 20 characters from `[\d\s\-()+]`
//! - claimAmount: greater than zero, at most 10,000,000
//! - incidentDate: not in the future
//! - filedDate: on or after the incident date, not in the future
//! - status: one of Pending, Under Review, Approved, Denied, Closed
//! - description: at most 1000 characters
//! - notes: when present, at most 2000 characters

use chrono::Utc;
use rust_decimal::Decimal;
use validator::ValidateEmail;

use crate::claim::{ClaimCandidate, ClaimStatus};

const MAX_CLAIM_AMOUNT: Decimal = Decimal::from_parts(10_000_000, 0, 0, false, 0);

/// A single violated rule, keyed by the wire-level field name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldViolation {
    pub field: &'static str,
    pub message: String,
}

/// Ordered list of violations; empty means the candidate is acceptable
#[derive(Debug, Clone, Default)]
pub struct ValidationResult {
    pub violations: Vec<FieldViolation>,
}

impl ValidationResult {
    pub fn ok() -> Self {
        Self::default()
    }

    pub fn is_valid(&self) -> bool {
        self.violations.is_empty()
    }

    pub fn add(&mut self, field: &'static str, message: impl Into<String>) {
        self.violations.push(FieldViolation {
            field,
            message: message.into(),
        });
    }

    /// Fields with at least one violation, in first-seen order
    pub fn fields(&self) -> Vec<&'static str> {
        let mut fields = Vec::new();
        for violation in &self.violations {
            if !fields.contains(&violation.field) {
                fields.push(violation.field);
            }
        }
        fields
    }
}

/// Validator for claim candidates
pub struct ClaimValidator;

impl ClaimValidator {
    /// Evaluates every rule against the candidate
    pub fn validate(candidate: &ClaimCandidate) -> ValidationResult {
        let mut result = ValidationResult::ok();
        let now = Utc::now();

        Self::validate_claimant(candidate, &mut result);
        Self::validate_amount(candidate, &mut result);

        if candidate.incident_date > now {
            result.add("incidentDate", "Incident date cannot be in the future");
        }
        if candidate.filed_date < candidate.incident_date {
            result.add("filedDate", "Filed date must be on or after incident date");
        }
        if candidate.filed_date > now {
            result.add("filedDate", "Filed date cannot be in the future");
        }

        if candidate.status.parse::<ClaimStatus>().is_err() {
            let allowed: Vec<&str> = ClaimStatus::ALL.iter().map(|s| s.as_str()).collect();
            result.add(
                "status",
                format!("Status must be one of: {}", allowed.join(", ")),
            );
        }

        if candidate.description.chars().count() > 1000 {
            result.add("description", "Description must not exceed 1000 characters");
        }
        if let Some(notes) = &candidate.notes {
            if notes.chars().count() > 2000 {
                result.add("notes", "Notes must not exceed 2000 characters");
            }
        }

        result
    }

    fn validate_claimant(candidate: &ClaimCandidate, result: &mut ValidationResult) {
        if candidate.claimant_name.trim().is_empty() {
            result.add("claimantName", "Claimant name is required");
        } else if candidate.claimant_name.chars().count() > 200 {
            result.add("claimantName", "Claimant name must not exceed 200 characters");
        }

        if candidate.claimant_email.trim().is_empty() {
            result.add("claimantEmail", "Claimant email is required");
        } else {
            if !candidate.claimant_email.validate_email() {
                result.add("claimantEmail", "Invalid email address");
            }
            if candidate.claimant_email.chars().count() > 200 {
                result.add("claimantEmail", "Email must not exceed 200 characters");
            }
        }

        let phone = candidate.claimant_phone.trim();
        if !phone.is_empty() {
            if candidate.claimant_phone.chars().count() > 20 {
                result.add("claimantPhone", "Phone number must not exceed 20 characters");
            }
            if !candidate.claimant_phone.chars().all(is_phone_char) {
                result.add("claimantPhone", "Invalid phone number format");
            }
        }
    }

    fn validate_amount(candidate: &ClaimCandidate, result: &mut ValidationResult) {
        if candidate.claim_amount <= Decimal::ZERO {
            result.add("claimAmount", "Claim amount must be greater than zero");
        } else if candidate.claim_amount > MAX_CLAIM_AMOUNT {
            result.add("claimAmount", "Claim amount must not exceed 10,000,000");
        }
    }
}

/// Character class of the phone rule: digits, whitespace, `-`, `(`, `)`, `+`
fn is_phone_char(c: char) -> bool {
    c.is_ascii_digit() || matches!(c, ' ' | '-' | '(' | ')' | '+')
}
