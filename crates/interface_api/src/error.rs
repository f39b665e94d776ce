//! API error handling
//!
//! Every failure serializes as an RFC-7807-style problem-details body:
//! `{type, title, status, detail, instance, errors}`, where `errors` maps
//! each violated field to its messages on validation failures.

use std::collections::BTreeMap;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use domain_claims::{StoreError, ValidationResult};

/// API error types
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Validation failed")]
    Validation {
        result: ValidationResult,
        instance: Option<String>,
    },

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Service unavailable: {0}")]
    Unavailable(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl ApiError {
    pub fn not_found(entity: &str, id: impl std::fmt::Display) -> Self {
        ApiError::NotFound(format!("{entity} with id '{id}' was not found"))
    }

    pub fn validation(result: ValidationResult, instance: impl Into<String>) -> Self {
        ApiError::Validation {
            result,
            instance: Some(instance.into()),
        }
    }
}

/// Problem-details response body
#[derive(Debug, Serialize)]
pub struct ProblemDetails {
    #[serde(rename = "type")]
    pub problem_type: String,
    pub title: String,
    pub status: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instance: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<BTreeMap<String, Vec<String>>>,
}

impl ProblemDetails {
    fn new(status: StatusCode, title: &str) -> Self {
        Self {
            problem_type: format!(
                "https://httpstatuses.io/{}",
                status.as_u16()
            ),
            title: title.to_string(),
            status: status.as_u16(),
            detail: None,
            instance: None,
            errors: None,
        }
    }
}

fn field_errors(result: &ValidationResult) -> BTreeMap<String, Vec<String>> {
    let mut errors: BTreeMap<String, Vec<String>> = BTreeMap::new();
    for violation in &result.violations {
        errors
            .entry(violation.field.to_string())
            .or_default()
            .push(violation.message.clone());
    }
    errors
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ApiError::NotFound(detail) => {
                let mut body = ProblemDetails::new(StatusCode::NOT_FOUND, "Not Found");
                body.detail = Some(detail);
                (StatusCode::NOT_FOUND, body)
            }
            ApiError::BadRequest(detail) => {
                let mut body = ProblemDetails::new(StatusCode::BAD_REQUEST, "Bad Request");
                body.detail = Some(detail);
                (StatusCode::BAD_REQUEST, body)
            }
            ApiError::Validation { result, instance } => {
                let mut body = ProblemDetails::new(
                    StatusCode::BAD_REQUEST,
                    "One or more validation errors occurred.",
                );
                body.instance = instance;
                body.errors = Some(field_errors(&result));
                (StatusCode::BAD_REQUEST, body)
            }
            ApiError::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                ProblemDetails::new(StatusCode::UNAUTHORIZED, "Unauthorized"),
            ),
            ApiError::Forbidden(detail) => {
                let mut body = ProblemDetails::new(StatusCode::FORBIDDEN, "Forbidden");
                body.detail = Some(detail);
                (StatusCode::FORBIDDEN, body)
            }
            ApiError::Conflict(detail) => {
                let mut body = ProblemDetails::new(StatusCode::CONFLICT, "Conflict");
                body.detail = Some(detail);
                (StatusCode::CONFLICT, body)
            }
            ApiError::Unavailable(detail) => {
                tracing::error!(%detail, "store unavailable");
                let mut body = ProblemDetails::new(
                    StatusCode::SERVICE_UNAVAILABLE,
                    "Service Unavailable",
                );
                body.detail = Some(detail);
                (StatusCode::SERVICE_UNAVAILABLE, body)
            }
            ApiError::Internal(detail) => {
                tracing::error!(%detail, "internal error");
                // Never leak backend detail to the caller
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ProblemDetails::new(StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error"),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::DuplicateClaimNumber(message) => ApiError::Conflict(message),
            StoreError::Unavailable(message) => ApiError::Unavailable(message),
            StoreError::Backend(message) => ApiError::Internal(message),
        }
    }
}
