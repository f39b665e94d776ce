//! Claims handlers
//!
//! Control flow for writes: validate the payload, map it to a candidate,
//! hand it to the lifecycle service. The store stamps audit fields from the
//! request's `AuditContext`; nothing in the payload can touch them.

use axum::{
    extract::{OriginalUri, Path, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Extension, Json,
};
use tracing::info;

use domain_claims::{AuditContext, ClaimCandidate, ClaimValidator};

use crate::dto::claims::{ClaimDto, CreateClaimRequest, UpdateClaimRequest};
use crate::error::ApiError;
use crate::AppState;

/// GET /claims
pub async fn list_claims(State(state): State<AppState>) -> Result<Json<Vec<ClaimDto>>, ApiError> {
    let claims = state.service.get_all_claims().await?;
    Ok(Json(claims.into_iter().map(ClaimDto::from).collect()))
}

/// GET /claims/:id
pub async fn get_claim(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<ClaimDto>, ApiError> {
    let claim = state
        .service
        .get_claim(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Claim", id))?;
    Ok(Json(ClaimDto::from(claim)))
}

/// GET /claims/status/:status
///
/// Exact, case-sensitive match; unknown statuses yield an empty array.
pub async fn list_by_status(
    State(state): State<AppState>,
    Path(status): Path<String>,
) -> Result<Json<Vec<ClaimDto>>, ApiError> {
    let claims = state.service.get_claims_by_status(&status).await?;
    Ok(Json(claims.into_iter().map(ClaimDto::from).collect()))
}

/// POST /claims
pub async fn create_claim(
    State(state): State<AppState>,
    Extension(ctx): Extension<AuditContext>,
    OriginalUri(uri): OriginalUri,
    Json(request): Json<CreateClaimRequest>,
) -> Result<impl IntoResponse, ApiError> {
    info!(claimant = %request.claimant_name, "creating claim");

    let candidate = ClaimCandidate::from(request);
    let result = ClaimValidator::validate(&candidate);
    if !result.is_valid() {
        return Err(ApiError::validation(result, uri.path()));
    }

    let claim = state.service.create_claim(candidate, &ctx).await?;
    info!(claim_id = claim.id, claim_number = %claim.claim_number, "claim created");

    let location = format!("/api/v1/claims/{}", claim.id);
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(ClaimDto::from(claim)),
    ))
}

/// PUT /claims/:id
pub async fn update_claim(
    State(state): State<AppState>,
    Extension(ctx): Extension<AuditContext>,
    OriginalUri(uri): OriginalUri,
    Path(id): Path<i64>,
    Json(request): Json<UpdateClaimRequest>,
) -> Result<StatusCode, ApiError> {
    let candidate = ClaimCandidate::from(request);
    let result = ClaimValidator::validate(&candidate);
    if !result.is_valid() {
        return Err(ApiError::validation(result, uri.path()));
    }

    state
        .service
        .update_claim(id, candidate, &ctx)
        .await?
        .ok_or_else(|| ApiError::not_found("Claim", id))?;

    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /claims/:id
pub async fn delete_claim(
    State(state): State<AppState>,
    Extension(ctx): Extension<AuditContext>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    if !state.service.delete_claim(id, &ctx).await? {
        return Err(ApiError::not_found("Claim", id));
    }
    Ok(StatusCode::NO_CONTENT)
}
