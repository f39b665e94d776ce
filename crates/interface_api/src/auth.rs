//! Authentication and authorization
//!
//! HMAC JWTs validated in middleware; the token subject becomes the acting
//! principal recorded on audit stamps. Token issuance belongs to the
//! external identity provider - `create_token` exists for tooling and
//! tests.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// JWT claims
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthClaims {
    /// Subject (user ID); stamped as the acting principal on writes
    pub sub: String,
    /// User's roles
    pub roles: Vec<String>,
    /// Expiration timestamp
    pub exp: i64,
    /// Issued at timestamp
    pub iat: i64,
}

/// Auth errors
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Invalid token")]
    InvalidToken,
    #[error("Token expired")]
    TokenExpired,
}

/// Creates a new JWT token
pub fn create_token(
    user_id: &str,
    roles: Vec<String>,
    secret: &str,
    expiration_secs: u64,
) -> Result<String, AuthError> {
    let now = Utc::now();
    let exp = now + Duration::seconds(expiration_secs as i64);

    let claims = AuthClaims {
        sub: user_id.to_string(),
        roles,
        exp: exp.timestamp(),
        iat: now.timestamp(),
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|_| AuthError::InvalidToken)
}

/// Validates a JWT token and returns its claims
pub fn validate_token(token: &str, secret: &str) -> Result<AuthClaims, AuthError> {
    let token_data = decode::<AuthClaims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map_err(|e| match e.kind() {
        jsonwebtoken::errors::ErrorKind::ExpiredSignature => AuthError::TokenExpired,
        _ => AuthError::InvalidToken,
    })?;

    Ok(token_data.claims)
}

/// Checks whether the user carries the required role; admins pass every
/// check
pub fn has_role(claims: &AuthClaims, required_role: &str) -> bool {
    claims
        .roles
        .iter()
        .any(|r| r == required_role || r == roles::ADMIN)
}

/// Role definitions
pub mod roles {
    pub const VIEWER: &str = "viewer";
    pub const CSR: &str = "csr";
    pub const ADJUSTER: &str = "adjuster";
    pub const ADMIN: &str = "admin";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_round_trip() {
        let token =
            create_token("adjuster-9", vec![roles::ADJUSTER.to_string()], "secret", 60).unwrap();
        let claims = validate_token(&token, "secret").unwrap();

        assert_eq!(claims.sub, "adjuster-9");
        assert_eq!(claims.roles, vec![roles::ADJUSTER]);
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let token = create_token("u", vec![], "secret", 60).unwrap();
        assert!(matches!(
            validate_token(&token, "other-secret"),
            Err(AuthError::InvalidToken)
        ));
    }

    #[test]
    fn test_admin_passes_any_role_check() {
        let token = create_token("root", vec![roles::ADMIN.to_string()], "secret", 60).unwrap();
        let claims = validate_token(&token, "secret").unwrap();

        assert!(has_role(&claims, roles::VIEWER));
        assert!(has_role(&claims, roles::ADJUSTER));
    }
}
