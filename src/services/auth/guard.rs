//! Authorization guard: bearer extraction → signature verification → permission check.
//!
//! Per request: Start → Extracted → Verified → Authorized. The first failure
//! rejects the request; nothing is retried.
use axum::http::HeaderMap;

use crate::services::auth::access_jwt::{AccessTokenClaims, AccessTokenVerifier};
use crate::services::auth::error::AuthError;
use crate::services::auth::{bearer, permission};

#[derive(Debug)]
pub struct AuthGuard {
    verifier: AccessTokenVerifier,
}

impl AuthGuard {
    pub fn new(verifier: AccessTokenVerifier) -> Self {
        Self { verifier }
    }

    /// Authorize a request for `permission`, returning the verified claims.
    pub async fn authorize(
        &self,
        headers: &HeaderMap,
        permission: &str,
    ) -> Result<AccessTokenClaims, AuthError> {
        let result = self.run(headers, permission).await;

        if let Err(err) = &result {
            // never log the token itself
            tracing::warn!(
                permission,
                code = err.code(),
                error = %err,
                "request rejected by auth guard"
            );
        }

        result
    }

    async fn run(
        &self,
        headers: &HeaderMap,
        permission: &str,
    ) -> Result<AccessTokenClaims, AuthError> {
        let token = bearer::extract(headers)?;
        let claims = self.verifier.verify(token).await?;
        let claims = permission::enforce(permission, claims)?;

        tracing::debug!(
            permission,
            iss = %claims.iss,
            sub = ?claims.sub,
            azp = ?claims.azp,
            exp = claims.exp,
            "request authorized"
        );

        Ok(claims)
    }
}
