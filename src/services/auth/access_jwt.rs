use std::sync::Arc;

use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, Validation};
use serde::Deserialize;

use crate::services::auth::error::AuthError;
use crate::services::auth::jwks::KeySource;

/// Access token (JWT) claims issued by the identity provider.
///
/// NOTE:
/// - `aud` is checked by jsonwebtoken against the raw payload (string or array), so it is not kept here.
/// - `permissions` is `None` when the claim is absent, which is a configuration
///   problem on the provider side (RBAC not enabled for the API), not an empty grant.
#[derive(Debug, Clone, Deserialize)]
pub struct AccessTokenClaims {
    pub iss: String,
    pub exp: u64,

    #[serde(default)]
    pub sub: Option<String>,
    #[serde(default)]
    pub azp: Option<String>,
    #[serde(default)]
    pub permissions: Option<Vec<String>>,
}

/// JWKS-backed access token verifier.
///
/// - Only algorithms in the configured allow-list are accepted, whatever the token header says.
/// - Key material is never printed via Debug.
pub struct AccessTokenVerifier {
    keys: Arc<dyn KeySource>,
    validation: Validation,
}

impl std::fmt::Debug for AccessTokenVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccessTokenVerifier")
            .field("keys", &self.keys.source_name())
            .field("validation", &self.validation)
            .finish()
    }
}

impl AccessTokenVerifier {
    /// `algorithms` must not be empty (checked when the config is loaded).
    pub fn new(
        keys: Arc<dyn KeySource>,
        issuer: &str,
        audience: &str,
        algorithms: &[Algorithm],
        leeway_seconds: u64,
    ) -> Self {
        let mut validation = Validation::new(Algorithm::RS256);
        validation.algorithms = algorithms.to_vec();
        validation.set_issuer(&[issuer]);
        validation.set_audience(&[audience]);
        validation.set_required_spec_claims(&["exp", "iss", "aud"]);
        validation.leeway = leeway_seconds;

        Self { keys, validation }
    }

    /// Verify signature + `exp`/`iss`/`aud` and decode the claims.
    ///
    /// 1. read `kid`/`alg` from the unverified header
    /// 2. look the key up by `kid`
    /// 3. let jsonwebtoken verify the signature and the registered claims
    pub async fn verify(&self, token: &str) -> Result<AccessTokenClaims, AuthError> {
        let header = jsonwebtoken::decode_header(token).map_err(|e| {
            tracing::debug!(error = %e, "undecodable token header");
            AuthError::InvalidHeader
        })?;

        if !self.validation.algorithms.contains(&header.alg) {
            tracing::debug!(alg = ?header.alg, "token alg not allowed");
            return Err(AuthError::InvalidHeader);
        }

        let kid = header.kid.ok_or(AuthError::InvalidHeader)?;

        let jwk = self
            .keys
            .find_key(&kid)
            .await
            .map_err(|e| {
                tracing::error!(error = %e, source = self.keys.source_name(), "jwks unavailable");
                AuthError::KeySetUnavailable(e)
            })?
            .ok_or(AuthError::KeyNotFound)?;

        let decoding_key = DecodingKey::from_jwk(&jwk).map_err(|e| {
            tracing::warn!(error = %e, kid = %kid, "unusable jwk");
            AuthError::InvalidToken
        })?;

        let data = jsonwebtoken::decode::<AccessTokenClaims>(token, &decoding_key, &self.validation)
            .map_err(|e| map_jwt_error(e.kind()))?;

        Ok(data.claims)
    }
}

fn map_jwt_error(kind: &ErrorKind) -> AuthError {
    match kind {
        ErrorKind::ExpiredSignature => AuthError::TokenExpired,
        ErrorKind::InvalidAudience
        | ErrorKind::InvalidIssuer
        | ErrorKind::MissingRequiredClaim(_) => AuthError::InvalidClaims,
        ErrorKind::InvalidSignature => AuthError::InvalidSignature,
        _ => AuthError::InvalidToken,
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::test_support::{self, Signer};

    #[tokio::test]
    async fn accepts_a_valid_token() {
        let token = test_support::token(&["get:drinks-detail"]);

        let claims = test_support::verifier().verify(&token).await.unwrap();

        assert_eq!(claims.iss, test_support::ISSUER);
        assert_eq!(
            claims.permissions,
            Some(vec!["get:drinks-detail".to_string()])
        );
    }

    #[tokio::test]
    async fn accepts_array_audience() {
        let mut claims = test_support::claims(&[]);
        claims["aud"] = json!([test_support::AUDIENCE, "https://tenant.example/userinfo"]);
        let token = test_support::sign(&claims, test_support::PRIMARY_KID, Signer::Primary);

        assert!(test_support::verifier().verify(&token).await.is_ok());
    }

    #[tokio::test]
    async fn unknown_kid_is_key_not_found() {
        let token = test_support::sign(
            &test_support::claims(&["post:drinks"]),
            test_support::ROGUE_KID,
            Signer::Rogue,
        );

        let err = test_support::verifier().verify(&token).await.unwrap_err();

        assert!(matches!(err, AuthError::KeyNotFound));
    }

    #[tokio::test]
    async fn foreign_signature_under_known_kid_is_rejected() {
        let token = test_support::sign(
            &test_support::claims(&["post:drinks"]),
            test_support::PRIMARY_KID,
            Signer::Rogue,
        );

        let err = test_support::verifier().verify(&token).await.unwrap_err();

        assert!(matches!(err, AuthError::InvalidSignature));
    }

    #[tokio::test]
    async fn expired_token_is_rejected_even_with_valid_signature() {
        let mut claims = test_support::claims(&["post:drinks"]);
        claims["exp"] = json!(test_support::now() - 3600);
        let token = test_support::sign(&claims, test_support::PRIMARY_KID, Signer::Primary);

        let err = test_support::verifier().verify(&token).await.unwrap_err();

        assert!(matches!(err, AuthError::TokenExpired));
    }

    #[tokio::test]
    async fn wrong_audience_is_invalid_claims() {
        let mut claims = test_support::claims(&["post:drinks"]);
        claims["aud"] = json!("someone-else");
        let token = test_support::sign(&claims, test_support::PRIMARY_KID, Signer::Primary);

        let err = test_support::verifier().verify(&token).await.unwrap_err();

        assert!(matches!(err, AuthError::InvalidClaims));
    }

    #[tokio::test]
    async fn wrong_issuer_is_invalid_claims() {
        let mut claims = test_support::claims(&["post:drinks"]);
        claims["iss"] = json!("https://evil.example/");
        let token = test_support::sign(&claims, test_support::PRIMARY_KID, Signer::Primary);

        let err = test_support::verifier().verify(&token).await.unwrap_err();

        assert!(matches!(err, AuthError::InvalidClaims));
    }

    #[tokio::test]
    async fn missing_audience_is_invalid_claims() {
        let mut claims = test_support::claims(&[]);
        claims.as_object_mut().unwrap().remove("aud");
        let token = test_support::sign(&claims, test_support::PRIMARY_KID, Signer::Primary);

        let err = test_support::verifier().verify(&token).await.unwrap_err();

        assert!(matches!(err, AuthError::InvalidClaims));
    }

    #[tokio::test]
    async fn header_without_kid_is_invalid_header() {
        let token = test_support::sign_without_kid(&test_support::claims(&[]));

        let err = test_support::verifier().verify(&token).await.unwrap_err();

        assert!(matches!(err, AuthError::InvalidHeader));
    }

    #[tokio::test]
    async fn garbage_is_invalid_header() {
        let err = test_support::verifier()
            .verify("not-a-jwt")
            .await
            .unwrap_err();

        assert!(matches!(err, AuthError::InvalidHeader));
    }

    #[tokio::test]
    async fn disallowed_alg_is_invalid_header() {
        // HS256 header with a kid that exists in the key set
        let mut header = jsonwebtoken::Header::new(Algorithm::HS256);
        header.kid = Some(test_support::PRIMARY_KID.to_string());
        let token = jsonwebtoken::encode(
            &header,
            &test_support::claims(&["post:drinks"]),
            &jsonwebtoken::EncodingKey::from_secret(b"guessable"),
        )
        .unwrap();

        let err = test_support::verifier().verify(&token).await.unwrap_err();

        assert!(matches!(err, AuthError::InvalidHeader));
    }

    #[tokio::test]
    async fn absent_permissions_claim_stays_none() {
        let mut claims = test_support::claims(&[]);
        claims.as_object_mut().unwrap().remove("permissions");
        let token = test_support::sign(&claims, test_support::PRIMARY_KID, Signer::Primary);

        let claims = test_support::verifier().verify(&token).await.unwrap();

        assert!(claims.permissions.is_none());
    }

    #[tokio::test]
    async fn unreachable_key_set_is_unavailable_not_unauthorized() {
        let verifier = test_support::verifier_with(Arc::new(test_support::UnavailableKeySource));
        let token = test_support::token(&["post:drinks"]);

        let err = verifier.verify(&token).await.unwrap_err();

        assert!(matches!(err, AuthError::KeySetUnavailable(_)));
        assert_eq!(err.status(), axum::http::StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(err.code(), "key_set_unavailable");
    }
}
