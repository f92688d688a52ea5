//! Key set interface used by the access token verifier.
use std::sync::Arc;

use async_trait::async_trait;
use jsonwebtoken::jwk::{Jwk, JwkSet};
use thiserror::Error;

/// Failures while obtaining the key set itself (not while verifying a token).
///
/// The verifier turns these into `AuthError::KeySetUnavailable`; a key set
/// that cannot be read never lets a token through.
#[derive(Debug, Error)]
pub enum KeySetError {
    #[error("jwks request failed: {0}")]
    Fetch(#[from] reqwest::Error),
    #[error("jwks endpoint returned {0}")]
    Status(reqwest::StatusCode),
    #[error("jwks document is invalid: {0}")]
    Decode(#[from] serde_json::Error),
}

/// A source of JSON Web Keys (JWKS).
///
/// Implementations must be safe to share between concurrent requests.
#[async_trait]
pub trait KeySource: Send + Sync + 'static {
    // Name used in logs.
    fn source_name(&self) -> &'static str;

    // The current key set.
    async fn key_set(&self) -> Result<Arc<JwkSet>, KeySetError>;

    // The key published under `kid`, if any.
    async fn find_key(&self, kid: &str) -> Result<Option<Jwk>, KeySetError> {
        let keys = self.key_set().await?;
        Ok(keys.find(kid).cloned())
    }
}
