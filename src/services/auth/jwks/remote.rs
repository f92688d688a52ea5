//! JWKS fetched over HTTPS from the identity provider.
use std::sync::Arc;

use async_trait::async_trait;
use jsonwebtoken::jwk::JwkSet;
use url::Url;

use crate::services::auth::jwks::source::{KeySetError, KeySource};

/// Fetches the key set from `url` on every call.
///
/// Wrap it in `CachedKeySource` to avoid a round trip per request.
#[derive(Clone, Debug)]
pub struct RemoteJwks {
    client: reqwest::Client,
    url: Url,
}

impl RemoteJwks {
    pub fn new(client: reqwest::Client, url: Url) -> Self {
        Self { client, url }
    }
}

#[async_trait]
impl KeySource for RemoteJwks {
    fn source_name(&self) -> &'static str {
        "remote_jwks"
    }

    async fn key_set(&self) -> Result<Arc<JwkSet>, KeySetError> {
        let res = self.client.get(self.url.clone()).send().await?;

        let status = res.status();
        if !status.is_success() {
            return Err(KeySetError::Status(status));
        }

        let body = res.bytes().await?;
        let keys: JwkSet = serde_json::from_slice(&body)?;

        tracing::debug!(url = %self.url, keys = keys.keys.len(), "fetched jwks");

        Ok(Arc::new(keys))
    }
}
