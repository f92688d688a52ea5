/// Factory: build the `AuthGuard` (and its key source) from application `Config`.
use std::sync::Arc;
use std::time::Duration;

use crate::config::Config;
use crate::services::auth::AuthGuard;
use crate::services::auth::access_jwt::AccessTokenVerifier;
use crate::services::auth::jwks::{CachedKeySource, KeySource, RemoteJwks};

pub fn build_key_source(config: &Config) -> Result<Arc<dyn KeySource>, reqwest::Error> {
    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(config.jwks_fetch_timeout_seconds))
        .build()?;

    let remote = RemoteJwks::new(client, config.auth_jwks_url.clone());

    let source: Arc<dyn KeySource> = if config.jwks_cache_ttl_seconds == 0 {
        Arc::new(remote)
    } else {
        Arc::new(CachedKeySource::new(
            remote,
            Duration::from_secs(config.jwks_cache_ttl_seconds),
            Duration::from_secs(config.jwks_min_refresh_seconds),
        ))
    };

    Ok(source)
}

pub fn build_auth_guard(config: &Config) -> Result<Arc<AuthGuard>, reqwest::Error> {
    let keys = build_key_source(config)?;

    let verifier = AccessTokenVerifier::new(
        keys,
        &config.auth_issuer,
        &config.auth_audience,
        &config.auth_algorithms,
        config.access_token_leeway_seconds,
    );

    Ok(Arc::new(AuthGuard::new(verifier)))
}
