//! Time-bounded key set cache.
//!
//! A snapshot is reused until `ttl` elapses. A lookup for a `kid` the
//! snapshot does not contain forces a refetch, so key rotation at the
//! identity provider is picked up before the TTL runs out. Forced refetches
//! are spaced at least `min_refresh_interval` apart; in between, unknown
//! `kid`s are answered from the snapshot. Keys are only ever looked up by the
//! `kid` they were published under.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use jsonwebtoken::jwk::{Jwk, JwkSet};
use tokio::sync::RwLock;
use tokio::time::Instant;

use crate::services::auth::jwks::source::{KeySetError, KeySource};

struct Snapshot {
    fetched_at: Instant,
    // last refetch caused by an unknown kid
    forced_at: Option<Instant>,
    keys: Arc<JwkSet>,
}

pub struct CachedKeySource<S> {
    inner: S,
    ttl: Duration,
    min_refresh_interval: Duration,
    snapshot: RwLock<Option<Snapshot>>,
}

impl<S: KeySource> CachedKeySource<S> {
    pub fn new(inner: S, ttl: Duration, min_refresh_interval: Duration) -> Self {
        Self {
            inner,
            ttl,
            min_refresh_interval,
            snapshot: RwLock::new(None),
        }
    }

    async fn fresh(&self) -> Option<(Arc<JwkSet>, Option<Instant>)> {
        let guard = self.snapshot.read().await;
        guard
            .as_ref()
            .filter(|s| s.fetched_at.elapsed() < self.ttl)
            .map(|s| (Arc::clone(&s.keys), s.forced_at))
    }

    async fn refresh(&self, forced: bool) -> Result<Arc<JwkSet>, KeySetError> {
        let keys = self.inner.key_set().await?;

        // Replace the snapshot as a whole; readers never see a partial set.
        let mut guard = self.snapshot.write().await;
        let now = Instant::now();
        let forced_at = if forced {
            Some(now)
        } else {
            guard.as_ref().and_then(|s| s.forced_at)
        };
        *guard = Some(Snapshot {
            fetched_at: now,
            forced_at,
            keys: Arc::clone(&keys),
        });

        Ok(keys)
    }
}

#[async_trait]
impl<S: KeySource> KeySource for CachedKeySource<S> {
    fn source_name(&self) -> &'static str {
        self.inner.source_name()
    }

    async fn key_set(&self) -> Result<Arc<JwkSet>, KeySetError> {
        match self.fresh().await {
            Some((keys, _)) => Ok(keys),
            None => self.refresh(false).await,
        }
    }

    async fn find_key(&self, kid: &str) -> Result<Option<Jwk>, KeySetError> {
        let forced = match self.fresh().await {
            Some((keys, forced_at)) => {
                if let Some(jwk) = keys.find(kid) {
                    return Ok(Some(jwk.clone()));
                }
                if forced_at.is_some_and(|at| at.elapsed() < self.min_refresh_interval) {
                    tracing::debug!(
                        kid,
                        source = self.inner.source_name(),
                        "unknown kid, refetch throttled"
                    );
                    return Ok(None);
                }
                true
            }
            None => false,
        };

        tracing::debug!(
            kid,
            forced,
            source = self.inner.source_name(),
            "refreshing jwks"
        );
        let keys = self.refresh(forced).await?;
        Ok(keys.find(kid).cloned())
    }
}
