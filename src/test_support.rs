//! Shared fixtures for unit and router tests.
//!
//! Two RSA keys live in `testdata/`: the primary key is published in the test
//! key set, the rogue key is not.
use std::sync::Arc;

use async_trait::async_trait;
use jsonwebtoken::jwk::JwkSet;
use jsonwebtoken::{Algorithm, EncodingKey, Header};
use serde_json::{Value, json};
use tokio::sync::Mutex;

use crate::repos::{Drink, DrinkStore, Ingredient, RepoError};
use crate::services::auth::AuthGuard;
use crate::services::auth::access_jwt::AccessTokenVerifier;
use crate::services::auth::jwks::{KeySetError, KeySource};
use crate::state::AppState;

pub const ISSUER: &str = "https://coffee-shop.test.auth0.com/";
pub const AUDIENCE: &str = "drinks";
pub const SUBJECT: &str = "auth0|barista";

pub const PRIMARY_KID: &str = "primary-key";
pub const ROGUE_KID: &str = "rogue-key";

const PRIMARY_PEM: &str = include_str!("../testdata/rsa_primary.pem");
const ROGUE_PEM: &str = include_str!("../testdata/rsa_rogue.pem");

// base64url modulus of testdata/rsa_primary.pem
const PRIMARY_N: &str = "qIS3yThcfB-yy2qFHGr5Ai2TuikBJ5q1hGUeRC_9XvOJ3cfz_EA6aGF1kNGnUGSfnG22O3nRQR1QAlRt4za3I1KedXxfWD87Q2f1dGKcXqWxwa5eQsJiOvGkE6nQA4ejfy6YVswnP_6BqVaNPunhYVNz1er-lV6-g6M6-mDYINE5YGm5KV9dLCCksvYvIvtveto60Rf6XPZNApJKHeay1G2bz20J2Y4WRGbJotuJzVkReom8jLg8H3QW44uDu_FJ2ELyRV0WSv76xLxfw4vxK8MfJy6cHElogdrN7qcsPe5v-vMfdINQ9oVrkZzl-CpOxyX717o2wYBdL7pcX0xGfQ";
// base64url modulus of testdata/rsa_rogue.pem (published only after "rotation")
const ROGUE_N: &str = "hG60XqbrW7UMelaf4ssuqPj7NCUaBTDPI1ktKVPaenPRxrH1CPs0g-KOEcL8hAkWk8EyiUZTfY_XsQcogn0i0_LXnXH-aHliNwxz_bh2TuA3cgOi2JMw8gfY4R68ZlFa_o38uBmdIc2zZcphX46gqoowsOA4fWSbOI6GxcvKfVfsrFFe48vviFFKBX_rUoi6lGUAV9KNWzP9pIRKOLBgqf3DLsuP7fmp5lh8aYteNsTFFnhZ8TlLdvga3u5eJcD5xu4MekLtYxjXfW0uk0M4xxAORk5-xcxLYEQEg6Ux-fjJ8DQzCUIpTMuX6SW73OKPBn-H3atALGJMI6QV6XWLOw";

pub fn now() -> i64 {
    chrono::Utc::now().timestamp()
}

fn rsa_jwk(kid: &str, n: &str) -> Value {
    json!({
        "kty": "RSA",
        "use": "sig",
        "alg": "RS256",
        "kid": kid,
        "n": n,
        "e": "AQAB"
    })
}

pub fn jwks_json() -> Value {
    json!({ "keys": [rsa_jwk(PRIMARY_KID, PRIMARY_N)] })
}

pub fn jwks() -> JwkSet {
    serde_json::from_value(jwks_json()).expect("fixture jwks")
}

/// Key set after the provider started publishing the rogue key as well.
pub fn rotated_jwks() -> JwkSet {
    serde_json::from_value(json!({
        "keys": [rsa_jwk(PRIMARY_KID, PRIMARY_N), rsa_jwk(ROGUE_KID, ROGUE_N)]
    }))
    .expect("fixture jwks")
}

/// In-memory key set.
pub struct StaticKeySource {
    keys: Arc<JwkSet>,
}

impl StaticKeySource {
    pub fn new(keys: JwkSet) -> Self {
        Self {
            keys: Arc::new(keys),
        }
    }
}

#[async_trait]
impl KeySource for StaticKeySource {
    fn source_name(&self) -> &'static str {
        "static"
    }

    async fn key_set(&self) -> Result<Arc<JwkSet>, KeySetError> {
        Ok(Arc::clone(&self.keys))
    }
}

/// Key source whose endpoint always answers 503.
pub struct UnavailableKeySource;

#[async_trait]
impl KeySource for UnavailableKeySource {
    fn source_name(&self) -> &'static str {
        "unavailable"
    }

    async fn key_set(&self) -> Result<Arc<JwkSet>, KeySetError> {
        Err(KeySetError::Status(reqwest::StatusCode::SERVICE_UNAVAILABLE))
    }
}

pub fn verifier_with(keys: Arc<dyn KeySource>) -> AccessTokenVerifier {
    AccessTokenVerifier::new(keys, ISSUER, AUDIENCE, &[Algorithm::RS256], 0)
}

pub fn verifier() -> AccessTokenVerifier {
    verifier_with(Arc::new(StaticKeySource::new(jwks())))
}

pub fn guard() -> AuthGuard {
    AuthGuard::new(verifier())
}

pub fn state(drinks: Arc<dyn DrinkStore>) -> AppState {
    AppState::new(drinks, Arc::new(guard()))
}

pub fn state_with_keys(drinks: Arc<dyn DrinkStore>, keys: Arc<dyn KeySource>) -> AppState {
    AppState::new(drinks, Arc::new(AuthGuard::new(verifier_with(keys))))
}

pub fn claims(permissions: &[&str]) -> Value {
    let now = now();
    json!({
        "iss": ISSUER,
        "aud": AUDIENCE,
        "sub": SUBJECT,
        "iat": now,
        "exp": now + 3600,
        "azp": "frontend-client",
        "scope": "",
        "permissions": permissions,
    })
}

#[derive(Debug, Clone, Copy)]
pub enum Signer {
    Primary,
    Rogue,
}

fn encoding_key(signer: Signer) -> EncodingKey {
    let pem = match signer {
        Signer::Primary => PRIMARY_PEM,
        Signer::Rogue => ROGUE_PEM,
    };
    EncodingKey::from_rsa_pem(pem.as_bytes()).expect("fixture pem")
}

pub fn sign(claims: &Value, kid: &str, signer: Signer) -> String {
    let mut header = Header::new(Algorithm::RS256);
    header.kid = Some(kid.to_string());
    jsonwebtoken::encode(&header, claims, &encoding_key(signer)).expect("sign")
}

pub fn sign_without_kid(claims: &Value) -> String {
    let header = Header::new(Algorithm::RS256);
    jsonwebtoken::encode(&header, claims, &encoding_key(Signer::Primary)).expect("sign")
}

/// Valid token from the primary key carrying `permissions`.
pub fn token(permissions: &[&str]) -> String {
    sign(&claims(permissions), PRIMARY_KID, Signer::Primary)
}

/// `DrinkStore` backed by a Vec; ids start at 1, titles are unique.
#[derive(Default)]
pub struct MemoryDrinkStore {
    inner: Mutex<MemoryInner>,
}

#[derive(Default)]
struct MemoryInner {
    next_id: i32,
    drinks: Vec<Drink>,
}

#[async_trait]
impl DrinkStore for MemoryDrinkStore {
    async fn list(&self) -> Result<Vec<Drink>, RepoError> {
        Ok(self.inner.lock().await.drinks.clone())
    }

    async fn create(&self, title: &str, recipe: &[Ingredient]) -> Result<Drink, RepoError> {
        let mut inner = self.inner.lock().await;
        if inner.drinks.iter().any(|d| d.title == title) {
            return Err(RepoError::Conflict);
        }

        inner.next_id += 1;
        let drink = Drink {
            id: inner.next_id,
            title: title.to_string(),
            recipe: recipe.to_vec(),
        };
        inner.drinks.push(drink.clone());
        Ok(drink)
    }

    async fn update(
        &self,
        id: i32,
        title: Option<&str>,
        recipe: Option<&[Ingredient]>,
    ) -> Result<Option<Drink>, RepoError> {
        let mut inner = self.inner.lock().await;
        if let Some(title) = title
            && inner.drinks.iter().any(|d| d.id != id && d.title == title)
        {
            return Err(RepoError::Conflict);
        }

        let Some(drink) = inner.drinks.iter_mut().find(|d| d.id == id) else {
            return Ok(None);
        };
        if let Some(title) = title {
            drink.title = title.to_string();
        }
        if let Some(recipe) = recipe {
            drink.recipe = recipe.to_vec();
        }
        Ok(Some(drink.clone()))
    }

    async fn delete(&self, id: i32) -> Result<bool, RepoError> {
        let mut inner = self.inner.lock().await;
        let before = inner.drinks.len();
        inner.drinks.retain(|d| d.id != id);
        Ok(inner.drinks.len() < before)
    }
}
