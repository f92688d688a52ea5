/*
 * Responsibility
 * - 環境変数や設定の読み込み (DATABASE_URL, CORS 許可、Auth/JWKS 設定など)
 * - 設定値のバリデーション (不足・不正なら起動失敗)
 * - 読み込みは lookup 関数経由 (テストでは HashMap を渡す)
 */
use std::fmt;
use std::net::SocketAddr;
use std::str::FromStr;

use jsonwebtoken::Algorithm;
use url::Url;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnv {
    Development,
    Production,
}

impl AppEnv {
    fn parse(value: Option<String>) -> Self {
        match value
            .unwrap_or_else(|| "development".to_string())
            .to_ascii_lowercase()
            .as_str()
        {
            "production" | "prod" => Self::Production,
            _ => Self::Development,
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

#[derive(Debug, PartialEq, Eq)]
pub enum ConfigError {
    Missing(&'static str),
    Invalid(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Missing(key) => write!(f, "missing configuration: {}", key),
            ConfigError::Invalid(key) => write!(f, "invalid configuration: {}", key),
        }
    }
}

impl std::error::Error for ConfigError {}

#[derive(Debug, Clone)]
pub struct Config {
    pub addr: SocketAddr,
    pub database_url: String,
    pub database_max_connections: u32,

    pub app_env: AppEnv,
    pub cors_allowed_origins: Vec<String>,

    pub auth_issuer: String,
    pub auth_audience: String,
    pub auth_jwks_url: Url,
    pub auth_algorithms: Vec<Algorithm>,
    pub access_token_leeway_seconds: u64,

    // 0 = fetch the key set on every verification
    pub jwks_cache_ttl_seconds: u64,
    // minimum gap between refetches caused by an unknown kid (cache only)
    pub jwks_min_refresh_seconds: u64,
    pub jwks_fetch_timeout_seconds: u64,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port: u16 = parse_or(&lookup, "PORT", 3000)?;

        let addr: SocketAddr = SocketAddr::from_str(&format!("0.0.0.0:{}", port))
            .map_err(|_| ConfigError::Invalid("PORT"))?;

        let database_url = lookup("DATABASE_URL").ok_or(ConfigError::Missing("DATABASE_URL"))?;

        let database_max_connections = parse_or(&lookup, "DATABASE_MAX_CONNECTIONS", 5)?;

        let app_env = AppEnv::parse(lookup("APP_ENV"));

        let cors_allowed_origins = lookup("CORS_ALLOWED_ORIGINS")
            .unwrap_or_default()
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>();

        let auth_issuer = lookup("AUTH_ISSUER").ok_or(ConfigError::Missing("AUTH_ISSUER"))?;
        let issuer_url = Url::parse(&auth_issuer).map_err(|_| ConfigError::Invalid("AUTH_ISSUER"))?;

        let auth_audience =
            lookup("AUTH_AUDIENCE").ok_or(ConfigError::Missing("AUTH_AUDIENCE"))?;

        let auth_jwks_url = match lookup("AUTH_JWKS_URL") {
            Some(url) => Url::parse(&url).map_err(|_| ConfigError::Invalid("AUTH_JWKS_URL"))?,
            None => default_jwks_url(&issuer_url).ok_or(ConfigError::Invalid("AUTH_ISSUER"))?,
        };

        let auth_algorithms = lookup("AUTH_ALGORITHMS")
            .unwrap_or_else(|| "RS256".to_string())
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(Algorithm::from_str)
            .collect::<Result<Vec<_>, _>>()
            .map_err(|_| ConfigError::Invalid("AUTH_ALGORITHMS"))?;

        if auth_algorithms.is_empty() {
            return Err(ConfigError::Invalid("AUTH_ALGORITHMS"));
        }

        let access_token_leeway_seconds = parse_or(&lookup, "ACCESS_TOKEN_LEEWAY_SECONDS", 60)?;
        let jwks_cache_ttl_seconds = parse_or(&lookup, "JWKS_CACHE_TTL_SECONDS", 0)?;
        let jwks_min_refresh_seconds = parse_or(&lookup, "JWKS_MIN_REFRESH_SECONDS", 30)?;
        let jwks_fetch_timeout_seconds = parse_or(&lookup, "JWKS_FETCH_TIMEOUT_SECONDS", 5)?;

        Ok(Self {
            addr,
            database_url,
            database_max_connections,
            app_env,
            cors_allowed_origins,
            auth_issuer,
            auth_audience,
            auth_jwks_url,
            auth_algorithms,
            access_token_leeway_seconds,
            jwks_cache_ttl_seconds,
            jwks_min_refresh_seconds,
            jwks_fetch_timeout_seconds,
        })
    }
}

// Unset → default, set but unparsable → Invalid (a typo should not silently fall back).
fn parse_or<F, T>(lookup: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        Some(v) => v.trim().parse().map_err(|_| ConfigError::Invalid(key)),
        None => Ok(default),
    }
}

// https://tenant.auth0.com/ → https://tenant.auth0.com/.well-known/jwks.json
fn default_jwks_url(issuer: &Url) -> Option<Url> {
    let mut base = issuer.clone();
    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }
    base.join(".well-known/jwks.json").ok()
}
