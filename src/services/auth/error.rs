//! Authorization failures surfaced by the guard.
//!
//! Every variant is terminal for the request: the caller has to fix the
//! credential (or the server configuration) and resend.

use axum::http::StatusCode;
use thiserror::Error;

use crate::services::auth::jwks::KeySetError;

/// Why the `Authorization` header could not be turned into a bearer token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MalformedAuthorization {
    HeaderMissing,
    InvalidScheme,
    TokenMissing,
    ExtraSegments,
}

impl MalformedAuthorization {
    pub fn code(&self) -> &'static str {
        match self {
            Self::HeaderMissing => "authorization_header_missing",
            Self::InvalidScheme => "invalid_scheme",
            Self::TokenMissing => "token_missing",
            Self::ExtraSegments => "malformed_authorization",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::HeaderMissing => "Authorization header is expected.",
            Self::InvalidScheme => "Authorization header must start with \"Bearer\".",
            Self::TokenMissing => "Token not found.",
            Self::ExtraSegments => "Authorization header must be bearer token.",
        }
    }
}

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("{}", .0.description())]
    MalformedAuthorization(MalformedAuthorization),

    #[error("Unable to parse authentication token.")]
    InvalidHeader,

    #[error("Unable to find the appropriate key.")]
    KeyNotFound,

    #[error("Token expired.")]
    TokenExpired,

    #[error("Incorrect claims. Please, check the audience and issuer.")]
    InvalidClaims,

    #[error("Token signature could not be verified.")]
    InvalidSignature,

    #[error("Invalid authentication token.")]
    InvalidToken,

    #[error("Permission not found.")]
    Unauthorized,

    // 400: the server (or the identity provider's API settings) is misconfigured
    #[error("{0}")]
    InvalidPermissionConfiguration(&'static str),

    #[error("Signing keys are currently unavailable.")]
    KeySetUnavailable(#[source] KeySetError),
}

impl AuthError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::MalformedAuthorization(_)
            | Self::InvalidHeader
            | Self::KeyNotFound
            | Self::TokenExpired
            | Self::InvalidClaims
            | Self::InvalidSignature
            | Self::InvalidToken => StatusCode::UNAUTHORIZED,
            Self::Unauthorized => StatusCode::FORBIDDEN,
            Self::InvalidPermissionConfiguration(_) => StatusCode::BAD_REQUEST,
            Self::KeySetUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        }
    }

    /// Stable, machine-readable code for the JSON error body.
    pub fn code(&self) -> &'static str {
        match self {
            Self::MalformedAuthorization(kind) => kind.code(),
            Self::InvalidHeader => "invalid_header",
            Self::KeyNotFound => "key_not_found",
            Self::TokenExpired => "token_expired",
            Self::InvalidClaims => "invalid_claims",
            Self::InvalidSignature => "invalid_signature",
            Self::InvalidToken => "invalid_token",
            Self::Unauthorized => "unauthorized",
            Self::InvalidPermissionConfiguration(_) => "invalid_permission_configuration",
            Self::KeySetUnavailable(_) => "key_set_unavailable",
        }
    }
}

impl From<MalformedAuthorization> for AuthError {
    fn from(kind: MalformedAuthorization) -> Self {
        Self::MalformedAuthorization(kind)
    }
}
