//! `Authorization: Bearer <token>` header parsing.

use axum::http::{HeaderMap, header};

use crate::services::auth::error::MalformedAuthorization;

/// Pull the bearer token out of the request headers.
///
/// The header must be exactly two whitespace separated segments: the
/// `Bearer` scheme (case-insensitive) and the token.
pub fn extract(headers: &HeaderMap) -> Result<&str, MalformedAuthorization> {
    let value = headers
        .get(header::AUTHORIZATION)
        .ok_or(MalformedAuthorization::HeaderMissing)?;

    // Non visible-ASCII header values cannot carry a JWT anyway.
    let value = value
        .to_str()
        .map_err(|_| MalformedAuthorization::ExtraSegments)?;

    let mut parts = value.split_whitespace();

    let scheme = parts.next().ok_or(MalformedAuthorization::HeaderMissing)?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return Err(MalformedAuthorization::InvalidScheme);
    }

    let token = parts.next().ok_or(MalformedAuthorization::TokenMissing)?;

    if parts.next().is_some() {
        return Err(MalformedAuthorization::ExtraSegments);
    }

    Ok(token)
}
