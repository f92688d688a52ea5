//! Permission check over already verified claims.
//!
//! Pure function: no shared state, safe under any number of concurrent requests.
use crate::services::auth::access_jwt::AccessTokenClaims;
use crate::services::auth::error::AuthError;

/// Confirm `required` is granted by `claims` and hand the claims back unchanged.
pub fn enforce(required: &str, claims: AccessTokenClaims) -> Result<AccessTokenClaims, AuthError> {
    if required.trim().is_empty() {
        return Err(AuthError::InvalidPermissionConfiguration(
            "Required permission is not declared.",
        ));
    }

    let Some(granted) = claims.permissions.as_deref() else {
        return Err(AuthError::InvalidPermissionConfiguration(
            "Permissions not included in JWT.",
        ));
    };

    if !granted.iter().any(|p| p == required) {
        return Err(AuthError::Unauthorized);
    }

    Ok(claims)
}
