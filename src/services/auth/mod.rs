pub mod access_jwt;
pub mod bearer;
pub mod error;
pub mod factory;
pub mod guard;
pub mod jwks;
pub mod permission;

pub use access_jwt::AccessTokenClaims;
pub use error::AuthError;
pub use factory::build_auth_guard;
pub use guard::AuthGuard;
