//! Where the identity provider's signing keys come from.
pub mod cached;
pub mod remote;
pub mod source;

pub use cached::CachedKeySource;
pub use remote::RemoteJwks;
pub use source::{KeySetError, KeySource};
