//! Signing identities: validated identifiers and the credential held by URL signers.

pub mod credential;
pub mod id;

pub use credential::*;
pub use id::*;
