//! Public extension contracts.
//!
//! The crate ships no request-signing protocol of its own; management API calls are signed
//! by a caller-supplied [`RequestSigner`] so the protocol can evolve independently.

pub mod request_signer;

pub use request_signer::*;
