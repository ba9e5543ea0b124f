//! Credentials held by URL signers for their whole lifetime.

// crates.io
use rsa::{RsaPrivateKey, pkcs1::DecodeRsaPrivateKey, pkcs8::DecodePrivateKey};
// self
use crate::{
	_prelude::*,
	auth::{AccessKeyId, KeyPairId},
	error::ConfigError,
};

/// Redacted RSA private key wrapper keeping key material out of logs.
///
/// The key is shared read-only behind an [`Arc`], so clones of a signer never copy it.
#[derive(Clone)]
pub struct SigningKey(Arc<RsaPrivateKey>);
impl SigningKey {
	/// Wraps an already-decoded RSA private key.
	pub fn new(key: RsaPrivateKey) -> Self {
		Self(Arc::new(key))
	}

	/// Decodes a PEM document holding either a PKCS#1 (`RSA PRIVATE KEY`) or PKCS#8
	/// (`PRIVATE KEY`) RSA key.
	pub fn from_pem(pem: &str) -> Result<Self, ConfigError> {
		RsaPrivateKey::from_pkcs1_pem(pem)
			.or_else(|_| RsaPrivateKey::from_pkcs8_pem(pem))
			.map(Self::new)
			.map_err(|_| ConfigError::InvalidPrivateKey)
	}

	/// Returns the inner key. Callers must avoid logging it.
	pub fn expose(&self) -> &RsaPrivateKey {
		&self.0
	}
}
impl Debug for SigningKey {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_tuple("SigningKey").field(&"<redacted>").finish()
	}
}

/// Identity used to produce signed URLs.
#[derive(Clone, Debug)]
pub enum Credential {
	/// Full signing mode: an RSA private key plus the key-pair id CloudFront verifies with.
	Signing {
		/// Private half of the CloudFront key pair.
		key: SigningKey,
		/// Identifier of the key pair registered with CloudFront.
		key_pair_id: KeyPairId,
	},
	/// Degraded mode without a private key.
	///
	/// Signatures produced in this mode are the bare SHA-1 digest of the policy. CloudFront
	/// rejects them; the mode exists for local testing and pass-through URLs only.
	KeyLess {
		/// Access key id emitted as `Key-Pair-Id`.
		access_key: AccessKeyId,
	},
}
impl Credential {
	/// Builds a full signing credential.
	pub fn signing(key: SigningKey, key_pair_id: KeyPairId) -> Self {
		Self::Signing { key, key_pair_id }
	}

	/// Decodes `pem` and pairs it with `key_pair_id`.
	pub fn from_pem(pem: &str, key_pair_id: impl AsRef<str>) -> Result<Self, ConfigError> {
		let key = SigningKey::from_pem(pem)?;
		let key_pair_id = KeyPairId::new(key_pair_id)?;

		Ok(Self::signing(key, key_pair_id))
	}

	/// Builds a key-less credential; see [`Credential::KeyLess`].
	pub fn key_less(access_key: AccessKeyId) -> Self {
		Self::KeyLess { access_key }
	}

	/// Value emitted as the `Key-Pair-Id` query parameter.
	pub fn key_pair_id(&self) -> &str {
		match self {
			Self::Signing { key_pair_id, .. } => key_pair_id.as_ref(),
			Self::KeyLess { access_key } => access_key.as_ref(),
		}
	}

	/// Returns the private key, if this credential carries one.
	pub fn key(&self) -> Option<&SigningKey> {
		match self {
			Self::Signing { key, .. } => Some(key),
			Self::KeyLess { .. } => None,
		}
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn key_less_uses_access_key_as_key_pair_id() {
		let access_key = AccessKeyId::new("AKIDEXAMPLE").expect("Access key should be valid.");
		let credential = Credential::key_less(access_key);

		assert_eq!(credential.key_pair_id(), "AKIDEXAMPLE");
		assert!(credential.key().is_none());
	}

	#[test]
	fn from_pem_rejects_garbage() {
		let err = Credential::from_pem("not a key", "APKAEXAMPLE")
			.expect_err("Garbage PEM must be rejected.");

		assert!(matches!(err, ConfigError::InvalidPrivateKey));
	}

	#[test]
	fn from_pem_rejects_inconsistent_key() {
		let pem = include_str!("../../tests/fixtures/tampered_key.pem");
		let err = SigningKey::from_pem(pem).expect_err("Key with a mismatched exponent must be rejected.");

		assert!(matches!(err, ConfigError::InvalidPrivateKey));
	}

	#[test]
	fn signing_key_debug_is_redacted() {
		let pem = include_str!("../../tests/fixtures/test_key.pem");
		let key = SigningKey::from_pem(pem).expect("Fixture key should decode.");

		assert_eq!(format!("{key:?}"), "SigningKey(\"<redacted>\")");
	}
}
