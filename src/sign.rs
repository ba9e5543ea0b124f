//! Signed URL generation for CloudFront-served resources.
//!
//! [`UrlSigner`] owns an immutable [`SignerConfig`] (base URL plus [`Credential`]) and
//! recomputes everything else per call, so one signer can be shared across threads
//! without synchronization. Two modes exist:
//!
//! - [`UrlSigner::canned_signed_url`] builds a canned policy, hashes it with SHA-1, signs the
//!   digest with RSA PKCS#1 v1.5, and emits URL-safe base64.
//! - [`UrlSigner::legacy_signed_url`] reproduces the older direct format byte for byte so
//!   links issued with it keep resolving. It is not a cryptographic signature.

pub mod canned;
pub mod encoding;
pub mod legacy;
pub mod policy;

pub use encoding::*;
pub use policy::*;

// self
use crate::{_prelude::*, auth::Credential, error::ConfigError};

/// Immutable signing configuration.
#[derive(Clone, Debug)]
pub struct SignerConfig {
	base_url: String,
	parsed_base_url: Url,
	credential: Credential,
}
impl SignerConfig {
	/// Validates `base_url` (e.g. `https://d111111abcdef8.cloudfront.net`) and pairs it with
	/// `credential`.
	///
	/// The raw string is kept as given: it is prefixed verbatim onto resource paths, so a
	/// trailing slash would end up inside the signed resource.
	pub fn new(base_url: impl Into<String>, credential: Credential) -> Result<Self, ConfigError> {
		let base_url = base_url.into();
		let parsed_base_url = Url::parse(&base_url).map_err(|source| {
			ConfigError::InvalidBaseUrl { base_url: base_url.clone(), source }
		})?;

		Ok(Self { base_url, parsed_base_url, credential })
	}

	/// Base URL exactly as configured.
	pub fn base_url(&self) -> &str {
		&self.base_url
	}

	/// Credential used for every signature.
	pub fn credential(&self) -> &Credential {
		&self.credential
	}
}

/// Produces signed URLs from a shared [`SignerConfig`].
#[derive(Clone, Debug)]
pub struct UrlSigner {
	config: Arc<SignerConfig>,
}
impl UrlSigner {
	/// Creates a signer around `config`.
	pub fn new(config: SignerConfig) -> Self {
		Self { config: Arc::new(config) }
	}

	/// Shortcut for [`SignerConfig::new`] followed by [`UrlSigner::new`].
	pub fn from_parts(
		base_url: impl Into<String>,
		credential: Credential,
	) -> Result<Self, ConfigError> {
		SignerConfig::new(base_url, credential).map(Self::new)
	}

	/// Configuration shared by every call.
	pub fn config(&self) -> &SignerConfig {
		&self.config
	}
}
