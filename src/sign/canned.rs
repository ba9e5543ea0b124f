//! Canned-policy signed URLs (RSA-SHA1 over a single-statement policy).

// crates.io
use rsa::Pkcs1v15Sign;
use sha1::{Digest, Sha1};
// self
use crate::{
	_prelude::*,
	auth::Credential,
	error::SigningError,
	obs::{OperationKind, OperationSpan},
	sign::{CannedPolicy, UrlSigner, encoding},
};

impl UrlSigner {
	/// Creates a canned-policy signed URL for `path`, valid until `expires`.
	///
	/// `query_string` is the caller's raw query (without `?`); pass `""` when there is none.
	/// The returned URL keeps the base URL's scheme and host, replaces its path with `path`,
	/// and appends `Expires`, `Signature`, and `Key-Pair-Id` after the caller's parameters.
	///
	/// With a [`Credential::KeyLess`] credential the `Signature` is the bare policy digest,
	/// which CloudFront does not accept.
	pub fn canned_signed_url(
		&self,
		path: &str,
		query_string: &str,
		expires: OffsetDateTime,
	) -> Result<Url> {
		let span = OperationSpan::start(OperationKind::CannedSignedUrl, "canned_signed_url");

		span.finish(span.in_scope(|| self.sign_canned(path, query_string, expires)))
	}

	/// Resource string the canned policy protects.
	///
	/// With a query string the resource is `path?query` and the base URL is left out;
	/// without one it is `base_url + path`. CloudFront's canned-policy verifier expects
	/// exactly this asymmetry.
	pub fn canned_resource(&self, path: &str, query_string: &str) -> String {
		if query_string.is_empty() {
			format!("{}{path}", self.config().base_url())
		} else {
			format!("{path}?{query_string}")
		}
	}

	/// Signs canned-policy bytes and returns the URL-safe base64 signature.
	pub fn sign_policy(&self, policy: &[u8]) -> Result<String, SigningError> {
		let digest = Sha1::digest(policy);
		let signature = match self.config().credential() {
			// Key consistency is checked once when the PEM is decoded.
			Credential::Signing { key, .. } => key
				.expose()
				.sign(Pkcs1v15Sign::new::<Sha1>(), &digest)
				.map_err(|source| SigningError::Rsa { source })?,
			Credential::KeyLess { .. } => digest.to_vec(),
		};

		Ok(encoding::url_safe_base64(&signature))
	}

	fn sign_canned(&self, path: &str, query_string: &str, expires: OffsetDateTime) -> Result<Url> {
		let resource = self.canned_resource(path, query_string);
		let policy = CannedPolicy::new(&resource, expires);
		let signature = self.sign_policy(&policy.to_json().map_err(SigningError::from)?)?;
		let mut query = String::new();

		if !query_string.is_empty() {
			query.push_str(query_string);
			query.push('&');
		}

		query.push_str(&format!(
			"Expires={}&Signature={signature}&Key-Pair-Id={}",
			policy.epoch_time(),
			self.config().credential().key_pair_id(),
		));

		let mut url = self.config().parsed_base_url.clone();

		url.set_path(path);
		url.set_query(Some(&query));
		url.set_fragment(None);

		Ok(url)
	}
}

#[cfg(test)]
mod tests {
	// crates.io
	use time::macros::datetime;
	// self
	use super::*;
	use crate::auth::AccessKeyId;

	const BASE_URL: &str = "https://d111111abcdef8.cloudfront.net";

	fn key_less_signer() -> UrlSigner {
		let access_key = AccessKeyId::new("AKIDEXAMPLE").expect("Access key should be valid.");

		UrlSigner::from_parts(BASE_URL, Credential::key_less(access_key))
			.expect("Signer should build.")
	}

	#[test]
	fn resource_asymmetry_is_preserved() {
		let signer = key_less_signer();

		assert_eq!(
			signer.canned_resource("/videos/x.mp4", ""),
			"https://d111111abcdef8.cloudfront.net/videos/x.mp4",
		);
		assert_eq!(signer.canned_resource("/videos/x.mp4", "a=1"), "/videos/x.mp4?a=1");
	}

	#[test]
	fn key_less_signature_is_policy_digest() {
		let url = key_less_signer()
			.canned_signed_url("/videos/x.mp4", "", datetime!(2024-01-01 00:00:00 UTC))
			.expect("Key-less signing should succeed.");

		assert_eq!(
			url.as_str(),
			"https://d111111abcdef8.cloudfront.net/videos/x.mp4?Expires=1704067200&Signature=gmgZY9Dy67qxspdvpRFZD6IzJ34_&Key-Pair-Id=AKIDEXAMPLE",
		);
	}

	#[test]
	fn caller_query_precedes_signature_parameters() {
		let url = key_less_signer()
			.canned_signed_url("/videos/x.mp4", "a=1", datetime!(2024-01-01 00:00:00 UTC))
			.expect("Key-less signing should succeed.");

		assert!(
			url.query().is_some_and(|query| query.starts_with("a=1&Expires=1704067200&Signature=")),
			"{url}",
		);
	}
}
