//! Legacy direct signed URLs.
//!
//! Kept only so previously issued links keep resolving. The policy is assembled by string
//! concatenation (its `Resource` value is never closed with a quote), the expiry is not
//! truncated, and the `Signature` parameter is the unsigned SHA-1 digest in standard base64
//! without URL-safe substitution. None of that may be "fixed" without breaking those links,
//! and none of it is accepted by CloudFront's canned-policy verifier.

// std
use std::convert::Infallible;
// crates.io
use sha1::{Digest, Sha1};
// self
use crate::{
	_prelude::*,
	obs::{OperationKind, OperationSpan},
	sign::{UrlSigner, encoding},
};

impl UrlSigner {
	/// Creates a URL in the legacy direct format.
	///
	/// The result is `base_url + path + "?" + query_string` followed by `&Expires=`,
	/// `&Signature=`, and `&Key-Pair-Id=`, concatenated verbatim.
	pub fn legacy_signed_url(
		&self,
		path: &str,
		query_string: &str,
		expires: OffsetDateTime,
	) -> String {
		let span = OperationSpan::start(OperationKind::LegacySignedUrl, "legacy_signed_url");
		let result = span.in_scope(|| {
			let epoch = expires.unix_timestamp();
			let policy = legacy_policy(path, query_string, epoch);
			let signature = encoding::standard_base64(&Sha1::digest(policy.as_bytes()));

			Ok::<_, Infallible>(format!(
				"{}{path}?{query_string}&Expires={epoch}&Signature={signature}&Key-Pair-Id={}",
				self.config().base_url(),
				self.config().credential().key_pair_id(),
			))
		});

		let Ok(url) = span.finish(result);

		url
	}
}

/// Legacy policy text. The missing quote after the resource is part of the format.
pub fn legacy_policy(path: &str, query_string: &str, epoch: i64) -> String {
	String::from("{\"Statement\":[{\"Resource\":\"")
		+ path + "?" + query_string
		+ ",\"Condition\":{\"DateLessThan\":{\"AWS:EpochTime\":"
		+ &epoch.to_string()
		+ "}}}]}"
}

#[cfg(test)]
mod tests {
	// crates.io
	use time::macros::datetime;
	// self
	use super::*;
	use crate::auth::{AccessKeyId, Credential};

	#[test]
	fn legacy_policy_matches_issued_format() {
		assert_eq!(
			legacy_policy("/videos/x.mp4", "a=1", 1_704_067_200),
			"{\"Statement\":[{\"Resource\":\"/videos/x.mp4?a=1,\"Condition\":{\"DateLessThan\":{\"AWS:EpochTime\":1704067200}}}]}",
		);
	}

	#[test]
	fn legacy_url_uses_unsubstituted_base64() {
		let access_key = AccessKeyId::new("AKIDEXAMPLE").expect("Access key should be valid.");
		let signer = UrlSigner::from_parts(
			"https://d111111abcdef8.cloudfront.net",
			Credential::key_less(access_key),
		)
		.expect("Signer should build.");
		let url = signer.legacy_signed_url(
			"/videos/x.mp4",
			"a=1",
			datetime!(2024-01-01 00:00:00.5 UTC),
		);

		assert_eq!(
			url,
			"https://d111111abcdef8.cloudfront.net/videos/x.mp4?a=1&Expires=1704067200&Signature=+El0ijXmwn4lfKkHWH89zBc+HNg=&Key-Pair-Id=AKIDEXAMPLE",
		);
	}
}
