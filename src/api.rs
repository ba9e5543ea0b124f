//! CloudFront client combining management API calls with signed URL generation.
//!
//! [`CloudFront`] owns the HTTP transport, the external [`RequestSigner`], the validated
//! [`ApiEndpoint`], and an optional [`UrlSigner`]. Management calls and URL signing share
//! nothing but this struct; neither calls into the other.

pub mod create;
pub mod endpoint;

pub use create::*;
pub use endpoint::*;

// self
use crate::{
	_prelude::*,
	error::ConfigError,
	ext::RequestSigner,
	http::ApiHttpClient,
	sign::UrlSigner,
};
#[cfg(feature = "reqwest")] use crate::http::ReqwestHttpClient;

#[cfg(feature = "reqwest")]
/// Client specialized for the crate's default reqwest transport.
pub type ReqwestCloudFront = CloudFront<ReqwestHttpClient>;

/// CloudFront management and signing client.
///
/// Every field is immutable after construction, so one client may serve concurrent callers
/// without additional synchronization.
#[derive(Clone)]
pub struct CloudFront<C>
where
	C: ?Sized + ApiHttpClient,
{
	/// HTTP client used for every management API request.
	pub http_client: Arc<C>,
	/// Signer applied to each management API request before it is sent.
	pub request_signer: Arc<dyn RequestSigner>,
	/// Management API endpoint.
	pub endpoint: ApiEndpoint,
	/// Signed URL generator, when configured.
	pub url_signer: Option<UrlSigner>,
}
impl<C> CloudFront<C>
where
	C: ?Sized + ApiHttpClient,
{
	/// Starts a builder around the given transport and request signer.
	pub fn builder(
		http_client: impl Into<Arc<C>>,
		request_signer: Arc<dyn RequestSigner>,
	) -> CloudFrontBuilder<C> {
		CloudFrontBuilder {
			http_client: http_client.into(),
			request_signer,
			endpoint: None,
			url_signer: None,
		}
	}

	/// Canned-policy signed URL; see [`UrlSigner::canned_signed_url`].
	pub fn canned_signed_url(
		&self,
		path: &str,
		query_string: &str,
		expires: OffsetDateTime,
	) -> Result<Url> {
		self.require_url_signer()?.canned_signed_url(path, query_string, expires)
	}

	/// Legacy direct signed URL; see [`UrlSigner::legacy_signed_url`].
	pub fn legacy_signed_url(
		&self,
		path: &str,
		query_string: &str,
		expires: OffsetDateTime,
	) -> Result<String> {
		Ok(self.require_url_signer()?.legacy_signed_url(path, query_string, expires))
	}

	fn require_url_signer(&self) -> Result<&UrlSigner, ConfigError> {
		self.url_signer.as_ref().ok_or(ConfigError::MissingUrlSigner)
	}
}
impl<C> Debug for CloudFront<C>
where
	C: ?Sized + ApiHttpClient,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("CloudFront")
			.field("endpoint", &self.endpoint)
			.field("url_signer", &self.url_signer)
			.finish_non_exhaustive()
	}
}

/// Builder for [`CloudFront`] clients.
pub struct CloudFrontBuilder<C>
where
	C: ?Sized + ApiHttpClient,
{
	http_client: Arc<C>,
	request_signer: Arc<dyn RequestSigner>,
	endpoint: Option<ApiEndpoint>,
	url_signer: Option<UrlSigner>,
}
impl<C> CloudFrontBuilder<C>
where
	C: ?Sized + ApiHttpClient,
{
	/// Overrides the management endpoint; defaults to [`ApiEndpoint::cloudfront`].
	pub fn endpoint(mut self, endpoint: ApiEndpoint) -> Self {
		self.endpoint = Some(endpoint);

		self
	}

	/// Enables signed URL generation.
	pub fn url_signer(mut self, signer: UrlSigner) -> Self {
		self.url_signer = Some(signer);

		self
	}

	/// Finalizes the client.
	pub fn build(self) -> Result<CloudFront<C>, ConfigError> {
		let endpoint = match self.endpoint {
			Some(endpoint) => endpoint,
			None => ApiEndpoint::cloudfront()?,
		};

		Ok(CloudFront {
			http_client: self.http_client,
			request_signer: self.request_signer,
			endpoint,
			url_signer: self.url_signer,
		})
	}
}

#[cfg(all(test, feature = "reqwest"))]
mod tests {
	// crates.io
	use time::macros::datetime;
	// self
	use super::*;
	use crate::{
		_preludet::*,
		auth::{AccessKeyId, Credential},
		error::Error,
		http::ApiRequest,
	};

	fn noop_signer() -> Arc<dyn RequestSigner> {
		Arc::new(|_: &mut ApiRequest| -> Result<()> { Ok(()) })
	}

	#[test]
	fn signed_urls_require_url_signer() {
		let endpoint = ApiEndpoint::cloudfront().expect("Default endpoint should build.");
		let client = build_reqwest_test_client(endpoint, noop_signer(), None);
		let err = client
			.canned_signed_url("/videos/x.mp4", "", datetime!(2024-01-01 00:00:00 UTC))
			.expect_err("Signing without a URL signer must fail.");

		assert!(matches!(err, Error::Config(ConfigError::MissingUrlSigner)), "{err:?}");
		assert!(matches!(
			client.legacy_signed_url("/videos/x.mp4", "", datetime!(2024-01-01 00:00:00 UTC)),
			Err(Error::Config(ConfigError::MissingUrlSigner))
		));
	}

	#[test]
	fn client_delegates_to_url_signer() {
		let access_key = AccessKeyId::new("AKIDEXAMPLE").expect("Access key should be valid.");
		let signer =
			UrlSigner::from_parts("https://d111111abcdef8.cloudfront.net", Credential::key_less(access_key))
				.expect("Signer should build.");
		let endpoint = ApiEndpoint::cloudfront().expect("Default endpoint should build.");
		let client = build_reqwest_test_client(endpoint, noop_signer(), Some(signer.clone()));
		let expires = datetime!(2024-01-01 00:00:00 UTC);

		assert_eq!(
			client.canned_signed_url("/videos/x.mp4", "a=1", expires).expect("Signing should succeed."),
			signer.canned_signed_url("/videos/x.mp4", "a=1", expires).expect("Signing should succeed."),
		);
		assert_eq!(
			client.legacy_signed_url("/videos/x.mp4", "a=1", expires).expect("Signing should succeed."),
			signer.legacy_signed_url("/videos/x.mp4", "a=1", expires),
		);
		assert_eq!(
			client.endpoint.distribution_url().as_str(),
			"https://cloudfront.amazonaws.com/2014-11-06/distribution",
		);
	}
}
