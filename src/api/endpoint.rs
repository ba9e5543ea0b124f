//! Management API endpoint configuration.

// self
use crate::_prelude::*;

/// Default management API host.
pub const DEFAULT_BASE_URL: &str = "https://cloudfront.amazonaws.com";
/// API version the schema in [`crate::distribution`] targets.
pub const DEFAULT_API_VERSION: &str = "2014-11-06";

/// Errors raised while constructing or validating endpoints.
#[derive(Debug, PartialEq, Eq, ThisError)]
pub enum ApiEndpointError {
	/// Base URL could not be parsed.
	#[error("Endpoint base URL `{url}` is invalid: {reason}.")]
	InvalidUrl {
		/// Raw URL that failed to parse.
		url: String,
		/// Parser message.
		reason: String,
	},
	/// Endpoints must use HTTP(S).
	#[error("Endpoint base URL must use http or https: {url}.")]
	UnsupportedScheme {
		/// URL that failed validation.
		url: String,
	},
	/// Base URL lacks a host.
	#[error("Endpoint base URL has no host: {url}.")]
	MissingHost {
		/// URL that failed validation.
		url: String,
	},
	/// API version must be a single, non-empty path segment.
	#[error("API version `{version}` must be a single non-empty path segment.")]
	InvalidApiVersion {
		/// Version that failed validation.
		version: String,
	},
}

/// Immutable endpoint for management API calls.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiEndpoint {
	base_url: Url,
	api_version: String,
	distribution_url: Url,
}
impl ApiEndpoint {
	/// Creates a new builder seeded with the public CloudFront endpoint.
	pub fn builder() -> ApiEndpointBuilder {
		ApiEndpointBuilder::new()
	}

	/// Public CloudFront endpoint at [`DEFAULT_API_VERSION`].
	pub fn cloudfront() -> Result<Self, ApiEndpointError> {
		Self::builder().build()
	}

	/// Base URL of the service.
	pub fn base_url(&self) -> &Url {
		&self.base_url
	}

	/// API version path segment.
	pub fn api_version(&self) -> &str {
		&self.api_version
	}

	/// `POST` target for distribution creation: `<base>/<api-version>/distribution`.
	pub fn distribution_url(&self) -> &Url {
		&self.distribution_url
	}
}

/// Builder for [`ApiEndpoint`] values.
#[derive(Debug)]
pub struct ApiEndpointBuilder {
	/// Service base URL; [`DEFAULT_BASE_URL`] when unset.
	pub base_url: Option<String>,
	/// API version path segment.
	pub api_version: String,
}
impl ApiEndpointBuilder {
	/// Creates a builder targeting the public endpoint.
	pub fn new() -> Self {
		Self { base_url: None, api_version: DEFAULT_API_VERSION.into() }
	}

	/// Overrides the service base URL (e.g. a regional endpoint or a local mock).
	pub fn base_url(mut self, url: impl Into<String>) -> Self {
		self.base_url = Some(url.into());

		self
	}

	/// Overrides the API version path segment.
	pub fn api_version(mut self, version: impl Into<String>) -> Self {
		self.api_version = version.into();

		self
	}

	/// Consumes the builder and validates the resulting endpoint.
	pub fn build(self) -> Result<ApiEndpoint, ApiEndpointError> {
		let raw = self.base_url.unwrap_or_else(|| DEFAULT_BASE_URL.into());
		let mut base_url = Url::parse(&raw)
			.map_err(|e| ApiEndpointError::InvalidUrl { url: raw.clone(), reason: e.to_string() })?;

		validate_base_url(&base_url)?;
		validate_api_version(&self.api_version)?;

		if !base_url.path().ends_with('/') {
			let path = format!("{}/", base_url.path());

			base_url.set_path(&path);
		}

		let distribution_url =
			base_url.join(&format!("{}/distribution", self.api_version)).map_err(|e| {
				ApiEndpointError::InvalidUrl { url: base_url.to_string(), reason: e.to_string() }
			})?;

		Ok(ApiEndpoint { base_url, api_version: self.api_version, distribution_url })
	}
}
impl Default for ApiEndpointBuilder {
	fn default() -> Self {
		Self::new()
	}
}

fn validate_base_url(url: &Url) -> Result<(), ApiEndpointError> {
	if !matches!(url.scheme(), "http" | "https") {
		return Err(ApiEndpointError::UnsupportedScheme { url: url.to_string() });
	}
	if url.host_str().is_none_or(str::is_empty) {
		return Err(ApiEndpointError::MissingHost { url: url.to_string() });
	}

	Ok(())
}

fn validate_api_version(version: &str) -> Result<(), ApiEndpointError> {
	if version.is_empty() || version.contains('/') || version.chars().any(char::is_whitespace) {
		Err(ApiEndpointError::InvalidApiVersion { version: version.into() })
	} else {
		Ok(())
	}
}
