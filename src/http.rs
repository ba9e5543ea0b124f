//! Transport primitives for management API calls.
//!
//! The module exposes [`ApiHttpClient`] alongside the crate-owned [`ApiRequest`] and
//! [`ApiResponse`] so downstream crates can plug in any HTTP stack. Requests are
//! single best-effort round trips: no retries, caching, or connection management happen
//! here. Dropping the returned future cancels the call and releases its connection.

// std
use std::ops::Deref;
// self
use crate::{_prelude::*, distribution::HttpMethod};
#[cfg(feature = "reqwest")] use crate::error::ConfigError;

/// Boxed future returned by [`ApiHttpClient::execute`].
pub type ApiFuture<'a, T> = Pin<Box<dyn Future<Output = T> + 'a + Send>>;

/// Abstraction over HTTP transports capable of executing management API calls.
///
/// Implementations must be `Send + Sync + 'static` so one transport can be shared across
/// clients behind an [`Arc`], and the futures they return must be `Send` so callers can
/// spawn them on multi-threaded executors.
pub trait ApiHttpClient
where
	Self: 'static + Send + Sync,
{
	/// Concrete error emitted by the underlying transport.
	type TransportError: 'static + Send + Sync + StdError;

	/// Sends `request` and buffers the full response.
	///
	/// Every HTTP status, including 4xx and 5xx, must resolve to `Ok`; errors are reserved
	/// for failures that produced no response.
	fn execute(&self, request: ApiRequest) -> ApiFuture<'_, Result<ApiResponse, Self::TransportError>>;
}

/// Outbound request handed to the request signer and then to the transport.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiRequest {
	/// HTTP method.
	pub method: HttpMethod,
	/// Absolute request URL.
	pub url: Url,
	/// Header name/value pairs, in insertion order.
	pub headers: Vec<(String, String)>,
	/// Raw request body.
	pub body: Vec<u8>,
}
impl ApiRequest {
	/// Creates a request without headers or body.
	pub fn new(method: HttpMethod, url: Url) -> Self {
		Self { method, url, headers: Vec::new(), body: Vec::new() }
	}

	/// Appends a header.
	pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
		self.headers.push((name.into(), value.into()));

		self
	}

	/// Replaces the body.
	pub fn with_body(mut self, body: impl Into<Vec<u8>>) -> Self {
		self.body = body.into();

		self
	}

	/// Returns the first header named `name` (case-insensitive).
	pub fn header(&self, name: &str) -> Option<&str> {
		find_header(&self.headers, name)
	}
}

/// Buffered response returned by the transport.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ApiResponse {
	/// HTTP status code.
	pub status: u16,
	/// Canonical reason phrase, when known.
	pub reason: Option<String>,
	/// Header name/value pairs.
	pub headers: Vec<(String, String)>,
	/// Raw response body.
	pub body: Vec<u8>,
}
impl ApiResponse {
	/// Returns the first header named `name` (case-insensitive).
	pub fn header(&self, name: &str) -> Option<&str> {
		find_header(&self.headers, name)
	}

	/// Status line such as `403 Forbidden`.
	pub fn status_line(&self) -> String {
		match self.reason.as_deref() {
			Some(reason) => format!("{} {reason}", self.status),
			None => self.status.to_string(),
		}
	}

	/// Whether the provider reported a failure.
	pub fn is_error(&self) -> bool {
		self.status >= 400
	}
}

fn find_header<'a>(headers: &'a [(String, String)], name: &str) -> Option<&'a str> {
	headers.iter().find(|(key, _)| key.eq_ignore_ascii_case(name)).map(|(_, value)| value.as_str())
}

/// Thin wrapper around [`ReqwestClient`] so shared HTTP behavior lives in one place.
/// Management calls are answered directly, so a custom [`ReqwestClient`] should keep
/// redirect following disabled.
#[cfg(feature = "reqwest")]
#[derive(Clone, Debug)]
pub struct ReqwestHttpClient(pub ReqwestClient);
#[cfg(feature = "reqwest")]
impl ReqwestHttpClient {
	/// Builds a client with redirect following disabled.
	pub fn new() -> Result<Self, ConfigError> {
		let client = ReqwestClient::builder().redirect(reqwest::redirect::Policy::none()).build()?;

		Ok(Self(client))
	}

	/// Wraps an existing reqwest [`ReqwestClient`].
	pub fn with_client(client: ReqwestClient) -> Self {
		Self(client)
	}
}
#[cfg(feature = "reqwest")]
impl AsRef<ReqwestClient> for ReqwestHttpClient {
	fn as_ref(&self) -> &ReqwestClient {
		&self.0
	}
}
#[cfg(feature = "reqwest")]
impl Deref for ReqwestHttpClient {
	type Target = ReqwestClient;

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}
#[cfg(feature = "reqwest")]
impl ApiHttpClient for ReqwestHttpClient {
	type TransportError = ReqwestError;

	fn execute(&self, request: ApiRequest) -> ApiFuture<'_, Result<ApiResponse, ReqwestError>> {
		let client = self.0.clone();

		Box::pin(async move {
			let mut builder = client.request(reqwest_method(request.method), request.url);

			for (name, value) in request.headers {
				builder = builder.header(name, value);
			}

			let response = builder.body(request.body).send().await?;
			let status = response.status();
			let headers = response
				.headers()
				.iter()
				.filter_map(|(name, value)| {
					value.to_str().ok().map(|value| (name.as_str().to_owned(), value.to_owned()))
				})
				.collect();
			let body = response.bytes().await?.to_vec();

			Ok(ApiResponse {
				status: status.as_u16(),
				reason: status.canonical_reason().map(str::to_owned),
				headers,
				body,
			})
		})
	}
}

#[cfg(feature = "reqwest")]
fn reqwest_method(method: HttpMethod) -> reqwest::Method {
	match method {
		HttpMethod::Get => reqwest::Method::GET,
		HttpMethod::Head => reqwest::Method::HEAD,
		HttpMethod::Options => reqwest::Method::OPTIONS,
		HttpMethod::Put => reqwest::Method::PUT,
		HttpMethod::Patch => reqwest::Method::PATCH,
		HttpMethod::Post => reqwest::Method::POST,
		HttpMethod::Delete => reqwest::Method::DELETE,
	}
}
