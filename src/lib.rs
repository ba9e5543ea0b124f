//! CloudFront distribution management and signed URL generation.
//!
//! Distribution configs travel as count-plus-items XML, signed URLs use canned-policy RSA
//! signatures, and management calls go through a pluggable HTTP transport.

#![deny(clippy::all, missing_docs, unused_crate_dependencies)]

pub mod api;
pub mod auth;
pub mod distribution;
pub mod error;
pub mod ext;
pub mod http;
pub mod obs;
pub mod sign;
#[cfg(all(any(test, feature = "test"), feature = "reqwest"))]
pub mod _preludet {
	//! Convenience re-exports and helpers for integration tests; enabled via `cfg(test)` or the
	//! `test` crate feature.

	pub use crate::_prelude::*;

	// self
	use crate::{
		api::{ApiEndpoint, CloudFront},
		ext::RequestSigner,
		http::ReqwestHttpClient,
		sign::UrlSigner,
	};

	/// Client type alias used by reqwest-backed integration tests.
	pub type ReqwestTestClient = CloudFront<ReqwestHttpClient>;

	/// Builds a reqwest HTTP client that accepts the self-signed certificates produced by
	/// `httpmock` during tests.
	pub fn test_reqwest_http_client() -> ReqwestHttpClient {
		let client = ReqwestClient::builder()
			.redirect(reqwest::redirect::Policy::none())
			.danger_accept_invalid_certs(true)
			.danger_accept_invalid_hostnames(true)
			.build()
			.expect("Failed to build insecure Reqwest client for tests.");

		ReqwestHttpClient::with_client(client)
	}

	/// Constructs a [`CloudFront`] client pointed at `endpoint`, backed by the reqwest
	/// transport used across integration tests.
	pub fn build_reqwest_test_client(
		endpoint: ApiEndpoint,
		request_signer: Arc<dyn RequestSigner>,
		url_signer: Option<UrlSigner>,
	) -> ReqwestTestClient {
		let builder = ReqwestTestClient::builder(test_reqwest_http_client(), request_signer)
			.endpoint(endpoint);
		let builder = match url_signer {
			Some(signer) => builder.url_signer(signer),
			None => builder,
		};

		builder.build().expect("Failed to build CloudFront client for tests.")
	}
}

mod _prelude {
	pub use std::{
		error::Error as StdError,
		fmt::{Debug, Display, Formatter, Result as FmtResult},
		future::Future,
		marker::PhantomData,
		pin::Pin,
		str::FromStr,
		sync::Arc,
	};

	#[cfg(feature = "reqwest")]
	pub use reqwest::{Client as ReqwestClient, Error as ReqwestError};
	pub use serde::{Deserialize, Serialize};
	pub use thiserror::Error as ThisError;
	pub use time::{Duration, OffsetDateTime};
	pub use url::Url;

	pub use crate::error::{Error, Result};
}

#[cfg(feature = "reqwest")] pub use reqwest;
pub use rsa;
pub use url;
#[cfg(all(test, feature = "reqwest"))] use {color_eyre as _, httpmock as _, tokio as _};
