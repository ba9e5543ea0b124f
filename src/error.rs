//! Client-level error types shared across signing, encoding, and the management API.

// self
use crate::_prelude::*;

/// Client-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

pub(crate) type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Canonical client error exposed by public APIs.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Local configuration problem.
	#[error(transparent)]
	Config(#[from] ConfigError),
	/// Signed URL generation failed.
	#[error(transparent)]
	Signing(#[from] SigningError),
	/// Distribution configuration could not be serialized.
	#[error(transparent)]
	Encode(#[from] EncodeError),
	/// Provider response could not be decoded.
	#[error(transparent)]
	Decode(#[from] DecodeError),
	/// Transport failure (DNS, TCP, TLS).
	#[error(transparent)]
	Transport(#[from] TransportError),
	/// Provider rejected the request with an HTTP status of 400 or above.
	#[error(transparent)]
	Provider(#[from] ProviderError),

	/// External request signer refused or failed to sign the outbound request.
	#[error("Request signer failed to sign the management API request.")]
	RequestSigning {
		/// Signer-specific failure.
		#[source]
		source: BoxError,
	},
}
impl Error {
	/// Wraps a request signer failure inside [`Error`].
	pub fn request_signing(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::RequestSigning { source: Box::new(src) }
	}
}

/// Configuration and validation failures raised by the client.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// HTTP client could not be constructed.
	#[error("HTTP client could not be constructed.")]
	HttpClientBuild {
		/// Underlying transport builder failure.
		#[source]
		source: BoxError,
	},
	/// Signed URL base cannot be parsed.
	#[error("Base URL `{base_url}` is invalid.")]
	InvalidBaseUrl {
		/// Raw base URL that failed to parse.
		base_url: String,
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
	/// Management endpoint cannot be used.
	#[error(transparent)]
	InvalidEndpoint(#[from] crate::api::ApiEndpointError),
	/// Identifier validation failed.
	#[error(transparent)]
	InvalidIdentifier(#[from] crate::auth::IdentifierError),
	/// Private key could not be decoded from PEM.
	#[error("Private key is not a valid PKCS#1 or PKCS#8 PEM document.")]
	InvalidPrivateKey,

	/// Client was built without a URL signer but a signed URL was requested.
	#[error("Client has no URL signer configured.")]
	MissingUrlSigner,
}
impl ConfigError {
	/// Wraps a transport's builder failure inside [`ConfigError`].
	pub fn http_client_build(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::HttpClientBuild { source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for ConfigError {
	fn from(e: ReqwestError) -> Self {
		Self::http_client_build(e)
	}
}

/// Signed URL generation failures.
#[derive(Debug, ThisError)]
pub enum SigningError {
	/// The RSA primitive rejected the digest.
	#[error("RSA signing of the policy digest failed.")]
	Rsa {
		/// Failure reported by the RSA backend.
		#[source]
		source: rsa::Error,
	},
	/// Policy document could not be serialized.
	#[error("Policy document could not be serialized.")]
	Policy(#[from] serde_json::Error),
}

/// XML serialization failure for outbound payloads.
#[derive(Debug, ThisError)]
#[error("Failed to serialize `{root}` to XML.")]
pub struct EncodeError {
	/// Root element that was being serialized.
	pub root: &'static str,
	/// Serializer failure.
	#[source]
	pub source: BoxError,
}
impl EncodeError {
	/// Wraps a serializer failure for the given root element.
	pub fn new(root: &'static str, src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self { root, source: Box::new(src) }
	}
}

/// XML decoding failure, annotated with the path of the offending element.
#[derive(Debug, ThisError)]
#[error("Failed to decode XML at `{path}`.")]
pub struct DecodeError {
	/// Dotted path to the element that failed.
	pub path: String,
	/// Deserializer failure.
	#[source]
	pub source: quick_xml::DeError,
}
impl From<serde_path_to_error::Error<quick_xml::DeError>> for DecodeError {
	fn from(e: serde_path_to_error::Error<quick_xml::DeError>) -> Self {
		let path = e.path().to_string();

		Self { path, source: e.into_inner() }
	}
}

/// Transport failure that produced no HTTP response.
#[derive(Debug, ThisError)]
pub enum TransportError {
	/// Underlying HTTP client reported a network failure (DNS, TCP, TLS, IO).
	#[error("Network error occurred while calling the management endpoint.")]
	Network {
		/// Transport-specific network error.
		#[source]
		source: BoxError,
	},
}
impl TransportError {
	/// Wraps a transport-specific network error.
	pub fn network(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::Network { source: Box::new(src) }
	}
}

/// Structured failure reported by the provider for HTTP statuses of 400 or above.
#[derive(Clone, Debug, PartialEq, Eq, ThisError)]
#[error("Provider rejected the request with HTTP {status_code}: {message}.")]
pub struct ProviderError {
	/// HTTP status code of the response.
	pub status_code: u16,
	/// Provider request identifier, when supplied.
	pub request_id: Option<String>,
	/// Provider error code (e.g. `AccessDenied`).
	pub code: Option<String>,
	/// Fault side reported by the provider (`Sender` or `Receiver`).
	pub kind: Option<String>,
	/// Human-readable message; falls back to the HTTP status line.
	pub message: String,
}
