//! Distribution creation and provider error decoding.

// self
use crate::{
	_prelude::*,
	api::CloudFront,
	distribution::{self, DistributionConfig, HttpMethod},
	error::{ProviderError, TransportError},
	http::{ApiHttpClient, ApiRequest, ApiResponse},
	obs::{OperationKind, OperationSpan},
};

/// Distribution accepted by the management API.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CreatedDistribution {
	/// Distribution id (e.g. `EDFDVBD6EXAMPLE`).
	pub id: String,
	/// Deployment status, `InProgress` right after creation.
	pub status: String,
	/// Assigned `*.cloudfront.net` domain name.
	pub domain_name: String,
	/// `ETag` header, required for later updates.
	pub etag: Option<String>,
	/// `Location` header pointing at the new resource.
	pub location: Option<String>,
}
impl CreatedDistribution {
	fn from_response(response: &ApiResponse) -> Result<Self> {
		#[derive(Deserialize)]
		struct Wire {
			#[serde(rename = "Id")]
			id: String,
			#[serde(rename = "Status")]
			status: String,
			#[serde(rename = "DomainName")]
			domain_name: String,
		}

		let wire: Wire = distribution::from_xml(&String::from_utf8_lossy(&response.body))?;

		Ok(Self {
			id: wire.id,
			status: wire.status,
			domain_name: wire.domain_name,
			etag: response.header("etag").map(str::to_owned),
			location: response.header("location").map(str::to_owned),
		})
	}
}

impl<C> CloudFront<C>
where
	C: ?Sized + ApiHttpClient,
{
	/// Submits `config` to `POST <base>/<api-version>/distribution`.
	///
	/// An empty `caller_reference` is replaced with the current epoch seconds. The request is
	/// signed by the configured [`RequestSigner`](crate::ext::RequestSigner) and sent once;
	/// any status of 400 or above becomes [`Error::Provider`].
	pub async fn create_distribution(
		&self,
		config: DistributionConfig,
	) -> Result<CreatedDistribution> {
		let span = OperationSpan::start(OperationKind::CreateDistribution, "create_distribution");
		let result = span.instrument(self.submit_distribution(config)).await;

		span.finish(result)
	}

	async fn submit_distribution(
		&self,
		mut config: DistributionConfig,
	) -> Result<CreatedDistribution> {
		if config.caller_reference.is_empty() {
			config.caller_reference = OffsetDateTime::now_utc().unix_timestamp().to_string();
		}

		let body = config.to_xml()?;
		let mut request = ApiRequest::new(HttpMethod::Post, self.endpoint.distribution_url().clone())
			.with_header("Content-Type", "application/xml")
			.with_body(body);

		self.request_signer.sign_request(&mut request)?;

		let response = self.http_client.execute(request).await.map_err(TransportError::network)?;

		if response.is_error() {
			return Err(provider_error(&response).into());
		}

		CreatedDistribution::from_response(&response)
	}
}

#[derive(Default, Deserialize)]
struct ErrorResponseWire {
	#[serde(rename = "Error", default)]
	error: ErrorWire,
	#[serde(rename = "RequestId", default)]
	request_id: Option<String>,
}

#[derive(Default, Deserialize)]
struct ErrorWire {
	#[serde(rename = "Type", default)]
	kind: Option<String>,
	#[serde(rename = "Code", default)]
	code: Option<String>,
	#[serde(rename = "Message", default)]
	message: Option<String>,
}

/// Builds a [`ProviderError`] from a failed response.
///
/// Bodies that do not decode as `<ErrorResponse>` still produce an error carrying the
/// status line as message.
pub fn provider_error(response: &ApiResponse) -> ProviderError {
	let wire = distribution::from_xml::<ErrorResponseWire>(&String::from_utf8_lossy(&response.body))
		.unwrap_or_default();
	let request_id = wire
		.request_id
		.filter(|id| !id.is_empty())
		.or_else(|| response.header("x-amz-request-id").map(str::to_owned));
	let message =
		wire.error.message.filter(|message| !message.is_empty()).unwrap_or_else(|| response.status_line());

	ProviderError {
		status_code: response.status,
		request_id,
		code: wire.error.code,
		kind: wire.error.kind,
		message,
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn provider_error_reads_error_response() {
		let response = ApiResponse {
			status: 403,
			reason: Some("Forbidden".into()),
			headers: Vec::new(),
			body: b"<ErrorResponse xmlns=\"http://cloudfront.amazonaws.com/doc/2014-11-06/\"><Error><Type>Sender</Type><Code>AccessDenied</Code><Message>User is not authorized.</Message></Error><RequestId>b1e8a2f0-0000-4000-8000-000000000001</RequestId></ErrorResponse>".to_vec(),
		};
		let err = provider_error(&response);

		assert_eq!(err.status_code, 403);
		assert_eq!(err.request_id.as_deref(), Some("b1e8a2f0-0000-4000-8000-000000000001"));
		assert_eq!(err.code.as_deref(), Some("AccessDenied"));
		assert_eq!(err.kind.as_deref(), Some("Sender"));
		assert_eq!(err.message, "User is not authorized.");
	}

	#[test]
	fn provider_error_falls_back_to_status_line() {
		let response = ApiResponse {
			status: 503,
			reason: Some("Service Unavailable".into()),
			headers: vec![("x-amz-request-id".into(), "req-503".into())],
			body: b"upstream unavailable".to_vec(),
		};
		let err = provider_error(&response);

		assert_eq!(err.message, "503 Service Unavailable");
		assert_eq!(err.request_id.as_deref(), Some("req-503"));
		assert_eq!(err.code, None);
	}
}
