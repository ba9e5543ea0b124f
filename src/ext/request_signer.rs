//! Request signing contract applied to every management API call before transmission.

// self
use crate::{_prelude::*, http::ApiRequest};

/// Attaches authentication (headers, query parameters) to an outbound [`ApiRequest`].
///
/// The client treats implementations as opaque: it builds the request, hands it to the
/// signer once, and sends whatever comes back. Failures should be wrapped with
/// [`Error::request_signing`].
pub trait RequestSigner
where
	Self: Send + Sync,
{
	/// Signs `request` in place.
	fn sign_request(&self, request: &mut ApiRequest) -> Result<()>;
}
impl<F> RequestSigner for F
where
	F: Send + Sync + Fn(&mut ApiRequest) -> Result<()>,
{
	fn sign_request(&self, request: &mut ApiRequest) -> Result<()> {
		self(request)
	}
}
