//! Distribution configuration schema and its XML wire form.
//!
//! Fields mirror the `DistributionConfig` document accepted by the management API. Every
//! repeated field goes through [`list`], so callers work with plain vectors while the wire
//! carries CloudFront's count-plus-items shape.

pub mod behavior;
pub mod list;
pub mod origin;

pub use behavior::*;
pub use list::{Encoded, ListTag, TaggedList, encode};
pub use origin::*;

// crates.io
use serde::de::DeserializeOwned;
// self
use crate::{
	_prelude::*,
	distribution::list::{CacheBehaviorTag, CnameTag, CustomErrorResponseTag, OriginTag},
	error::{DecodeError, EncodeError},
};

/// Alternate domain names, wrapped in `<CNAME>` on the wire.
pub type Aliases = TaggedList<String, CnameTag>;
/// Origins, wrapped in `<Origin>` on the wire.
pub type Origins = TaggedList<Origin, OriginTag>;
/// Path-specific cache behaviors, wrapped in `<CacheBehavior>` on the wire.
pub type CacheBehaviors = TaggedList<CacheBehavior, CacheBehaviorTag>;
/// Custom error pages, wrapped in `<CustomErrorResponse>` on the wire.
pub type CustomErrorResponses = TaggedList<CustomErrorResponse, CustomErrorResponseTag>;

/// Root document submitted when creating a distribution.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DistributionConfig {
	/// Idempotency token; filled with the current epoch seconds when left empty.
	#[serde(rename = "CallerReference")]
	pub caller_reference: String,
	/// Alternate domain names.
	#[serde(rename = "Aliases")]
	pub aliases: Aliases,
	/// Object returned for requests to the root URL.
	#[serde(rename = "DefaultRootObject", default)]
	pub default_root_object: String,
	/// Origins the distribution fetches from.
	#[serde(rename = "Origins")]
	pub origins: Origins,
	/// Behavior applied when no path pattern matches.
	#[serde(rename = "DefaultCacheBehavior")]
	pub default_cache_behavior: CacheBehavior,
	/// Free-form comment.
	#[serde(rename = "Comment", default)]
	pub comment: String,
	/// Path-specific behaviors, evaluated in order.
	#[serde(rename = "CacheBehaviors")]
	pub cache_behaviors: CacheBehaviors,
	/// Custom error pages.
	#[serde(rename = "CustomErrorResponses")]
	pub custom_error_responses: CustomErrorResponses,
	/// Viewer restrictions.
	#[serde(rename = "Restrictions")]
	pub restrictions: Restrictions,
	/// Access log settings.
	#[serde(rename = "Logging")]
	pub logging: Logging,
	/// TLS certificate settings; CloudFront's default certificate applies when absent.
	#[serde(rename = "ViewerCertificate", default, skip_serializing_if = "Option::is_none")]
	pub viewer_certificate: Option<ViewerCertificate>,
	/// `PriceClass_All`, `PriceClass_200`, or `PriceClass_100`.
	#[serde(rename = "PriceClass")]
	pub price_class: String,
	/// Whether the distribution serves traffic.
	#[serde(rename = "Enabled")]
	pub enabled: bool,
}
impl DistributionConfig {
	/// Root element name of the wire document.
	pub const ROOT: &'static str = "DistributionConfig";

	/// Serializes the configuration into its XML wire form.
	pub fn to_xml(&self) -> Result<String, EncodeError> {
		to_xml(Self::ROOT, self)
	}
}

/// Replacement page served for an origin error status.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomErrorResponse {
	/// Origin status code being replaced.
	#[serde(rename = "ErrorCode")]
	pub error_code: u16,
	/// Path of the replacement page.
	#[serde(rename = "ResponsePagePath")]
	pub response_page_path: String,
	/// Status code returned to viewers.
	#[serde(rename = "ResponseCode")]
	pub response_code: u16,
	/// Seconds the error response stays cached.
	#[serde(rename = "ErrorCachingMinTTL")]
	pub error_caching_min_ttl: u64,
}

/// Viewer restrictions container.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Restrictions {
	/// Country-level restriction.
	#[serde(rename = "GeoRestriction")]
	pub geo_restriction: GeoRestriction,
}

/// Access log settings.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Logging {
	/// Whether access logs are written.
	#[serde(rename = "Enabled")]
	pub enabled: bool,
	/// Include cookies in access logs.
	#[serde(rename = "IncludeCookies")]
	pub include_cookies: bool,
	/// Target bucket, e.g. `logs.s3.amazonaws.com`.
	#[serde(rename = "Bucket")]
	pub bucket: String,
	/// Key prefix for log objects.
	#[serde(rename = "Prefix")]
	pub prefix: String,
}

/// TLS certificate settings.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewerCertificate {
	/// IAM server certificate id.
	#[serde(rename = "IAMCertificateId", default, skip_serializing_if = "Option::is_none")]
	pub iam_certificate_id: Option<String>,
	/// Use the `*.cloudfront.net` certificate.
	#[serde(rename = "CloudFrontDefaultCertificate", default, skip_serializing_if = "is_false")]
	pub cloudfront_default_certificate: bool,
	/// `sni-only` or `vip`.
	#[serde(rename = "SSLSupportMethod")]
	pub ssl_support_method: String,
	/// `SSLv3` or `TLSv1`.
	#[serde(rename = "MinimumProtocolVersion")]
	pub minimum_protocol_version: String,
}

/// Serializes `value` under the root element `root`.
pub fn to_xml<T>(root: &'static str, value: &T) -> Result<String, EncodeError>
where
	T: ?Sized + Serialize,
{
	quick_xml::se::to_string_with_root(root, value).map_err(|e| EncodeError::new(root, e))
}

/// Decodes an XML document, reporting the path of the element that failed.
pub fn from_xml<T>(xml: &str) -> Result<T, DecodeError>
where
	T: DeserializeOwned,
{
	let mut deserializer = quick_xml::de::Deserializer::from_str(xml);

	Ok(serde_path_to_error::deserialize(&mut deserializer)?)
}

fn is_false(value: &bool) -> bool {
	!value
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn empty_collections_keep_their_containers() {
		let xml = DistributionConfig::default().to_xml().expect("Config should serialize.");

		assert!(xml.starts_with("<DistributionConfig>"), "{xml}");
		assert!(xml.contains("<Aliases><Quantity>0</Quantity></Aliases>"), "{xml}");
		assert!(xml.contains("<CacheBehaviors><Quantity>0</Quantity></CacheBehaviors>"), "{xml}");
		assert!(
			xml.contains("<CustomErrorResponses><Quantity>0</Quantity></CustomErrorResponses>"),
			"{xml}"
		);
		assert!(
			xml.contains("<Restrictions><GeoRestriction><RestrictionType>none</RestrictionType><Quantity>0</Quantity></GeoRestriction></Restrictions>"),
			"{xml}"
		);
		assert!(!xml.contains("ViewerCertificate"), "{xml}");
	}

	#[test]
	fn from_xml_reports_failing_path() {
		let err = from_xml::<Aliases>("<Aliases><Quantity>many</Quantity></Aliases>")
			.expect_err("Non-numeric quantity must fail.");

		assert!(err.path.contains("Quantity"), "{}", err.path);
	}
}
