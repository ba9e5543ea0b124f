//! Origin definitions referenced by cache behaviors.

// self
use crate::_prelude::*;

/// Backend CloudFront fetches content from.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Origin {
	/// Unique id referenced by [`CacheBehavior::target_origin_id`](crate::distribution::CacheBehavior::target_origin_id).
	#[serde(rename = "Id")]
	pub id: String,
	/// Origin host name.
	#[serde(rename = "DomainName")]
	pub domain_name: String,
	/// Optional path prefix prepended to every origin request.
	#[serde(rename = "OriginPath", default, skip_serializing_if = "String::is_empty")]
	pub origin_path: String,
	/// Present for S3 bucket origins.
	#[serde(rename = "S3OriginConfig", default, skip_serializing_if = "Option::is_none")]
	pub s3_origin_config: Option<S3OriginConfig>,
	/// Present for custom HTTP origins.
	#[serde(rename = "CustomOriginConfig", default, skip_serializing_if = "Option::is_none")]
	pub custom_origin_config: Option<CustomOriginConfig>,
}
impl Origin {
	/// S3 origin restricted to the given origin access identity (may be empty).
	pub fn s3(
		id: impl Into<String>,
		domain_name: impl Into<String>,
		origin_access_identity: impl Into<String>,
	) -> Self {
		Self {
			id: id.into(),
			domain_name: domain_name.into(),
			s3_origin_config: Some(S3OriginConfig {
				origin_access_identity: origin_access_identity.into(),
			}),
			..Default::default()
		}
	}

	/// Custom HTTP origin.
	pub fn custom(
		id: impl Into<String>,
		domain_name: impl Into<String>,
		config: CustomOriginConfig,
	) -> Self {
		Self {
			id: id.into(),
			domain_name: domain_name.into(),
			custom_origin_config: Some(config),
			..Default::default()
		}
	}
}

/// S3-specific origin settings.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct S3OriginConfig {
	/// `origin-access-identity/cloudfront/<id>` or empty for public buckets.
	#[serde(rename = "OriginAccessIdentity", default)]
	pub origin_access_identity: String,
}

/// Settings for non-S3 origins.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomOriginConfig {
	/// HTTP port the origin listens on.
	#[serde(rename = "HTTPPort")]
	pub http_port: u16,
	/// HTTPS port the origin listens on.
	#[serde(rename = "HTTPSPort")]
	pub https_port: u16,
	/// `http-only`, `https-only`, or `match-viewer`.
	#[serde(rename = "OriginProtocolPolicy")]
	pub origin_protocol_policy: String,
}
impl Default for CustomOriginConfig {
	fn default() -> Self {
		Self { http_port: 80, https_port: 443, origin_protocol_policy: "match-viewer".into() }
	}
}
