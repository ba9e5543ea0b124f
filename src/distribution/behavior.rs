//! Cache behaviors and the nested lists they carry (headers, cookies, signers, methods).

// crates.io
use serde::{Deserializer, Serializer, de, ser::SerializeStruct};
// self
use crate::{
	_prelude::*,
	distribution::list::{
		self, AwsAccountNumberTag, ListTag, LocationTag, MethodTag, NameTag, TaggedItems,
		TaggedList,
	},
};

/// Header or cookie names, wrapped in `<Name>` on the wire.
pub type Names = TaggedList<String, NameTag>;
/// HTTP methods, wrapped in `<Method>` on the wire.
pub type Methods = TaggedList<HttpMethod, MethodTag>;

/// Routing and caching rules for requests matching a path pattern.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheBehavior {
	/// Path pattern; left empty for the default cache behavior.
	#[serde(rename = "PathPattern", default, skip_serializing_if = "String::is_empty")]
	pub path_pattern: String,
	/// Id of the [`Origin`](crate::distribution::Origin) serving matching requests.
	#[serde(rename = "TargetOriginId")]
	pub target_origin_id: String,
	/// Request values forwarded to the origin and included in the cache key.
	#[serde(rename = "ForwardedValues")]
	pub forwarded_values: ForwardedValues,
	/// Accounts allowed to create signed URLs for this behavior.
	#[serde(rename = "TrustedSigners")]
	pub trusted_signers: TrustedSigners,
	/// `allow-all`, `redirect-to-https`, or `https-only`.
	#[serde(rename = "ViewerProtocolPolicy")]
	pub viewer_protocol_policy: String,
	/// Minimum time objects stay cached, in seconds.
	#[serde(rename = "MinTTL")]
	pub min_ttl: u64,
	/// Methods CloudFront accepts and caches.
	#[serde(rename = "AllowedMethods")]
	pub allowed_methods: AllowedMethods,
	/// Whether Microsoft Smooth Streaming is enabled.
	#[serde(rename = "SmoothStreaming")]
	pub smooth_streaming: bool,
}

/// Values forwarded to the origin.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForwardedValues {
	/// Forward the query string.
	#[serde(rename = "QueryString")]
	pub query_string: bool,
	/// Cookie forwarding rules.
	#[serde(rename = "Cookies")]
	pub cookies: Cookies,
	/// Header names forwarded to the origin.
	#[serde(rename = "Headers")]
	pub headers: Names,
}

/// Cookie forwarding rules.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cookies {
	/// `none`, `all`, or `whitelist`.
	#[serde(rename = "Forward")]
	pub forward: String,
	/// Cookie names forwarded when `forward` is `whitelist`.
	#[serde(rename = "WhitelistedNames")]
	pub whitelisted_names: Names,
}
impl Default for Cookies {
	fn default() -> Self {
		Self { forward: "none".into(), whitelisted_names: Names::new() }
	}
}

/// Trusted signer accounts; serialized as `Enabled` followed by the count-plus-items list.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TrustedSigners {
	/// Require signed URLs for this behavior.
	pub enabled: bool,
	/// AWS account numbers (or `self`) allowed to sign.
	pub aws_account_numbers: Vec<String>,
}
impl Serialize for TrustedSigners {
	fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
	where
		S: Serializer,
	{
		let mut state = serializer.serialize_struct("TrustedSigners", 3)?;

		state.serialize_field("Enabled", &self.enabled)?;
		list::encode_fields(&mut state, AwsAccountNumberTag::TAG, &self.aws_account_numbers)?;
		state.end()
	}
}
impl<'de> Deserialize<'de> for TrustedSigners {
	fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
	where
		D: Deserializer<'de>,
	{
		#[derive(Deserialize)]
		struct Wire {
			#[serde(rename = "Enabled")]
			enabled: bool,
			#[serde(rename = "Quantity")]
			quantity: usize,
			#[serde(rename = "Items")]
			items: Option<TaggedItems<String, AwsAccountNumberTag>>,
		}

		let wire = Wire::deserialize(deserializer)?;
		let aws_account_numbers = list::checked_items::<_, D::Error>(
			AwsAccountNumberTag::TAG,
			wire.quantity,
			wire.items.map(|items| items.0),
		)?;

		Ok(Self { enabled: wire.enabled, aws_account_numbers })
	}
}

/// HTTP methods CloudFront can accept or cache.
///
/// On the wire a method is the text of its element (`<Method>GET</Method>`), so it is
/// (de)serialized as a plain string rather than as an enum variant.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HttpMethod {
	/// `GET`
	Get,
	/// `HEAD`
	Head,
	/// `OPTIONS`
	Options,
	/// `PUT`
	Put,
	/// `PATCH`
	Patch,
	/// `POST`
	Post,
	/// `DELETE`
	Delete,
}
impl HttpMethod {
	/// Upper-case method name used on the wire.
	pub const fn as_str(self) -> &'static str {
		match self {
			Self::Get => "GET",
			Self::Head => "HEAD",
			Self::Options => "OPTIONS",
			Self::Put => "PUT",
			Self::Patch => "PATCH",
			Self::Post => "POST",
			Self::Delete => "DELETE",
		}
	}
}
impl Display for HttpMethod {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}
impl FromStr for HttpMethod {
	type Err = UnknownHttpMethod;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s.trim() {
			"GET" => Ok(Self::Get),
			"HEAD" => Ok(Self::Head),
			"OPTIONS" => Ok(Self::Options),
			"PUT" => Ok(Self::Put),
			"PATCH" => Ok(Self::Patch),
			"POST" => Ok(Self::Post),
			"DELETE" => Ok(Self::Delete),
			other => Err(UnknownHttpMethod(other.into())),
		}
	}
}
impl Serialize for HttpMethod {
	fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
	where
		S: Serializer,
	{
		serializer.serialize_str(self.as_str())
	}
}
impl<'de> Deserialize<'de> for HttpMethod {
	fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
	where
		D: Deserializer<'de>,
	{
		let raw = String::deserialize(deserializer)?;

		raw.parse().map_err(|_| <D::Error as de::Error>::unknown_variant(&raw, HTTP_METHOD_NAMES))
	}
}

/// Method name outside the set CloudFront understands.
#[derive(Clone, Debug, PartialEq, Eq, ThisError)]
#[error("Unsupported HTTP method `{0}`.")]
pub struct UnknownHttpMethod(pub String);

const HTTP_METHOD_NAMES: &[&str] = &["GET", "HEAD", "OPTIONS", "PUT", "PATCH", "POST", "DELETE"];

/// Allowed methods plus the cached subset.
///
/// Both lists follow the count-plus-items rule independently; `<CachedMethods>` nests under
/// `<AllowedMethods>`. Subset-ness of `cached` is not checked.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AllowedMethods {
	/// Every method CloudFront forwards.
	pub allowed: Vec<HttpMethod>,
	/// Methods whose responses are cached.
	pub cached: Vec<HttpMethod>,
}
impl Default for AllowedMethods {
	fn default() -> Self {
		Self {
			allowed: vec![HttpMethod::Get, HttpMethod::Head],
			cached: vec![HttpMethod::Get, HttpMethod::Head],
		}
	}
}
impl Serialize for AllowedMethods {
	fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
	where
		S: Serializer,
	{
		let mut state = serializer.serialize_struct("AllowedMethods", 3)?;

		list::encode_fields(&mut state, MethodTag::TAG, &self.allowed)?;
		state.serialize_field("CachedMethods", &list::encode(&self.cached, MethodTag::TAG))?;
		state.end()
	}
}
impl<'de> Deserialize<'de> for AllowedMethods {
	fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
	where
		D: Deserializer<'de>,
	{
		#[derive(Deserialize)]
		struct Wire {
			#[serde(rename = "Quantity")]
			quantity: usize,
			#[serde(rename = "Items")]
			items: Option<TaggedItems<HttpMethod, MethodTag>>,
			#[serde(rename = "CachedMethods")]
			cached: Option<Methods>,
		}

		let wire = Wire::deserialize(deserializer)?;
		let allowed = list::checked_items::<_, D::Error>(
			MethodTag::TAG,
			wire.quantity,
			wire.items.map(|items| items.0),
		)?;
		let cached = wire.cached.map(Methods::into_inner).unwrap_or_default();

		Ok(Self { allowed, cached })
	}
}

/// Country-level access restriction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GeoRestriction {
	/// `none`, `whitelist`, or `blacklist`.
	pub restriction_type: String,
	/// ISO 3166-1 alpha-2 country codes.
	pub locations: Vec<String>,
}
impl Default for GeoRestriction {
	fn default() -> Self {
		Self { restriction_type: "none".into(), locations: Vec::new() }
	}
}
impl Serialize for GeoRestriction {
	fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
	where
		S: Serializer,
	{
		let mut state = serializer.serialize_struct("GeoRestriction", 3)?;

		state.serialize_field("RestrictionType", &self.restriction_type)?;
		list::encode_fields(&mut state, LocationTag::TAG, &self.locations)?;
		state.end()
	}
}
impl<'de> Deserialize<'de> for GeoRestriction {
	fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
	where
		D: Deserializer<'de>,
	{
		#[derive(Deserialize)]
		struct Wire {
			#[serde(rename = "RestrictionType")]
			restriction_type: String,
			#[serde(rename = "Quantity")]
			quantity: usize,
			#[serde(rename = "Items")]
			items: Option<TaggedItems<String, LocationTag>>,
		}

		let wire = Wire::deserialize(deserializer)?;
		let locations = list::checked_items::<_, D::Error>(
			LocationTag::TAG,
			wire.quantity,
			wire.items.map(|items| items.0),
		)?;

		Ok(Self { restriction_type: wire.restriction_type, locations })
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn trusted_signers_prefix_enabled() {
		let signers =
			TrustedSigners { enabled: true, aws_account_numbers: vec!["self".into(), "1234".into()] };
		let xml = quick_xml::se::to_string_with_root("TrustedSigners", &signers)
			.expect("Trusted signers should serialize.");

		assert_eq!(
			xml,
			"<TrustedSigners><Enabled>true</Enabled><Quantity>2</Quantity><Items><AWSAccountNumber>self</AWSAccountNumber><AWSAccountNumber>1234</AWSAccountNumber></Items></TrustedSigners>",
		);
	}

	#[test]
	fn allowed_methods_encode_two_lists() {
		let methods = AllowedMethods {
			allowed: vec![HttpMethod::Get, HttpMethod::Head, HttpMethod::Options],
			cached: Vec::new(),
		};
		let xml = quick_xml::se::to_string_with_root("AllowedMethods", &methods)
			.expect("Allowed methods should serialize.");

		assert_eq!(
			xml,
			"<AllowedMethods><Quantity>3</Quantity><Items><Method>GET</Method><Method>HEAD</Method><Method>OPTIONS</Method></Items><CachedMethods><Quantity>0</Quantity></CachedMethods></AllowedMethods>",
		);
	}

	#[test]
	fn allowed_methods_decode_both_lists() {
		let methods = AllowedMethods {
			allowed: vec![HttpMethod::Get, HttpMethod::Head, HttpMethod::Options, HttpMethod::Post],
			cached: vec![HttpMethod::Get, HttpMethod::Options],
		};
		let xml = quick_xml::se::to_string_with_root("AllowedMethods", &methods)
			.expect("Allowed methods should serialize.");
		let decoded: AllowedMethods =
			quick_xml::de::from_str(&xml).expect("Allowed methods should decode.");

		assert_eq!(decoded, methods);

		let defaults = quick_xml::se::to_string_with_root("AllowedMethods", &AllowedMethods::default())
			.expect("Default methods should serialize.");

		assert_eq!(
			quick_xml::de::from_str::<AllowedMethods>(&defaults).expect("Default methods should decode."),
			AllowedMethods::default(),
		);
	}

	#[test]
	fn methods_list_reads_element_text() {
		let methods: Methods = quick_xml::de::from_str(
			"<Methods><Quantity>2</Quantity><Items><Method>GET</Method><Method>DELETE</Method></Items></Methods>",
		)
		.expect("Methods should decode.");

		assert_eq!(methods.into_inner(), vec![HttpMethod::Get, HttpMethod::Delete]);
		assert!(
			quick_xml::de::from_str::<Methods>(
				"<Methods><Quantity>1</Quantity><Items><Method>TRACE</Method></Items></Methods>",
			)
			.is_err()
		);
		assert_eq!("PATCH".parse::<HttpMethod>(), Ok(HttpMethod::Patch));
		assert_eq!("get".parse::<HttpMethod>(), Err(UnknownHttpMethod("get".into())));
	}

	#[test]
	fn geo_restriction_round_trips() {
		let geo =
			GeoRestriction { restriction_type: "whitelist".into(), locations: vec!["US".into(), "CA".into()] };
		let xml = quick_xml::se::to_string_with_root("GeoRestriction", &geo)
			.expect("Geo restriction should serialize.");
		let decoded: GeoRestriction =
			quick_xml::de::from_str(&xml).expect("Geo restriction should decode.");

		assert_eq!(decoded, geo);
	}
}
