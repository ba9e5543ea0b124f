//! Canned policy document.

// self
use crate::_prelude::*;

/// Single-statement policy restricting `resource` to requests before `epoch_time`.
///
/// Built per signing call and dropped afterwards. The JSON field order below is the order
/// CloudFront re-derives when verifying, so it must not change.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CannedPolicy<'a> {
	resource: &'a str,
	epoch_time: i64,
}
impl<'a> CannedPolicy<'a> {
	/// Creates a policy expiring at `expires`, truncated to millisecond precision before
	/// conversion to epoch seconds.
	pub fn new(resource: &'a str, expires: OffsetDateTime) -> Self {
		Self { resource, epoch_time: epoch_seconds(expires) }
	}

	/// Protected resource.
	pub fn resource(&self) -> &'a str {
		self.resource
	}

	/// Expiry in epoch seconds.
	pub fn epoch_time(&self) -> i64 {
		self.epoch_time
	}

	/// Compact JSON bytes that get hashed.
	pub fn to_json(&self) -> Result<Vec<u8>, serde_json::Error> {
		let policy = PolicyDocument {
			statement: [Statement {
				resource: self.resource,
				condition: Condition { date_less_than: EpochTime { epoch_time: self.epoch_time } },
			}],
		};

		serde_json::to_vec(&policy)
	}
}

#[derive(Serialize)]
struct PolicyDocument<'a> {
	#[serde(rename = "Statement")]
	statement: [Statement<'a>; 1],
}

#[derive(Serialize)]
struct Statement<'a> {
	#[serde(rename = "Resource")]
	resource: &'a str,
	#[serde(rename = "Condition")]
	condition: Condition,
}

#[derive(Serialize)]
struct Condition {
	#[serde(rename = "DateLessThan")]
	date_less_than: EpochTime,
}

#[derive(Serialize)]
struct EpochTime {
	#[serde(rename = "AWS:EpochTime")]
	epoch_time: i64,
}

/// Truncates `expires` to whole milliseconds and returns its epoch seconds.
pub fn epoch_seconds(expires: OffsetDateTime) -> i64 {
	let sub_millis = Duration::nanoseconds(i64::from(expires.nanosecond() % 1_000_000));

	(expires - sub_millis).unix_timestamp()
}

#[cfg(test)]
mod tests {
	// crates.io
	use time::macros::datetime;
	// self
	use super::*;

	#[test]
	fn policy_json_is_byte_exact() {
		let policy = CannedPolicy::new(
			"https://d111111abcdef8.cloudfront.net/videos/x.mp4",
			datetime!(2024-01-01 00:00:00 UTC),
		);
		let json = policy.to_json().expect("Policy should serialize.");

		assert_eq!(
			String::from_utf8(json).expect("Policy JSON should be UTF-8."),
			"{\"Statement\":[{\"Resource\":\"https://d111111abcdef8.cloudfront.net/videos/x.mp4\",\"Condition\":{\"DateLessThan\":{\"AWS:EpochTime\":1704067200}}}]}",
		);
	}

	#[test]
	fn query_resource_keeps_raw_ampersands() {
		let policy =
			CannedPolicy::new("/videos/x.mp4?x=1&y=2", datetime!(2024-01-01 00:00:00 UTC));
		let json = String::from_utf8(policy.to_json().expect("Policy should serialize."))
			.expect("Policy JSON should be UTF-8.");

		assert_eq!(
			json,
			"{\"Statement\":[{\"Resource\":\"/videos/x.mp4?x=1&y=2\",\"Condition\":{\"DateLessThan\":{\"AWS:EpochTime\":1704067200}}}]}",
		);
		assert!(!json.contains("\\u0026"), "{json}");
	}

	#[test]
	fn sub_second_precision_is_dropped() {
		assert_eq!(epoch_seconds(datetime!(2024-01-01 00:00:00.999999999 UTC)), 1_704_067_200);
		assert_eq!(epoch_seconds(datetime!(2024-01-01 00:00:01.0004 UTC)), 1_704_067_201);
	}
}
