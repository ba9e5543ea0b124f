//! Base64 variants used in signed URLs.

// crates.io
use base64::{Engine, engine::general_purpose::STANDARD};

/// Standard base64 with `=`→`_`, `+`→`-`, `/`→`~`, safe in a query string without
/// percent-encoding.
pub fn url_safe_base64(bytes: &[u8]) -> String {
	STANDARD
		.encode(bytes)
		.chars()
		.map(|c| match c {
			'=' => '_',
			'+' => '-',
			'/' => '~',
			other => other,
		})
		.collect()
}

/// Plain standard base64, used only by the legacy format.
pub fn standard_base64(bytes: &[u8]) -> String {
	STANDARD.encode(bytes)
}
