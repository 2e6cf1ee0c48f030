//! Utility functions

use regex::Regex;
use std::sync::LazyLock;

use crate::prelude::*;

type Pattern = LazyLock<Result<Regex, regex::Error>>;

static SCRIPT_ELEMENTS: Pattern =
	LazyLock::new(|| Regex::new(r"(?is)<(script|style)[^>]*?>.*?</(script|style)>"));
static TAGS: Pattern = LazyLock::new(|| Regex::new(r"<[^<>]*>"));
static WHITESPACE: Pattern = LazyLock::new(|| Regex::new(r"[\r\n\t ]+"));
static OCTETS: Pattern = LazyLock::new(|| Regex::new(r"(?i)%[a-f0-9]{2}"));
static SPACES: Pattern = LazyLock::new(|| Regex::new(r" +"));

fn compiled(pattern: &'static Pattern) -> ClResult<&'static Regex> {
	pattern
		.as_ref()
		.map_err(|e| Error::ConfigError(format!("regex compilation failed: {}", e)))
}

/// Sanitize a single-line text value coming from a request.
///
/// Strips markup (including the contents of script and style elements),
/// escapes stray `<`, removes percent-encoded octets, collapses whitespace
/// runs into a single space and trims both ends.
pub fn sanitize_text_field(input: &str) -> ClResult<String> {
	let mut filtered = input.to_string();

	if filtered.contains('<') {
		filtered = compiled(&SCRIPT_ELEMENTS)?.replace_all(&filtered, "").into_owned();
		filtered = compiled(&TAGS)?.replace_all(&filtered, "").into_owned();
		filtered = filtered.replace('<', "&lt;");
	}

	filtered = compiled(&WHITESPACE)?.replace_all(&filtered, " ").into_owned();

	let octets = compiled(&OCTETS)?;
	if octets.is_match(&filtered) {
		while octets.is_match(&filtered) {
			filtered = octets.replace_all(&filtered, "").into_owned();
		}
		filtered = compiled(&SPACES)?.replace_all(&filtered, " ").into_owned();
	}

	Ok(filtered.trim().to_string())
}


// vim: ts=4
