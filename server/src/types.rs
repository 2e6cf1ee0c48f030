//! Response types of the admin API

use serde::Serialize;

/// Success response of the admin endpoints.
///
/// Failures are produced by `Error::into_response` with the same `success` key.
#[derive(Debug, Clone, Serialize)]
pub struct AjaxResponse {
	pub success: bool,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub message: Option<Box<str>>,
}

impl AjaxResponse {
	pub fn ok() -> Self {
		Self { success: true, message: None }
	}

	pub fn with_message(message: impl Into<Box<str>>) -> Self {
		Self { success: true, message: Some(message.into()) }
	}
}

// vim: ts=4
