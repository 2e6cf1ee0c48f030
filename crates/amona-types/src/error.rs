//! Error type shared by every crate of the workspace.
//!
//! Boundary failures are rendered as a structured JSON body
//! (`{"success": false, "code": ..., "message": ...}`) instead of a bare status.

use axum::{Json, http::StatusCode, response::IntoResponse};
use serde::Serialize;

pub type ClResult<T> = std::result::Result<T, Error>;

#[derive(Debug)]
pub enum Error {
	/// The caller lacks the capability required for the operation
	PermissionDenied,
	/// The request carried no payload
	InvalidRequest,
	/// A required field is missing or unusable
	ValidationError(String),
	/// Anti-forgery token missing or invalid
	AuthenticationFailed,
	/// No (or an unknown) access token
	Unauthorized,
	NotFound,
	/// Persistence backend failure
	DbError,
	ConfigError(String),
	Parse,

	// externals
	Io(std::io::Error),
}

impl Error {
	/// Machine readable error code reported to clients
	pub fn code(&self) -> &'static str {
		match self {
			Error::PermissionDenied => "permission",
			Error::InvalidRequest | Error::ValidationError(_) => "invalid",
			Error::AuthenticationFailed => "nonce",
			Error::Unauthorized => "unauthorized",
			Error::NotFound => "not_found",
			Error::DbError | Error::ConfigError(_) | Error::Parse | Error::Io(_) => "default",
		}
	}

	/// Human readable message reported to clients
	pub fn message(&self) -> &str {
		match self {
			Error::PermissionDenied => "Sorry, you are not allowed to do this operation.",
			Error::InvalidRequest => "No post data found!",
			Error::ValidationError(msg) => msg,
			Error::AuthenticationFailed => "Nonce validation failed",
			Error::Unauthorized => "Authentication required.",
			Error::NotFound => "The requested resource was not found.",
			Error::DbError | Error::ConfigError(_) | Error::Parse | Error::Io(_) => {
				"Sorry, something went wrong."
			}
		}
	}

	pub fn status(&self) -> StatusCode {
		match self {
			Error::PermissionDenied | Error::AuthenticationFailed => StatusCode::FORBIDDEN,
			Error::InvalidRequest | Error::ValidationError(_) => StatusCode::BAD_REQUEST,
			Error::Unauthorized => StatusCode::UNAUTHORIZED,
			Error::NotFound => StatusCode::NOT_FOUND,
			Error::DbError | Error::ConfigError(_) | Error::Parse | Error::Io(_) => {
				StatusCode::INTERNAL_SERVER_ERROR
			}
		}
	}
}

impl From<std::io::Error> for Error {
	fn from(err: std::io::Error) -> Self {
		Self::Io(err)
	}
}

impl From<serde_json::Error> for Error {
	fn from(err: serde_json::Error) -> Self {
		tracing::warn!("JSON: {}", err);
		Self::Parse
	}
}

impl std::fmt::Display for Error {
	fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
		match self {
			Error::ValidationError(msg) => write!(f, "validation error: {}", msg),
			Error::ConfigError(msg) => write!(f, "config error: {}", msg),
			Error::Io(err) => write!(f, "io error: {}", err),
			_ => write!(f, "{:?}", self),
		}
	}
}

impl std::error::Error for Error {}

#[derive(Serialize)]
struct ErrorBody<'a> {
	success: bool,
	code: &'static str,
	message: &'a str,
}

impl IntoResponse for Error {
	fn into_response(self) -> axum::response::Response {
		let status = self.status();
		if status.is_server_error() {
			tracing::error!("Request failed: {}", self);
		} else {
			tracing::debug!("Request rejected: {}", self);
		}

		let body = ErrorBody { success: false, code: self.code(), message: self.message() };
		(status, Json(body)).into_response()
	}
}


// vim: ts=4
