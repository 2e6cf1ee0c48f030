//! Checks shared by every mutating admin endpoint

use axum::{Form, extract::rejection::FormRejection};
use std::collections::HashMap;

use amona_types::auth_adapter::AuthCtx;

use crate::core::nonce::NonceIssuer;
use crate::prelude::*;

/// Decoded form body of an admin request
pub type FormFields = HashMap<String, String>;

/// Field carrying the anti-forgery token
pub const NONCE_FIELD: &str = "security";

/// Unwrap a form body, treating an unreadable one as empty.
///
/// Handlers extract `Result<Form<_>, _>` so that a missing body surfaces as
/// `InvalidRequest` after the capability check rather than as a rejection.
pub fn form_fields(form: Result<Form<FormFields>, FormRejection>) -> FormFields {
	match form {
		Ok(Form(fields)) => fields,
		Err(err) => {
			debug!("Unreadable form body: {}", err);
			FormFields::new()
		}
	}
}

/// Verify capability, payload presence and anti-forgery token, in that order
pub fn check_admin_request(
	nonces: &NonceIssuer,
	auth: &AuthCtx,
	capability: &str,
	fields: &FormFields,
	action: &str,
) -> ClResult<()> {
	if !auth.can(capability) {
		warn!(
			user = %auth.user_id,
			role = %auth.role,
			"Permission denied - {} capability required",
			capability
		);
		return Err(Error::PermissionDenied);
	}

	if fields.is_empty() {
		return Err(Error::InvalidRequest);
	}

	let token = fields.get(NONCE_FIELD).ok_or(Error::AuthenticationFailed)?;
	nonces.verify(action, auth.user_id, token)
}

/// Verify payload presence and anti-forgery token for endpoints any user may call
pub fn check_user_request(
	nonces: &NonceIssuer,
	auth: &AuthCtx,
	fields: &FormFields,
	action: &str,
) -> ClResult<()> {
	if fields.is_empty() {
		return Err(Error::InvalidRequest);
	}

	let token = fields.get(NONCE_FIELD).ok_or(Error::AuthenticationFailed)?;
	nonces.verify(action, auth.user_id, token)
}


// vim: ts=4
