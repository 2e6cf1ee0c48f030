//! Request extractors

use axum::http::request::Parts;
use axum::extract::FromRequestParts;

use amona_types::auth_adapter::AuthCtx;

use crate::prelude::*;

// Auth //
//******//
/// Authenticated caller, inserted into the request extensions by `require_auth`
#[derive(Debug, Clone)]
pub struct Auth(pub AuthCtx);

impl<S> FromRequestParts<S> for Auth
where
	S: Send + Sync,
{
	type Rejection = Error;

	async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
		if let Some(auth) = parts.extensions.get::<Auth>().cloned() {
			Ok(auth)
		} else {
			Err(Error::Unauthorized)
		}
	}
}

// vim: ts=4
