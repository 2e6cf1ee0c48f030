//! Custom middlewares

use axum::{
	body::Body,
	extract::State,
	http::{Request, header, response::Response},
	middleware::Next,
};

use crate::core::Auth;
use crate::prelude::*;

pub async fn require_auth(
	State(state): State<App>,
	mut req: Request<Body>,
	next: Next,
) -> ClResult<Response<Body>> {
	let auth_header = req
		.headers()
		.get(header::AUTHORIZATION)
		.and_then(|h| h.to_str().ok())
		.ok_or(Error::Unauthorized)?;

	let token = auth_header.strip_prefix("Bearer ").ok_or(Error::Unauthorized)?.trim();
	if token.is_empty() {
		return Err(Error::Unauthorized);
	}

	let ctx = state.auth_adapter.validate_access_token(token).await?;
	debug!(user = %ctx.user_id, role = %ctx.role, "Authenticated request");

	req.extensions_mut().insert(Auth(ctx));

	Ok(next.run(req).await)
}

// vim: ts=4
