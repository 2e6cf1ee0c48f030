//! Core handlers

use axum::{Json, extract::State};
use std::collections::BTreeMap;

use crate::core::Auth;
use crate::core::nonce::ACTIONS;
use crate::prelude::*;

/// GET /api/admin/nonces - Anti-forgery tokens of every action for the caller
pub async fn get_nonces(
	State(app): State<App>,
	Auth(auth): Auth,
) -> ClResult<Json<BTreeMap<&'static str, Box<str>>>> {
	let mut nonces = BTreeMap::new();
	for action in ACTIONS {
		nonces.insert(action, app.nonces.create(action, auth.user_id)?);
	}
	Ok(Json(nonces))
}

// vim: ts=4
