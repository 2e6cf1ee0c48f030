//! Settings management handlers

use axum::{Form, Json, extract::State, extract::rejection::FormRejection};

use amona_types::auth_adapter::AuthCtx;
use amona_types::roles::{EDIT_THEME_OPTIONS, MANAGE_OPTIONS};

use super::theme_options::{DISABLE_UPGRADE_NOTICES, IS_HEADER_FOOTER_BUILDER};
use crate::core::guard::{FormFields, check_admin_request, form_fields};
use crate::core::nonce::UPDATE_ADMIN_SETTING;
use crate::core::Auth;
use crate::prelude::*;
use crate::types::AjaxResponse;

/// POST /api/admin/update-setting - Store one admin setting
pub async fn post_update_setting(
	State(app): State<App>,
	Auth(auth): Auth,
	form: Result<Form<FormFields>, FormRejection>,
) -> ClResult<Json<AjaxResponse>> {
	let fields = form_fields(form);
	app.settings.update_from_request(&app.nonces, &auth, &fields).await?;

	Ok(Json(AjaxResponse::ok()))
}

/// GET /api/admin/settings - Merged settings with their declared defaults
pub async fn get_settings(
	State(app): State<App>,
	Auth(auth): Auth,
) -> ClResult<Json<serde_json::Map<String, serde_json::Value>>> {
	if !auth.can(EDIT_THEME_OPTIONS) {
		return Err(Error::PermissionDenied);
	}

	let settings = app.settings.read_settings(&app.theme_options).await?;
	Ok(Json(settings))
}

async fn update_theme_flag(
	app: &App,
	auth: &AuthCtx,
	fields: &FormFields,
	key: &str,
) -> ClResult<()> {
	check_admin_request(&app.nonces, auth, MANAGE_OPTIONS, fields, UPDATE_ADMIN_SETTING)?;

	let status = fields.get("status").map(|s| s.trim() == "true").unwrap_or(false);
	app.theme_options.update_theme_option(key, status.into()).await
}

/// POST /api/admin/disable-pro-notices - Toggle the upgrade notices
pub async fn post_disable_pro_notices(
	State(app): State<App>,
	Auth(auth): Auth,
	form: Result<Form<FormFields>, FormRejection>,
) -> ClResult<Json<AjaxResponse>> {
	let fields = form_fields(form);
	update_theme_flag(&app, &auth, &fields, DISABLE_UPGRADE_NOTICES).await?;

	Ok(Json(AjaxResponse::ok()))
}

/// POST /api/admin/migrate-to-builder - Switch to (or away from) the header/footer builder
pub async fn post_migrate_to_builder(
	State(app): State<App>,
	Auth(auth): Auth,
	form: Result<Form<FormFields>, FormRejection>,
) -> ClResult<Json<AjaxResponse>> {
	let fields = form_fields(form);
	update_theme_flag(&app, &auth, &fields, IS_HEADER_FOOTER_BUILDER).await?;

	Ok(Json(AjaxResponse::ok()))
}

// vim: ts=4
