//! Plugin management handlers

use axum::{Form, Json, extract::State, extract::rejection::FormRejection};

use amona_types::auth_adapter::AuthCtx;
use amona_types::roles::{INSTALL_PLUGINS, MANAGE_OPTIONS};

use super::service::{PluginInfo, normalize_init};
use crate::core::guard::{FormFields, check_admin_request, form_fields};
use crate::core::nonce::PLUGIN_MANAGER;
use crate::core::Auth;
use crate::prelude::*;
use crate::types::AjaxResponse;

/// Common checks of activate/deactivate, returning the normalized init path
fn check_plugin_request(app: &App, auth: &AuthCtx, fields: &FormFields) -> ClResult<String> {
	check_admin_request(&app.nonces, auth, MANAGE_OPTIONS, fields, PLUGIN_MANAGER)?;

	if !auth.can(INSTALL_PLUGINS) {
		warn!(user = %auth.user_id, "Permission denied - {} capability required", INSTALL_PLUGINS);
		return Err(Error::PermissionDenied);
	}

	let init = fields
		.get("init")
		.ok_or_else(|| Error::ValidationError("No plugin specified".into()))?;
	normalize_init(init)
}

/// POST /api/admin/plugin/activate
pub async fn post_activate_plugin(
	State(app): State<App>,
	Auth(auth): Auth,
	form: Result<Form<FormFields>, FormRejection>,
) -> ClResult<Json<AjaxResponse>> {
	let fields = form_fields(form);
	let init = check_plugin_request(&app, &auth, &fields)?;

	app.plugins.activate(&init).await?;

	Ok(Json(AjaxResponse::with_message("Plugin Successfully Activated")))
}

/// POST /api/admin/plugin/deactivate
pub async fn post_deactivate_plugin(
	State(app): State<App>,
	Auth(auth): Auth,
	form: Result<Form<FormFields>, FormRejection>,
) -> ClResult<Json<AjaxResponse>> {
	let fields = form_fields(form);
	let init = check_plugin_request(&app, &auth, &fields)?;

	app.plugins.deactivate(&init).await?;

	Ok(Json(AjaxResponse::with_message("Plugin Successfully Deactivated")))
}

/// GET /api/admin/plugins - Installed plugins with their state
pub async fn get_plugins(
	State(app): State<App>,
	Auth(auth): Auth,
) -> ClResult<Json<Vec<PluginInfo>>> {
	if !auth.can(INSTALL_PLUGINS) {
		return Err(Error::PermissionDenied);
	}

	Ok(Json(app.plugins.installed().await?))
}

// vim: ts=4
