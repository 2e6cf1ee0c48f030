//! Notice handlers

use axum::{Form, Json, extract::State, extract::rejection::FormRejection};

use amona_types::roles::MANAGE_OPTIONS;

use super::addon::{Notice, addon_notices};
use crate::core::guard::{FormFields, check_user_request, form_fields};
use crate::core::nonce::NOTICE_DISMISS;
use crate::core::Auth;
use crate::prelude::*;
use crate::types::AjaxResponse;
use crate::utils::sanitize_text_field;

/// POST /api/admin/dismiss-notice - Dismiss or snooze a notice for the caller
pub async fn post_dismiss_notice(
	State(app): State<App>,
	Auth(auth): Auth,
	form: Result<Form<FormFields>, FormRejection>,
) -> ClResult<Json<AjaxResponse>> {
	let fields = form_fields(form);
	check_user_request(&app.nonces, &auth, &fields, NOTICE_DISMISS)?;

	let notice_id = sanitize_text_field(fields.get("notice_id").map(String::as_str).unwrap_or_default())?;
	if notice_id.is_empty() {
		return Err(Error::ValidationError("No notice specified".into()));
	}
	let repeat_after = fields
		.get("repeat_notice_after")
		.and_then(|secs| secs.trim().parse::<i64>().ok())
		.map(i64::unsigned_abs);

	app.notices.dismiss(auth.user_id, &notice_id, repeat_after).await?;

	Ok(Json(AjaxResponse::ok()))
}

/// GET /api/admin/notices - Notices currently shown to the caller
pub async fn get_notices(
	State(app): State<App>,
	Auth(auth): Auth,
) -> ClResult<Json<Vec<Notice>>> {
	if !auth.can(MANAGE_OPTIONS) {
		return Err(Error::PermissionDenied);
	}

	let candidates = match &app.addon {
		Some(addon) => addon_notices(addon, &app.opts.theme_name),
		None => Vec::new(),
	};
	let notices = app.notices.displayable(auth.user_id, candidates).await?;

	Ok(Json(notices))
}

// vim: ts=4
