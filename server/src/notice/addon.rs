//! Version-gated notices about the companion addon plugin

use serde::Serialize;

use super::compat::{ADDON_SUPPORTED_VERSIONS, min_supported_version};
use super::version;

pub const MINIMUM_ADDON_VERSION_NOTICE: &str = "nas-minimum-addon-version-notice";
pub const ADDON_SUPPORTED_VERSION_NOTICE: &str = "nas-addon-minimum-supported-version-notice";

/// Newest addon release still covered by the incompatibility notice
const LEGACY_ADDON_CEILING: &str = "4.0.0";

/// Installed addon, as configured at startup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddonInfo {
	pub name: Box<str>,
	pub version: Box<str>,
	pub min_version: Box<str>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeKind {
	Warning,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
	pub id: Box<str>,
	#[serde(rename = "type")]
	pub kind: NoticeKind,
	pub message: Box<str>,
	pub priority: u32,
	pub display_with_other_notices: bool,
	/// Version the dismissal is bound to
	#[serde(skip)]
	pub threshold: Box<str>,
}

/// Notices that apply to the installed addon, before per-user dismissal
pub fn addon_notices(addon: &AddonInfo, theme_name: &str) -> Vec<Notice> {
	let mut notices = Vec::new();
	if !version::is_lower(&addon.version, &addon.min_version) {
		return notices;
	}

	notices.push(Notice {
		id: MINIMUM_ADDON_VERSION_NOTICE.into(),
		kind: NoticeKind::Warning,
		message: format!(
			"Please update the {} to version {} or higher. Ignore if already updated.",
			addon.name, addon.min_version
		)
		.into(),
		priority: 18,
		display_with_other_notices: true,
		threshold: addon.min_version.clone(),
	});

	if !version::is_lower(LEGACY_ADDON_CEILING, &addon.version) {
		let supported = min_supported_version(
			ADDON_SUPPORTED_VERSIONS,
			&addon.version,
			Some(addon.min_version.as_ref()),
		)
		.unwrap_or_default();
		notices.push(Notice {
			id: ADDON_SUPPORTED_VERSION_NOTICE.into(),
			kind: NoticeKind::Warning,
			message: format!(
				"Your current version of {} plugin is incompatible with {} theme. Please update to at least version {} for optimal functionality.",
				addon.name, theme_name, supported
			)
			.into(),
			priority: 20,
			display_with_other_notices: false,
			threshold: supported.into(),
		});
	}

	notices
}

/// Order by priority and keep at most one notice that wants to be shown alone
pub fn arrange(mut notices: Vec<Notice>) -> Vec<Notice> {
	notices.sort_by_key(|notice| notice.priority);

	let mut exclusive_shown = false;
	notices.retain(|notice| {
		if notice.display_with_other_notices {
			return true;
		}
		!std::mem::replace(&mut exclusive_shown, true)
	});
	notices
}


// vim: ts=4
