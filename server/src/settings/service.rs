//! Settings store: typed key/value admin preferences in one options document

use std::sync::Arc;

use amona_types::auth_adapter::AuthCtx;
use amona_types::options_adapter::OptionsAdapter;
use amona_types::roles::MANAGE_OPTIONS;

use super::theme_options::{DISABLE_UPGRADE_NOTICES, IS_HEADER_FOOTER_BUILDER, ThemeOptions};
use super::types::{
	FrozenSettingTypes, PRELOAD_LOCAL_FONTS, SELF_HOSTED_GFONTS, SETTINGS_DOCUMENT, SettingValue,
	SettingsDocument, USE_OLD_HEADER_FOOTER, USE_UPGRADE_NOTICES,
};
use crate::core::guard::{FormFields, check_admin_request};
use crate::core::nonce::{NonceIssuer, UPDATE_ADMIN_SETTING};
use crate::prelude::*;
use crate::utils::sanitize_text_field;

/// Settings service - main interface for reading and writing admin settings
#[derive(Debug)]
pub struct SettingsStore {
	types: Arc<FrozenSettingTypes>,
	options: Arc<dyn OptionsAdapter>,
}

impl SettingsStore {
	pub fn new(types: Arc<FrozenSettingTypes>, options: Arc<dyn OptionsAdapter>) -> Self {
		Self { types, options }
	}

	pub fn types(&self) -> &FrozenSettingTypes {
		&self.types
	}

	/// Full stored document, empty if it was never written
	pub async fn document(&self) -> ClResult<SettingsDocument> {
		Ok(self
			.options
			.read_option(SETTINGS_DOCUMENT)
			.await?
			.map(SettingsDocument::from_json)
			.unwrap_or_default())
	}

	/// Stored value of `key`, or `default` when absent
	pub async fn get(&self, key: &str, default: SettingValue) -> ClResult<SettingValue> {
		let mut doc = self.document().await?;
		Ok(doc.0.remove(key).unwrap_or(default))
	}

	/// Stored value of a boolean setting; a stored string reads as `default`
	pub async fn get_bool(&self, key: &str, default: bool) -> ClResult<bool> {
		Ok(self.get(key, default.into()).await?.as_bool().unwrap_or(default))
	}

	/// Coerce `raw` to the declared type of `key` and persist the whole document.
	///
	/// Works on the stored JSON object as-is, so entries the scalar view does
	/// not understand are written back untouched.
	pub async fn set(&self, key: &str, raw: &str) -> ClResult<SettingValue> {
		let value = self.types.type_of(key).coerce(raw)?;

		let mut doc = match self.options.read_option(SETTINGS_DOCUMENT).await? {
			Some(serde_json::Value::Object(map)) => map,
			Some(_) => {
				warn!("Settings document is not an object, replacing it");
				serde_json::Map::new()
			}
			None => serde_json::Map::new(),
		};
		doc.insert(key.into(), value.clone().into());
		self.options.update_option(SETTINGS_DOCUMENT, &serde_json::Value::Object(doc)).await?;

		info!("Setting updated: {} ({})", key, value.type_name());
		Ok(value)
	}

	/// Apply an `update-setting` request after checking capability, payload and token
	pub async fn update_from_request(
		&self,
		nonces: &NonceIssuer,
		auth: &AuthCtx,
		fields: &FormFields,
	) -> ClResult<SettingValue> {
		check_admin_request(nonces, auth, MANAGE_OPTIONS, fields, UPDATE_ADMIN_SETTING)?;

		let key = sanitize_text_field(fields.get("key").map(String::as_str).unwrap_or_default())?;
		if key.is_empty() {
			return Err(Error::InvalidRequest);
		}
		let raw = fields.get("value").map(String::as_str).unwrap_or_default();

		self.set(&key, raw).await
	}

	/// Declared defaults overlaid with every stored key
	pub async fn read_settings(
		&self,
		theme: &ThemeOptions,
	) -> ClResult<serde_json::Map<String, serde_json::Value>> {
		let mut merged = serde_json::Map::new();
		merged.insert(
			SELF_HOSTED_GFONTS.into(),
			self.get(SELF_HOSTED_GFONTS, false.into()).await?.into(),
		);
		merged.insert(
			PRELOAD_LOCAL_FONTS.into(),
			self.get(PRELOAD_LOCAL_FONTS, false.into()).await?.into(),
		);
		merged.insert(
			USE_OLD_HEADER_FOOTER.into(),
			theme.get_flag(IS_HEADER_FOOTER_BUILDER, false).await?.into(),
		);
		merged.insert(
			USE_UPGRADE_NOTICES.into(),
			(!theme.get_flag(DISABLE_UPGRADE_NOTICES, false).await?).into(),
		);

		for (key, value) in self.document().await?.0 {
			merged.insert(key, value.into());
		}
		Ok(merged)
	}
}

// vim: ts=4
