//! Theme-wide options document (`amona-settings`)

use std::sync::Arc;

use amona_types::options_adapter::OptionsAdapter;

use crate::prelude::*;

pub const THEME_OPTIONS_DOCUMENT: &str = "amona-settings";

pub const IS_HEADER_FOOTER_BUILDER: &str = "is-header-footer-builder";
pub const DISABLE_UPGRADE_NOTICES: &str = "nas-disable-upgrade-notices";

#[derive(Debug, Clone)]
pub struct ThemeOptions {
	options: Arc<dyn OptionsAdapter>,
}

impl ThemeOptions {
	pub fn new(options: Arc<dyn OptionsAdapter>) -> Self {
		Self { options }
	}

	async fn load(&self) -> ClResult<serde_json::Map<String, serde_json::Value>> {
		match self.options.read_option(THEME_OPTIONS_DOCUMENT).await? {
			Some(serde_json::Value::Object(map)) => Ok(map),
			Some(_) => {
				warn!("Theme options document is not an object, ignoring it");
				Ok(serde_json::Map::new())
			}
			None => Ok(serde_json::Map::new()),
		}
	}

	/// Read a theme option, `default` when it is absent
	pub async fn get_theme_option(
		&self,
		key: &str,
		default: serde_json::Value,
	) -> ClResult<serde_json::Value> {
		Ok(self.load().await?.remove(key).unwrap_or(default))
	}

	/// Read a theme option as a flag; non-boolean values count as `default`
	pub async fn get_flag(&self, key: &str, default: bool) -> ClResult<bool> {
		Ok(self.get_theme_option(key, default.into()).await?.as_bool().unwrap_or(default))
	}

	/// Write one theme option, persisting the whole document
	pub async fn update_theme_option(&self, key: &str, value: serde_json::Value) -> ClResult<()> {
		let mut doc = self.load().await?;
		doc.insert(key.to_string(), value);
		self.options
			.update_option(THEME_OPTIONS_DOCUMENT, &serde_json::Value::Object(doc))
			.await?;
		info!("Theme option updated: {}", key);
		Ok(())
	}
}

// vim: ts=4
