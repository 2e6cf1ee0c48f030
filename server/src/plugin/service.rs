//! Plugin activation over the `active_plugins` options document

use serde::Serialize;
use std::path::{Component, Path};
use std::sync::Arc;

use amona_types::options_adapter::OptionsAdapter;

use crate::prelude::*;
use crate::utils::sanitize_text_field;

pub const ACTIVE_PLUGINS: &str = "active_plugins";
pub const SURECART_INIT: &str = "surecart/surecart.php";
pub const SURECART_SOURCE: &str = "surecart_source";

const PLUGIN_FILE_EXT: &str = "php";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PluginInfo {
	pub init: Box<str>,
	pub slug: Box<str>,
	pub active: bool,
}

#[derive(Debug)]
pub struct PluginManager {
	options: Arc<dyn OptionsAdapter>,
	plugin_dir: Box<Path>,
}

/// Normalize a requested plugin path to `<slug>/<file>.php` form.
///
/// Only plain path segments are accepted; `..`, roots and prefixes are
/// rejected so the result always stays inside the plugin directory. Paths of
/// any other shape cannot name an installed plugin and read as `NotFound`.
pub fn normalize_init(raw: &str) -> ClResult<String> {
	let sanitized = sanitize_text_field(raw)?;
	let trimmed = sanitized.trim_start_matches('/');
	if trimmed.is_empty() {
		return Err(Error::ValidationError("No plugin specified".into()));
	}

	let mut segments = Vec::new();
	for component in Path::new(trimmed).components() {
		match component {
			Component::Normal(segment) => {
				segments.push(segment.to_str().ok_or(Error::NotFound)?.to_string());
			}
			Component::CurDir => {}
			_ => {
				warn!("Rejected plugin path: {}", trimmed);
				return Err(Error::NotFound);
			}
		}
	}
	if segments.is_empty() {
		return Err(Error::ValidationError("No plugin specified".into()));
	}
	let is_plugin_file = segments.last().is_some_and(|file| {
		Path::new(file).extension().and_then(|ext| ext.to_str()) == Some(PLUGIN_FILE_EXT)
	});
	if segments.len() != 2 || !is_plugin_file {
		warn!("Not a plugin path: {}", trimmed);
		return Err(Error::NotFound);
	}
	Ok(segments.join("/"))
}

fn parse_active(value: Option<serde_json::Value>) -> Vec<String> {
	match value {
		Some(serde_json::Value::Array(items)) => items
			.into_iter()
			.filter_map(|item| match item {
				serde_json::Value::String(init) => Some(init),
				_ => None,
			})
			.collect(),
		Some(other) => {
			warn!("Active plugins document is not an array: {}", other);
			Vec::new()
		}
		None => Vec::new(),
	}
}

impl PluginManager {
	pub fn new(options: Arc<dyn OptionsAdapter>, plugin_dir: impl Into<Box<Path>>) -> Self {
		Self { options, plugin_dir: plugin_dir.into() }
	}

	pub fn plugin_dir(&self) -> &Path {
		&self.plugin_dir
	}

	/// Init paths of the active plugins, in activation order
	pub async fn active_plugins(&self) -> ClResult<Vec<String>> {
		Ok(parse_active(self.options.read_option(ACTIVE_PLUGINS).await?))
	}

	async fn store_active(&self, active: &[String]) -> ClResult<()> {
		let value = serde_json::to_value(active)?;
		self.options.update_option(ACTIVE_PLUGINS, &value).await
	}

	pub async fn is_active(&self, init: &str) -> ClResult<bool> {
		let init = normalize_init(init)?;
		Ok(self.active_plugins().await?.contains(&init))
	}

	/// Plugins found in the plugin directory: one entry per `<slug>/<file>.php`
	pub async fn installed(&self) -> ClResult<Vec<PluginInfo>> {
		let active = self.active_plugins().await?;
		let mut plugins = Vec::new();

		let mut dirs = match tokio::fs::read_dir(&self.plugin_dir).await {
			Ok(dirs) => dirs,
			Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
				warn!("Plugin directory {} does not exist", self.plugin_dir.display());
				return Ok(plugins);
			}
			Err(err) => return Err(err.into()),
		};

		while let Some(dir) = dirs.next_entry().await? {
			if !dir.file_type().await?.is_dir() {
				continue;
			}
			let Some(slug) = dir.file_name().to_str().map(str::to_string) else {
				continue;
			};

			let mut files = tokio::fs::read_dir(dir.path()).await?;
			while let Some(file) = files.next_entry().await? {
				let path = file.path();
				if !file.file_type().await?.is_file()
					|| path.extension().and_then(|ext| ext.to_str()) != Some(PLUGIN_FILE_EXT)
				{
					continue;
				}
				let Some(name) = file.file_name().to_str().map(str::to_string) else {
					continue;
				};
				let init = format!("{}/{}", slug, name);
				plugins.push(PluginInfo {
					active: active.contains(&init),
					init: init.into(),
					slug: slug.as_str().into(),
				});
			}
		}

		plugins.sort_by(|a, b| a.init.cmp(&b.init));
		Ok(plugins)
	}

	/// Activate an installed plugin; activating an active plugin is a no-op
	pub async fn activate(&self, init: &str) -> ClResult<()> {
		let init = normalize_init(init)?;
		match tokio::fs::metadata(self.plugin_dir.join(&init)).await {
			Ok(meta) if meta.is_file() => {}
			_ => {
				warn!("Plugin file does not exist: {}", init);
				return Err(Error::NotFound);
			}
		}

		let mut active = self.active_plugins().await?;
		if !active.contains(&init) {
			active.push(init.clone());
			self.store_active(&active).await?;
			info!("Plugin activated: {}", init);
		}

		if init == SURECART_INIT {
			self.options.update_option(SURECART_SOURCE, &"amona".into()).await?;
		}
		Ok(())
	}

	/// Deactivate a plugin; the plugin file does not need to exist
	pub async fn deactivate(&self, init: &str) -> ClResult<()> {
		let init = normalize_init(init)?;

		let mut active = self.active_plugins().await?;
		let before = active.len();
		active.retain(|plugin| *plugin != init);
		if active.len() != before {
			self.store_active(&active).await?;
			info!("Plugin deactivated: {}", init);
		}
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use serde_json::json;

	#[test]
	fn test_normalize_init() {
		assert_eq!(normalize_init("surecart/surecart.php").unwrap(), "surecart/surecart.php");
		assert_eq!(normalize_init("/amona-sites/amona-sites.php").unwrap(), "amona-sites/amona-sites.php");
		assert_eq!(normalize_init(" a/./b.php ").unwrap(), "a/b.php");
	}

	#[test]
	fn test_normalize_init_rejects_escapes() {
		assert!(matches!(normalize_init("../etc/passwd"), Err(Error::NotFound)));
		assert!(matches!(normalize_init("a/../../b.php"), Err(Error::NotFound)));
		assert!(matches!(normalize_init(""), Err(Error::ValidationError(_))));
		assert!(matches!(normalize_init("///"), Err(Error::ValidationError(_))));
	}

	#[test]
	fn test_normalize_init_requires_slug_and_php_file() {
		assert!(matches!(normalize_init("loose.php"), Err(Error::NotFound)));
		assert!(matches!(normalize_init("somedir/README.txt"), Err(Error::NotFound)));
		assert!(matches!(normalize_init("a/b/c.php"), Err(Error::NotFound)));
		assert!(matches!(normalize_init("somedir/"), Err(Error::NotFound)));
	}

	#[test]
	fn test_parse_active_is_lenient() {
		assert_eq!(parse_active(Some(json!(["a/a.php", 3, "b/b.php"]))), vec!["a/a.php", "b/b.php"]);
		assert!(parse_active(Some(json!({ "a": 1 }))).is_empty());
		assert!(parse_active(None).is_empty());
	}
}

// vim: ts=4
