//! Settings types and the per-key type registry

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

use crate::prelude::*;
use crate::utils::sanitize_text_field;

/// Name of the options document holding the admin settings
pub const SETTINGS_DOCUMENT: &str = "amona_admin_settings";

pub const SELF_HOSTED_GFONTS: &str = "self_hosted_gfonts";
pub const PRELOAD_LOCAL_FONTS: &str = "preload_local_fonts";
pub const USE_OLD_HEADER_FOOTER: &str = "use_old_header_footer";
pub const USE_UPGRADE_NOTICES: &str = "use_upgrade_notices";

/// Setting value types
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SettingValue {
	Bool(bool),
	String(String),
}

impl SettingValue {
	pub fn type_name(&self) -> &'static str {
		match self {
			SettingValue::Bool(_) => "bool",
			SettingValue::String(_) => "string",
		}
	}

	pub fn as_bool(&self) -> Option<bool> {
		match self {
			SettingValue::Bool(b) => Some(*b),
			SettingValue::String(_) => None,
		}
	}

	pub fn as_str(&self) -> Option<&str> {
		match self {
			SettingValue::String(s) => Some(s),
			SettingValue::Bool(_) => None,
		}
	}
}

impl From<bool> for SettingValue {
	fn from(value: bool) -> Self {
		SettingValue::Bool(value)
	}
}

impl From<&str> for SettingValue {
	fn from(value: &str) -> Self {
		SettingValue::String(value.to_string())
	}
}

impl From<SettingValue> for serde_json::Value {
	fn from(value: SettingValue) -> Self {
		match value {
			SettingValue::Bool(b) => serde_json::Value::Bool(b),
			SettingValue::String(s) => serde_json::Value::String(s),
		}
	}
}

/// Declared type of a setting key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SettingType {
	Bool,
	String,
}

impl SettingType {
	/// Coerce a raw request value into this type.
	///
	/// `bool` accepts exactly `"true"` (after sanitizing) as true, everything
	/// else is false. `string` stores the sanitized text.
	pub fn coerce(&self, raw: &str) -> ClResult<SettingValue> {
		let sanitized = sanitize_text_field(raw)?;
		Ok(match self {
			SettingType::Bool => SettingValue::Bool(sanitized == "true"),
			SettingType::String => SettingValue::String(sanitized),
		})
	}
}

/// Mutable registry used during app initialization
#[derive(Debug, Default)]
pub struct SettingTypeRegistry {
	types: HashMap<Box<str>, SettingType>,
}

impl SettingTypeRegistry {
	pub fn new() -> Self {
		Self::default()
	}

	/// Registry with the built-in boolean settings
	pub fn with_defaults() -> Self {
		let mut registry = Self::new();
		for key in [SELF_HOSTED_GFONTS, PRELOAD_LOCAL_FONTS, USE_OLD_HEADER_FOOTER] {
			registry.types.insert(key.into(), SettingType::Bool);
		}
		registry
	}

	/// Register the type of a setting key
	pub fn register(&mut self, key: &str, setting_type: SettingType) -> ClResult<()> {
		match self.types.get(key) {
			Some(existing) if *existing == setting_type => Ok(()),
			Some(existing) => Err(Error::ConfigError(format!(
				"Setting '{}' is already registered as {:?}",
				key, existing
			))),
			None => {
				debug!("Registering setting type: {} = {:?}", key, setting_type);
				self.types.insert(key.into(), setting_type);
				Ok(())
			}
		}
	}

	/// Freeze the registry (make it immutable)
	pub fn freeze(self) -> FrozenSettingTypes {
		info!("Freezing setting type registry with {} entries", self.types.len());
		FrozenSettingTypes { types: self.types }
	}
}

/// Immutable registry stored in AppState
#[derive(Debug)]
pub struct FrozenSettingTypes {
	types: HashMap<Box<str>, SettingType>,
}

impl FrozenSettingTypes {
	/// Declared type of a key, `String` when the key is not registered
	pub fn type_of(&self, key: &str) -> SettingType {
		self.types.get(key).copied().unwrap_or(SettingType::String)
	}

	pub fn len(&self) -> usize {
		self.types.len()
	}

	pub fn is_empty(&self) -> bool {
		self.types.is_empty()
	}
}

// SettingsDocument //
//******************//
/// The whole stored settings mapping
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct SettingsDocument(pub BTreeMap<String, SettingValue>);

impl SettingsDocument {
	/// Parse a stored document.
	///
	/// Values that are neither booleans nor strings are kept as their textual
	/// form; anything other than an object reads as an empty document.
	pub fn from_json(value: serde_json::Value) -> Self {
		let serde_json::Value::Object(map) = value else {
			warn!("Settings document is not an object, ignoring it");
			return Self::default();
		};

		let entries = map
			.into_iter()
			.filter_map(|(key, value)| match value {
				serde_json::Value::Bool(b) => Some((key, SettingValue::Bool(b))),
				serde_json::Value::String(s) => Some((key, SettingValue::String(s))),
				serde_json::Value::Number(n) => Some((key, SettingValue::String(n.to_string()))),
				serde_json::Value::Null => None,
				other => {
					warn!("Dropping non-scalar setting '{}': {}", key, other);
					None
				}
			})
			.collect();
		Self(entries)
	}

	pub fn to_json(&self) -> serde_json::Value {
		serde_json::Value::Object(
			self.0.iter().map(|(k, v)| (k.clone(), v.clone().into())).collect(),
		)
	}

	pub fn get(&self, key: &str) -> Option<&SettingValue> {
		self.0.get(key)
	}

	pub fn insert(&mut self, key: impl Into<String>, value: SettingValue) {
		self.0.insert(key.into(), value);
	}

	pub fn len(&self) -> usize {
		self.0.len()
	}

	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use serde_json::json;

	#[test]
	fn test_bool_coercion() {
		let ty = SettingType::Bool;
		assert_eq!(ty.coerce("true").unwrap(), SettingValue::Bool(true));
		assert_eq!(ty.coerce(" true\n").unwrap(), SettingValue::Bool(true));
		assert_eq!(ty.coerce("false").unwrap(), SettingValue::Bool(false));
		assert_eq!(ty.coerce("1").unwrap(), SettingValue::Bool(false));
		assert_eq!(ty.coerce("TRUE").unwrap(), SettingValue::Bool(false));
		assert_eq!(ty.coerce("").unwrap(), SettingValue::Bool(false));
	}

	#[test]
	fn test_string_coercion_sanitizes() {
		let ty = SettingType::String;
		assert_eq!(ty.coerce("plain").unwrap(), SettingValue::from("plain"));
		assert_eq!(ty.coerce("  <i>x</i>  y ").unwrap(), SettingValue::from("x y"));
	}

	#[test]
	fn test_registry_defaults_and_fallback() {
		let types = SettingTypeRegistry::with_defaults().freeze();
		assert_eq!(types.len(), 3);
		assert_eq!(types.type_of(SELF_HOSTED_GFONTS), SettingType::Bool);
		assert_eq!(types.type_of(PRELOAD_LOCAL_FONTS), SettingType::Bool);
		assert_eq!(types.type_of(USE_OLD_HEADER_FOOTER), SettingType::Bool);
		assert_eq!(types.type_of("anything_else"), SettingType::String);
	}

	#[test]
	fn test_registry_rejects_conflicting_types() {
		let mut registry = SettingTypeRegistry::with_defaults();
		assert!(registry.register(SELF_HOSTED_GFONTS, SettingType::Bool).is_ok());
		assert!(registry.register(SELF_HOSTED_GFONTS, SettingType::String).is_err());
		assert!(registry.register("custom_flag", SettingType::Bool).is_ok());
		assert_eq!(registry.freeze().type_of("custom_flag"), SettingType::Bool);
	}

	#[test]
	fn test_document_parsing_is_lenient() {
		let doc = SettingsDocument::from_json(json!({
			"a": true,
			"b": "text",
			"c": 3,
			"d": null,
			"e": [1, 2],
		}));
		assert_eq!(doc.len(), 3);
		assert_eq!(doc.get("a"), Some(&SettingValue::Bool(true)));
		assert_eq!(doc.get("c"), Some(&SettingValue::from("3")));

		assert!(SettingsDocument::from_json(json!("garbage")).is_empty());
	}

	#[test]
	fn test_document_serializes_as_plain_object() {
		let mut doc = SettingsDocument::default();
		doc.insert("flag", true.into());
		doc.insert("name", "x".into());
		assert_eq!(doc.to_json(), json!({ "flag": true, "name": "x" }));
		assert_eq!(serde_json::to_value(&doc).unwrap(), json!({ "flag": true, "name": "x" }));
	}
}

// vim: ts=4
