//! Admin settings subsystem
//!
//! - **Types** (`types.rs`): setting values, the per-key type registry and the stored document
//! - **Service** (`service.rs`): `SettingsStore` with typed coercion over the options adapter
//! - **Theme options** (`theme_options.rs`): the theme-wide flags document
//! - **Handler** (`handler.rs`): HTTP API endpoints

pub mod handler;
pub mod service;
pub mod theme_options;
pub mod types;

pub use service::SettingsStore;
pub use theme_options::ThemeOptions;
pub use types::{
	FrozenSettingTypes, SettingType, SettingTypeRegistry, SettingValue, SettingsDocument,
};

// vim: ts=4
