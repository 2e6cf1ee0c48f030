//! User roles and the capabilities they grant

use serde::{Deserialize, Serialize};

use crate::error::Error;

pub const MANAGE_OPTIONS: &str = "manage_options";
pub const EDIT_THEME_OPTIONS: &str = "edit_theme_options";
pub const INSTALL_PLUGINS: &str = "install_plugins";
pub const ACTIVATE_PLUGINS: &str = "activate_plugins";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
	Administrator,
	Editor,
	Subscriber,
}

impl Role {
	pub fn as_str(&self) -> &'static str {
		match self {
			Role::Administrator => "administrator",
			Role::Editor => "editor",
			Role::Subscriber => "subscriber",
		}
	}

	/// Capabilities granted by this role
	pub fn capabilities(&self) -> &'static [&'static str] {
		match self {
			Role::Administrator => {
				&[MANAGE_OPTIONS, EDIT_THEME_OPTIONS, INSTALL_PLUGINS, ACTIVATE_PLUGINS]
			}
			Role::Editor => &[EDIT_THEME_OPTIONS],
			Role::Subscriber => &[],
		}
	}
}

impl std::str::FromStr for Role {
	type Err = Error;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s {
			"administrator" => Ok(Role::Administrator),
			"editor" => Ok(Role::Editor),
			"subscriber" => Ok(Role::Subscriber),
			_ => Err(Error::ValidationError(format!("Unknown role: {}", s))),
		}
	}
}

impl std::fmt::Display for Role {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.write_str(self.as_str())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_role_capabilities() {
		assert!(Role::Administrator.capabilities().contains(&MANAGE_OPTIONS));
		assert!(Role::Editor.capabilities().contains(&EDIT_THEME_OPTIONS));
		assert!(!Role::Editor.capabilities().contains(&MANAGE_OPTIONS));
		assert!(Role::Subscriber.capabilities().is_empty());
	}

	#[test]
	fn test_role_round_trips_through_str() {
		for role in [Role::Administrator, Role::Editor, Role::Subscriber] {
			assert_eq!(role.as_str().parse::<Role>().ok(), Some(role));
		}
		assert!("root".parse::<Role>().is_err());
	}
}

// vim: ts=4
