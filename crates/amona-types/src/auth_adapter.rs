//! Adapter that manages users and their access tokens

use async_trait::async_trait;
use std::fmt::Debug;

use crate::prelude::*;
use crate::roles::Role;

/// Authenticated caller of a boundary request
#[derive(Debug, Clone)]
pub struct AuthCtx {
	pub user_id: UserId,
	pub login: Box<str>,
	pub role: Role,
	pub capabilities: Box<[Box<str>]>,
}

impl AuthCtx {
	pub fn new(user_id: UserId, login: impl Into<Box<str>>, role: Role) -> Self {
		let capabilities = role.capabilities().iter().map(|cap| Box::from(*cap)).collect();
		Self { user_id, login: login.into(), role, capabilities }
	}

	/// Check whether the caller holds the named capability
	pub fn can(&self, capability: &str) -> bool {
		self.capabilities.iter().any(|cap| cap.as_ref() == capability)
	}
}

#[derive(Debug, Clone)]
pub struct AuthUser {
	pub user_id: UserId,
	pub login: Box<str>,
	pub role: Role,
	pub created_at: Timestamp,
}

#[async_trait]
pub trait AuthAdapter: Debug + Send + Sync {
	/// # Users
	/// Creates a user with the given role, fails if the login is taken
	async fn create_user(&self, login: &str, role: Role) -> ClResult<UserId>;

	/// Reads a user by ID
	async fn read_user(&self, user_id: UserId) -> ClResult<AuthUser>;

	/// Reads a user by login name
	async fn read_user_by_login(&self, login: &str) -> ClResult<AuthUser>;

	/// Changes the role of a user
	async fn update_user_role(&self, user_id: UserId, role: Role) -> ClResult<()>;

	/// # Access tokens
	/// Issues a new access token for the user
	async fn create_access_token(&self, user_id: UserId) -> ClResult<Box<str>>;

	/// Resolves an access token into the caller's context
	async fn validate_access_token(&self, token: &str) -> ClResult<AuthCtx>;

	/// Revokes an access token
	async fn delete_access_token(&self, token: &str) -> ClResult<()>;
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::roles::{INSTALL_PLUGINS, MANAGE_OPTIONS};

	#[test]
	fn test_auth_ctx_capabilities_follow_role() {
		let admin = AuthCtx::new(UserId(1), "admin", Role::Administrator);
		assert!(admin.can(MANAGE_OPTIONS));
		assert!(admin.can(INSTALL_PLUGINS));

		let editor = AuthCtx::new(UserId(2), "editor", Role::Editor);
		assert!(!editor.can(MANAGE_OPTIONS));
	}
}

// vim: ts=4
