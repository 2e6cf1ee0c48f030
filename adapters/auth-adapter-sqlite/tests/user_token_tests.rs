//! Users and access token tests
#![allow(clippy::panic, clippy::expect_used, clippy::unwrap_used)]

use amona::auth_adapter::AuthAdapter;
use amona::prelude::*;
use amona::roles::{EDIT_THEME_OPTIONS, MANAGE_OPTIONS, Role};
use amona_auth_adapter_sqlite::AuthAdapterSqlite;
use tempfile::TempDir;

/// Helper to create a test auth adapter with temporary database
async fn create_test_adapter() -> (AuthAdapterSqlite, TempDir) {
	let tmp_dir = TempDir::new().expect("Failed to create temp directory");
	let adapter = AuthAdapterSqlite::new(tmp_dir.path().join("auth.db"))
		.await
		.expect("Failed to create adapter");
	(adapter, tmp_dir)
}

#[tokio::test]
async fn test_create_and_read_user() {
	let (adapter, _tmp) = create_test_adapter().await;

	let user_id = adapter.create_user("admin", Role::Administrator).await.expect("Should create");
	let user = adapter.read_user(user_id).await.expect("Should read");
	assert_eq!(user.login.as_ref(), "admin");
	assert_eq!(user.role, Role::Administrator);

	let by_login = adapter.read_user_by_login("admin").await.expect("Should read by login");
	assert_eq!(by_login.user_id, user_id);
}

#[tokio::test]
async fn test_duplicate_login_is_rejected() {
	let (adapter, _tmp) = create_test_adapter().await;

	adapter.create_user("admin", Role::Administrator).await.expect("Should create");
	let res = adapter.create_user("admin", Role::Editor).await;
	assert!(matches!(res, Err(Error::ValidationError(_))));
}

#[tokio::test]
async fn test_unknown_user_is_not_found() {
	let (adapter, _tmp) = create_test_adapter().await;

	assert!(matches!(adapter.read_user(UserId(99)).await, Err(Error::NotFound)));
	assert!(matches!(adapter.create_access_token(UserId(99)).await, Err(Error::NotFound)));
}

#[tokio::test]
async fn test_token_resolves_to_capabilities() {
	let (adapter, _tmp) = create_test_adapter().await;

	let user_id = adapter.create_user("editor", Role::Editor).await.expect("Should create");
	let token = adapter.create_access_token(user_id).await.expect("Should issue token");

	let ctx = adapter.validate_access_token(&token).await.expect("Should validate");
	assert_eq!(ctx.user_id, user_id);
	assert!(ctx.can(EDIT_THEME_OPTIONS));
	assert!(!ctx.can(MANAGE_OPTIONS));
}

#[tokio::test]
async fn test_role_change_applies_to_existing_tokens() {
	let (adapter, _tmp) = create_test_adapter().await;

	let user_id = adapter.create_user("editor", Role::Editor).await.expect("Should create");
	let token = adapter.create_access_token(user_id).await.expect("Should issue token");
	adapter.update_user_role(user_id, Role::Administrator).await.expect("Should update role");

	let ctx = adapter.validate_access_token(&token).await.expect("Should validate");
	assert!(ctx.can(MANAGE_OPTIONS));
}

#[tokio::test]
async fn test_invalid_and_revoked_tokens() {
	let (adapter, _tmp) = create_test_adapter().await;

	assert!(matches!(adapter.validate_access_token("bogus").await, Err(Error::Unauthorized)));

	let user_id = adapter.create_user("admin", Role::Administrator).await.expect("Should create");
	let token = adapter.create_access_token(user_id).await.expect("Should issue token");
	adapter.delete_access_token(&token).await.expect("Should revoke");

	assert!(matches!(adapter.validate_access_token(&token).await, Err(Error::Unauthorized)));
}

// vim: ts=4
