//! Shared test setup
//!
//! `create_test_app` builds a complete application over temporary SQLite
//! databases. The returned `TempDir` must outlive the app.

#![allow(dead_code)]

use axum::{
	Router,
	body::Body,
	http::{Request, StatusCode, header},
};
use http_body_util::BodyExt;
use serde_json::Value;
use std::sync::Arc;
use tempfile::TempDir;
use tower::ServiceExt;

use amona_admin::core::nonce;
use amona_admin::notice::AddonInfo;
use amona_admin::{App, AppBuilder, routes};
use amona_auth_adapter_sqlite::AuthAdapterSqlite;
use amona_options_adapter_sqlite::OptionsAdapterSqlite;
use amona_types::auth_adapter::AuthAdapter;
use amona_types::roles::Role;
use amona_types::types::UserId;

pub const TEST_SECRET: &str = "test-nonce-secret";

pub struct TestUser {
	pub user_id: UserId,
	pub token: Box<str>,
}

pub struct TestApp {
	pub app: App,
	pub router: Router,
	pub temp_dir: TempDir,
}

pub fn setup_test_logging() {
	let _ = tracing_subscriber::fmt()
		.with_test_writer()
		.with_max_level(tracing::Level::DEBUG)
		.try_init();
}

pub async fn create_test_app() -> TestApp {
	create_test_app_with(|_| {}).await
}

/// Build an app, letting the caller adjust the builder before it is built
pub async fn create_test_app_with(configure: impl FnOnce(&mut AppBuilder)) -> TestApp {
	setup_test_logging();

	let temp_dir = TempDir::new().expect("Failed to create temp directory");
	let plugin_dir = temp_dir.path().join("plugins");
	std::fs::create_dir_all(&plugin_dir).expect("Failed to create plugin dir");

	let options = OptionsAdapterSqlite::new(temp_dir.path().join("options.db"))
		.await
		.expect("Failed to create options adapter");
	let auth = AuthAdapterSqlite::new(temp_dir.path().join("auth.db"))
		.await
		.expect("Failed to create auth adapter");

	let mut builder = AppBuilder::new();
	builder
		.options_adapter(Arc::new(options))
		.auth_adapter(Arc::new(auth))
		.plugin_dir(plugin_dir)
		.nonce_secret(TEST_SECRET);
	configure(&mut builder);

	let app = builder.build().await.expect("Failed to build app");
	let router = routes::init(app.clone());

	TestApp { app, router, temp_dir }
}

pub fn sample_addon(version: &str, min_version: &str) -> AddonInfo {
	AddonInfo { name: "Amona Pro Addon".into(), version: version.into(), min_version: min_version.into() }
}

impl TestApp {
	pub async fn create_user(&self, login: &str, role: Role) -> TestUser {
		let user_id = self.app.auth_adapter.create_user(login, role).await.expect("Should create user");
		let token = self.app.auth_adapter.create_access_token(user_id).await.expect("Should issue token");
		TestUser { user_id, token }
	}

	pub fn nonce(&self, action: &str, user: &TestUser) -> String {
		self.app.nonces.create(action, user.user_id).expect("Should create nonce").into()
	}

	pub fn update_setting_nonce(&self, user: &TestUser) -> String {
		self.nonce(nonce::UPDATE_ADMIN_SETTING, user)
	}

	/// Create a plugin file under the plugin directory
	pub fn install_plugin(&self, init: &str) {
		let path = self.app.plugins.plugin_dir().join(init);
		if let Some(parent) = path.parent() {
			std::fs::create_dir_all(parent).expect("Failed to create plugin folder");
		}
		std::fs::write(path, "<?php\n").expect("Failed to write plugin file");
	}

	pub async fn get(&self, path: &str, token: Option<&str>) -> (StatusCode, Value) {
		let mut req = Request::builder().method("GET").uri(path);
		if let Some(token) = token {
			req = req.header(header::AUTHORIZATION, format!("Bearer {}", token));
		}
		self.send(req.body(Body::empty()).expect("Should build request")).await
	}

	pub async fn post_form(
		&self,
		path: &str,
		token: Option<&str>,
		fields: &[(&str, &str)],
	) -> (StatusCode, Value) {
		let body = serde_urlencoded::to_string(fields).expect("Should encode form");
		let mut req = Request::builder()
			.method("POST")
			.uri(path)
			.header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
		if let Some(token) = token {
			req = req.header(header::AUTHORIZATION, format!("Bearer {}", token));
		}
		self.send(req.body(Body::from(body)).expect("Should build request")).await
	}

	async fn send(&self, req: Request<Body>) -> (StatusCode, Value) {
		let res = self.router.clone().oneshot(req).await.expect("Router should respond");
		let status = res.status();
		let bytes = res.into_body().collect().await.expect("Should read body").to_bytes();
		let value = if bytes.is_empty() {
			Value::Null
		} else {
			serde_json::from_slice(&bytes).expect("Body should be JSON")
		};
		(status, value)
	}
}

// vim: ts=4
