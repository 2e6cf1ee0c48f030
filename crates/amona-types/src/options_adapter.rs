//! Adapter that persists named option documents and per-user metadata.
//!
//! Every option is an opaque JSON document stored under a fixed name. Callers
//! are expected to load the whole document, change it, and write it back.

use async_trait::async_trait;
use std::fmt::Debug;

use crate::prelude::*;

#[async_trait]
pub trait OptionsAdapter: Debug + Send + Sync {
	/// # Options
	/// Reads an option document, `None` if it was never written
	async fn read_option(&self, name: &str) -> ClResult<Option<serde_json::Value>>;

	/// Creates or replaces an option document
	async fn update_option(&self, name: &str, value: &serde_json::Value) -> ClResult<()>;

	/// Deletes an option document
	async fn delete_option(&self, name: &str) -> ClResult<()>;

	/// # User meta
	/// Reads a metadata entry of a user
	async fn read_user_meta(
		&self,
		user_id: UserId,
		key: &str,
	) -> ClResult<Option<serde_json::Value>>;

	/// Creates or replaces a metadata entry of a user
	async fn update_user_meta(
		&self,
		user_id: UserId,
		key: &str,
		value: &serde_json::Value,
	) -> ClResult<()>;

	/// Deletes a metadata entry of a user
	async fn delete_user_meta(&self, user_id: UserId, key: &str) -> ClResult<()>;
}

// vim: ts=4
