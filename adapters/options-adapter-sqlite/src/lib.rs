//! SQLite-backed options adapter.
//!
//! Stores option documents (one JSON value per name) and per-user metadata.

use async_trait::async_trait;
use sqlx::sqlite::{self, SqlitePool};
use std::path::Path;

use amona::{options_adapter::OptionsAdapter, prelude::*};

mod option;
mod schema;
mod user_meta;
mod utils;

use utils::inspect;

#[derive(Debug)]
pub struct OptionsAdapterSqlite {
	db: SqlitePool,
}

impl OptionsAdapterSqlite {
	pub async fn new(path: impl AsRef<Path>) -> ClResult<Self> {
		let opts = sqlite::SqliteConnectOptions::new()
			.filename(path.as_ref())
			.create_if_missing(true)
			.journal_mode(sqlite::SqliteJournalMode::Wal);
		let db = sqlite::SqlitePoolOptions::new()
			.max_connections(5)
			.connect_with(opts)
			.await
			.inspect_err(inspect)
			.or(Err(Error::DbError))?;

		schema::init_db(&db).await.inspect_err(inspect).or(Err(Error::DbError))?;
		info!("Options database opened: {}", path.as_ref().display());

		Ok(Self { db })
	}
}

#[async_trait]
impl OptionsAdapter for OptionsAdapterSqlite {
	// Options
	//*********
	async fn read_option(&self, name: &str) -> ClResult<Option<serde_json::Value>> {
		option::read(&self.db, name).await
	}

	async fn update_option(&self, name: &str, value: &serde_json::Value) -> ClResult<()> {
		option::update(&self.db, name, value).await
	}

	async fn delete_option(&self, name: &str) -> ClResult<()> {
		option::delete(&self.db, name).await
	}

	// User meta
	//***********
	async fn read_user_meta(
		&self,
		user_id: UserId,
		key: &str,
	) -> ClResult<Option<serde_json::Value>> {
		user_meta::read(&self.db, user_id, key).await
	}

	async fn update_user_meta(
		&self,
		user_id: UserId,
		key: &str,
		value: &serde_json::Value,
	) -> ClResult<()> {
		user_meta::update(&self.db, user_id, key, value).await
	}

	async fn delete_user_meta(&self, user_id: UserId, key: &str) -> ClResult<()> {
		user_meta::delete(&self.db, user_id, key).await
	}
}

// vim: ts=4
