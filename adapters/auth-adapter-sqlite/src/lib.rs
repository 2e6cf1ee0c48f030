//! SQLite-backed authentication adapter: users, roles, and access tokens

use async_trait::async_trait;
use sqlx::sqlite::{self, SqlitePool};
use std::path::Path;

use amona::{
	auth_adapter::{AuthAdapter, AuthCtx, AuthUser},
	prelude::*,
	roles::Role,
};

mod schema;
mod token;
mod user;
mod utils;

use utils::inspect;

#[derive(Debug)]
pub struct AuthAdapterSqlite {
	db: SqlitePool,
}

impl AuthAdapterSqlite {
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

		Ok(Self { db })
	}
}

#[async_trait]
impl AuthAdapter for AuthAdapterSqlite {
	// Users
	//*******
	async fn create_user(&self, login: &str, role: Role) -> ClResult<UserId> {
		user::create(&self.db, login, role).await
	}

	async fn read_user(&self, user_id: UserId) -> ClResult<AuthUser> {
		user::read(&self.db, user_id).await
	}

	async fn read_user_by_login(&self, login: &str) -> ClResult<AuthUser> {
		user::read_by_login(&self.db, login).await
	}

	async fn update_user_role(&self, user_id: UserId, role: Role) -> ClResult<()> {
		user::update_role(&self.db, user_id, role).await
	}

	// Access tokens
	//***************
	async fn create_access_token(&self, user_id: UserId) -> ClResult<Box<str>> {
		token::create(&self.db, user_id).await
	}

	async fn validate_access_token(&self, token: &str) -> ClResult<AuthCtx> {
		token::validate(&self.db, token).await
	}

	async fn delete_access_token(&self, token: &str) -> ClResult<()> {
		token::delete(&self.db, token).await
	}
}

// vim: ts=4
