//! Database schema initialization

use sqlx::SqlitePool;

/// Initialize the database schema with all required tables and indexes
pub(crate) async fn init_db(db: &SqlitePool) -> Result<(), sqlx::Error> {
	let mut tx = db.begin().await?;

	// Users
	//*******
	sqlx::query(
		"CREATE TABLE IF NOT EXISTS users (
		user_id integer PRIMARY KEY AUTOINCREMENT,
		login text NOT NULL,
		role text NOT NULL,
		created_at integer DEFAULT (unixepoch())
	)",
	)
	.execute(&mut *tx)
	.await?;

	sqlx::query("CREATE UNIQUE INDEX IF NOT EXISTS idx_users_login ON users(login)")
		.execute(&mut *tx)
		.await?;

	// Access tokens
	//***************
	sqlx::query(
		"CREATE TABLE IF NOT EXISTS tokens (
		token_hash text NOT NULL,
		user_id integer NOT NULL,
		created_at integer DEFAULT (unixepoch()),
		PRIMARY KEY(token_hash)
	)",
	)
	.execute(&mut *tx)
	.await?;

	sqlx::query("CREATE INDEX IF NOT EXISTS idx_tokens_user_id ON tokens(user_id)")
		.execute(&mut *tx)
		.await?;

	tx.commit().await?;

	Ok(())
}

// vim: ts=4
