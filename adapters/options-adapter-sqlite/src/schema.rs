//! Database schema initialization

use sqlx::SqlitePool;

/// Initialize the database schema with all required tables
pub(crate) async fn init_db(db: &SqlitePool) -> Result<(), sqlx::Error> {
	let mut tx = db.begin().await?;

	// Options
	//*********
	sqlx::query(
		"CREATE TABLE IF NOT EXISTS options (
		name text NOT NULL,
		value text NOT NULL,
		updated_at datetime DEFAULT (unixepoch()),
		PRIMARY KEY(name)
	)",
	)
	.execute(&mut *tx)
	.await?;

	// User meta
	//***********
	sqlx::query(
		"CREATE TABLE IF NOT EXISTS user_meta (
		user_id integer NOT NULL,
		key text NOT NULL,
		value text NOT NULL,
		updated_at datetime DEFAULT (unixepoch()),
		PRIMARY KEY(user_id, key)
	)",
	)
	.execute(&mut *tx)
	.await?;

	tx.commit().await?;

	Ok(())
}

// vim: ts=4
