//! Per-user metadata entries

use sqlx::{Row, SqlitePool};

use crate::utils::{inspect, parse_json};
use amona::prelude::*;

pub(crate) async fn read(
	db: &SqlitePool,
	user_id: UserId,
	key: &str,
) -> ClResult<Option<serde_json::Value>> {
	let row = sqlx::query("SELECT value FROM user_meta WHERE user_id = ?1 AND key = ?2")
		.bind(user_id.0)
		.bind(key)
		.fetch_optional(db)
		.await
		.inspect_err(inspect)
		.map_err(|_| Error::DbError)?;

	match row {
		Some(row) => {
			let value: String = row.try_get("value").inspect_err(inspect).or(Err(Error::DbError))?;
			Ok(Some(parse_json(key, &value)?))
		}
		None => Ok(None),
	}
}

pub(crate) async fn update(
	db: &SqlitePool,
	user_id: UserId,
	key: &str,
	value: &serde_json::Value,
) -> ClResult<()> {
	sqlx::query(
		"INSERT OR REPLACE INTO user_meta (user_id, key, value, updated_at)
		VALUES (?1, ?2, ?3, unixepoch())",
	)
	.bind(user_id.0)
	.bind(key)
	.bind(value.to_string())
	.execute(db)
	.await
	.inspect_err(inspect)
	.map_err(|_| Error::DbError)?;

	Ok(())
}

pub(crate) async fn delete(db: &SqlitePool, user_id: UserId, key: &str) -> ClResult<()> {
	sqlx::query("DELETE FROM user_meta WHERE user_id = ?1 AND key = ?2")
		.bind(user_id.0)
		.bind(key)
		.execute(db)
		.await
		.inspect_err(inspect)
		.map_err(|_| Error::DbError)?;

	Ok(())
}

// vim: ts=4
