//! Option documents
//!
//! Each option is stored as one JSON text value under its name.

use sqlx::{Row, SqlitePool};

use crate::utils::{inspect, parse_json};
use amona::prelude::*;

/// Read an option document by name
pub(crate) async fn read(db: &SqlitePool, name: &str) -> ClResult<Option<serde_json::Value>> {
	let row = sqlx::query("SELECT value FROM options WHERE name = ?1")
		.bind(name)
		.fetch_optional(db)
		.await
		.inspect_err(inspect)
		.map_err(|_| Error::DbError)?;

	match row {
		Some(row) => {
			let value: String = row.try_get("value").inspect_err(inspect).or(Err(Error::DbError))?;
			Ok(Some(parse_json(name, &value)?))
		}
		None => Ok(None),
	}
}

/// Create or replace an option document
pub(crate) async fn update(db: &SqlitePool, name: &str, value: &serde_json::Value) -> ClResult<()> {
	sqlx::query(
		"INSERT OR REPLACE INTO options (name, value, updated_at) VALUES (?1, ?2, unixepoch())",
	)
	.bind(name)
	.bind(value.to_string())
	.execute(db)
	.await
	.inspect_err(inspect)
	.map_err(|_| Error::DbError)?;

	debug!("Option '{}' updated", name);
	Ok(())
}

/// Delete an option document
pub(crate) async fn delete(db: &SqlitePool, name: &str) -> ClResult<()> {
	sqlx::query("DELETE FROM options WHERE name = ?1")
		.bind(name)
		.execute(db)
		.await
		.inspect_err(inspect)
		.map_err(|_| Error::DbError)?;

	Ok(())
}

// vim: ts=4
