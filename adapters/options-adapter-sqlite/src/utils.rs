//! Utility functions for database operations

use amona::prelude::*;

/// Log database errors
pub(crate) fn inspect(err: &sqlx::Error) {
	warn!("DB: {:#?}", err);
}

/// Parse a stored JSON text column, logging corrupt values
pub(crate) fn parse_json(name: &str, value: &str) -> ClResult<serde_json::Value> {
	serde_json::from_str(value)
		.inspect_err(|err| warn!("DB: corrupt JSON in {}: {}", name, err))
		.map_err(|_| Error::DbError)
}

// vim: ts=4
