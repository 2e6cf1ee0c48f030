//! Access tokens
//!
//! Tokens are random strings handed to the client once; only their SHA-256
//! hash is stored.

use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use rand::RngExt;
use sha2::{Digest, Sha256};
use sqlx::{Row, SqlitePool};

use crate::utils::inspect;
use amona::{auth_adapter::AuthCtx, prelude::*, roles::Role};

const TOKEN_LENGTH: usize = 32;
const SAFE: [char; 62] = [
	'0', '1', '2', '3', '4', '5', '6', '7', '8', '9', 'a', 'b', 'c', 'd', 'e', 'f', 'g', 'h', 'i',
	'j', 'k', 'l', 'm', 'n', 'o', 'p', 'q', 'r', 's', 't', 'u', 'v', 'w', 'x', 'y', 'z', 'A', 'B',
	'C', 'D', 'E', 'F', 'G', 'H', 'I', 'J', 'K', 'L', 'M', 'N', 'O', 'P', 'Q', 'R', 'S', 'T', 'U',
	'V', 'W', 'X', 'Y', 'Z',
];

fn random_token() -> String {
	let mut rng = rand::rng();
	(0..TOKEN_LENGTH).map(|_| SAFE[rng.random_range(0..SAFE.len())]).collect()
}

pub(crate) fn hash_token(token: &str) -> String {
	URL_SAFE_NO_PAD.encode(Sha256::digest(token.as_bytes()))
}

pub(crate) async fn create(db: &SqlitePool, user_id: UserId) -> ClResult<Box<str>> {
	// Unknown users get no token
	crate::user::read(db, user_id).await?;

	let token = random_token();
	sqlx::query("INSERT INTO tokens (token_hash, user_id) VALUES (?1, ?2)")
		.bind(hash_token(&token))
		.bind(user_id.0)
		.execute(db)
		.await
		.inspect_err(inspect)
		.or(Err(Error::DbError))?;

	debug!("Access token issued for user {}", user_id);
	Ok(token.into())
}

pub(crate) async fn validate(db: &SqlitePool, token: &str) -> ClResult<AuthCtx> {
	let row = sqlx::query(
		"SELECT u.user_id, u.login, u.role FROM tokens t
		JOIN users u ON u.user_id = t.user_id
		WHERE t.token_hash = ?1",
	)
	.bind(hash_token(token))
	.fetch_optional(db)
	.await
	.inspect_err(inspect)
	.or(Err(Error::DbError))?;

	let Some(row) = row else {
		return Err(Error::Unauthorized);
	};

	let user_id: i64 = row.try_get("user_id").inspect_err(inspect).or(Err(Error::DbError))?;
	let login: String = row.try_get("login").inspect_err(inspect).or(Err(Error::DbError))?;
	let role: String = row.try_get("role").inspect_err(inspect).or(Err(Error::DbError))?;
	let role = role.parse::<Role>().or(Err(Error::DbError))?;

	Ok(AuthCtx::new(UserId(user_id), login, role))
}

pub(crate) async fn delete(db: &SqlitePool, token: &str) -> ClResult<()> {
	sqlx::query("DELETE FROM tokens WHERE token_hash = ?1")
		.bind(hash_token(token))
		.execute(db)
		.await
		.inspect_err(inspect)
		.or(Err(Error::DbError))?;

	Ok(())
}


// vim: ts=4
