//! User records

use sqlx::{Row, SqlitePool, sqlite::SqliteRow};

use crate::utils::{inspect, map_res};
use amona::{auth_adapter::AuthUser, prelude::*, roles::Role};

fn parse_user(row: &SqliteRow) -> Result<AuthUser, sqlx::Error> {
	let role: String = row.try_get("role")?;
	let role = role.parse::<Role>().map_err(|err| sqlx::Error::Decode(Box::new(err)))?;

	Ok(AuthUser {
		user_id: UserId(row.try_get("user_id")?),
		login: row.try_get::<String, _>("login")?.into(),
		role,
		created_at: Timestamp(row.try_get("created_at")?),
	})
}

pub(crate) async fn create(db: &SqlitePool, login: &str, role: Role) -> ClResult<UserId> {
	let res = sqlx::query("INSERT INTO users (login, role) VALUES (?1, ?2) RETURNING user_id")
		.bind(login)
		.bind(role.as_str())
		.fetch_one(db)
		.await;

	match res {
		Ok(row) => {
			let user_id: i64 = row.try_get("user_id").inspect_err(inspect).or(Err(Error::DbError))?;
			info!("User '{}' created with role {}", login, role);
			Ok(UserId(user_id))
		}
		Err(sqlx::Error::Database(err)) if err.is_unique_violation() => {
			Err(Error::ValidationError(format!("Login '{}' is already taken", login)))
		}
		Err(err) => {
			inspect(&err);
			Err(Error::DbError)
		}
	}
}

pub(crate) async fn read(db: &SqlitePool, user_id: UserId) -> ClResult<AuthUser> {
	let res = sqlx::query("SELECT user_id, login, role, created_at FROM users WHERE user_id = ?1")
		.bind(user_id.0)
		.fetch_one(db)
		.await;

	map_res(res, parse_user)
}

pub(crate) async fn read_by_login(db: &SqlitePool, login: &str) -> ClResult<AuthUser> {
	let res = sqlx::query("SELECT user_id, login, role, created_at FROM users WHERE login = ?1")
		.bind(login)
		.fetch_one(db)
		.await;

	map_res(res, parse_user)
}

pub(crate) async fn update_role(db: &SqlitePool, user_id: UserId, role: Role) -> ClResult<()> {
	let res = sqlx::query("UPDATE users SET role = ?1 WHERE user_id = ?2")
		.bind(role.as_str())
		.bind(user_id.0)
		.execute(db)
		.await
		.inspect_err(inspect)
		.or(Err(Error::DbError))?;

	if res.rows_affected() == 0 {
		return Err(Error::NotFound);
	}
	Ok(())
}

// vim: ts=4
