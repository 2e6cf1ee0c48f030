use std::{env, path, process::ExitCode, sync::Arc};

use amona_admin::AppBuilder;
use amona_admin::notice::AddonInfo;
use amona_auth_adapter_sqlite::AuthAdapterSqlite;
use amona_options_adapter_sqlite::OptionsAdapterSqlite;

pub struct Config {
	pub listen: String,
	pub db_dir: path::PathBuf,
	pub plugin_dir: path::PathBuf,
	pub theme_name: String,
	pub admin_login: String,
	pub nonce_secret: Option<String>,
	pub addon: Option<AddonInfo>,
}

fn var_or(name: &str, default: &str) -> String {
	env::var(name).unwrap_or_else(|_| default.to_string())
}

impl Config {
	fn from_env() -> Self {
		let addon = match (env::var("ADDON_NAME"), env::var("ADDON_VERSION")) {
			(Ok(name), Ok(version)) => Some(AddonInfo {
				name: name.into(),
				min_version: var_or("ADDON_MIN_VERSION", &version).into(),
				version: version.into(),
			}),
			_ => None,
		};

		Config {
			listen: var_or("LISTEN", "127.0.0.1:8080"),
			db_dir: path::PathBuf::from(var_or("DB_DIR", "./data")),
			plugin_dir: path::PathBuf::from(var_or("PLUGIN_DIR", "./plugins")),
			theme_name: var_or("THEME_NAME", "Amona"),
			admin_login: var_or("ADMIN_LOGIN", "admin"),
			nonce_secret: env::var("NONCE_SECRET").ok().filter(|secret| !secret.is_empty()),
			addon,
		}
	}
}

async fn run(config: Config) -> Result<(), amona_admin::error::Error> {
	tokio::fs::create_dir_all(&config.db_dir).await?;

	let options_adapter = Arc::new(OptionsAdapterSqlite::new(config.db_dir.join("options.db")).await?);
	let auth_adapter = Arc::new(AuthAdapterSqlite::new(config.db_dir.join("auth.db")).await?);

	let mut builder = AppBuilder::new();
	builder
		.listen(config.listen)
		.plugin_dir(config.plugin_dir)
		.theme_name(config.theme_name)
		.admin_login(config.admin_login)
		.options_adapter(options_adapter)
		.auth_adapter(auth_adapter);
	if let Some(secret) = config.nonce_secret {
		builder.nonce_secret(secret);
	}
	if let Some(addon) = config.addon {
		builder.addon(addon);
	}

	builder.run().await
}

#[tokio::main]
async fn main() -> ExitCode {
	match run(Config::from_env()).await {
		Ok(()) => ExitCode::SUCCESS,
		Err(err) => {
			eprintln!("FATAL: {}", err);
			ExitCode::FAILURE
		}
	}
}

// vim: ts=4
