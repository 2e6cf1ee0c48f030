//! App state type

use std::{
	path::{Path, PathBuf},
	sync::Arc,
};

use amona_types::auth_adapter::AuthAdapter;
use amona_types::options_adapter::OptionsAdapter;
use amona_types::roles::Role;

use crate::core::nonce::{self, NonceIssuer};
use crate::notice::{AddonInfo, NoticeTracker};
use crate::plugin::PluginManager;
use crate::prelude::*;
use crate::routes;
use crate::settings::{SettingType, SettingTypeRegistry, SettingsStore, ThemeOptions};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Option holding the generated nonce secret when none is configured
pub const NONCE_SECRET_OPTION: &str = "amona_nonce_secret";

pub struct AppState {
	pub opts: AppBuilderOpts,

	pub options_adapter: Arc<dyn OptionsAdapter>,
	pub auth_adapter: Arc<dyn AuthAdapter>,

	pub settings: SettingsStore,
	pub theme_options: ThemeOptions,
	pub notices: NoticeTracker,
	pub plugins: PluginManager,
	pub nonces: NonceIssuer,
	pub addon: Option<AddonInfo>,
}

pub type App = Arc<AppState>;

pub struct Adapters {
	pub options_adapter: Option<Arc<dyn OptionsAdapter>>,
	pub auth_adapter: Option<Arc<dyn AuthAdapter>>,
}

#[derive(Debug)]
pub struct AppBuilderOpts {
	pub listen: Box<str>,
	pub theme_name: Box<str>,
	pub plugin_dir: Box<Path>,
	pub nonce_lifetime: u64,
	nonce_secret: Option<Box<str>>,
	admin_login: Option<Box<str>>,
}

pub struct AppBuilder {
	opts: AppBuilderOpts,
	addon: Option<AddonInfo>,
	setting_types: Vec<(Box<str>, SettingType)>,
	adapters: Adapters,
}

impl AppBuilder {
	pub fn new() -> Self {
		AppBuilder {
			opts: AppBuilderOpts {
				listen: "127.0.0.1:8080".into(),
				theme_name: "Amona".into(),
				plugin_dir: PathBuf::from("./plugins").into(),
				nonce_lifetime: nonce::DEFAULT_LIFETIME,
				nonce_secret: None,
				admin_login: None,
			},
			addon: None,
			setting_types: Vec::new(),
			adapters: Adapters { options_adapter: None, auth_adapter: None },
		}
	}

	// Opts
	pub fn listen(&mut self, listen: impl Into<Box<str>>) -> &mut Self { self.opts.listen = listen.into(); self }
	pub fn theme_name(&mut self, theme_name: impl Into<Box<str>>) -> &mut Self { self.opts.theme_name = theme_name.into(); self }
	pub fn plugin_dir(&mut self, plugin_dir: impl Into<Box<Path>>) -> &mut Self { self.opts.plugin_dir = plugin_dir.into(); self }
	pub fn nonce_lifetime(&mut self, seconds: u64) -> &mut Self { self.opts.nonce_lifetime = seconds; self }
	pub fn nonce_secret(&mut self, secret: impl Into<Box<str>>) -> &mut Self { self.opts.nonce_secret = Some(secret.into()); self }
	pub fn admin_login(&mut self, login: impl Into<Box<str>>) -> &mut Self { self.opts.admin_login = Some(login.into()); self }
	pub fn addon(&mut self, addon: AddonInfo) -> &mut Self { self.addon = Some(addon); self }
	pub fn setting_type(&mut self, key: impl Into<Box<str>>, setting_type: SettingType) -> &mut Self {
		self.setting_types.push((key.into(), setting_type));
		self
	}

	// Adapters
	pub fn options_adapter(&mut self, options_adapter: Arc<dyn OptionsAdapter>) -> &mut Self { self.adapters.options_adapter = Some(options_adapter); self }
	pub fn auth_adapter(&mut self, auth_adapter: Arc<dyn AuthAdapter>) -> &mut Self { self.adapters.auth_adapter = Some(auth_adapter); self }

	/// Assemble the application state without starting the server
	pub async fn build(self) -> ClResult<App> {
		let options_adapter = self
			.adapters
			.options_adapter
			.ok_or_else(|| Error::ConfigError("No options adapter".into()))?;
		let auth_adapter = self
			.adapters
			.auth_adapter
			.ok_or_else(|| Error::ConfigError("No auth adapter".into()))?;

		let mut registry = SettingTypeRegistry::with_defaults();
		for (key, setting_type) in &self.setting_types {
			registry.register(key, *setting_type)?;
		}

		let secret = match &self.opts.nonce_secret {
			Some(secret) => secret.clone(),
			None => stored_nonce_secret(options_adapter.as_ref()).await?,
		};
		let nonces = NonceIssuer::new(secret.as_bytes().to_vec(), self.opts.nonce_lifetime)?;

		if let Some(addon) = &self.addon {
			info!("Addon {} {} (minimum {})", addon.name, addon.version, addon.min_version);
		}

		Ok(Arc::new(AppState {
			settings: SettingsStore::new(Arc::new(registry.freeze()), options_adapter.clone()),
			theme_options: ThemeOptions::new(options_adapter.clone()),
			notices: NoticeTracker::new(options_adapter.clone()),
			plugins: PluginManager::new(options_adapter.clone(), self.opts.plugin_dir.clone()),
			nonces,
			addon: self.addon,
			opts: self.opts,

			options_adapter,
			auth_adapter,
		}))
	}

	pub async fn run(self) -> ClResult<()> {
		tracing_subscriber::fmt()
			.with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
			.with_target(false)
			.init();
		info!("Amona admin V{}", VERSION);

		let app = self.build().await?;
		bootstrap(&app).await?;
		let router = routes::init(app.clone());

		let listener = tokio::net::TcpListener::bind(app.opts.listen.as_ref()).await?;
		info!("Listening on HTTP {}", app.opts.listen);
		axum::serve(listener, router).await?;

		Ok(())
	}
}

impl Default for AppBuilder {
	fn default() -> Self { Self::new() }
}

/// Create the configured administrator on first start and print its access token
async fn bootstrap(app: &App) -> ClResult<()> {
	let Some(login) = &app.opts.admin_login else {
		return Ok(());
	};

	match app.auth_adapter.read_user_by_login(login).await {
		Ok(user) => {
			debug!("Administrator '{}' exists (user {})", login, user.user_id);
			Ok(())
		}
		Err(Error::NotFound) => {
			info!("======================================\nBootstrapping...\n======================================");
			let user_id = app.auth_adapter.create_user(login, Role::Administrator).await?;
			let token = app.auth_adapter.create_access_token(user_id).await?;
			info!("Created administrator '{}' (user {})", login, user_id);
			info!("Access token: {}", token);
			Ok(())
		}
		Err(err) => Err(err),
	}
}

/// Nonce secret persisted in the options store, generated on first start
async fn stored_nonce_secret(options: &dyn OptionsAdapter) -> ClResult<Box<str>> {
	if let Some(serde_json::Value::String(secret)) = options.read_option(NONCE_SECRET_OPTION).await?
		&& !secret.is_empty()
	{
		return Ok(secret.into());
	}

	info!("Generating nonce secret");
	let secret = NonceIssuer::generate_secret();
	options.update_option(NONCE_SECRET_OPTION, &secret.clone().into()).await?;
	Ok(secret.into())
}

// vim: ts=4
