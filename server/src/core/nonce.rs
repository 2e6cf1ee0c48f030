//! Anti-forgery tokens ("nonces") for mutating admin requests.
//!
//! A token is an HMAC-SHA256 over the action name, the user and a time tick,
//! truncated to 12 bytes and base64url encoded (16 characters). One tick lasts
//! half of the configured lifetime; a token is accepted during the tick it was
//! issued in and the following one.

use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use hmac::{Hmac, Mac};
use rand::RngExt;
use sha2::Sha256;

use crate::prelude::*;

type HmacSha256 = Hmac<Sha256>;

/// Action protecting the settings endpoints
pub const UPDATE_ADMIN_SETTING: &str = "amona_update_admin_setting";
/// Action protecting plugin activation and deactivation
pub const PLUGIN_MANAGER: &str = "amona_plugin_manager_nonce";
/// Action protecting notice dismissal
pub const NOTICE_DISMISS: &str = "amona-notice-dismiss";

pub const ACTIONS: [&str; 3] = [UPDATE_ADMIN_SETTING, PLUGIN_MANAGER, NOTICE_DISMISS];

pub const DEFAULT_LIFETIME: u64 = 86_400;
const TAG_LENGTH: usize = 12;
const SECRET_LENGTH: usize = 32;

pub struct NonceIssuer {
	secret: Box<[u8]>,
	lifetime: u64,
}

impl std::fmt::Debug for NonceIssuer {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("NonceIssuer").field("lifetime", &self.lifetime).finish_non_exhaustive()
	}
}

impl NonceIssuer {
	pub fn new(secret: impl Into<Box<[u8]>>, lifetime: u64) -> ClResult<Self> {
		let secret = secret.into();
		if secret.is_empty() {
			return Err(Error::ConfigError("Nonce secret must not be empty".into()));
		}
		if lifetime < 2 {
			return Err(Error::ConfigError("Nonce lifetime must be at least 2 seconds".into()));
		}
		Ok(Self { secret, lifetime })
	}

	/// Generate a random secret, encoded for storage
	pub fn generate_secret() -> String {
		let mut rng = rand::rng();
		let bytes: Vec<u8> = (0..SECRET_LENGTH).map(|_| rng.random::<u8>()).collect();
		URL_SAFE_NO_PAD.encode(bytes)
	}

	fn tick(&self, now: Timestamp) -> i64 {
		let half = i64::try_from(self.lifetime / 2).unwrap_or(i64::MAX);
		now.0.div_euclid(half) + i64::from(now.0.rem_euclid(half) != 0)
	}

	fn mac(&self, action: &str, user_id: UserId, tick: i64) -> ClResult<HmacSha256> {
		let mut mac = HmacSha256::new_from_slice(&self.secret)
			.map_err(|_| Error::ConfigError("Invalid nonce secret".into()))?;
		mac.update(format!("{}|{}|{}", tick, action, user_id).as_bytes());
		Ok(mac)
	}

	pub fn create(&self, action: &str, user_id: UserId) -> ClResult<Box<str>> {
		self.create_at(action, user_id, Timestamp::now())
	}

	pub fn create_at(&self, action: &str, user_id: UserId, now: Timestamp) -> ClResult<Box<str>> {
		let tag = self.mac(action, user_id, self.tick(now))?.finalize().into_bytes();
		Ok(URL_SAFE_NO_PAD.encode(&tag[..TAG_LENGTH]).into())
	}

	pub fn verify(&self, action: &str, user_id: UserId, token: &str) -> ClResult<()> {
		self.verify_at(action, user_id, token, Timestamp::now())
	}

	/// Verify a token against the current and the previous tick
	pub fn verify_at(
		&self,
		action: &str,
		user_id: UserId,
		token: &str,
		now: Timestamp,
	) -> ClResult<()> {
		let Ok(tag) = URL_SAFE_NO_PAD.decode(token.trim()) else {
			return Err(Error::AuthenticationFailed);
		};
		if tag.len() != TAG_LENGTH {
			return Err(Error::AuthenticationFailed);
		}

		let tick = self.tick(now);
		for candidate in [tick, tick - 1] {
			if self.mac(action, user_id, candidate)?.verify_truncated_left(&tag).is_ok() {
				return Ok(());
			}
		}

		warn!("Nonce validation failed for action '{}' (user {})", action, user_id);
		Err(Error::AuthenticationFailed)
	}
}


// vim: ts=4
