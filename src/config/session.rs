use base64::{engine::general_purpose::STANDARD, Engine as _};
use sha2::{Digest, Sha512};
use time::Duration;
use tower_sessions::{
    cookie::{Key, SameSite},
    service::SignedCookie,
    Expiry, SessionManagerLayer,
};
use tower_sessions_sqlx_store::SqliteStore;
use tracing::warn;

use super::{env_flag_enabled, env_or, ConfigError};

/// Signed session layer backed by the SQLite session table.
pub type SessionLayer = SessionManagerLayer<SqliteStore, SignedCookie>;

pub const SESSION_TABLE: &str = "sessions";

/// Inactivity expiry applied when a login asks to be remembered.
pub const REMEMBER_ME_EXPIRY: Duration = Duration::days(30);

#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub secure: bool,
    pub same_site: SameSite,
    pub expiry: Duration,
    pub name: String,
    secret: Option<String>,
}

impl SessionConfig {
    pub fn from_env() -> Self {
        let secret = std::env::var("SESSION_SECRET")
            .ok()
            .filter(|s| !s.is_empty());

        if is_production() {
            SessionConfig {
                secure: true,
                same_site: SameSite::Strict,
                expiry: Duration::hours(2),
                name: "__Host-accounting".to_string(),
                secret,
            }
        } else {
            SessionConfig {
                secure: false,
                // The React front end runs on its own origin during development.
                same_site: SameSite::Lax,
                expiry: Duration::days(1),
                name: "accounting_session".to_string(),
                secret,
            }
        }
    }

    /// Refuses to start a production server over plain HTTP or with a weak secret.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !is_production() {
            return Ok(());
        }

        if !env_flag_enabled("FORCE_HTTPS") {
            return Err(ConfigError::Invalid(
                "production requires HTTPS; set FORCE_HTTPS=true".to_string(),
            ));
        }

        let secret = self
            .secret
            .as_deref()
            .ok_or_else(|| ConfigError::Missing("SESSION_SECRET".to_string()))?;

        if decode_secret_bytes(secret).len() < 64 {
            return Err(ConfigError::Invalid(
                "SESSION_SECRET must be at least 64 bytes in production".to_string(),
            ));
        }

        let lowered = secret.to_ascii_lowercase();
        if ["example", "changeme", "default"]
            .iter()
            .any(|weak| lowered.contains(weak))
        {
            return Err(ConfigError::Invalid(
                "SESSION_SECRET appears to be a placeholder value".to_string(),
            ));
        }

        Ok(())
    }

    pub fn create_layer(&self, store: SqliteStore) -> SessionLayer {
        SessionManagerLayer::new(store)
            .with_secure(self.secure)
            .with_http_only(true)
            .with_same_site(self.same_site)
            .with_name(self.name.clone())
            .with_expiry(Expiry::OnInactivity(self.expiry))
            .with_signed(self.signing_key())
    }

    fn signing_key(&self) -> Key {
        match self.secret.as_deref() {
            Some(secret) => key_from_secret_bytes(&decode_secret_bytes(secret)),
            None => {
                warn!("SESSION_SECRET not set; generating ephemeral key (development only)");
                Key::generate()
            }
        }
    }
}

fn is_production() -> bool {
    env_or("ENVIRONMENT", "development") == "production"
}

fn decode_secret_bytes(secret: &str) -> Vec<u8> {
    STANDARD
        .decode(secret.as_bytes())
        .unwrap_or_else(|_| secret.as_bytes().to_vec())
}

fn key_from_secret_bytes(bytes: &[u8]) -> Key {
    if bytes.len() >= 64 {
        Key::from(&bytes[..64])
    } else {
        let digest = Sha512::digest(bytes);
        Key::from(digest.as_slice())
    }
}
