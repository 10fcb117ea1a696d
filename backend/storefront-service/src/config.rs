//! Configuration management for Storefront Service
//!
//! Loads settings from:
//! 1. Environment variables
//! 2. .env file (local development)
//!
//! # Example
//!
//! ```no_run
//! use storefront_service::config::Settings;
//!
//! fn main() -> anyhow::Result<()> {
//!     let settings = Settings::load()?;
//!     println!("Listening on {}:{}", settings.server.host, settings.server.port);
//!     Ok(())
//! }
//! ```

use anyhow::{bail, Context, Result};
use crypto_core::jwt::MIN_SECRET_LEN;
use serde::Deserialize;
use std::env;
use tracing::info;

/// Application settings
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub database: Option<DatabaseSettings>,
    pub jwt: JwtSettings,
    pub server: ServerSettings,
    pub security: SecuritySettings,
    pub storage: StorageSettings,
}

impl Settings {
    /// Load settings from environment variables
    ///
    /// A `.env` file is read first in debug builds.
    pub fn load() -> Result<Self> {
        if cfg!(debug_assertions) {
            dotenvy::dotenv().ok();
            info!("Loaded .env file for development");
        }

        Self::from_env()
    }

    fn from_env() -> Result<Self> {
        Ok(Settings {
            database: DatabaseSettings::from_env()?,
            jwt: JwtSettings::from_env()?,
            server: ServerSettings::from_env()?,
            security: SecuritySettings::from_env()?,
            storage: StorageSettings::from_env(),
        })
    }
}

/// Database connection settings
///
/// Absent when `DATABASE_URL` is not set; the service then runs on in-memory repositories.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseSettings {
    pub url: String,
    pub max_connections: u32,
}

impl DatabaseSettings {
    fn from_env() -> Result<Option<Self>> {
        let Ok(url) = env::var("DATABASE_URL") else {
            return Ok(None);
        };

        Ok(Some(Self {
            url,
            max_connections: env::var("DATABASE_MAX_CONNECTIONS")
                .unwrap_or_else(|_| "20".to_string())
                .parse()
                .context("Invalid DATABASE_MAX_CONNECTIONS")?,
        }))
    }
}

/// JWT signing settings
#[derive(Clone, Deserialize)]
pub struct JwtSettings {
    pub secret: String,
}

impl std::fmt::Debug for JwtSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtSettings").finish_non_exhaustive()
    }
}

impl JwtSettings {
    fn from_env() -> Result<Self> {
        let secret = env::var("JWT_SECRET").context("JWT_SECRET must be set")?;
        Self::new(secret)
    }

    fn new(secret: String) -> Result<Self> {
        if secret.len() < MIN_SECRET_LEN {
            bail!("JWT_SECRET must be at least {MIN_SECRET_LEN} bytes");
        }
        Ok(Self { secret })
    }
}

/// Server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

impl ServerSettings {
    fn from_env() -> Result<Self> {
        Ok(Self {
            host: env::var("SERVER_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("SERVER_PORT")
                .unwrap_or_else(|_| "50052".to_string())
                .parse()
                .context("Invalid SERVER_PORT")?,
        })
    }
}

/// Token lifecycle policy
#[derive(Debug, Clone, Deserialize)]
pub struct SecuritySettings {
    /// How often expired revocation entries are swept
    pub revocation_sweep_interval_secs: u64,
    /// Invalidate every earlier token of a user once they change their password
    pub revoke_tokens_on_password_change: bool,
}

impl Default for SecuritySettings {
    fn default() -> Self {
        Self {
            revocation_sweep_interval_secs: 3600,
            revoke_tokens_on_password_change: false,
        }
    }
}

impl SecuritySettings {
    fn from_env() -> Result<Self> {
        let revocation_sweep_interval_secs: u64 = env::var("REVOCATION_SWEEP_INTERVAL_SECS")
            .unwrap_or_else(|_| "3600".to_string())
            .parse()
            .context("Invalid REVOCATION_SWEEP_INTERVAL_SECS")?;
        if revocation_sweep_interval_secs == 0 {
            bail!("REVOCATION_SWEEP_INTERVAL_SECS must be greater than zero");
        }

        Ok(Self {
            revocation_sweep_interval_secs,
            revoke_tokens_on_password_change: env::var("REVOKE_TOKENS_ON_PASSWORD_CHANGE")
                .unwrap_or_else(|_| "false".to_string())
                .parse()
                .context("Invalid REVOKE_TOKENS_ON_PASSWORD_CHANGE")?,
        })
    }
}

/// Where product images are served from
#[derive(Debug, Clone, Deserialize)]
pub struct StorageSettings {
    pub service_url: String,
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            service_url: "http://localhost:3000/storage".to_string(),
        }
    }
}

impl StorageSettings {
    fn from_env() -> Self {
        Self {
            service_url: env::var("STORAGE_SERVICE_URL")
                .unwrap_or_else(|_| Self::default().service_url),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Environment variables are process-wide, so every env-touching assertion lives here
    #[test]
    fn test_settings_from_env() {
        env::set_var("JWT_SECRET", "storefront-test-secret-0123456789abcdef");
        env::remove_var("DATABASE_URL");
        env::set_var("SERVER_PORT", "6000");
        env::set_var("REVOKE_TOKENS_ON_PASSWORD_CHANGE", "true");

        let settings = Settings::from_env().unwrap();

        assert!(settings.database.is_none());
        assert_eq!(settings.server.host, "0.0.0.0");
        assert_eq!(settings.server.port, 6000);
        assert!(settings.security.revoke_tokens_on_password_change);
        assert_eq!(settings.security.revocation_sweep_interval_secs, 3600);
        assert!(!format!("{settings:?}").contains("storefront-test-secret"));

        env::set_var("DATABASE_URL", "postgres://localhost/storefront");
        let settings = Settings::from_env().unwrap();
        let database = settings.database.unwrap();
        assert_eq!(database.url, "postgres://localhost/storefront");
        assert_eq!(database.max_connections, 20);

        env::set_var("SERVER_PORT", "not-a-port");
        assert!(Settings::from_env().is_err());

        env::remove_var("JWT_SECRET");
        env::remove_var("DATABASE_URL");
        env::remove_var("SERVER_PORT");
        env::remove_var("REVOKE_TOKENS_ON_PASSWORD_CHANGE");
    }

    #[test]
    fn test_short_jwt_secret_rejected() {
        assert!(JwtSettings::new("short".to_string()).is_err());
        assert!(JwtSettings::new("x".repeat(MIN_SECRET_LEN)).is_ok());
    }

    #[test]
    fn test_jwt_settings_debug_hides_secret() {
        let settings = JwtSettings::new("x".repeat(MIN_SECRET_LEN)).unwrap();
        assert!(!format!("{settings:?}").contains("xxxx"));
    }
}
