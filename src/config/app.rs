use std::{net::SocketAddr, path::PathBuf, time::Duration};

use super::{env_or, ConfigError};

pub const DEFAULT_DATABASE_URL: &str = "sqlite://data/accounting.db";
pub const DEFAULT_API_BASE_URL: &str = "http://127.0.0.1:8080/api";

/// Settings for the HTTP server, read from the environment.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub database_url: String,
    pub host: String,
    pub port: u16,
    pub cors_origin: String,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let port = env_or("PORT", "8080")
            .parse::<u16>()
            .map_err(|e| ConfigError::Invalid(format!("PORT: {}", e)))?;

        Ok(Self {
            database_url: env_or("DATABASE_URL", DEFAULT_DATABASE_URL),
            host: env_or("HOST", "127.0.0.1"),
            port,
            cors_origin: env_or("CORS_ORIGIN", "http://localhost:3000"),
        })
    }

    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        let ip = self
            .host
            .parse::<std::net::IpAddr>()
            .map_err(|e| ConfigError::Invalid(format!("HOST: {}", e)))?;
        Ok(SocketAddr::from((ip, self.port)))
    }
}

/// Settings for the authentication client.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub api_base_url: String,
    pub request_timeout: Duration,
    pub storage_path: PathBuf,
}

impl ClientConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let timeout_secs = env_or("ACCOUNTING_REQUEST_TIMEOUT_SECS", "10")
            .parse::<u64>()
            .map_err(|e| ConfigError::Invalid(format!("ACCOUNTING_REQUEST_TIMEOUT_SECS: {}", e)))?;

        Ok(Self {
            api_base_url: env_or("ACCOUNTING_API_URL", DEFAULT_API_BASE_URL)
                .trim_end_matches('/')
                .to_string(),
            request_timeout: Duration::from_secs(timeout_secs),
            storage_path: PathBuf::from(env_or(
                "ACCOUNTING_STORAGE_PATH",
                ".accounting/client.json",
            )),
        })
    }
}
