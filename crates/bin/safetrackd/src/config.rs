//! Configuration loading — TOML file with environment variable overrides.
//!
//! Looks for `safetrack.toml` in the working directory. Every field has a
//! sensible default so the file is optional. Environment variables (including
//! those loaded from `.env`) take precedence over file values.

use std::fmt;
use std::time::Duration;

use serde::Deserialize;

use safetrack_app::services::admin_service::AdminCredentials;

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// HTTP server settings.
    pub server: ServerConfig,
    /// Database settings.
    pub database: DatabaseConfig,
    /// Administrator secrets.
    pub admin: AdminConfig,
    /// Logging settings.
    pub logging: LoggingConfig,
}

/// HTTP listener configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address to bind to (e.g. `0.0.0.0`).
    pub host: String,
    /// TCP port.
    pub port: u16,
}

/// `SQLite` database configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// `SQLite` connection URL or file path.
    pub url: String,
    /// Upper bound on pooled connections.
    pub max_connections: u32,
    /// Seconds to wait for a connection or a locked database.
    pub timeout_secs: u64,
}

/// Administrator email and password. Both or neither must be set.
#[derive(Default, Deserialize)]
#[serde(default)]
pub struct AdminConfig {
    pub email: Option<String>,
    pub password: Option<String>,
}

impl fmt::Debug for AdminConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AdminConfig")
            .field("email", &self.email)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

/// Logging configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive (`RUST_LOG` syntax).
    pub filter: String,
}

impl Config {
    /// Load configuration from `safetrack.toml` (if present) then apply
    /// environment-variable overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML file exists but is malformed, or if the
    /// resulting configuration is invalid.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = Self::from_file("safetrack.toml")?;
        config.apply_overrides(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).map_err(ConfigError::Parse),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(ConfigError::Io(err)),
        }
    }

    fn apply_overrides(&mut self, var: impl Fn(&str) -> Option<String>) -> Result<(), ConfigError> {
        if let Some(val) = var("HOST") {
            self.server.host = val;
        }
        if let Some(val) = var("PORT") {
            self.server.port = val
                .parse()
                .map_err(|_| ConfigError::Validation(format!("PORT is not a port number: {val}")))?;
        }
        if let Some(val) = var("DATABASE_URL") {
            self.database.url = val;
        }
        if let Some(val) = var("ADMIN_EMAIL") {
            self.admin.email = Some(val);
        }
        if let Some(val) = var("ADMIN_PASSWORD") {
            self.admin.password = Some(val);
        }
        if let Some(val) = var("SAFETRACK_LOG") {
            self.logging.filter = val;
        }
        if let Some(val) = var("RUST_LOG") {
            self.logging.filter = val;
        }
        Ok(())
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::Validation("port must be non-zero".to_string()));
        }
        if self.database.max_connections == 0 {
            return Err(ConfigError::Validation(
                "database max_connections must be non-zero".to_string(),
            ));
        }
        if self.database.timeout_secs == 0 {
            return Err(ConfigError::Validation(
                "database timeout must be non-zero".to_string(),
            ));
        }
        match (&self.admin.email, &self.admin.password) {
            (Some(email), Some(password)) if email.is_empty() || password.is_empty() => Err(
                ConfigError::Validation("admin email and password must not be empty".to_string()),
            ),
            (Some(_), None) | (None, Some(_)) => Err(ConfigError::Validation(
                "admin email and password must be set together".to_string(),
            )),
            _ => Ok(()),
        }
    }

    /// Return the `host:port` bind address.
    #[must_use]
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// Return the storage adapter configuration.
    #[must_use]
    pub fn storage(&self) -> safetrack_adapter_storage_sqlite_sqlx::Config {
        safetrack_adapter_storage_sqlite_sqlx::Config {
            database_url: self.database.url.clone(),
            max_connections: self.database.max_connections,
            timeout: Duration::from_secs(self.database.timeout_secs),
        }
    }

    /// Return the administrator credentials, if configured.
    #[must_use]
    pub fn admin_credentials(&self) -> Option<AdminCredentials> {
        match (&self.admin.email, &self.admin.password) {
            (Some(email), Some(password)) => Some(AdminCredentials {
                email: email.clone(),
                password: password.clone(),
            }),
            _ => None,
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "sqlite:safetrack.db?mode=rwc".to_string(),
            max_connections: 5,
            timeout_secs: 5,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "safetrackd=info,safetrack=info,tower_http=debug".to_string(),
        }
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// TOML parse failure.
    #[error("failed to parse config file")]
    Parse(#[from] toml::de::Error),
    /// File I/O failure.
    #[error("failed to read config file")]
    Io(#[from] std::io::Error),
    /// Semantic validation failure.
    #[error("invalid configuration: {0}")]
    Validation(String),
}
