//! Layered runtime settings.
//!
//! Values come from built-in defaults, then an optional `taskboard.toml`
//! in the working directory, then `TASKBOARD__*` environment variables
//! (`TASKBOARD__DATABASE__URL`, `TASKBOARD__ACTIVITY__FEED_LIMIT`, ...).

use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Base name of the optional settings file.
pub const SETTINGS_FILE: &str = "taskboard";

/// Prefix for environment overrides.
pub const ENV_PREFIX: &str = "TASKBOARD";

/// Top-level settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardSettings {
    /// Database connection settings.
    pub database: DatabaseSettings,
    /// Activity feed settings.
    pub activity: ActivitySettings,
    /// Logging settings.
    pub logging: LoggingSettings,
}

/// `PostgreSQL` connection settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseSettings {
    /// Connection URL.
    pub url: String,
    /// Maximum pooled connections.
    pub max_connections: u32,
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        Self {
            url: "postgres://localhost/taskboard".to_owned(),
            max_connections: 10,
        }
    }
}

/// Activity feed settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ActivitySettings {
    /// Number of entries returned by the recent-activity feed.
    pub feed_limit: usize,
}

impl Default for ActivitySettings {
    fn default() -> Self {
        Self { feed_limit: 50 }
    }
}

/// Logging settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// `tracing` filter directive used when `TASKBOARD_LOG` is unset.
    pub filter: String,
    /// Emit JSON lines instead of human-readable output.
    pub json: bool,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            filter: "info".to_owned(),
            json: false,
        }
    }
}

/// Errors raised while loading settings.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// A source could not be read or deserialized.
    #[error("failed to load settings: {0}")]
    Load(#[from] config::ConfigError),

    /// A value was read but is unusable.
    #[error("invalid setting {key}: {reason}")]
    Invalid {
        /// Dotted setting key.
        key: &'static str,
        /// Why the value was rejected.
        reason: &'static str,
    },
}

impl BoardSettings {
    /// Loads settings from defaults, `taskboard.toml`, and the environment.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError`] when a source is malformed or a value fails
    /// validation.
    pub fn load() -> Result<Self, SettingsError> {
        let settings = Config::builder()
            .add_source(File::with_name(SETTINGS_FILE).required(false))
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize::<Self>()?;
        settings.validate()
    }

    /// Loads settings from defaults overlaid with a TOML document.
    ///
    /// Environment variables are not consulted.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError`] when the document is malformed or a value
    /// fails validation.
    pub fn from_toml(contents: &str) -> Result<Self, SettingsError> {
        let settings = Config::builder()
            .add_source(File::from_str(contents, FileFormat::Toml))
            .build()?
            .try_deserialize::<Self>()?;
        settings.validate()
    }

    fn validate(self) -> Result<Self, SettingsError> {
        if self.database.max_connections == 0 {
            return Err(SettingsError::Invalid {
                key: "database.max_connections",
                reason: "must be at least 1",
            });
        }
        if self.activity.feed_limit == 0 {
            return Err(SettingsError::Invalid {
                key: "activity.feed_limit",
                reason: "must be at least 1",
            });
        }
        Ok(self)
    }
}
