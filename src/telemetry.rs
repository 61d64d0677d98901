//! Structured logging setup.

use crate::settings::LoggingSettings;
use thiserror::Error;
use tracing_subscriber::EnvFilter;

/// Environment variable that overrides the configured log filter.
pub const LOG_ENV_VAR: &str = "TASKBOARD_LOG";

/// Errors raised while installing the log subscriber.
#[derive(Debug, Error)]
pub enum TelemetryError {
    /// The configured or overriding filter directive does not parse.
    #[error("invalid log filter: {0}")]
    Filter(#[from] tracing_subscriber::filter::ParseError),

    /// The override variable is set but is not valid Unicode.
    #[error("cannot read {LOG_ENV_VAR}: {0}")]
    Environment(#[from] std::env::VarError),

    /// A global subscriber is already installed.
    #[error("failed to install tracing subscriber: {0}")]
    Install(String),
}

/// Installs a global `tracing` subscriber.
///
/// `TASKBOARD_LOG` takes precedence over [`LoggingSettings::filter`]. A
/// malformed override is an error rather than a silent fallback.
///
/// # Errors
///
/// Returns [`TelemetryError`] when either filter is invalid or a subscriber
/// is already set.
pub fn init_tracing(settings: &LoggingSettings) -> Result<(), TelemetryError> {
    let filter = build_filter(settings)?;
    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    let installed = if settings.json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
    installed.map_err(|err| TelemetryError::Install(err.to_string()))?;

    tracing::debug!(json = settings.json, "tracing subscriber installed");
    Ok(())
}

fn build_filter(settings: &LoggingSettings) -> Result<EnvFilter, TelemetryError> {
    let overridden = match std::env::var(LOG_ENV_VAR) {
        Ok(directives) => Some(directives),
        Err(std::env::VarError::NotPresent) => None,
        Err(err) => return Err(err.into()),
    };
    filter_from(overridden.as_deref(), &settings.filter)
}

fn filter_from(overridden: Option<&str>, configured: &str) -> Result<EnvFilter, TelemetryError> {
    let directives = overridden.unwrap_or(configured);
    Ok(EnvFilter::try_new(directives)?)
}
