//! Observability subsystem
//!
//! Structured logging through `tracing`. Every line carries an `event`
//! field taken from [`Event`].
//!
//! # Principles
//!
//! 1. Observability is read-only
//! 2. Logging never changes an operation's result
//! 3. Initialisation happens once, in the binary
//!
//! # Usage
//!
//! ```ignore
//! use aeroreg::observability::{init_logging, Event, LogConfig};
//!
//! init_logging(&LogConfig::default())?;
//! tracing::info!(event = Event::BootStart.as_str());
//! ```

mod events;

pub use events::Event;

use std::fmt;

use tracing_subscriber::{fmt as tfmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Logging errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoggingError {
    /// Subscriber already installed or could not be built
    InitializationFailed(String),
    /// Unknown level name
    InvalidLevel(String),
}

impl LoggingError {
    pub fn code(&self) -> &'static str {
        match self {
            LoggingError::InitializationFailed(_) => "AERO_REG_LOGGING_INIT",
            LoggingError::InvalidLevel(_) => "AERO_REG_LOGGING_LEVEL",
        }
    }
}

impl fmt::Display for LoggingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoggingError::InitializationFailed(msg) => {
                write!(f, "{}: failed to initialize logging: {}", self.code(), msg)
            }
            LoggingError::InvalidLevel(level) => {
                write!(f, "{}: unknown log level '{}'", self.code(), level)
            }
        }
    }
}

impl std::error::Error for LoggingError {}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogConfig {
    /// Default filter when `RUST_LOG` is unset
    pub level: String,
    /// Emit JSON lines instead of human-readable text
    pub json: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

impl LogConfig {
    pub fn new(level: impl Into<String>, json: bool) -> Self {
        Self {
            level: level.into(),
            json,
        }
    }

    /// Rejects level names `tracing` does not know
    pub fn validate(&self) -> Result<(), LoggingError> {
        if is_known_level(&self.level) {
            Ok(())
        } else {
            Err(LoggingError::InvalidLevel(self.level.clone()))
        }
    }
}

pub fn is_known_level(level: &str) -> bool {
    LEVELS.contains(&level.to_ascii_lowercase().as_str())
}

/// Install the global subscriber.
///
/// Logs go to stderr so stdout stays reserved for responses. Calling this
/// twice returns an error rather than panicking.
pub fn init_logging(config: &LogConfig) -> Result<(), LoggingError> {
    config.validate()?;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.level.to_ascii_lowercase()));
    let layer = tfmt::layer().with_writer(std::io::stderr).with_target(true);

    if config.json {
        tracing_subscriber::registry()
            .with(filter)
            .with(layer.json())
            .try_init()
            .map_err(|e| LoggingError::InitializationFailed(e.to_string()))
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(layer)
            .try_init()
            .map_err(|e| LoggingError::InitializationFailed(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(LogConfig::default().validate().is_ok());
    }

    #[test]
    fn test_level_names() {
        assert!(is_known_level("debug"));
        assert!(is_known_level("WARN"));
        assert!(!is_known_level("verbose"));
    }

    #[test]
    fn test_invalid_level_rejected() {
        let err = LogConfig::new("loud", false).validate().unwrap_err();
        assert_eq!(err, LoggingError::InvalidLevel("loud".into()));
        assert!(err.to_string().contains("AERO_REG_LOGGING_LEVEL"));
    }

    #[test]
    fn test_invalid_level_fails_init() {
        let result = init_logging(&LogConfig::new("loud", true));
        assert!(matches!(result, Err(LoggingError::InvalidLevel(_))));
    }
}
