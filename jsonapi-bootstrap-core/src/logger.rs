//! Logging setup: a `tracing` subscriber on stderr filtered by `RUST_LOG` or a [`LogLevel`].

use std::io;

use strum::{Display, EnumString};
use thiserror::Error;
use tracing_subscriber::{filter::ParseError, EnvFilter};

/// Crates whose debug and trace events are let through by [`LogLevel::directive`].
const OWN_CRATES: [&str; 2] = ["jsonapi_bootstrap_core", "jsonapi_bootstrap"];

/// Enumeration of possible log levels.
///
/// Parsed case-insensitively from `trace`, `debug`, `info`, `warn` or `error`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, Display)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum LogLevel {
    /// Designates very low priority, often extremely detailed messages.
    Trace,
    /// Designates lower priority debugging information.
    Debug,
    /// Designates informational messages that highlight the progress of the application.
    Info,
    /// Designates potentially harmful situations.
    Warn,
    /// Designates error events that might still allow the application to continue running.
    Error,
}

impl LogLevel {
    /// Builds the filter directive for this level.
    ///
    /// Debug and trace are only enabled for this tool's own crates; dependencies
    /// (tonic, hyper, reqwest) stay at `info` so poll attempts remain readable.
    #[must_use]
    pub fn directive(self) -> String {
        match self {
            Self::Trace | Self::Debug => {
                let mut directive = Self::Info.to_string();
                for krate in OWN_CRATES {
                    directive.push_str(&format!(",{krate}={self}"));
                }
                directive
            }
            Self::Info | Self::Warn | Self::Error => self.to_string(),
        }
    }
}

/// Errors installing the global subscriber.
#[derive(Debug, Error)]
pub enum LoggerError {
    /// `RUST_LOG` holds an invalid filter.
    #[error("invalid RUST_LOG filter: {0}")]
    InvalidFilter(#[from] ParseError),
    /// A global subscriber was already installed.
    #[error("logger already set: {0}")]
    AlreadySet(String),
}

/// Builds the filter from `RUST_LOG` when set, from `level` otherwise.
///
/// # Errors
///
/// Returns [`LoggerError::InvalidFilter`] if the resulting directive does not parse.
pub fn env_filter(level: LogLevel) -> Result<EnvFilter, LoggerError> {
    match std::env::var(EnvFilter::DEFAULT_ENV) {
        Ok(value) if !value.trim().is_empty() => Ok(EnvFilter::try_new(value)?),
        _ => Ok(EnvFilter::try_new(level.directive())?),
    }
}

/// Installs a `fmt` subscriber writing to stderr, so stdout stays free for the report.
///
/// Call once, before any event is emitted.
///
/// # Errors
///
/// Returns an error if the filter is invalid or a subscriber is already installed.
pub fn init_logger(level: LogLevel) -> Result<(), LoggerError> {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter(level)?)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init()
        .map_err(|e| LoggerError::AlreadySet(e.to_string()))
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use test_case::test_case;

    use super::*;

    #[test_case("info", LogLevel::Info)]
    #[test_case("DEBUG", LogLevel::Debug)]
    #[test_case("Warn", LogLevel::Warn)]
    fn test_level_parses_case_insensitively(input: &str, expected: LogLevel) {
        assert_eq!(LogLevel::from_str(input).unwrap(), expected);
    }

    #[test]
    fn test_unknown_level_is_rejected() {
        assert!(LogLevel::from_str("verbose").is_err());
    }

    #[test]
    fn test_debug_is_scoped_to_own_crates() {
        assert_eq!(
            LogLevel::Debug.directive(),
            "info,jsonapi_bootstrap_core=debug,jsonapi_bootstrap=debug"
        );
        assert_eq!(LogLevel::Warn.directive(), "warn");
    }

    #[test]
    fn test_directives_parse() {
        for level in [
            LogLevel::Trace,
            LogLevel::Debug,
            LogLevel::Info,
            LogLevel::Warn,
            LogLevel::Error,
        ] {
            assert!(EnvFilter::try_new(level.directive()).is_ok());
        }
    }
}
