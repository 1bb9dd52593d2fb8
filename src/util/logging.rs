//! Structured logging setup for varextract
//!
//! Diagnostics go through `tracing` and are always written to stderr, so stdout
//! carries nothing but the extracted variables.
//!
//! Filtering follows `RUST_LOG` when it is set; otherwise only `varextract` events at
//! or above the configured level are shown.
//!
//! # Example
//!
//! ```no_run
//! use varextract::util::logging;
//!
//! logging::init_from_env();
//! tracing::info!("Application started");
//! ```

use std::env;
use std::sync::Once;
use tracing::Level;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

static INIT: Once = Once::new();

#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Minimum level for `varextract` events
    pub level: Level,

    /// Emit one JSON object per event
    pub use_json: bool,

    /// Include the event target (e.g. `varextract::audit`)
    pub include_target: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: Level::INFO,
            use_json: false,
            include_target: true,
        }
    }
}

impl LoggingConfig {
    pub fn with_level(level: Level) -> Self {
        Self {
            level,
            ..Default::default()
        }
    }

    /// Reads `VAREXTRACT_LOG_LEVEL` and `VAREXTRACT_LOG_JSON`.
    pub fn from_env() -> Self {
        let level = env::var("VAREXTRACT_LOG_LEVEL")
            .ok()
            .map(|v| level_or_default(&v))
            .unwrap_or(Level::INFO);

        let use_json = env::var("VAREXTRACT_LOG_JSON")
            .ok()
            .and_then(|v| v.parse::<bool>().ok())
            .unwrap_or(false);

        Self {
            level,
            use_json,
            ..Default::default()
        }
    }

    /// Command-line settings win over the environment: an explicit level first,
    /// then `--verbose` / `--quiet`.
    pub fn from_cli(log_level: Option<&str>, verbose: bool, quiet: bool) -> Self {
        let mut config = Self::from_env();
        if let Some(level) = log_level {
            config.level = level_or_default(level);
        } else if verbose {
            config.level = Level::DEBUG;
        } else if quiet {
            config.level = Level::ERROR;
        }
        config
    }

    fn filter(&self) -> EnvFilter {
        match env::var("RUST_LOG") {
            Ok(_) => EnvFilter::from_default_env(),
            Err(_) => EnvFilter::new(format!("varextract={}", self.level)),
        }
    }
}

/// Case-insensitive level name, `None` if unknown.
pub fn parse_level(level_str: &str) -> Option<Level> {
    match level_str.trim().to_lowercase().as_str() {
        "trace" => Some(Level::TRACE),
        "debug" => Some(Level::DEBUG),
        "info" => Some(Level::INFO),
        "warn" | "warning" => Some(Level::WARN),
        "error" => Some(Level::ERROR),
        _ => None,
    }
}

fn level_or_default(level_str: &str) -> Level {
    parse_level(level_str).unwrap_or_else(|| {
        eprintln!(
            "Invalid log level '{}', defaulting to INFO. Valid levels: trace, debug, info, warn, error",
            level_str
        );
        Level::INFO
    })
}

/// Install the global subscriber. Only the first call has any effect.
pub fn init_logging(config: LoggingConfig) {
    INIT.call_once(|| {
        let filter = config.filter();

        if config.use_json {
            tracing_subscriber::registry()
                .with(filter)
                .with(
                    fmt::layer()
                        .json()
                        .with_target(config.include_target)
                        .with_writer(std::io::stderr),
                )
                .init();
        } else {
            tracing_subscriber::registry()
                .with(filter)
                .with(
                    fmt::layer()
                        .with_target(config.include_target)
                        .with_writer(std::io::stderr),
                )
                .init();
        }
    });
}

pub fn init_default() {
    init_logging(LoggingConfig::default());
}

pub fn init_from_env() {
    init_logging(LoggingConfig::from_env());
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn test_parse_level() {
        assert_eq!(parse_level("trace"), Some(Level::TRACE));
        assert_eq!(parse_level("Debug"), Some(Level::DEBUG));
        assert_eq!(parse_level(" INFO "), Some(Level::INFO));
        assert_eq!(parse_level("warning"), Some(Level::WARN));
        assert_eq!(parse_level("error"), Some(Level::ERROR));
        assert_eq!(parse_level("loud"), None);
        assert_eq!(parse_level(""), None);
    }

    #[test]
    fn test_default_config() {
        let config = LoggingConfig::default();
        assert_eq!(config.level, Level::INFO);
        assert!(!config.use_json);
        assert!(config.include_target);
    }

    #[test]
    #[serial]
    fn test_from_env() {
        env::set_var("VAREXTRACT_LOG_LEVEL", "warn");
        env::set_var("VAREXTRACT_LOG_JSON", "true");

        let config = LoggingConfig::from_env();

        env::remove_var("VAREXTRACT_LOG_LEVEL");
        env::remove_var("VAREXTRACT_LOG_JSON");

        assert_eq!(config.level, Level::WARN);
        assert!(config.use_json);
    }

    #[test]
    #[serial]
    fn test_cli_precedence() {
        env::remove_var("VAREXTRACT_LOG_LEVEL");

        assert_eq!(
            LoggingConfig::from_cli(Some("trace"), false, true).level,
            Level::TRACE
        );
        assert_eq!(LoggingConfig::from_cli(None, true, false).level, Level::DEBUG);
        assert_eq!(LoggingConfig::from_cli(None, false, true).level, Level::ERROR);
        assert_eq!(LoggingConfig::from_cli(None, false, false).level, Level::INFO);
    }
}
