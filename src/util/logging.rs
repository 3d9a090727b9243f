//! Structured logging setup for stackprobe
//!
//! Initializes a `tracing` subscriber writing to stderr, so stdout stays free
//! for detection reports. Output is pretty console text by default or JSON for
//! log pipelines, filtered by `RUST_LOG` plus the configured crate level.
//!
//! # Example
//!
//! ```no_run
//! use stackprobe::util::logging;
//! use tracing::{debug, info};
//!
//! // With environment: STACKPROBE_LOG_LEVEL=debug STACKPROBE_LOG_JSON=true
//! logging::init_from_env();
//!
//! info!("Detection started");
//! debug!(path = "services/api", "Collecting evidence");
//! ```

use crate::config::ProbeConfig;
use std::io;
use std::sync::Once;
use tracing::Level;
use tracing_subscriber::filter::{Directive, LevelFilter};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

static INIT: Once = Once::new();

/// Level used when neither the environment nor the command line sets one
pub const DEFAULT_LEVEL: Level = Level::WARN;

#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Minimum log level for stackprobe's own events
    pub level: Level,

    /// Use JSON output format (for structured logging in production)
    pub use_json: bool,

    /// Include the module target (e.g., stackprobe::detection) in logs
    pub include_target: bool,

    /// Include file and line number information
    pub include_location: bool,

    /// Include thread ID and name in logs
    pub include_thread_ids: bool,
}

impl Default for LoggingConfig {
    /// Defaults: WARN, pretty output, targets shown
    fn default() -> Self {
        Self {
            level: DEFAULT_LEVEL,
            use_json: false,
            include_target: true,
            include_location: false,
            include_thread_ids: false,
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

    /// JSON output with location and thread metadata
    pub fn production() -> Self {
        Self {
            level: Level::INFO,
            use_json: true,
            include_target: true,
            include_location: true,
            include_thread_ids: true,
        }
    }

    pub fn development() -> Self {
        Self {
            level: Level::DEBUG,
            use_json: false,
            include_target: true,
            include_location: false,
            include_thread_ids: false,
        }
    }
}

/// Parses a log level, case-insensitively
///
/// ```
/// use stackprobe::util::logging::parse_level;
/// use tracing::Level;
///
/// assert_eq!(parse_level("debug"), Some(Level::DEBUG));
/// assert_eq!(parse_level("WARN"), Some(Level::WARN));
/// assert_eq!(parse_level("loud"), None);
/// ```
pub fn parse_level(level_str: &str) -> Option<Level> {
    match level_str.trim().to_lowercase().as_str() {
        "trace" => Some(Level::TRACE),
        "debug" => Some(Level::DEBUG),
        "info" => Some(Level::INFO),
        "warn" => Some(Level::WARN),
        "error" => Some(Level::ERROR),
        _ => None,
    }
}

fn crate_directive(level: Level) -> Option<Directive> {
    format!("stackprobe={}", level).parse().ok()
}

/// Initializes the global subscriber; only the first call has any effect
pub fn init_logging(config: LoggingConfig) {
    INIT.call_once(|| {
        let mut filter = EnvFilter::builder()
            .with_default_directive(LevelFilter::WARN.into())
            .from_env_lossy();
        if let Some(directive) = crate_directive(config.level) {
            filter = filter.add_directive(directive);
        }

        let registry = tracing_subscriber::registry().with(filter);
        let result = if config.use_json {
            registry
                .with(
                    fmt::layer()
                        .json()
                        .with_writer(io::stderr)
                        .with_target(config.include_target)
                        .with_file(config.include_location)
                        .with_line_number(config.include_location)
                        .with_thread_ids(config.include_thread_ids)
                        .with_thread_names(config.include_thread_ids),
                )
                .try_init()
        } else {
            registry
                .with(
                    fmt::layer()
                        .with_writer(io::stderr)
                        .with_target(config.include_target)
                        .with_file(config.include_location)
                        .with_line_number(config.include_location)
                        .with_thread_ids(config.include_thread_ids)
                        .with_thread_names(config.include_thread_ids),
                )
                .try_init()
        };

        if let Err(e) = result {
            eprintln!("Logging already initialized: {}", e);
        }
    });
}

pub fn init_default() {
    init_logging(LoggingConfig::default());
}

/// Initializes logging from `STACKPROBE_LOG_LEVEL` and `STACKPROBE_LOG_JSON`
/// as read by [`ProbeConfig`]; an unreadable environment gives the defaults
pub fn init_from_env() {
    let config = ProbeConfig::from_env()
        .map(|config| config.logging_config())
        .unwrap_or_default();
    init_logging(config);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_level() {
        assert_eq!(parse_level("trace"), Some(Level::TRACE));
        assert_eq!(parse_level("Debug"), Some(Level::DEBUG));
        assert_eq!(parse_level(" info "), Some(Level::INFO));
        assert_eq!(parse_level("ERROR"), Some(Level::ERROR));
        assert_eq!(parse_level(""), None);
    }

    #[test]
    fn test_default_config() {
        let config = LoggingConfig::default();
        assert_eq!(config.level, Level::WARN);
        assert!(!config.use_json);
        assert!(config.include_target);
    }

    #[test]
    fn test_production_config() {
        let config = LoggingConfig::production();
        assert!(config.use_json);
        assert!(config.include_location);
        assert!(config.include_thread_ids);
    }

    #[test]
    fn test_development_config() {
        let config = LoggingConfig::development();
        assert_eq!(config.level, Level::DEBUG);
        assert!(!config.use_json);
    }

    #[test]
    fn test_crate_directive() {
        let directive = crate_directive(Level::DEBUG).unwrap();
        assert_eq!(directive.to_string().to_lowercase(), "stackprobe=debug");
    }
}
