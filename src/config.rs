//! Configuration management for stackprobe
//!
//! Settings are read from environment variables with defaults; CLI flags
//! override them afterwards.
//!
//! # Environment Variables
//!
//! - `STACKPROBE_REGISTRY`: Platform registry TOML file - default: built-in registry
//! - `STACKPROBE_CATALOG`: Recommendation catalog TOML file - default: built-in catalog
//! - `STACKPROBE_MAX_FILES`: Maximum files walked per project - default: "5000"
//! - `STACKPROBE_MAX_DEPTH`: Maximum directory depth - default: "10"
//! - `STACKPROBE_MAX_FILE_BYTES`: Largest file read for parsing - default: "1048576" (1MB)
//! - `STACKPROBE_LOG_LEVEL`: Logging level - default: "warn"
//! - `STACKPROBE_LOG_JSON`: Emit JSON log lines - default: "false"
//!
//! # Example
//!
//! ```no_run
//! use stackprobe::ProbeConfig;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ProbeConfig::from_env()?;
//! config.validate()?;
//!
//! let registry = config.load_registry()?;
//! let catalog = config.load_catalog()?;
//! # Ok(())
//! # }
//! ```

use crate::error::{CatalogError, RegistryError};
use crate::evidence::CollectorConfig;
use crate::recommend::RecommendationCatalog;
use crate::stack::PlatformRegistry;
use crate::util::logging::{self, parse_level, LoggingConfig};
use std::env;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use thiserror::Error;
use tracing::debug;

const DEFAULT_MAX_FILES: usize = 5000;
const DEFAULT_MAX_DEPTH: usize = 10;
const DEFAULT_MAX_FILE_BYTES: u64 = 1_048_576; // 1MB

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration validation failed: {0}")]
    ValidationFailed(String),

    #[error("Failed to parse {field}: {error}")]
    ParseError { field: String, error: String },

    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProbeConfig {
    /// Registry document to load instead of the built-in one
    pub registry_path: Option<PathBuf>,

    /// Catalog document to load instead of the built-in one
    pub catalog_path: Option<PathBuf>,

    pub max_files: usize,
    pub max_depth: usize,
    pub max_file_bytes: u64,

    /// Logging level (trace, debug, info, warn, error)
    pub log_level: String,

    pub log_json: bool,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            registry_path: None,
            catalog_path: None,
            max_files: DEFAULT_MAX_FILES,
            max_depth: DEFAULT_MAX_DEPTH,
            max_file_bytes: DEFAULT_MAX_FILE_BYTES,
            log_level: logging::DEFAULT_LEVEL.to_string().to_lowercase(),
            log_json: false,
        }
    }
}

fn env_parse<T>(key: &str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    match env::var(key) {
        Ok(value) => value.trim().parse::<T>().map_err(|e| ConfigError::ParseError {
            field: key.to_string(),
            error: e.to_string(),
        }),
        Err(_) => Ok(default),
    }
}

impl ProbeConfig {
    /// Defaults overlaid with `STACKPROBE_*` environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        let config = Self {
            registry_path: env::var("STACKPROBE_REGISTRY").ok().map(PathBuf::from),
            catalog_path: env::var("STACKPROBE_CATALOG").ok().map(PathBuf::from),
            max_files: env_parse("STACKPROBE_MAX_FILES", DEFAULT_MAX_FILES)?,
            max_depth: env_parse("STACKPROBE_MAX_DEPTH", DEFAULT_MAX_DEPTH)?,
            max_file_bytes: env_parse("STACKPROBE_MAX_FILE_BYTES", DEFAULT_MAX_FILE_BYTES)?,
            log_level: env::var("STACKPROBE_LOG_LEVEL")
                .map(|level| level.trim().to_lowercase())
                .unwrap_or_else(|_| Self::default().log_level),
            log_json: env_parse("STACKPROBE_LOG_JSON", false)?,
        };
        debug!(config = ?config, "Configuration loaded from environment");
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_files == 0 {
            return Err(ConfigError::ValidationFailed(
                "Max files must be at least 1".to_string(),
            ));
        }
        if self.max_depth == 0 {
            return Err(ConfigError::ValidationFailed(
                "Max depth must be at least 1".to_string(),
            ));
        }
        if self.max_file_bytes < 1024 {
            return Err(ConfigError::ValidationFailed(
                "Max file size must be at least 1KB".to_string(),
            ));
        }
        if self.max_file_bytes > 104_857_600 {
            return Err(ConfigError::ValidationFailed(
                "Max file size cannot exceed 100MB".to_string(),
            ));
        }

        match self.log_level.as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            _ => {
                return Err(ConfigError::ValidationFailed(format!(
                    "Invalid log level: {}. Valid options: trace, debug, info, warn, error",
                    self.log_level
                )))
            }
        }

        Ok(())
    }

    pub fn load_registry(&self) -> Result<PlatformRegistry, ConfigError> {
        match &self.registry_path {
            Some(path) => Ok(PlatformRegistry::from_path(path)?),
            None => Ok(PlatformRegistry::with_defaults()),
        }
    }

    pub fn load_catalog(&self) -> Result<RecommendationCatalog, ConfigError> {
        match &self.catalog_path {
            Some(path) => Ok(RecommendationCatalog::from_path(path)?),
            None => Ok(RecommendationCatalog::with_defaults()),
        }
    }

    /// Subscriber settings for the configured level; an unknown level falls
    /// back to the logging default
    pub fn logging_config(&self) -> LoggingConfig {
        LoggingConfig {
            level: parse_level(&self.log_level).unwrap_or(logging::DEFAULT_LEVEL),
            use_json: self.log_json,
            ..LoggingConfig::default()
        }
    }

    pub fn collector_config(&self) -> CollectorConfig {
        CollectorConfig {
            max_depth: self.max_depth,
            max_files: self.max_files,
            max_file_bytes: self.max_file_bytes,
        }
    }
}

impl fmt::Display for ProbeConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let source = |path: &Option<PathBuf>| {
            path.as_ref()
                .map_or_else(|| "built-in".to_string(), |p| p.display().to_string())
        };
        writeln!(f, "Stackprobe Configuration:")?;
        writeln!(f, "  Registry: {}", source(&self.registry_path))?;
        writeln!(f, "  Catalog: {}", source(&self.catalog_path))?;
        writeln!(f, "  Max Files: {}", self.max_files)?;
        writeln!(f, "  Max Depth: {}", self.max_depth)?;
        writeln!(f, "  Max File Size: {} bytes", self.max_file_bytes)?;
        writeln!(f, "  Log Level: {}", self.log_level)?;
        writeln!(f, "  Log JSON: {}", self.log_json)?;
        Ok(())
    }
}
