//! Load-time errors for the declarative catalogs.
//!
//! Both catalogs are configuration: a malformed entry aborts startup instead of being
//! recovered from per run. Problems with individual project files never surface here;
//! extractors degrade those to zero contribution.

use crate::stack::{PlatformId, SignalCategory};
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("Failed to read platform registry {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse platform registry: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Platform registry defines no platforms")]
    Empty,

    #[error("Platform entry #{index} has an empty id")]
    EmptyId { index: usize },

    #[error("Duplicate platform id '{0}'")]
    DuplicatePlatform(PlatformId),

    #[error("Platform '{platform}' is missing required category '{}'", .category.registry_key())]
    MissingCategory {
        platform: PlatformId,
        category: SignalCategory,
    },

    #[error("Platform '{0}' declares no patterns in any category")]
    NoPatterns(PlatformId),

    #[error("Platform '{platform}' has an empty {category} pattern")]
    EmptyPattern {
        platform: PlatformId,
        category: SignalCategory,
    },

    #[error("Platform '{platform}' {category} pattern '{pattern}' has strength {strength} outside (0, 1]")]
    InvalidStrength {
        platform: PlatformId,
        category: SignalCategory,
        pattern: String,
        strength: f64,
    },

    #[error("Platform '{platform}' has an invalid marker on '{file}': {reason}")]
    InvalidMarker {
        platform: PlatformId,
        file: String,
        reason: String,
    },

    #[error("Normalizing factor for {category} must be positive, got {value}")]
    InvalidNormalization {
        category: SignalCategory,
        value: f64,
    },
}

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Failed to read recommendation catalog {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse recommendation catalog: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Recommendation entry #{index} has an empty id")]
    EmptyId { index: usize },

    #[error("Duplicate recommendation id '{0}'")]
    DuplicateRecommendation(String),

    #[error("Recommendation '{0}' does not apply to any platform")]
    NoApplicablePlatforms(String),

    #[error("Recommendation '{id}' field '{field}' must lie in [0, 100], got {value}")]
    WeightOutOfRange {
        id: String,
        field: String,
        value: f64,
    },

    #[error("Recommendation '{id}' overrides the weight of '{platform}', which it does not apply to")]
    UnknownPlatformWeight { id: String, platform: PlatformId },
}
