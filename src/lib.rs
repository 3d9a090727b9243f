//! stackprobe - platform detection and confidence scoring for project trees
//!
//! This library inspects a project's files and identifies which web application
//! platforms it is built on. It does this by combining evidence from four signal
//! categories into a per-platform confidence score and tier. Detected platforms then
//! drive a prioritized list of production-readiness recommendations.
//!
//! # Core Concepts
//!
//! - **Platform Registry**: Declarative catalog of platforms and the patterns that
//!   count as evidence for each of them, loaded from TOML
//! - **Signal Extractors**: Independent passes that turn project evidence into
//!   observations for framework files, dependencies, build configs and environment
//!   variables
//! - **Confidence Scorer**: Weighted aggregation of category scores into a 0-100
//!   score, a High/Medium/Low tier and a deterministic ranking
//! - **Recommendation Engine**: Ranks catalog entries against the detected platforms
//!   and the project's maturity
//!
//! # Example Usage
//!
//! ```
//! use stackprobe::{detect_platforms, recommend, ConfidenceTier, PlatformRegistry, ProjectEvidence, RecommendationCatalog};
//!
//! let registry = PlatformRegistry::with_defaults();
//! let evidence = ProjectEvidence::new()
//!     .with_file("manage.py")
//!     .with_content("requirements.txt", "Django>=5.0\n");
//!
//! let detection = detect_platforms(&evidence, &registry);
//! let top = detection.top().expect("django is detected");
//! assert_eq!(top.platform_id.as_str(), "django");
//! assert_eq!(top.confidence_tier, ConfidenceTier::Medium);
//!
//! let catalog = RecommendationCatalog::with_defaults();
//! let set = recommend(detection.multi_platform(), 40.0, &catalog);
//! assert!(!set.provisional);
//! ```
//!
//! # Project Structure
//!
//! - [`stack`]: Platform registry and signal categories
//! - [`evidence`]: Project snapshot and the filesystem collector
//! - [`extractors`]: Per-category signal extraction and file parsers
//! - [`detection`]: Confidence scoring and ranking
//! - [`recommend`]: Recommendation catalog and prioritization
//! - [`cli`]: Command-line interface

pub mod cli;
pub mod config;
pub mod detection;
pub mod error;
pub mod evidence;
pub mod extractors;
pub mod recommend;
pub mod stack;
pub mod util;

pub use config::{ConfigError, ProbeConfig};
pub use detection::{detect_platforms, ConfidenceTier, Detection, PlatformScore};
pub use error::{CatalogError, RegistryError};
pub use evidence::{estimate_maturity, EvidenceCollector, ProjectEvidence};
pub use extractors::SignalObservation;
pub use recommend::{recommend, Recommendation, RecommendationCatalog, RecommendationSet};
pub use stack::{PlatformId, PlatformRegistry, SignalCategory};
pub use util::{init_default, init_from_env, init_logging, LoggingConfig};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_exists() {
        assert!(!VERSION.is_empty());
    }

    #[test]
    fn test_name_is_stackprobe() {
        assert_eq!(NAME, "stackprobe");
    }
}
