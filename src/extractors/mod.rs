// Signal extractors
//
// Each extractor turns the immutable evidence snapshot into typed observations for
// one signal category, reading only that category's patterns from the registry.
// Extractors share no state, so all four run in parallel and are joined before
// scoring.

pub mod build_config;
pub mod common;
pub mod dependencies;
pub mod env_vars;
pub mod framework_files;
pub mod parsers;

pub use build_config::BuildConfigExtractor;
pub use dependencies::DependencyExtractor;
pub use env_vars::EnvVarExtractor;
pub use framework_files::FrameworkFileExtractor;

use crate::evidence::ProjectEvidence;
use crate::stack::{PlatformId, PlatformRegistry, SignalCategory};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::path::PathBuf;
use tracing::debug;

/// One atomic piece of evidence for a platform
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignalObservation {
    pub category: SignalCategory,
    pub platform: PlatformId,
    /// How unambiguous the match is, in `(0, 1]`
    pub strength: f64,
    pub source: PathBuf,
}

impl SignalObservation {
    pub fn new(
        category: SignalCategory,
        platform: PlatformId,
        strength: f64,
        source: impl Into<PathBuf>,
    ) -> Self {
        Self {
            category,
            platform,
            strength,
            source: source.into(),
        }
    }

    /// Total order used to report evidence deterministically
    pub fn canonical_cmp(&self, other: &Self) -> Ordering {
        self.category
            .cmp(&other.category)
            .then_with(|| self.source.cmp(&other.source))
            .then_with(|| other.strength.total_cmp(&self.strength))
            .then_with(|| self.platform.cmp(&other.platform))
    }
}

/// Converts project evidence into observations for a single signal category
pub trait SignalExtractor: Send + Sync {
    fn category(&self) -> SignalCategory;

    fn extract(
        &self,
        evidence: &ProjectEvidence,
        registry: &PlatformRegistry,
    ) -> Vec<SignalObservation>;
}

/// Keeps the strongest of several candidate strengths
pub(crate) fn strongest(strengths: impl Iterator<Item = f64>) -> Option<f64> {
    strengths.fold(None, |best, s| match best {
        Some(b) if b >= s => Some(b),
        _ => Some(s),
    })
}

/// Run all four extractors in parallel and join their observations
pub fn extract_all(evidence: &ProjectEvidence, registry: &PlatformRegistry) -> Vec<SignalObservation> {
    let extractors: Vec<&dyn SignalExtractor> = vec![
        &FrameworkFileExtractor,
        &DependencyExtractor,
        &BuildConfigExtractor,
        &EnvVarExtractor,
    ];

    let per_category: Vec<Vec<SignalObservation>> = extractors
        .par_iter()
        .map(|extractor| {
            let observations = extractor.extract(evidence, registry);
            debug!(
                category = %extractor.category(),
                observations = observations.len(),
                "Extractor finished"
            );
            observations
        })
        .collect();

    per_category.into_iter().flatten().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const REGISTRY: &str = r#"
version = "t"

[[platform]]
id = "web"
framework_files = [{ pattern = "web.config.js" }]
dependencies = [{ ecosystem = "npm", name = "webkit-framework" }]
build_configs = [{ file = "package.json", marker = { contains = "web build" }, strength = 0.8 }]
environment = [{ name = "WEB_*", strength = 0.5 }]
"#;

    #[test]
    fn test_extract_all_covers_every_category() {
        let registry = PlatformRegistry::from_toml_str(REGISTRY).unwrap();
        let evidence = ProjectEvidence::new()
            .with_file("web.config.js")
            .with_content(
                "package.json",
                r#"{"scripts": {"build": "web build"}, "dependencies": {"webkit-framework": "1.0.0"}}"#,
            )
            .with_env_template(".env.example", ["WEB_PORT"]);

        let observations = extract_all(&evidence, &registry);

        for category in SignalCategory::ALL {
            assert_eq!(
                observations.iter().filter(|o| o.category == category).count(),
                1,
                "expected one {} observation",
                category
            );
        }
        assert!(observations
            .iter()
            .all(|o| o.platform == PlatformId::from("web")));
    }

    #[test]
    fn test_extract_all_empty_evidence() {
        let registry = PlatformRegistry::from_toml_str(REGISTRY).unwrap();
        assert!(extract_all(&ProjectEvidence::new(), &registry).is_empty());
    }

    #[test]
    fn test_strongest() {
        assert_eq!(strongest([0.4, 1.0, 0.6].into_iter()), Some(1.0));
        assert_eq!(strongest(std::iter::empty()), None);
    }
}
