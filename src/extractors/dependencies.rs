//! Dependency extractor - matches declared manifest dependencies against registry patterns

use super::parsers::ManifestKind;
use super::{strongest, SignalExtractor, SignalObservation};
use crate::evidence::ProjectEvidence;
use crate::stack::{PlatformRegistry, SignalCategory};
use tracing::{trace, warn};

pub struct DependencyExtractor;

impl SignalExtractor for DependencyExtractor {
    fn category(&self) -> SignalCategory {
        SignalCategory::Dependency
    }

    fn extract(
        &self,
        evidence: &ProjectEvidence,
        registry: &PlatformRegistry,
    ) -> Vec<SignalObservation> {
        let mut observations = Vec::new();

        for (path, content) in evidence.manifests() {
            let Some(kind) = ManifestKind::from_path(path) else {
                continue;
            };

            let declared = match kind.parse(path, content) {
                Ok(deps) => deps,
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "Skipping unparseable manifest");
                    continue;
                }
            };
            if declared.is_empty() {
                continue;
            }

            let ecosystem = kind.ecosystem();
            for platform in registry.definitions() {
                // One observation per (manifest, platform), from the best matching declaration
                let best = strongest(declared.iter().flat_map(|dep| {
                    platform
                        .dependencies
                        .iter()
                        .filter(move |pattern| pattern.matches(ecosystem, dep))
                        .map(move |pattern| pattern.strength * dep.section.strength_multiplier())
                }));

                if let Some(strength) = best {
                    trace!(platform = %platform.id, path = %path.display(), strength, "Dependency matched");
                    observations.push(SignalObservation::new(
                        SignalCategory::Dependency,
                        platform.id.clone(),
                        strength,
                        path,
                    ));
                }
            }
        }

        observations
    }
}
