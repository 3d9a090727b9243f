//! Build config extractor - build descriptors and the framework markers inside them

use super::common::path_matches;
use super::parsers::marker_matches;
use super::{strongest, SignalExtractor, SignalObservation};
use crate::evidence::ProjectEvidence;
use crate::stack::{BuildConfigPattern, PlatformRegistry, SignalCategory};
use std::path::Path;
use tracing::trace;

pub struct BuildConfigExtractor;

impl BuildConfigExtractor {
    fn pattern_applies(pattern: &BuildConfigPattern, path: &Path, evidence: &ProjectEvidence) -> bool {
        if !path_matches(path, &pattern.file) {
            return false;
        }
        match &pattern.marker {
            None => true,
            // A marker needs the file body; a listed but unread file cannot satisfy it
            Some(marker) => evidence
                .content(path)
                .is_some_and(|content| marker_matches(path, content, marker)),
        }
    }
}

impl SignalExtractor for BuildConfigExtractor {
    fn category(&self) -> SignalCategory {
        SignalCategory::BuildConfig
    }

    fn extract(
        &self,
        evidence: &ProjectEvidence,
        registry: &PlatformRegistry,
    ) -> Vec<SignalObservation> {
        let mut observations = Vec::new();

        for platform in registry.definitions() {
            if platform.build_configs.is_empty() {
                continue;
            }

            for path in evidence.files() {
                let best = strongest(
                    platform
                        .build_configs
                        .iter()
                        .filter(|p| Self::pattern_applies(p, path, evidence))
                        .map(|p| p.strength),
                );

                if let Some(strength) = best {
                    trace!(platform = %platform.id, path = %path.display(), strength, "Build descriptor matched");
                    observations.push(SignalObservation::new(
                        SignalCategory::BuildConfig,
                        platform.id.clone(),
                        strength,
                        path.clone(),
                    ));
                }
            }
        }

        observations
    }
}
