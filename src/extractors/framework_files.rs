//! Framework file extractor - matches discovered paths against framework file patterns

use super::common::path_matches;
use super::{strongest, SignalExtractor, SignalObservation};
use crate::evidence::ProjectEvidence;
use crate::stack::{PlatformRegistry, SignalCategory};
use tracing::trace;

pub struct FrameworkFileExtractor;

impl SignalExtractor for FrameworkFileExtractor {
    fn category(&self) -> SignalCategory {
        SignalCategory::FrameworkFile
    }

    fn extract(
        &self,
        evidence: &ProjectEvidence,
        registry: &PlatformRegistry,
    ) -> Vec<SignalObservation> {
        let mut observations = Vec::new();

        for platform in registry.definitions() {
            if platform.framework_files.is_empty() {
                continue;
            }

            for path in evidence.files() {
                // A file counts once per platform, with its strongest matching pattern
                let best = strongest(
                    platform
                        .framework_files
                        .iter()
                        .filter(|p| path_matches(path, &p.pattern))
                        .map(|p| p.strength),
                );

                if let Some(strength) = best {
                    trace!(platform = %platform.id, path = %path.display(), strength, "Framework file matched");
                    observations.push(SignalObservation::new(
                        SignalCategory::FrameworkFile,
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
