//! Platform detection
//!
//! [`detect_platforms`] runs the four signal extractors over an evidence
//! snapshot, fuses their observations with [`ConfidenceScorer`] and returns a
//! [`Detection`]: every observed platform ranked best first, plus the
//! multi-platform prefix of platforms within one confidence tier of the top.
//!
//! A run is a pure function of its inputs. The registry is only read, and the
//! result carries the registry version and an evidence fingerprint so callers
//! can cache it by input.

pub mod confidence;
pub mod scorer;
pub mod types;
pub mod weights;

pub use confidence::ConfidenceTier;
pub use scorer::ConfidenceScorer;
pub use types::{Detection, PlatformScore};
pub use weights::CategoryWeights;

use crate::evidence::ProjectEvidence;
use crate::extractors::extract_all;
use crate::stack::PlatformRegistry;
use tracing::info;

pub fn detect_platforms(evidence: &ProjectEvidence, registry: &PlatformRegistry) -> Detection {
    let observations = extract_all(evidence, registry);
    let observation_count = observations.len();

    let ranked = ConfidenceScorer::new(registry).score(observations);
    let multi_platform_count = scorer::multi_platform_count(&ranked);

    let detection = Detection {
        registry_version: registry.version().to_string(),
        evidence_fingerprint: evidence.fingerprint(),
        ranked,
        multi_platform_count,
    };

    match detection.top() {
        Some(top) => info!(
            observations = observation_count,
            platforms = detection.ranked.len(),
            top = %top.platform_id,
            score = top.aggregate_score,
            tier = %top.confidence_tier,
            multi_platform = detection.multi_platform().len(),
            "Detection complete"
        ),
        None => info!(files = evidence.file_count(), "Detection complete, platform undetermined"),
    }

    detection
}
