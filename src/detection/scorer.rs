//! Confidence scorer - fuses per-category observations into ranked platform scores

use super::confidence::ConfidenceTier;
use super::types::PlatformScore;
use super::weights::CategoryWeights;
use crate::extractors::SignalObservation;
use crate::stack::{PlatformId, PlatformRegistry, SignalCategory};
use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap};
use tracing::{debug, warn};

/// Round to 4 decimal places so equal inputs always serialize identically
pub(crate) fn round_score(value: f64) -> f64 {
    (value * 10_000.0).round() / 10_000.0
}

fn clamp_score(value: f64) -> f64 {
    round_score(value).clamp(0.0, 100.0)
}

pub struct ConfidenceScorer<'a> {
    registry: &'a PlatformRegistry,
    weights: CategoryWeights,
}

impl<'a> ConfidenceScorer<'a> {
    pub fn new(registry: &'a PlatformRegistry) -> Self {
        Self {
            registry,
            weights: CategoryWeights::STANDARD,
        }
    }

    /// Score every platform with at least one observation, best first
    pub fn score(&self, observations: Vec<SignalObservation>) -> Vec<PlatformScore> {
        let mut grouped: HashMap<PlatformId, Vec<SignalObservation>> = HashMap::new();
        for observation in observations {
            grouped
                .entry(observation.platform.clone())
                .or_default()
                .push(observation);
        }

        let mut scores: Vec<PlatformScore> = grouped
            .into_iter()
            .filter_map(|(platform_id, evidence)| self.score_platform(platform_id, evidence))
            .collect();

        scores.sort_by(|a, b| self.rank_cmp(a, b));
        scores
    }

    fn score_platform(
        &self,
        platform_id: PlatformId,
        mut evidence: Vec<SignalObservation>,
    ) -> Option<PlatformScore> {
        let Some(definition) = self.registry.get(&platform_id) else {
            warn!(platform = %platform_id, "Observation for unregistered platform ignored");
            return None;
        };

        evidence.sort_by(|a, b| a.canonical_cmp(b));

        let normalization = self.registry.normalization();
        let category_scores: BTreeMap<SignalCategory, f64> = SignalCategory::ALL
            .iter()
            .map(|&category| {
                let total: f64 = evidence
                    .iter()
                    .filter(|o| o.category == category)
                    .map(|o| o.strength.max(0.0))
                    .sum();
                let ratio = (total / normalization.factor(category)).min(1.0);
                (category, clamp_score(100.0 * ratio))
            })
            .collect();

        let aggregate: f64 = SignalCategory::ALL
            .iter()
            .map(|&category| self.weights.weight(category) * category_scores[&category])
            .sum();
        let aggregate_score = clamp_score(aggregate);
        let confidence_tier = ConfidenceTier::from_score(aggregate_score);

        debug!(
            platform = %platform_id,
            aggregate_score,
            tier = %confidence_tier,
            observations = evidence.len(),
            "Scored platform"
        );

        Some(PlatformScore {
            platform_id,
            name: definition.name.clone(),
            category_scores,
            aggregate_score,
            confidence_tier,
            evidence,
        })
    }

    /// Aggregate desc, then framework-file score desc, then registry load order
    fn rank_cmp(&self, a: &PlatformScore, b: &PlatformScore) -> Ordering {
        b.aggregate_score
            .total_cmp(&a.aggregate_score)
            .then_with(|| {
                b.category_score(SignalCategory::FrameworkFile)
                    .total_cmp(&a.category_score(SignalCategory::FrameworkFile))
            })
            .then_with(|| {
                let order = |id: &PlatformId| self.registry.load_order(id).unwrap_or(usize::MAX);
                order(&a.platform_id).cmp(&order(&b.platform_id))
            })
    }
}

/// Length of the leading run of `ranked` whose tier is within one of the top tier
pub fn multi_platform_count(ranked: &[PlatformScore]) -> usize {
    let Some(top) = ranked.first() else {
        return 0;
    };
    ranked
        .iter()
        .take_while(|s| s.confidence_tier.is_within_one_of(top.confidence_tier))
        .count()
}
