//! Environment variable extractor - declared variables against platform conventions

use super::{strongest, SignalExtractor, SignalObservation};
use crate::evidence::ProjectEvidence;
use crate::stack::{PlatformRegistry, SignalCategory};
use tracing::trace;

pub struct EnvVarExtractor;

impl SignalExtractor for EnvVarExtractor {
    fn category(&self) -> SignalCategory {
        SignalCategory::Environment
    }

    fn extract(
        &self,
        evidence: &ProjectEvidence,
        registry: &PlatformRegistry,
    ) -> Vec<SignalObservation> {
        let sources = evidence.env_var_sources();
        if sources.is_empty() {
            return Vec::new();
        }

        let mut observations = Vec::new();

        for platform in registry.definitions() {
            if platform.environment.is_empty() {
                continue;
            }

            // A variable declared in several templates still counts once
            for (name, source) in &sources {
                let best = strongest(
                    platform
                        .environment
                        .iter()
                        .filter(|p| p.matches(name))
                        .map(|p| p.strength),
                );

                if let Some(strength) = best {
                    trace!(platform = %platform.id, variable = %name, strength, "Environment variable matched");
                    observations.push(SignalObservation::new(
                        SignalCategory::Environment,
                        platform.id.clone(),
                        strength,
                        *source,
                    ));
                }
            }
        }

        observations
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stack::PlatformId;
    use std::path::PathBuf;

    const REGISTRY: &str = r#"
version = "t"

[[platform]]
id = "rails"
framework_files = []
dependencies = []
build_configs = []
environment = [
    { name = "RAILS_*", strength = 0.9 },
    { name = "RAILS_ENV", strength = 1.0 },
    { name = "SECRET_KEY_BASE", strength = 0.6 },
]

[[platform]]
id = "django"
framework_files = []
dependencies = []
build_configs = []
environment = [{ name = "DJANGO_SETTINGS_MODULE" }]
"#;

    fn extract(evidence: &ProjectEvidence) -> Vec<SignalObservation> {
        let registry = PlatformRegistry::from_toml_str(REGISTRY).unwrap();
        EnvVarExtractor.extract(evidence, &registry)
    }

    #[test]
    fn test_prefix_and_exact_patterns() {
        let observations = extract(
            &ProjectEvidence::new()
                .with_env_template(".env.example", ["RAILS_ENV", "RAILS_MAX_THREADS", "PORT"]),
        );

        assert_eq!(observations.len(), 2);
        assert!(observations.iter().all(|o| o.platform == PlatformId::from("rails")));
        let mut strengths: Vec<f64> = observations.iter().map(|o| o.strength).collect();
        strengths.sort_by(f64::total_cmp);
        assert_eq!(strengths, vec![0.9, 1.0]);
    }

    #[test]
    fn test_variable_counted_once_across_templates() {
        let observations = extract(
            &ProjectEvidence::new()
                .with_env_template(".env.sample", ["SECRET_KEY_BASE"])
                .with_env_template(".env.example", ["SECRET_KEY_BASE"]),
        );

        assert_eq!(observations.len(), 1);
        assert_eq!(observations[0].source, PathBuf::from(".env.example"));
    }

    #[test]
    fn test_matching_is_case_sensitive() {
        let observations = extract(
            &ProjectEvidence::new().with_env_template(".env.example", ["django_settings_module"]),
        );

        assert!(observations.is_empty());
    }
}
