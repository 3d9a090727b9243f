//! Project maturity estimate from file-layout signals
//!
//! The recommendation engine takes a maturity estimate in [0, 100] from its
//! caller. When none is given, the CLI derives one from what the project
//! already has in place: each signal present adds its weight.

use super::ProjectEvidence;
use crate::extractors::common::{file_name_lower, normalize_path};
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
struct MaturitySignals {
    has_tests: bool,
    has_ci: bool,
    has_docs: bool,
    has_container: bool,
    has_lockfile: bool,
    has_license: bool,
}

const LOCKFILES: &[&str] = &[
    "package-lock.json",
    "yarn.lock",
    "pnpm-lock.yaml",
    "cargo.lock",
    "poetry.lock",
    "pipfile.lock",
    "gemfile.lock",
    "composer.lock",
    "go.sum",
    "mix.lock",
    "packages.lock.json",
    "gradle.lockfile",
];

fn is_test_path(path: &Path) -> bool {
    let normalized = normalize_path(path);
    let name = file_name_lower(path).unwrap_or_default();
    normalized.starts_with("tests/")
        || normalized.starts_with("test/")
        || normalized.starts_with("spec/")
        || normalized.contains("/tests/")
        || normalized.contains("/test/")
        || normalized.contains("/__tests__/")
        || name.starts_with("test_")
        || name.ends_with("_test.go")
        || name.ends_with("_test.rs")
        || name.ends_with("_spec.rb")
        || name.contains(".test.")
        || name.contains(".spec.")
}

fn detect_signals(evidence: &ProjectEvidence) -> MaturitySignals {
    let mut signals = MaturitySignals::default();

    for path in evidence.files() {
        let normalized = normalize_path(path);
        let name = file_name_lower(path).unwrap_or_default();

        signals.has_tests |= is_test_path(path);
        signals.has_ci |= normalized.starts_with(".github/workflows/")
            || normalized == ".gitlab-ci.yml"
            || normalized.starts_with(".circleci/")
            || normalized == "jenkinsfile"
            || normalized == "azure-pipelines.yml";
        signals.has_docs |= normalized.starts_with("docs/")
            || (name.starts_with("readme") && !normalized.contains('/'));
        signals.has_container |= name == "dockerfile"
            || name.ends_with(".dockerfile")
            || name == "docker-compose.yml"
            || name == "docker-compose.yaml"
            || name == "compose.yaml";
        signals.has_lockfile |= LOCKFILES.contains(&name.as_str());
        signals.has_license |= name.starts_with("license") || name.starts_with("copying");
    }

    signals
}

/// Heuristic maturity score in [0, 100]
pub fn estimate_maturity(evidence: &ProjectEvidence) -> f64 {
    let signals = detect_signals(evidence);

    [
        (signals.has_tests, 25.0),
        (signals.has_ci, 25.0),
        (signals.has_docs, 15.0),
        (signals.has_container, 15.0),
        (signals.has_lockfile, 10.0),
        (signals.has_license, 10.0),
    ]
    .iter()
    .filter(|(present, _)| *present)
    .map(|(_, weight)| weight)
    .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_project_is_immature() {
        assert_eq!(estimate_maturity(&ProjectEvidence::new()), 0.0);
    }

    #[test]
    fn test_fully_equipped_project() {
        let evidence = ProjectEvidence::new()
            .with_file("tests/api_test.py")
            .with_file(".github/workflows/ci.yml")
            .with_file("README.md")
            .with_file("Dockerfile")
            .with_file("poetry.lock")
            .with_file("LICENSE");

        assert_eq!(estimate_maturity(&evidence), 100.0);
    }

    #[test]
    fn test_partial_signals() {
        let evidence = ProjectEvidence::new()
            .with_file("src/components/Button.test.tsx")
            .with_file("package-lock.json");

        assert_eq!(estimate_maturity(&evidence), 35.0);
    }

    #[test]
    fn test_nested_readme_is_not_project_docs() {
        let evidence = ProjectEvidence::new().with_file("vendor/lib/README.md");
        assert_eq!(estimate_maturity(&evidence), 0.0);
    }
}
