//! Filesystem walk that turns a project directory into [`ProjectEvidence`]

use super::ProjectEvidence;
use crate::extractors::parsers::{is_env_template, parse_env_template, ManifestKind};
use crate::stack::PlatformRegistry;
use anyhow::{Context, Result};
use ignore::{overrides::OverrideBuilder, WalkBuilder};
use std::path::Path;
use std::time::Instant;
use tracing::{debug, info, trace, warn};

/// Directories that only hold installed or generated artifacts
const EXCLUDED_DIRS: &[&str] = &[
    ".git",
    "node_modules",
    "target",
    "vendor",
    "dist",
    "build",
    "__pycache__",
    ".venv",
    "venv",
    "_build",
    "deps",
    ".next",
    "obj",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectorConfig {
    pub max_depth: usize,
    pub max_files: usize,
    /// Files larger than this are listed but not read
    pub max_file_bytes: u64,
}

impl Default for CollectorConfig {
    fn default() -> Self {
        Self {
            max_depth: 10,
            max_files: 5000,
            max_file_bytes: 1024 * 1024,
        }
    }
}

pub struct EvidenceCollector<'a> {
    registry: &'a PlatformRegistry,
    config: CollectorConfig,
}

impl<'a> EvidenceCollector<'a> {
    pub fn new(registry: &'a PlatformRegistry) -> Self {
        Self::with_config(registry, CollectorConfig::default())
    }

    pub fn with_config(registry: &'a PlatformRegistry, config: CollectorConfig) -> Self {
        Self { registry, config }
    }

    pub fn collect(&self, root: &Path) -> Result<ProjectEvidence> {
        if !root.exists() {
            anyhow::bail!("Project path does not exist: {:?}", root);
        }
        if !root.is_dir() {
            anyhow::bail!("Project path is not a directory: {:?}", root);
        }
        let root = root
            .canonicalize()
            .context("Failed to canonicalize project path")?;

        let start = Instant::now();
        info!(
            root = %root.display(),
            max_depth = self.config.max_depth,
            max_files = self.config.max_files,
            "Collecting project evidence"
        );

        let mut override_builder = OverrideBuilder::new(&root);
        for excluded in EXCLUDED_DIRS {
            override_builder
                .add(&format!("!{}/", excluded))
                .with_context(|| format!("Invalid exclusion pattern for {}", excluded))?;
        }
        let overrides = override_builder
            .build()
            .context("Failed to build directory exclusions")?;

        let has_git_dir = root.join(".git").exists();
        let mut evidence = ProjectEvidence::new();
        let mut files_seen = 0usize;

        for result in WalkBuilder::new(&root)
            .max_depth(Some(self.config.max_depth))
            .hidden(false)
            .git_ignore(has_git_dir)
            .git_global(false)
            .git_exclude(false)
            .overrides(overrides)
            .sort_by_file_name(|a, b| a.cmp(b))
            .build()
        {
            let entry = match result {
                Ok(e) => e,
                Err(err) => {
                    warn!(error = %err, "Failed to read directory entry");
                    continue;
                }
            };
            if !entry.file_type().is_some_and(|t| t.is_file()) {
                continue;
            }

            if files_seen >= self.config.max_files {
                warn!(
                    files_seen,
                    max_files = self.config.max_files,
                    "Reached file limit, stopping walk"
                );
                break;
            }
            files_seen += 1;

            let path = entry.path();
            let rel_path = path.strip_prefix(&root).unwrap_or(path).to_path_buf();
            trace!(path = %rel_path.display(), "Discovered file");

            if is_env_template(&rel_path) {
                if let Some(content) = self.read(path) {
                    evidence.add_env_template(rel_path, parse_env_template(&content));
                }
                continue;
            }

            let wanted = ManifestKind::from_path(&rel_path).is_some()
                || self.registry.is_build_descriptor(&rel_path);
            if wanted {
                if let Some(content) = self.read(path) {
                    evidence.add_content(rel_path, content);
                    continue;
                }
            }

            evidence.add_file(rel_path);
        }

        info!(
            files = evidence.file_count(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Evidence collection complete"
        );

        Ok(evidence)
    }

    /// Read a file as text; oversized, binary or unreadable files yield `None`
    fn read(&self, path: &Path) -> Option<String> {
        match std::fs::metadata(path) {
            Ok(meta) if meta.len() > self.config.max_file_bytes => {
                warn!(
                    path = %path.display(),
                    size = meta.len(),
                    limit = self.config.max_file_bytes,
                    "Skipping oversized file"
                );
                return None;
            }
            Ok(_) => {}
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Failed to stat file");
                return None;
            }
        }

        match std::fs::read_to_string(path) {
            Ok(content) => Some(content),
            Err(e) => {
                debug!(path = %path.display(), error = %e, "Failed to read file as text");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write(root: &Path, rel: &str, content: &str) {
        let path = root.join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, content).unwrap();
    }

    #[test]
    fn test_collect_reads_manifests_and_templates() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "package.json", r#"{"dependencies": {"next": "14.0.0"}}"#);
        write(temp.path(), "app/page.tsx", "export default function Page() {}");
        write(temp.path(), ".env.example", "DATABASE_URL=\nNEXT_PUBLIC_API=\n");

        let registry = PlatformRegistry::with_defaults();
        let evidence = EvidenceCollector::new(&registry).collect(temp.path()).unwrap();

        assert!(evidence.content(Path::new("package.json")).is_some());
        assert!(evidence.content(Path::new("app/page.tsx")).is_none());
        assert!(evidence.files().any(|p| p == Path::new("app/page.tsx")));
        let names = &evidence.env_templates()[Path::new(".env.example")];
        assert!(names.contains("NEXT_PUBLIC_API"));
    }

    #[test]
    fn test_collect_skips_excluded_dirs() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "node_modules/next/package.json", "{}");
        write(temp.path(), "index.js", "");

        let registry = PlatformRegistry::with_defaults();
        let evidence = EvidenceCollector::new(&registry).collect(temp.path()).unwrap();

        assert_eq!(evidence.file_count(), 1);
    }

    #[test]
    fn test_oversized_file_is_listed_but_not_read() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "package.json", &" ".repeat(64));

        let registry = PlatformRegistry::with_defaults();
        let config = CollectorConfig {
            max_file_bytes: 16,
            ..CollectorConfig::default()
        };
        let evidence = EvidenceCollector::with_config(&registry, config)
            .collect(temp.path())
            .unwrap();

        assert!(evidence.files().any(|p| p == Path::new("package.json")));
        assert!(evidence.content(Path::new("package.json")).is_none());
    }

    #[test]
    fn test_missing_root_is_an_error() {
        let registry = PlatformRegistry::with_defaults();
        let result = EvidenceCollector::new(&registry).collect(Path::new("/definitely/not/here"));
        assert!(result.is_err());
    }
}
