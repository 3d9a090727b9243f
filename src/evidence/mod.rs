//! Project evidence snapshot
//!
//! [`ProjectEvidence`] is the read-only input to detection: the relative paths
//! discovered in a project, the contents of files worth parsing (manifests and
//! build descriptors) and the variable names declared in `.env` templates.
//! It is built either by [`EvidenceCollector`] from a directory on disk or
//! programmatically through the builder methods, which is how tests and
//! embedders supply evidence without touching the filesystem.

mod collector;
mod maturity;

pub use collector::{CollectorConfig, EvidenceCollector};
pub use maturity::estimate_maturity;

use crate::extractors::parsers::ManifestKind;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectEvidence {
    files: BTreeSet<PathBuf>,
    contents: BTreeMap<PathBuf, String>,
    env_templates: BTreeMap<PathBuf, BTreeSet<String>>,
}

impl ProjectEvidence {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.add_file(path);
        self
    }

    pub fn with_content(mut self, path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        self.add_content(path, content);
        self
    }

    pub fn with_env_template<I, S>(mut self, path: impl Into<PathBuf>, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.add_env_template(path, names);
        self
    }

    pub fn add_file(&mut self, path: impl Into<PathBuf>) {
        self.files.insert(path.into());
    }

    /// Record a file's content; the path is registered as discovered too
    pub fn add_content(&mut self, path: impl Into<PathBuf>, content: impl Into<String>) {
        let path = path.into();
        self.files.insert(path.clone());
        self.contents.insert(path, content.into());
    }

    /// Record the variable names a template declares; merges with earlier calls for the same path
    pub fn add_env_template<I, S>(&mut self, path: impl Into<PathBuf>, names: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let path = path.into();
        self.files.insert(path.clone());
        self.env_templates
            .entry(path)
            .or_default()
            .extend(names.into_iter().map(Into::into));
    }

    /// Every discovered path, sorted
    pub fn files(&self) -> impl Iterator<Item = &PathBuf> {
        self.files.iter()
    }

    pub fn content(&self, path: &Path) -> Option<&str> {
        self.contents.get(path).map(String::as_str)
    }

    /// Files with content that are recognized dependency manifests
    pub fn manifests(&self) -> impl Iterator<Item = (&Path, &str)> {
        self.contents
            .iter()
            .filter(|(path, _)| ManifestKind::from_path(path).is_some())
            .map(|(path, content)| (path.as_path(), content.as_str()))
    }

    pub fn env_templates(&self) -> &BTreeMap<PathBuf, BTreeSet<String>> {
        &self.env_templates
    }

    /// Each declared variable with the first template (in path order) declaring it
    pub fn env_var_sources(&self) -> BTreeMap<&str, &Path> {
        let mut sources = BTreeMap::new();
        for (path, names) in &self.env_templates {
            for name in names {
                sources.entry(name.as_str()).or_insert(path.as_path());
            }
        }
        sources
    }

    pub fn file_count(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Stable digest of the whole snapshot, hex encoded.
    ///
    /// Two snapshots with equal paths, contents and template variables always
    /// produce the same fingerprint, regardless of insertion order.
    pub fn fingerprint(&self) -> String {
        let mut hasher = Sha256::new();

        for path in &self.files {
            hasher.update(b"file\0");
            hasher.update(path.to_string_lossy().as_bytes());
            hasher.update(b"\n");
        }
        for (path, content) in &self.contents {
            hasher.update(b"content\0");
            hasher.update(path.to_string_lossy().as_bytes());
            hasher.update(b"\0");
            hasher.update((content.len() as u64).to_le_bytes());
            hasher.update(content.as_bytes());
        }
        for (path, names) in &self.env_templates {
            for name in names {
                hasher.update(b"env\0");
                hasher.update(path.to_string_lossy().as_bytes());
                hasher.update(b"\0");
                hasher.update(name.as_bytes());
                hasher.update(b"\n");
            }
        }

        hex::encode(hasher.finalize())
    }
}
