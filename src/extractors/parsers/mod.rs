// Project file parsers
//
// Dependency manifests, environment templates and build descriptor markers.
// Parsers are pure functions over file content; a file that fails to parse is
// reported to the caller, which logs it and moves on.

pub mod env_file;
pub mod manifest;
pub mod marker;

pub use env_file::{is_env_template, parse_env_template};
pub use manifest::{DeclaredDependency, DependencySection, ManifestError, ManifestKind};
pub use marker::marker_matches;
