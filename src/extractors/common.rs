//! Path matching shared by extractors, the registry and the evidence collector

use std::path::Path;

/// Lowercased, `/`-separated form of a relative path
pub fn normalize_path(path: &Path) -> String {
    let text = path.to_string_lossy().replace('\\', "/").to_lowercase();
    text.trim_start_matches("./").to_string()
}

/// Case-insensitive match of a path against a registry file pattern.
///
/// A pattern starting with `*` matches as a raw suffix of the file name
/// (`*.csproj`). A single-segment pattern matches any segment of the path
/// (`manage.py`, `.next`). A multi-segment pattern must end the path on a
/// segment boundary, so `app/layout.tsx` matches `web/app/layout.tsx` but not
/// `app/layout.tsx/README`.
pub fn path_matches(path: &Path, pattern: &str) -> bool {
    let normalized = normalize_path(path);
    let pattern = pattern.trim().replace('\\', "/").to_lowercase();

    if let Some(suffix) = pattern.strip_prefix('*') {
        if suffix.is_empty() {
            return false;
        }
        let file_name = normalized.rsplit('/').next().unwrap_or(&normalized);
        return file_name.ends_with(suffix);
    }

    let pattern_segments: Vec<&str> = pattern
        .trim_start_matches("./")
        .split('/')
        .filter(|s| !s.is_empty())
        .collect();
    if pattern_segments.is_empty() {
        return false;
    }

    let path_segments: Vec<&str> = normalized.split('/').filter(|s| !s.is_empty()).collect();
    match pattern_segments.as_slice() {
        [single] => path_segments.contains(single),
        multi => path_segments.ends_with(multi),
    }
}

/// File name of a path, lowercased
pub fn file_name_lower(path: &Path) -> Option<String> {
    path.file_name()
        .and_then(|n| n.to_str())
        .map(|n| n.to_lowercase())
}
