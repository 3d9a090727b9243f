//! .env template parsing utilities

use crate::extractors::common::file_name_lower;
use regex::Regex;
use std::collections::BTreeSet;
use std::path::Path;

/// Template file names that declare the variables a project expects
pub const ENV_TEMPLATE_FILES: &[&str] = &[".env.example", ".env.template", ".env.sample", ".env.dist"];

pub fn is_env_template(path: &Path) -> bool {
    file_name_lower(path).is_some_and(|name| ENV_TEMPLATE_FILES.contains(&name.as_str()))
}

/// Variable names declared in a .env template, values ignored
pub fn parse_env_template(content: &str) -> BTreeSet<String> {
    let var_re =
        Regex::new(r"(?m)^[ \t]*(?:export[ \t]+)?([A-Za-z_][A-Za-z0-9_]*)[ \t]*=").expect("valid regex");

    var_re
        .captures_iter(content)
        .filter_map(|cap| cap.get(1).map(|m| m.as_str().to_string()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_env_template() {
        let names = parse_env_template(
            r#"
# Database
DATABASE_URL=postgres://localhost/app
export SECRET_KEY_BASE=
  RAILS_ENV = development
# COMMENTED_OUT=1
not a variable
"#,
        );

        let expected: BTreeSet<String> = ["DATABASE_URL", "SECRET_KEY_BASE", "RAILS_ENV"]
            .into_iter()
            .map(String::from)
            .collect();
        assert_eq!(names, expected);
    }

    #[test]
    fn test_duplicate_names_collapse() {
        let names = parse_env_template("PORT=3000\nPORT=4000\n");
        assert_eq!(names.len(), 1);
    }

    #[test]
    fn test_is_env_template() {
        assert!(is_env_template(Path::new(".env.example")));
        assert!(is_env_template(Path::new("api/.env.sample")));
        assert!(is_env_template(Path::new(".env.DIST")));
        assert!(!is_env_template(Path::new(".env")));
        assert!(!is_env_template(Path::new(".env.local")));
    }
}
