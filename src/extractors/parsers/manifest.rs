//! Dependency manifest parsers
//!
//! Each supported manifest is recognized by file name and parsed into the
//! dependencies it declares, tagged with the section they were declared in.
//! Structured formats go through their real parsers (serde_json, toml,
//! roxmltree); line-oriented formats use anchored regexes.

use crate::extractors::common::file_name_lower;
use crate::stack::Ecosystem;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use thiserror::Error;

/// Manifest section a dependency was declared in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DependencySection {
    Primary,
    Peer,
    Optional,
    Dev,
}

impl DependencySection {
    /// Non-primary sections are slightly weaker evidence
    pub fn strength_multiplier(self) -> f64 {
        match self {
            DependencySection::Primary => 1.0,
            DependencySection::Peer => 0.9,
            DependencySection::Optional => 0.9,
            DependencySection::Dev => 0.8,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeclaredDependency {
    pub name: String,
    pub version: Option<String>,
    pub section: DependencySection,
}

#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid TOML: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("invalid XML: {0}")]
    Xml(#[from] roxmltree::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ManifestKind {
    PackageJson,
    CargoToml,
    PyProject,
    Pipfile,
    Requirements,
    PomXml,
    Gradle,
    GoMod,
    Gemfile,
    ComposerJson,
    MixExs,
    CsProj,
}

impl ManifestKind {
    pub fn from_path(path: &Path) -> Option<Self> {
        let name = file_name_lower(path)?;
        let kind = match name.as_str() {
            "package.json" => ManifestKind::PackageJson,
            "cargo.toml" => ManifestKind::CargoToml,
            "pyproject.toml" => ManifestKind::PyProject,
            "pipfile" => ManifestKind::Pipfile,
            "pom.xml" => ManifestKind::PomXml,
            "build.gradle" | "build.gradle.kts" => ManifestKind::Gradle,
            "go.mod" => ManifestKind::GoMod,
            "gemfile" => ManifestKind::Gemfile,
            "composer.json" => ManifestKind::ComposerJson,
            "mix.exs" => ManifestKind::MixExs,
            n if n.starts_with("requirements") && n.ends_with(".txt") => ManifestKind::Requirements,
            n if n.ends_with(".csproj") => ManifestKind::CsProj,
            _ => return None,
        };
        Some(kind)
    }

    pub fn ecosystem(self) -> Ecosystem {
        match self {
            ManifestKind::PackageJson => Ecosystem::Npm,
            ManifestKind::CargoToml => Ecosystem::Cargo,
            ManifestKind::PyProject | ManifestKind::Pipfile | ManifestKind::Requirements => {
                Ecosystem::Pypi
            }
            ManifestKind::PomXml | ManifestKind::Gradle => Ecosystem::Maven,
            ManifestKind::GoMod => Ecosystem::Gomod,
            ManifestKind::Gemfile => Ecosystem::Rubygems,
            ManifestKind::ComposerJson => Ecosystem::Composer,
            ManifestKind::MixExs => Ecosystem::Hex,
            ManifestKind::CsProj => Ecosystem::Nuget,
        }
    }

    pub fn parse(self, path: &Path, content: &str) -> Result<Vec<DeclaredDependency>, ManifestError> {
        match self {
            ManifestKind::PackageJson => parse_json_sections(
                content,
                &[
                    ("dependencies", DependencySection::Primary),
                    ("peerDependencies", DependencySection::Peer),
                    ("optionalDependencies", DependencySection::Optional),
                    ("devDependencies", DependencySection::Dev),
                ],
            ),
            ManifestKind::ComposerJson => parse_json_sections(
                content,
                &[
                    ("require", DependencySection::Primary),
                    ("require-dev", DependencySection::Dev),
                ],
            ),
            ManifestKind::CargoToml => parse_cargo(content),
            ManifestKind::PyProject => parse_pyproject(content),
            ManifestKind::Pipfile => parse_pipfile(content),
            ManifestKind::Requirements => Ok(parse_requirements(path, content)),
            ManifestKind::PomXml => parse_pom(content),
            ManifestKind::Gradle => Ok(parse_gradle(content)),
            ManifestKind::GoMod => Ok(parse_go_mod(content)),
            ManifestKind::Gemfile => Ok(parse_gemfile(content)),
            ManifestKind::MixExs => Ok(parse_mix(content)),
            ManifestKind::CsProj => parse_csproj(content),
        }
    }
}

/// Accumulates dependencies, keeping the first (strongest) section for repeated names
#[derive(Default)]
struct Declared {
    deps: Vec<DeclaredDependency>,
    seen: HashSet<String>,
}

impl Declared {
    fn push(&mut self, name: &str, version: Option<String>, section: DependencySection) {
        let name = name.trim();
        if name.is_empty() || !self.seen.insert(name.to_string()) {
            return;
        }
        self.deps.push(DeclaredDependency {
            name: name.to_string(),
            version: version.filter(|v| !v.trim().is_empty()),
            section,
        });
    }

    fn finish(self) -> Vec<DeclaredDependency> {
        self.deps
    }
}

fn parse_json_sections(
    content: &str,
    sections: &[(&str, DependencySection)],
) -> Result<Vec<DeclaredDependency>, ManifestError> {
    let parsed: serde_json::Value = serde_json::from_str(content)?;
    let mut declared = Declared::default();

    for (key, section) in sections {
        if let Some(deps) = parsed.get(*key).and_then(|v| v.as_object()) {
            for (name, version) in deps {
                declared.push(name, version.as_str().map(String::from), *section);
            }
        }
    }

    Ok(declared.finish())
}

fn toml_version(value: &toml::Value) -> Option<String> {
    match value {
        toml::Value::String(s) => Some(s.clone()),
        toml::Value::Table(t) => t.get("version").and_then(|v| v.as_str()).map(String::from),
        _ => None,
    }
}

fn push_cargo_table(declared: &mut Declared, table: &toml::Table, section: DependencySection) {
    for (name, value) in table {
        // `foo = { package = "real-name" }` renames the dependency
        let real_name = value
            .as_table()
            .and_then(|t| t.get("package"))
            .and_then(|p| p.as_str())
            .unwrap_or(name);
        declared.push(real_name, toml_version(value), section);
    }
}

fn parse_cargo(content: &str) -> Result<Vec<DeclaredDependency>, ManifestError> {
    let parsed: toml::Table = toml::from_str(content)?;
    let mut declared = Declared::default();

    let sections = [
        ("dependencies", DependencySection::Primary),
        ("build-dependencies", DependencySection::Dev),
        ("dev-dependencies", DependencySection::Dev),
    ];

    for (key, section) in sections {
        if let Some(table) = parsed.get(key).and_then(|v| v.as_table()) {
            push_cargo_table(&mut declared, table, section);
        }
    }

    if let Some(table) = parsed
        .get("workspace")
        .and_then(|w| w.get("dependencies"))
        .and_then(|v| v.as_table())
    {
        push_cargo_table(&mut declared, table, DependencySection::Primary);
    }

    if let Some(targets) = parsed.get("target").and_then(|v| v.as_table()) {
        for target in targets.values() {
            for (key, section) in sections {
                if let Some(table) = target.get(key).and_then(|v| v.as_table()) {
                    push_cargo_table(&mut declared, table, section);
                }
            }
        }
    }

    Ok(declared.finish())
}

/// Split a PEP 508 requirement (`Django[argon2]>=5.0 ; python_version>"3.8"`) into name and spec
fn parse_requirement(line: &str) -> Option<(String, Option<String>)> {
    let re = Regex::new(r"^\s*([A-Za-z0-9][A-Za-z0-9._-]*)\s*(?:\[[^\]]*\])?\s*([^;#]*)")
        .expect("valid regex");
    let caps = re.captures(line)?;
    let name = caps.get(1)?.as_str().to_string();
    let spec = caps
        .get(2)
        .map(|m| m.as_str().trim().to_string())
        .filter(|s| !s.is_empty());
    Some((name, spec))
}

fn is_dev_group(group: &str) -> bool {
    let group = group.to_lowercase();
    group.contains("dev") || group.contains("test") || group.contains("lint")
}

fn parse_pyproject(content: &str) -> Result<Vec<DeclaredDependency>, ManifestError> {
    let parsed: toml::Table = toml::from_str(content)?;
    let mut declared = Declared::default();

    if let Some(project) = parsed.get("project") {
        if let Some(deps) = project.get("dependencies").and_then(|v| v.as_array()) {
            for dep in deps.iter().filter_map(|d| d.as_str()) {
                if let Some((name, spec)) = parse_requirement(dep) {
                    declared.push(&name, spec, DependencySection::Primary);
                }
            }
        }
        if let Some(groups) = project
            .get("optional-dependencies")
            .and_then(|v| v.as_table())
        {
            for (group, deps) in groups {
                let section = if is_dev_group(group) {
                    DependencySection::Dev
                } else {
                    DependencySection::Optional
                };
                for dep in deps.as_array().into_iter().flatten().filter_map(|d| d.as_str()) {
                    if let Some((name, spec)) = parse_requirement(dep) {
                        declared.push(&name, spec, section);
                    }
                }
            }
        }
    }

    if let Some(poetry) = parsed.get("tool").and_then(|t| t.get("poetry")) {
        let mut push_poetry = |table: Option<&toml::Table>, section: DependencySection| {
            for (name, value) in table.into_iter().flatten() {
                if name.eq_ignore_ascii_case("python") {
                    continue;
                }
                declared.push(name, toml_version(value), section);
            }
        };

        push_poetry(
            poetry.get("dependencies").and_then(|v| v.as_table()),
            DependencySection::Primary,
        );
        push_poetry(
            poetry.get("dev-dependencies").and_then(|v| v.as_table()),
            DependencySection::Dev,
        );
        if let Some(groups) = poetry.get("group").and_then(|v| v.as_table()) {
            for (group, body) in groups {
                let section = if group == "main" {
                    DependencySection::Primary
                } else {
                    DependencySection::Dev
                };
                push_poetry(body.get("dependencies").and_then(|v| v.as_table()), section);
            }
        }
    }

    Ok(declared.finish())
}

fn parse_pipfile(content: &str) -> Result<Vec<DeclaredDependency>, ManifestError> {
    let parsed: toml::Table = toml::from_str(content)?;
    let mut declared = Declared::default();

    for (key, section) in [
        ("packages", DependencySection::Primary),
        ("dev-packages", DependencySection::Dev),
    ] {
        if let Some(table) = parsed.get(key).and_then(|v| v.as_table()) {
            for (name, value) in table {
                let version = toml_version(value).filter(|v| v != "*");
                declared.push(name, version, section);
            }
        }
    }

    Ok(declared.finish())
}

fn parse_requirements(path: &Path, content: &str) -> Vec<DeclaredDependency> {
    let section = match file_name_lower(path) {
        Some(name) if is_dev_group(&name) => DependencySection::Dev,
        _ => DependencySection::Primary,
    };
    let mut declared = Declared::default();

    for line in content.lines() {
        let trimmed = line.trim();
        // Options (-r, -e, --index-url), comments and URLs carry no package names
        if trimmed.is_empty()
            || trimmed.starts_with('#')
            || trimmed.starts_with('-')
            || trimmed.contains("://")
        {
            continue;
        }
        if let Some((name, spec)) = parse_requirement(trimmed) {
            declared.push(&name, spec, section);
        }
    }

    declared.finish()
}

fn child_text<'a>(node: roxmltree::Node<'a, 'a>, name: &str) -> Option<&'a str> {
    node.children()
        .find(|c| c.is_element() && c.tag_name().name() == name)
        .and_then(|c| c.text())
        .map(str::trim)
}

fn parse_pom(content: &str) -> Result<Vec<DeclaredDependency>, ManifestError> {
    let doc = roxmltree::Document::parse(content)?;
    let mut declared = Declared::default();
    let root = doc.root_element();

    if let Some(parent) = root
        .children()
        .find(|c| c.is_element() && c.tag_name().name() == "parent")
    {
        if let (Some(group), Some(artifact)) =
            (child_text(parent, "groupId"), child_text(parent, "artifactId"))
        {
            declared.push(
                &format!("{}:{}", group, artifact),
                child_text(parent, "version").map(String::from),
                DependencySection::Primary,
            );
        }
    }

    for dep in root
        .descendants()
        .filter(|n| n.is_element() && n.tag_name().name() == "dependency")
    {
        // Managed versions are declarations of intent, not usage
        if dep
            .ancestors()
            .any(|a| a.tag_name().name() == "dependencyManagement")
        {
            continue;
        }
        let (Some(group), Some(artifact)) = (child_text(dep, "groupId"), child_text(dep, "artifactId"))
        else {
            continue;
        };

        let section = match (child_text(dep, "scope"), child_text(dep, "optional")) {
            (Some("test"), _) => DependencySection::Dev,
            (Some("provided"), _) => DependencySection::Peer,
            (_, Some("true")) => DependencySection::Optional,
            _ => DependencySection::Primary,
        };

        declared.push(
            &format!("{}:{}", group, artifact),
            child_text(dep, "version").map(String::from),
            section,
        );
    }

    Ok(declared.finish())
}

fn parse_gradle(content: &str) -> Vec<DeclaredDependency> {
    let re = Regex::new(
        r#"(?m)^\s*(implementation|api|compileOnly|runtimeOnly|developmentOnly|annotationProcessor|kapt|testImplementation|testRuntimeOnly|testCompileOnly)\s*\(?\s*["']([^"':\s]+):([^"':\s]+)(?::([^"'\s]+))?["']"#,
    )
    .expect("valid regex");
    let mut declared = Declared::default();

    for caps in re.captures_iter(content) {
        let configuration = &caps[1];
        let section = if configuration.starts_with("test") {
            DependencySection::Dev
        } else if configuration == "compileOnly" {
            DependencySection::Peer
        } else {
            DependencySection::Primary
        };
        declared.push(
            &format!("{}:{}", &caps[2], &caps[3]),
            caps.get(4).map(|m| m.as_str().to_string()),
            section,
        );
    }

    declared.finish()
}

fn parse_go_mod(content: &str) -> Vec<DeclaredDependency> {
    let mut declared = Declared::default();
    let mut in_require_block = false;

    for line in content.lines() {
        let trimmed = line.trim();

        let entry = if in_require_block {
            if trimmed.starts_with(')') {
                in_require_block = false;
                continue;
            }
            trimmed
        } else if trimmed.starts_with("require (") || trimmed == "require(" {
            in_require_block = true;
            continue;
        } else if let Some(rest) = trimmed.strip_prefix("require ") {
            rest.trim()
        } else {
            continue;
        };

        if entry.is_empty() || entry.starts_with("//") {
            continue;
        }

        let indirect = entry.contains("// indirect");
        let mut parts = entry.split_whitespace();
        if let Some(module) = parts.next() {
            let section = if indirect {
                DependencySection::Optional
            } else {
                DependencySection::Primary
            };
            declared.push(module, parts.next().map(String::from), section);
        }
    }

    declared.finish()
}

fn parse_gemfile(content: &str) -> Vec<DeclaredDependency> {
    let gem_re = Regex::new(r#"^\s*gem\s+["']([^"']+)["'](?:\s*,\s*["']([^"']+)["'])?(.*)$"#)
        .expect("valid regex");
    let mut declared = Declared::default();
    // One entry per open `do` block: whether it is a development/test group
    let mut blocks: Vec<bool> = Vec::new();

    for line in content.lines() {
        let trimmed = line.trim();
        if trimmed.starts_with('#') {
            continue;
        }

        if trimmed.ends_with(" do") {
            let dev_group = trimmed.starts_with("group")
                && (trimmed.contains(":development") || trimmed.contains(":test"));
            blocks.push(dev_group);
            continue;
        }
        if trimmed == "end" {
            blocks.pop();
            continue;
        }

        if let Some(caps) = gem_re.captures(trimmed) {
            let rest = caps.get(3).map_or("", |m| m.as_str());
            let inline_dev = rest.contains("group:")
                && (rest.contains(":development") || rest.contains(":test"));
            let section = if inline_dev || blocks.iter().any(|&dev| dev) {
                DependencySection::Dev
            } else {
                DependencySection::Primary
            };
            declared.push(
                &caps[1],
                caps.get(2).map(|m| m.as_str().to_string()),
                section,
            );
        }
    }

    declared.finish()
}

fn parse_mix(content: &str) -> Vec<DeclaredDependency> {
    let re = Regex::new(r#"\{\s*:([a-z0-9_]+)\s*,\s*(?:"([^"]*)")?([^}]*)\}"#).expect("valid regex");
    let body = content
        .find("defp deps")
        .map_or(content, |start| &content[start..]);
    let mut declared = Declared::default();

    for caps in re.captures_iter(body) {
        let options = caps.get(3).map_or("", |m| m.as_str());
        let section = if options.contains("only:") && !options.contains(":prod") {
            DependencySection::Dev
        } else if options.contains("optional: true") {
            DependencySection::Optional
        } else {
            DependencySection::Primary
        };
        declared.push(
            &caps[1],
            caps.get(2).map(|m| m.as_str().to_string()),
            section,
        );
    }

    declared.finish()
}

fn parse_csproj(content: &str) -> Result<Vec<DeclaredDependency>, ManifestError> {
    let doc = roxmltree::Document::parse(content)?;
    let mut declared = Declared::default();

    for reference in doc
        .descendants()
        .filter(|n| n.is_element() && n.tag_name().name() == "PackageReference")
    {
        let Some(name) = reference.attribute("Include") else {
            continue;
        };
        let version = reference
            .attribute("Version")
            .or_else(|| child_text(reference, "Version"))
            .map(String::from);
        let private = reference
            .attribute("PrivateAssets")
            .or_else(|| child_text(reference, "PrivateAssets"))
            .is_some_and(|v| v.eq_ignore_ascii_case("all"));
        let section = if private {
            DependencySection::Dev
        } else {
            DependencySection::Primary
        };
        declared.push(name, version, section);
    }

    Ok(declared.finish())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(file: &str, content: &str) -> Vec<DeclaredDependency> {
        let path = Path::new(file);
        ManifestKind::from_path(path)
            .expect("recognized manifest")
            .parse(path, content)
            .expect("parses")
    }

    fn find<'a>(deps: &'a [DeclaredDependency], name: &str) -> &'a DeclaredDependency {
        deps.iter()
            .find(|d| d.name == name)
            .unwrap_or_else(|| panic!("{} not declared in {:?}", name, deps))
    }

    #[test]
    fn test_manifest_kind_from_path() {
        assert_eq!(
            ManifestKind::from_path(Path::new("web/package.json")),
            Some(ManifestKind::PackageJson)
        );
        assert_eq!(
            ManifestKind::from_path(Path::new("requirements-dev.txt")),
            Some(ManifestKind::Requirements)
        );
        assert_eq!(
            ManifestKind::from_path(Path::new("src/Api/Api.csproj")),
            Some(ManifestKind::CsProj)
        );
        assert_eq!(ManifestKind::from_path(Path::new("README.md")), None);
    }

    #[test]
    fn test_package_json_sections() {
        let deps = parse(
            "package.json",
            r#"{
                "dependencies": {"next": "^14.1.0", "react": "18.2.0"},
                "peerDependencies": {"react-dom": "18.2.0"},
                "devDependencies": {"typescript": "^5.0.0", "next": "14.1.0"}
            }"#,
        );

        assert_eq!(deps.len(), 4);
        assert_eq!(find(&deps, "next").section, DependencySection::Primary);
        assert_eq!(find(&deps, "next").version.as_deref(), Some("^14.1.0"));
        assert_eq!(find(&deps, "react-dom").section, DependencySection::Peer);
        assert_eq!(find(&deps, "typescript").section, DependencySection::Dev);
    }

    #[test]
    fn test_invalid_json_is_an_error() {
        let path = Path::new("package.json");
        assert!(ManifestKind::PackageJson.parse(path, "{ not json").is_err());
    }

    #[test]
    fn test_cargo_toml() {
        let deps = parse(
            "Cargo.toml",
            r#"
[package]
name = "svc"

[dependencies]
axum = "0.7"
tokio = { version = "1", features = ["full"] }
web = { package = "actix-web", version = "4" }

[dev-dependencies]
tempfile = "3"

[target.'cfg(unix)'.dependencies]
nix = "0.27"
"#,
        );

        assert_eq!(find(&deps, "axum").version.as_deref(), Some("0.7"));
        assert_eq!(find(&deps, "tokio").version.as_deref(), Some("1"));
        assert_eq!(find(&deps, "actix-web").section, DependencySection::Primary);
        assert_eq!(find(&deps, "tempfile").section, DependencySection::Dev);
        assert_eq!(find(&deps, "nix").section, DependencySection::Primary);
    }

    #[test]
    fn test_pyproject_pep621_and_poetry() {
        let deps = parse(
            "pyproject.toml",
            r#"
[project]
dependencies = ["Django[argon2]>=5.0 ; python_version > '3.9'", "gunicorn"]

[project.optional-dependencies]
test = ["pytest>=8"]
redis = ["redis"]

[tool.poetry.dependencies]
python = "^3.11"
fastapi = "^0.110"

[tool.poetry.group.lint.dependencies]
ruff = "*"
"#,
        );

        assert_eq!(find(&deps, "Django").version.as_deref(), Some(">=5.0"));
        assert_eq!(find(&deps, "gunicorn").version, None);
        assert_eq!(find(&deps, "pytest").section, DependencySection::Dev);
        assert_eq!(find(&deps, "redis").section, DependencySection::Optional);
        assert_eq!(find(&deps, "fastapi").section, DependencySection::Primary);
        assert_eq!(find(&deps, "ruff").section, DependencySection::Dev);
        assert!(deps.iter().all(|d| d.name != "python"));
    }

    #[test]
    fn test_requirements_txt() {
        let deps = parse(
            "requirements.txt",
            "# web\nflask==3.0.0\n-r base.txt\ngit+https://github.com/x/y.git\n\nSQLAlchemy>=2 # orm\n",
        );

        assert_eq!(deps.len(), 2);
        assert_eq!(find(&deps, "flask").version.as_deref(), Some("==3.0.0"));
        assert_eq!(find(&deps, "SQLAlchemy").version.as_deref(), Some(">=2"));

        let dev = parse("requirements-test.txt", "pytest\n");
        assert_eq!(dev[0].section, DependencySection::Dev);
    }

    #[test]
    fn test_pipfile() {
        let deps = parse(
            "Pipfile",
            "[packages]\nflask = \"*\"\nrequests = {version = \">=2.31\"}\n\n[dev-packages]\npytest = \"*\"\n",
        );

        assert_eq!(find(&deps, "flask").version, None);
        assert_eq!(find(&deps, "requests").version.as_deref(), Some(">=2.31"));
        assert_eq!(find(&deps, "pytest").section, DependencySection::Dev);
    }

    #[test]
    fn test_pom_xml() {
        let deps = parse(
            "pom.xml",
            r#"<?xml version="1.0"?>
<project xmlns="http://maven.apache.org/POM/4.0.0">
  <parent>
    <groupId>org.springframework.boot</groupId>
    <artifactId>spring-boot-starter-parent</artifactId>
    <version>3.2.0</version>
  </parent>
  <dependencyManagement>
    <dependencies>
      <dependency><groupId>com.example</groupId><artifactId>managed</artifactId></dependency>
    </dependencies>
  </dependencyManagement>
  <dependencies>
    <dependency>
      <groupId>org.springframework.boot</groupId>
      <artifactId>spring-boot-starter-web</artifactId>
    </dependency>
    <dependency>
      <groupId>org.junit.jupiter</groupId>
      <artifactId>junit-jupiter</artifactId>
      <scope>test</scope>
    </dependency>
  </dependencies>
</project>"#,
        );

        assert_eq!(
            find(&deps, "org.springframework.boot:spring-boot-starter-parent")
                .version
                .as_deref(),
            Some("3.2.0")
        );
        assert_eq!(
            find(&deps, "org.springframework.boot:spring-boot-starter-web").section,
            DependencySection::Primary
        );
        assert_eq!(
            find(&deps, "org.junit.jupiter:junit-jupiter").section,
            DependencySection::Dev
        );
        assert!(deps.iter().all(|d| d.name != "com.example:managed"));
    }

    #[test]
    fn test_gradle() {
        let deps = parse(
            "build.gradle.kts",
            r#"
dependencies {
    implementation("io.ktor:ktor-server-core:2.3.7")
    compileOnly 'org.projectlombok:lombok'
    testImplementation("io.ktor:ktor-server-test-host:2.3.7")
}
"#,
        );

        assert_eq!(
            find(&deps, "io.ktor:ktor-server-core").version.as_deref(),
            Some("2.3.7")
        );
        assert_eq!(
            find(&deps, "org.projectlombok:lombok").section,
            DependencySection::Peer
        );
        assert_eq!(
            find(&deps, "io.ktor:ktor-server-test-host").section,
            DependencySection::Dev
        );
    }

    #[test]
    fn test_go_mod() {
        let deps = parse(
            "go.mod",
            r#"module example.com/api

go 1.22

require github.com/labstack/echo/v4 v4.11.4

require (
	github.com/gin-gonic/gin v1.9.1
	golang.org/x/net v0.20.0 // indirect
)
"#,
        );

        assert_eq!(deps.len(), 3);
        assert_eq!(
            find(&deps, "github.com/gin-gonic/gin").version.as_deref(),
            Some("v1.9.1")
        );
        assert_eq!(
            find(&deps, "golang.org/x/net").section,
            DependencySection::Optional
        );
        assert_eq!(
            find(&deps, "github.com/labstack/echo/v4").section,
            DependencySection::Primary
        );
    }

    #[test]
    fn test_gemfile_groups() {
        let deps = parse(
            "Gemfile",
            r#"source "https://rubygems.org"

gem "rails", "~> 7.1.0"
gem 'puma'

group :development, :test do
  gem "rspec-rails"
end

gem "rubocop", group: :development
"#,
        );

        assert_eq!(find(&deps, "rails").version.as_deref(), Some("~> 7.1.0"));
        assert_eq!(find(&deps, "puma").section, DependencySection::Primary);
        assert_eq!(find(&deps, "rspec-rails").section, DependencySection::Dev);
        assert_eq!(find(&deps, "rubocop").section, DependencySection::Dev);
    }

    #[test]
    fn test_mix_exs() {
        let deps = parse(
            "mix.exs",
            r#"defmodule App.MixProject do
  def project do
    [app: :app, version: "0.1.0"]
  end

  defp deps do
    [
      {:phoenix, "~> 1.7.10"},
      {:floki, ">= 0.30.0", only: :test},
      {:jason, "~> 1.2", optional: true}
    ]
  end
end
"#,
        );

        assert_eq!(deps.len(), 3);
        assert_eq!(find(&deps, "phoenix").version.as_deref(), Some("~> 1.7.10"));
        assert_eq!(find(&deps, "floki").section, DependencySection::Dev);
        assert_eq!(find(&deps, "jason").section, DependencySection::Optional);
    }

    #[test]
    fn test_csproj() {
        let deps = parse(
            "Api.csproj",
            r#"<Project Sdk="Microsoft.NET.Sdk.Web">
  <ItemGroup>
    <PackageReference Include="Swashbuckle.AspNetCore" Version="6.5.0" />
    <PackageReference Include="StyleCop.Analyzers" Version="1.1.118" PrivateAssets="all" />
  </ItemGroup>
</Project>"#,
        );

        assert_eq!(
            find(&deps, "Swashbuckle.AspNetCore").version.as_deref(),
            Some("6.5.0")
        );
        assert_eq!(
            find(&deps, "StyleCop.Analyzers").section,
            DependencySection::Dev
        );
    }

    #[test]
    fn test_section_multipliers_are_ordered() {
        assert_eq!(DependencySection::Primary.strength_multiplier(), 1.0);
        assert!(DependencySection::Peer.strength_multiplier() < 1.0);
        assert!(DependencySection::Optional.strength_multiplier() < 1.0);
        assert!(
            DependencySection::Dev.strength_multiplier()
                < DependencySection::Peer.strength_multiplier()
        );
    }
}
