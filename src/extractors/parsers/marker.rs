//! Build descriptor markers
//!
//! A marker narrows a build descriptor pattern to files that actually carry
//! framework configuration: either a raw substring (`contains`) or a dotted
//! key path into the structured document, optionally compared to a value.

use crate::extractors::common::file_name_lower;
use crate::stack::MarkerRule;
use std::path::Path;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DocumentFormat {
    Json,
    Toml,
    Yaml,
    Xml,
}

impl DocumentFormat {
    fn from_path(path: &Path) -> Option<Self> {
        let name = file_name_lower(path)?;
        let extension = name.rsplit_once('.').map(|(_, ext)| ext)?;
        match extension {
            "json" => Some(DocumentFormat::Json),
            "toml" => Some(DocumentFormat::Toml),
            "yaml" | "yml" => Some(DocumentFormat::Yaml),
            "xml" => Some(DocumentFormat::Xml),
            ext if ext.ends_with("proj") => Some(DocumentFormat::Xml),
            _ => None,
        }
    }
}

/// Outcome of resolving a key path: absent, present as a scalar, or present as a container
#[derive(Debug, PartialEq)]
enum Lookup {
    Missing,
    Scalar(String),
    Container,
}

impl Lookup {
    fn satisfies(&self, equals: Option<&str>) -> bool {
        match (self, equals) {
            (Lookup::Missing, _) => false,
            (_, None) => true,
            (Lookup::Scalar(value), Some(expected)) => value == expected,
            (Lookup::Container, Some(_)) => false,
        }
    }
}

/// Whether `content` of the file at `path` satisfies `rule`
pub fn marker_matches(path: &Path, content: &str, rule: &MarkerRule) -> bool {
    if let Some(text) = &rule.contains {
        return content.contains(text.as_str());
    }
    let Some(key) = &rule.key else {
        return false;
    };

    let Some(format) = DocumentFormat::from_path(path) else {
        debug!(path = %path.display(), "Keyed marker on a file with no structured format");
        return false;
    };

    let segments: Vec<&str> = key.split('.').filter(|s| !s.is_empty()).collect();
    let lookup = match format {
        DocumentFormat::Json => lookup_json(content, &segments),
        DocumentFormat::Toml => lookup_toml(content, &segments),
        DocumentFormat::Yaml => lookup_yaml(content, &segments),
        DocumentFormat::Xml => lookup_xml(content, &segments),
    };

    match lookup {
        Ok(found) => found.satisfies(rule.equals.as_deref()),
        Err(e) => {
            debug!(path = %path.display(), error = %e, "Build descriptor did not parse, marker unmatched");
            false
        }
    }
}

fn lookup_json(content: &str, segments: &[&str]) -> Result<Lookup, String> {
    let root: serde_json::Value = serde_json::from_str(content).map_err(|e| e.to_string())?;
    let mut current = &root;
    for segment in segments {
        let next = match current {
            serde_json::Value::Object(map) => map.get(*segment),
            serde_json::Value::Array(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
            _ => None,
        };
        match next {
            Some(value) => current = value,
            None => return Ok(Lookup::Missing),
        }
    }

    Ok(match current {
        serde_json::Value::String(s) => Lookup::Scalar(s.clone()),
        serde_json::Value::Object(_) | serde_json::Value::Array(_) => Lookup::Container,
        other => Lookup::Scalar(other.to_string()),
    })
}

fn lookup_toml(content: &str, segments: &[&str]) -> Result<Lookup, String> {
    let root: toml::Value = toml::from_str(content).map_err(|e: toml::de::Error| e.to_string())?;
    let mut current = &root;
    for segment in segments {
        let next = match current {
            toml::Value::Table(table) => table.get(*segment),
            toml::Value::Array(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
            _ => None,
        };
        match next {
            Some(value) => current = value,
            None => return Ok(Lookup::Missing),
        }
    }

    Ok(match current {
        toml::Value::String(s) => Lookup::Scalar(s.clone()),
        toml::Value::Table(_) | toml::Value::Array(_) => Lookup::Container,
        other => Lookup::Scalar(other.to_string()),
    })
}

fn lookup_yaml(content: &str, segments: &[&str]) -> Result<Lookup, String> {
    let root: serde_yaml::Value = serde_yaml::from_str(content).map_err(|e| e.to_string())?;
    let mut current = &root;
    for segment in segments {
        let next = match current {
            serde_yaml::Value::Mapping(map) => map.get(*segment),
            serde_yaml::Value::Sequence(items) => {
                segment.parse::<usize>().ok().and_then(|i| items.get(i))
            }
            _ => None,
        };
        match next {
            Some(value) => current = value,
            None => return Ok(Lookup::Missing),
        }
    }

    Ok(match current {
        serde_yaml::Value::String(s) => Lookup::Scalar(s.clone()),
        serde_yaml::Value::Bool(b) => Lookup::Scalar(b.to_string()),
        serde_yaml::Value::Number(n) => Lookup::Scalar(n.to_string()),
        serde_yaml::Value::Null => Lookup::Scalar(String::new()),
        _ => Lookup::Container,
    })
}

/// Element path from the document root; a final `@name` segment selects an attribute
fn lookup_xml(content: &str, segments: &[&str]) -> Result<Lookup, String> {
    let doc = roxmltree::Document::parse(content).map_err(|e| e.to_string())?;
    let (attribute, elements) = match segments.split_last() {
        Some((last, rest)) if last.starts_with('@') => (Some(&last[1..]), rest),
        _ => (None, segments),
    };

    let mut current = doc.root_element();
    for segment in elements {
        let next = current
            .children()
            .find(|c| c.is_element() && c.tag_name().name() == *segment);
        match next {
            Some(node) => current = node,
            None => return Ok(Lookup::Missing),
        }
    }

    if let Some(name) = attribute {
        return Ok(current
            .attribute(name)
            .map_or(Lookup::Missing, |v| Lookup::Scalar(v.to_string())));
    }

    if current.children().any(|c| c.is_element()) {
        Ok(Lookup::Container)
    } else {
        Ok(Lookup::Scalar(current.text().unwrap_or("").trim().to_string()))
    }
}
