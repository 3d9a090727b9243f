//! Minimal version handling for registry compatibility rules

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A `major.minor.patch` version; missing components are zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Version {
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
}

impl Version {
    pub fn new(major: u64, minor: u64, patch: u64) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }

    /// Strict parse of a registry-authored version such as `13`, `4.18` or `v1.9.1`.
    pub fn parse(s: &str) -> Option<Self> {
        let trimmed = s.trim();
        let trimmed = trimmed.strip_prefix('v').unwrap_or(trimmed);
        if trimmed.is_empty() {
            return None;
        }

        let mut parts = [0u64; 3];
        let mut count = 0;
        for part in trimmed.split('.') {
            if count == 3 {
                return None;
            }
            parts[count] = part.parse().ok()?;
            count += 1;
        }

        Some(Self::new(parts[0], parts[1], parts[2]))
    }

    /// Lenient extraction of the first version found in a declared requirement such as
    /// `^4.18.0`, `~> 1.7`, `>=2,<3` or `v1.9.1`. Upper bounds (`<3.0`, `<= 2`) say
    /// nothing about the version in use and are skipped. Returns `None` for
    /// wildcards, bare upper bounds and non-numeric references (`*`,
    /// `workspace:*`, `${spring.version}`).
    pub fn from_requirement(requirement: &str) -> Option<Self> {
        let re = Regex::new(r"(\d+)(?:\.(\d+))?(?:\.(\d+))?").expect("valid regex");

        let caps = re.captures_iter(requirement).find(|caps| {
            let start = caps.get(0).map_or(0, |m| m.start());
            let before = requirement[..start].trim_end();
            let before = before.strip_suffix('=').unwrap_or(before).trim_end();
            !before.ends_with('<')
        })?;

        let component = |idx: usize| -> Option<u64> {
            match caps.get(idx) {
                Some(m) => m.as_str().parse().ok(),
                None => Some(0),
            }
        };

        Some(Self::new(component(1)?, component(2)?, component(3)?))
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

impl TryFrom<String> for Version {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value).ok_or_else(|| format!("invalid version '{}'", value))
    }
}

impl From<Version> for String {
    fn from(version: Version) -> Self {
        version.to_string()
    }
}
