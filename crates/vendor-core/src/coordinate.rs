//! Maven coordinates (`groupId:artifactId[:version]`).

use crate::error::VendorError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A dependency coordinate as registered against a build configuration.
///
/// The version is optional: a versionless coordinate defers version selection
/// to a platform or constraint declared elsewhere in the build.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Coordinate {
    pub group: String,
    pub artifact: String,
    pub version: Option<String>,
}

impl Coordinate {
    pub fn new(
        group: impl Into<String>,
        artifact: impl Into<String>,
        version: Option<String>,
    ) -> Self {
        Self {
            group: group.into(),
            artifact: artifact.into(),
            version,
        }
    }

    /// "{group}:{artifact}", without the version.
    pub fn module_id(&self) -> String {
        format!("{}:{}", self.group, self.artifact)
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.group, self.artifact)?;
        if let Some(version) = &self.version {
            write!(f, ":{version}")?;
        }
        Ok(())
    }
}

impl FromStr for Coordinate {
    type Err = VendorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.trim().split(':');
        let group = parts.next().filter(|p| !p.is_empty());
        let artifact = parts.next().filter(|p| !p.is_empty());
        let version = parts.next().filter(|p| !p.is_empty());

        match (group, artifact, parts.next()) {
            (Some(group), Some(artifact), None) => {
                Ok(Self::new(group, artifact, version.map(str::to_string)))
            }
            _ => Err(VendorError::InvalidCoordinate(s.to_string())),
        }
    }
}

impl TryFrom<String> for Coordinate {
    type Error = VendorError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Coordinate> for String {
    fn from(value: Coordinate) -> Self {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_with_version() {
        let coord = Coordinate::new("org.yaml", "snakeyaml", Some("1.28".into()));
        assert_eq!(coord.to_string(), "org.yaml:snakeyaml:1.28");
        assert_eq!(coord.module_id(), "org.yaml:snakeyaml");
    }

    #[test]
    fn test_display_without_version() {
        let coord = Coordinate::new("junit", "junit", None);
        assert_eq!(coord.to_string(), "junit:junit");
    }

    #[test]
    fn test_parse() {
        let coord: Coordinate = "org.yaml:snakeyaml:1.28".parse().unwrap();
        assert_eq!(coord.group, "org.yaml");
        assert_eq!(coord.artifact, "snakeyaml");
        assert_eq!(coord.version.as_deref(), Some("1.28"));

        let coord: Coordinate = "junit:junit".parse().unwrap();
        assert!(coord.version.is_none());
    }

    #[test]
    fn test_parse_invalid() {
        assert!("snakeyaml".parse::<Coordinate>().is_err());
        assert!(":snakeyaml".parse::<Coordinate>().is_err());
        assert!("a:b:c:d".parse::<Coordinate>().is_err());
        assert!("".parse::<Coordinate>().is_err());
    }

    #[test]
    fn test_serde_as_string() {
        let coord = Coordinate::new("org.yaml", "snakeyaml", Some("1.28".into()));
        let json = serde_json::to_string(&coord).unwrap();
        assert_eq!(json, "\"org.yaml:snakeyaml:1.28\"");

        let back: Coordinate = serde_json::from_str(&json).unwrap();
        assert_eq!(back, coord);

        assert!(serde_json::from_str::<Coordinate>("\"nope\"").is_err());
    }
}
