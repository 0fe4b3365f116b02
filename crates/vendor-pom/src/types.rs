//! Domain types for a parsed pom.xml.

use serde::Serialize;
use std::collections::HashMap;
use std::fmt;
use vendor_core::Coordinate;

/// Maven dependency scope.
///
/// Only the four scopes the importer knows how to map are named; everything
/// else (`system`, `import`, misspellings) is kept verbatim in `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(into = "String")]
pub enum MavenScope {
    Compile,
    Test,
    Runtime,
    Provided,
    Other(String),
}

impl MavenScope {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Compile => "compile",
            Self::Test => "test",
            Self::Runtime => "runtime",
            Self::Provided => "provided",
            Self::Other(s) => s,
        }
    }
}

impl std::str::FromStr for MavenScope {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        // Maven itself matches scopes case-sensitively.
        Ok(match s {
            "compile" => Self::Compile,
            "test" => Self::Test,
            "runtime" => Self::Runtime,
            "provided" => Self::Provided,
            other => Self::Other(other.to_string()),
        })
    }
}

impl fmt::Display for MavenScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<MavenScope> for String {
    fn from(value: MavenScope) -> Self {
        value.as_str().to_string()
    }
}

/// One `<dependency>` element as written in the POM.
///
/// Every field is optional because the importer has to cope with incomplete
/// entries without aborting the whole import.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PomDependency {
    pub group_id: Option<String>,
    pub artifact_id: Option<String>,
    pub version: Option<String>,
    pub scope: Option<MavenScope>,
    /// 1-based line of the opening `<dependency>` tag.
    pub line: usize,
}

impl PomDependency {
    /// Coordinate of this dependency, if both groupId and artifactId are present.
    pub fn coordinate(&self) -> Option<Coordinate> {
        let group = self.group_id.as_deref().filter(|g| !g.is_empty())?;
        let artifact = self.artifact_id.as_deref().filter(|a| !a.is_empty())?;
        let version = self.version.clone().filter(|v| !v.is_empty());
        Some(Coordinate::new(group, artifact, version))
    }

    /// Declared scope, defaulting to `compile` when the element is absent.
    pub fn effective_scope(&self) -> MavenScope {
        self.scope.clone().unwrap_or(MavenScope::Compile)
    }

    /// Best-effort "group:artifact" label for diagnostics.
    pub fn label(&self) -> String {
        format!(
            "{}:{}",
            self.group_id.as_deref().unwrap_or("?"),
            self.artifact_id.as_deref().unwrap_or("?")
        )
    }
}

/// Parsed contents of a pom.xml relevant to dependency import.
#[derive(Debug, Clone, Default, Serialize)]
pub struct PomDocument {
    pub group_id: Option<String>,
    pub artifact_id: Option<String>,
    pub version: Option<String>,
    pub dependencies: Vec<PomDependency>,
    pub properties: HashMap<String, String>,
}
