//! Archive entries, artifact descriptors and outgoing variants.

use crate::error::{Result, ShadeError};
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use std::fmt;
use vendor_core::{ConfigurationContainer, ConfigurationName, Coordinate, DependencySink};

const SERVICES_DIR: &str = "META-INF/services/";

/// A single file inside a jar.
///
/// `references` lists the internal names (`org/yaml/snakeyaml/Yaml`) of the
/// classes this entry refers to. It drives minimization and is rewritten by
/// relocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArchiveEntry {
    pub path: String,
    #[serde(default)]
    pub references: Vec<String>,
    #[serde(skip)]
    pub contents: Bytes,
}

impl ArchiveEntry {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            references: Vec::new(),
            contents: Bytes::new(),
        }
    }

    #[must_use]
    pub fn with_references<I, S>(mut self, references: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.references = references.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn with_contents(mut self, contents: impl Into<Bytes>) -> Self {
        self.contents = contents.into();
        self
    }

    /// Internal class name for `.class` entries.
    pub fn class_name(&self) -> Option<&str> {
        self.path.strip_suffix(".class")
    }

    /// Service interface name for `META-INF/services/*` entries.
    pub fn service_name(&self) -> Option<&str> {
        self.path
            .strip_prefix(SERVICES_DIR)
            .filter(|name| !name.is_empty() && !name.contains('/'))
    }

    /// Jar signature files, invalid once the archive is repackaged.
    pub fn is_signature_file(&self) -> bool {
        let Some(name) = self.path.strip_prefix("META-INF/") else {
            return false;
        };
        !name.contains('/')
            && [".SF", ".DSA", ".RSA", ".EC"]
                .iter()
                .any(|ext| name.to_ascii_uppercase().ends_with(ext))
    }

    pub fn is_manifest(&self) -> bool {
        self.path == "META-INF/MANIFEST.MF"
    }

    /// Non-empty, non-comment lines of a text entry.
    pub fn text_lines(&self) -> Vec<String> {
        String::from_utf8_lossy(&self.contents)
            .lines()
            .map(|l| l.split('#').next().unwrap_or("").trim().to_string())
            .filter(|l| !l.is_empty())
            .collect()
    }
}

/// Artifact classifier. The default (empty) classifier marks the artifact a
/// consumer gets when asking for the module without qualification.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Classifier(Option<String>);

impl Classifier {
    pub const DEFAULT: Self = Self(None);

    pub fn named(name: impl Into<String>) -> Self {
        let name = name.into();
        if name.is_empty() {
            Self::DEFAULT
        } else {
            Self(Some(name))
        }
    }

    pub fn is_default(&self) -> bool {
        self.0.is_none()
    }

    pub fn as_str(&self) -> &str {
        self.0.as_deref().unwrap_or("")
    }
}

impl fmt::Display for Classifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ArtifactKind {
    /// The module's own jar, without vendored classes.
    Plain,
    /// The merged, relocated jar.
    Shaded,
    /// Sources, javadoc and similar side artifacts.
    Auxiliary,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArtifactDescriptor {
    pub kind: ArtifactKind,
    pub base_name: String,
    pub version: String,
    #[serde(default)]
    pub classifier: Classifier,
}

impl ArtifactDescriptor {
    pub fn new(kind: ArtifactKind, base_name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            kind,
            base_name: base_name.into(),
            version: version.into(),
            classifier: Classifier::DEFAULT,
        }
    }

    #[must_use]
    pub fn with_classifier(mut self, classifier: Classifier) -> Self {
        self.classifier = classifier;
        self
    }

    /// `{base}-{version}[-{classifier}].jar`
    pub fn file_name(&self) -> String {
        if self.classifier.is_default() {
            format!("{}-{}.jar", self.base_name, self.version)
        } else {
            format!("{}-{}-{}.jar", self.base_name, self.version, self.classifier)
        }
    }
}

/// Outgoing publication element (`apiElements`, `runtimeElements`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutgoingVariant {
    pub name: String,
    pub artifacts: Vec<ArtifactDescriptor>,
}

impl OutgoingVariant {
    pub const API_ELEMENTS: &'static str = "apiElements";
    pub const RUNTIME_ELEMENTS: &'static str = "runtimeElements";

    pub fn new(name: impl Into<String>, artifacts: Vec<ArtifactDescriptor>) -> Self {
        Self {
            name: name.into(),
            artifacts,
        }
    }

    /// The two standard variants, each exposing `plain` as its only artifact.
    pub fn defaults_for(plain: &ArtifactDescriptor) -> Vec<Self> {
        [Self::API_ELEMENTS, Self::RUNTIME_ELEMENTS]
            .into_iter()
            .map(|name| Self::new(name, vec![plain.clone()]))
            .collect()
    }

    pub fn default_artifacts(&self) -> impl Iterator<Item = &ArtifactDescriptor> {
        self.artifacts.iter().filter(|a| a.classifier.is_default())
    }
}

/// Isolated dependency set whose classes are merged into the shaded artifact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShadedConfiguration {
    pub name: ConfigurationName,
    pub dependencies: Vec<Coordinate>,
}

impl ShadedConfiguration {
    pub const DEFAULT_NAME: &'static str = "shade";

    pub fn new(name: ConfigurationName, dependencies: Vec<Coordinate>) -> Self {
        Self { name, dependencies }
    }

    /// The set must live in its own configuration. Well-known build
    /// configurations (`implementation`, `runtime`, ...) are rejected.
    ///
    /// # Errors
    ///
    /// Returns `ShadeError::ReservedConfiguration` for a well-known or empty
    /// name.
    pub fn validate(&self) -> Result<()> {
        let name = self.name.as_str();
        let reparsed = ConfigurationName::from(name.to_string());
        if name.trim().is_empty() || !matches!(reparsed, ConfigurationName::Custom(_)) {
            return Err(ShadeError::ReservedConfiguration(name.to_string()));
        }
        Ok(())
    }

    /// Registers the set into `container` and removes it from dependency
    /// locking. Other configurations keep their locking state.
    ///
    /// # Errors
    ///
    /// Fails without touching `container` if [`Self::validate`] does.
    pub fn install(&self, container: &mut ConfigurationContainer) -> Result<()> {
        self.validate()?;
        container.exclude_from_locking(&self.name);
        for coordinate in &self.dependencies {
            container.register(&self.name, coordinate.clone());
        }
        Ok(())
    }

    /// Reads the set named `name` back out of `container`.
    pub fn from_container(container: &ConfigurationContainer, name: &ConfigurationName) -> Self {
        let dependencies = container
            .get(name)
            .map(|c| c.dependencies().to_vec())
            .unwrap_or_default();
        Self::new(name.clone(), dependencies)
    }
}
