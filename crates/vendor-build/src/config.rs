//! JSON build configuration.

use crate::error::{BuildError, Result};
use crate::subproject::SubprojectConventions;
use crate::test_run::TestRunSpec;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use vendor_core::{ConfigurationName, Coordinate};
use vendor_shade::{
    ArchiveEntry, ArtifactDescriptor, ArtifactKind, ClassifierPolicy, PackagerInput,
    RelocationRule, ShadedConfiguration, SigningCredential,
};

/// Overrides `signing.keyId` when set and non-empty.
pub const SIGNING_KEY_ENV: &str = "VENDOR_SIGNING_KEY";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ShadeSettings {
    /// Name of the isolated configuration holding the shaded set.
    pub configuration: String,
    pub dependencies: Vec<Coordinate>,
    pub relocations: Vec<RelocationRule>,
    pub minimize: bool,
    /// Dotted prefixes exempt from minimization.
    pub keep: Vec<String>,
    pub shaded_classifier: String,
    pub thin_classifier: String,
}

impl Default for ShadeSettings {
    fn default() -> Self {
        let classifiers = ClassifierPolicy::default();
        Self {
            configuration: ShadedConfiguration::DEFAULT_NAME.into(),
            dependencies: Vec::new(),
            relocations: Vec::new(),
            minimize: true,
            keep: Vec::new(),
            shaded_classifier: classifiers.shaded,
            thin_classifier: classifiers.thin,
        }
    }
}

impl ShadeSettings {
    pub fn shaded_configuration(&self) -> ShadedConfiguration {
        ShadedConfiguration::new(
            ConfigurationName::from(self.configuration.clone()),
            self.dependencies.clone(),
        )
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ArtifactSettings {
    pub base_name: String,
    pub version: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct VendorConfig {
    pub subproject: SubprojectConventions,
    /// Explicit POM location; falls back to the subproject convention.
    pub pom_path: Option<PathBuf>,
    pub shade: ShadeSettings,
    pub artifact: ArtifactSettings,
    /// Entries of the module's own jar.
    pub project_entries: Vec<ArchiveEntry>,
    /// JSON artifact index used to resolve the shaded set.
    pub index_path: Option<PathBuf>,
    pub signing: Option<SigningCredential>,
    pub test: TestRunSpec,
}

impl VendorConfig {
    /// Parses a configuration document. `origin` is only used in errors.
    ///
    /// # Errors
    ///
    /// Returns `BuildError::ConfigParse` for malformed JSON or unknown
    /// coordinate syntax.
    pub fn from_json(json: &str, origin: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|source| BuildError::ConfigParse {
            path: origin.to_string(),
            source,
        })
    }

    /// Reads `path`, parses it and applies the signing key override from
    /// the environment.
    ///
    /// # Errors
    ///
    /// Returns `BuildError::Io` if the file cannot be read and
    /// `BuildError::ConfigParse` if it is not valid.
    pub async fn load(path: &Path) -> Result<Self> {
        let origin = path.display().to_string();
        let json = tokio::fs::read_to_string(path)
            .await
            .map_err(|source| BuildError::Io {
                path: origin.clone(),
                source,
            })?;

        let mut config = Self::from_json(&json, &origin)?;
        config.apply_signing_override(std::env::var(SIGNING_KEY_ENV).ok());
        tracing::debug!("loaded configuration from {}", origin);
        Ok(config)
    }

    pub fn apply_signing_override(&mut self, key_id: Option<String>) {
        if let Some(key_id) = key_id.filter(|k| !k.trim().is_empty()) {
            tracing::debug!("signing key taken from {}", SIGNING_KEY_ENV);
            self.signing = Some(SigningCredential { key_id });
        }
    }

    /// POM location relative to `root` unless configured as absolute.
    pub fn pom_path(&self, root: &Path) -> PathBuf {
        match &self.pom_path {
            Some(path) => root.join(path),
            None => self.subproject.pom_path(root),
        }
    }

    /// # Errors
    ///
    /// Returns `BuildError::InvalidConfig` for a missing artifact name or
    /// version. `BuildError::Shade` covers malformed relocation rules and a
    /// shaded set named after a regular build configuration.
    pub fn validate(&self) -> Result<()> {
        if self.artifact.base_name.trim().is_empty() {
            return Err(BuildError::InvalidConfig("artifact.baseName is empty".into()));
        }
        if self.artifact.version.trim().is_empty() {
            return Err(BuildError::InvalidConfig("artifact.version is empty".into()));
        }
        self.shade.shaded_configuration().validate()?;
        for rule in &self.shade.relocations {
            rule.validate()?;
        }
        Ok(())
    }

    /// Packager input for `shaded`, the set as recorded in the build graph.
    pub fn packager_input(&self, shaded: ShadedConfiguration) -> PackagerInput {
        let plain = ArtifactDescriptor::new(
            ArtifactKind::Plain,
            self.artifact.base_name.clone(),
            self.artifact.version.clone(),
        );
        let mut input = PackagerInput::new(shaded, plain);
        input.project_entries = self.project_entries.clone();
        input.relocations = self.shade.relocations.clone();
        input.minimize = self.shade.minimize;
        input.keep = self.shade.keep.clone();
        input.classifiers = ClassifierPolicy {
            shaded: self.shade.shaded_classifier.clone(),
            thin: self.shade.thin_classifier.clone(),
        };
        input.signing = self.signing.clone();
        input
    }
}
