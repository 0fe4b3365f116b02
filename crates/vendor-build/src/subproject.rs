//! Conventions shared by vendored third-party subprojects.

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use vendor_core::{ConfigurationContainer, Coordinate};
use vendor_pom::{ImportReport, import_pom_file};
use vendor_shade::ShadedConfiguration;

/// Build settings every vendored subproject gets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SubprojectConventions {
    /// Directory name of the subproject below `vendor_dir`.
    pub name: String,
    pub vendor_dir: PathBuf,
    pub group: String,
    pub version: String,
    pub source_encoding: String,
    /// Java toolchain the subproject builds with.
    pub toolchain: u32,
    /// `--release` level the sources are compiled for.
    pub release: u32,
}

impl Default for SubprojectConventions {
    fn default() -> Self {
        Self {
            name: "snakeyaml".into(),
            vendor_dir: PathBuf::from("vendor"),
            group: "configurate.thirdparty".into(),
            version: "version-from-submodule".into(),
            source_encoding: "UTF-8".into(),
            toolchain: 11,
            release: 7,
        }
    }
}

impl SubprojectConventions {
    /// `<root>/<vendor_dir>/<name>/pom.xml`
    pub fn pom_path(&self, root: &Path) -> PathBuf {
        root.join(&self.vendor_dir).join(&self.name).join("pom.xml")
    }

    /// Coordinate the subproject itself is published under.
    pub fn coordinate(&self) -> Coordinate {
        Coordinate::new(self.group.clone(), self.name.clone(), Some(self.version.clone()))
    }
}

/// A vendored subproject and its dependency graph.
///
/// Every configuration is created with dependency locking enabled; the
/// shaded set is the only exception.
#[derive(Debug)]
pub struct VendoredSubproject {
    conventions: SubprojectConventions,
    container: ConfigurationContainer,
}

impl VendoredSubproject {
    pub fn new(conventions: SubprojectConventions) -> Self {
        Self {
            conventions,
            container: ConfigurationContainer::with_dependency_locking(),
        }
    }

    pub fn conventions(&self) -> &SubprojectConventions {
        &self.conventions
    }

    pub fn container(&self) -> &ConfigurationContainer {
        &self.container
    }

    /// Imports the dependencies declared in the POM at `path`.
    ///
    /// # Errors
    ///
    /// Fails without registering anything if the POM cannot be read or
    /// parsed.
    pub async fn import_pom(&mut self, path: &Path) -> Result<ImportReport> {
        tracing::debug!("importing {} into {}", path.display(), self.conventions.name);
        let report = import_pom_file(path, &mut self.container).await?;
        for skipped in &report.skipped {
            tracing::debug!("skipped {} (line {})", skipped.label, skipped.line);
        }
        Ok(report)
    }

    /// Registers `shaded` as an unlocked configuration and returns it as
    /// recorded in the graph.
    ///
    /// # Errors
    ///
    /// Rejects a shaded set named after a regular build configuration; the
    /// graph is left unchanged.
    pub fn install_shaded(&mut self, shaded: &ShadedConfiguration) -> Result<ShadedConfiguration> {
        shaded.install(&mut self.container)?;
        Ok(ShadedConfiguration::from_container(&self.container, &shaded.name))
    }
}
