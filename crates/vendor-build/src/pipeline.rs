//! Import-then-package flow driven by a [`VendorConfig`].

use crate::config::VendorConfig;
use crate::error::Result;
use crate::subproject::VendoredSubproject;
use serde::Serialize;
use std::path::Path;
use vendor_pom::{ImportReport, PomError};
use vendor_shade::{IndexResolver, PackagingOutcome, ShadedPackager};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildOutcome {
    /// Absent when the configured POM does not exist.
    pub import: Option<ImportReport>,
    pub packaging: PackagingOutcome,
}

/// Imports the subproject's POM, installs the shaded set and packages.
///
/// Relative paths in `config` are resolved against `root`. A missing POM is
/// skipped only when no explicit `pomPath` is configured; a conventional
/// POM path that cannot be checked is an error.
///
/// # Errors
///
/// Any configuration, import, resolution or publication error aborts the
/// run.
pub async fn run_build(config: &VendorConfig, root: &Path) -> Result<BuildOutcome> {
    config.validate()?;

    let mut project = VendoredSubproject::new(config.subproject.clone());

    let pom = config.pom_path(root);
    let present = match &config.pom_path {
        Some(_) => true,
        None => tokio::fs::try_exists(&pom)
            .await
            .map_err(|source| PomError::Io {
                path: pom.display().to_string(),
                source,
            })?,
    };
    let import = if present {
        Some(project.import_pom(&pom).await?)
    } else {
        tracing::debug!("no POM at {}, skipping import", pom.display());
        None
    };

    let shaded = project.install_shaded(&config.shade.shaded_configuration())?;

    let resolver = match &config.index_path {
        Some(path) => IndexResolver::load(&root.join(path)).await?,
        None => IndexResolver::default(),
    };

    let packaging = ShadedPackager::new(resolver)
        .package(config.packager_input(shaded))
        .await?;

    Ok(BuildOutcome { import, packaging })
}
