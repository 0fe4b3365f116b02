//! Registers POM dependencies into build configurations.
//!
//! One malformed `<dependency>` never aborts the import: entries without a
//! groupId or artifactId, or with a scope that has no configuration, are
//! skipped and reported. Only failures to read or parse the POM are fatal.

use crate::error::Result;
use crate::loader::load_pom_from_disk;
use crate::parser::parse_pom_xml;
use crate::types::{MavenScope, PomDocument};
use serde::Serialize;
use std::path::Path;
use vendor_core::{ConfigurationName, Coordinate, DependencySink};

/// Maps a Maven scope to the build configuration it is registered against.
///
/// `system`, `import` and any unrecognized scope have no counterpart.
pub fn configuration_for(scope: &MavenScope) -> Option<ConfigurationName> {
    match scope {
        MavenScope::Compile => Some(ConfigurationName::Implementation),
        MavenScope::Test => Some(ConfigurationName::TestImplementation),
        MavenScope::Runtime => Some(ConfigurationName::Runtime),
        MavenScope::Provided => Some(ConfigurationName::CompileOnly),
        MavenScope::Other(_) => None,
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "reason", content = "detail", rename_all = "camelCase")]
pub enum SkipReason {
    MissingCoordinates,
    UnmappedScope(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedDependency {
    pub label: String,
    pub line: usize,
    #[serde(flatten)]
    pub reason: SkipReason,
}

/// Outcome of one import pass.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ImportReport {
    /// Registrations performed, in POM order.
    pub registered: Vec<(ConfigurationName, Coordinate)>,
    /// Entries that mapped cleanly but were already present in the sink.
    pub already_present: usize,
    pub skipped: Vec<SkippedDependency>,
}

impl ImportReport {
    pub fn is_clean(&self) -> bool {
        self.skipped.is_empty()
    }
}

/// Registers every usable dependency of `doc` into `sink`.
pub fn import_dependencies<S>(doc: &PomDocument, sink: &mut S) -> ImportReport
where
    S: DependencySink + ?Sized,
{
    let mut report = ImportReport::default();

    for dep in &doc.dependencies {
        let Some(coordinate) = dep.coordinate() else {
            tracing::debug!(
                "skipping dependency {} at line {}: missing groupId or artifactId",
                dep.label(),
                dep.line
            );
            report.skipped.push(SkippedDependency {
                label: dep.label(),
                line: dep.line,
                reason: SkipReason::MissingCoordinates,
            });
            continue;
        };

        let scope = dep.effective_scope();
        let Some(configuration) = configuration_for(&scope) else {
            tracing::warn!(
                "dropping dependency {} at line {}: scope '{}' has no configuration",
                coordinate,
                dep.line,
                scope
            );
            report.skipped.push(SkippedDependency {
                label: dep.label(),
                line: dep.line,
                reason: SkipReason::UnmappedScope(scope.as_str().to_string()),
            });
            continue;
        };

        if sink.register(&configuration, coordinate.clone()) {
            tracing::debug!("{}({})", configuration, coordinate);
            report.registered.push((configuration, coordinate));
        } else {
            report.already_present += 1;
        }
    }

    tracing::info!(
        "imported {} dependencies ({} already present, {} skipped)",
        report.registered.len(),
        report.already_present,
        report.skipped.len()
    );

    report
}

/// Loads, parses and imports the POM at `path`.
///
/// # Errors
///
/// Fails before anything is registered if the file cannot be read or is not
/// a well-formed POM.
pub async fn import_pom_file<S>(path: &Path, sink: &mut S) -> Result<ImportReport>
where
    S: DependencySink + ?Sized,
{
    let content = load_pom_from_disk(path).await?;
    let doc = parse_pom_xml(&content)?;
    Ok(import_dependencies(&doc, sink))
}
