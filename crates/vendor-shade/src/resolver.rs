//! Resolution of shaded-set coordinates to archive entries.

use crate::error::{Result, ShadeError};
use crate::types::ArchiveEntry;
use async_trait::async_trait;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use vendor_core::Coordinate;

/// Entries of one resolved dependency.
#[derive(Debug, Clone)]
pub struct ResolvedArtifact {
    pub coordinate: Coordinate,
    pub entries: Vec<ArchiveEntry>,
}

/// Source of dependency contents for packaging.
///
/// Resolution failures are fatal for the packager; implementations should
/// not return partial artifacts.
#[async_trait]
pub trait ArtifactResolver: Send + Sync {
    /// # Errors
    ///
    /// Returns `ShadeError::ResolutionFailed` if `coordinate` is unknown or
    /// cannot be fetched.
    async fn resolve(&self, coordinate: &Coordinate) -> Result<ResolvedArtifact>;
}

fn not_found(coordinate: &Coordinate) -> ShadeError {
    ShadeError::ResolutionFailed {
        coordinate: coordinate.to_string(),
        message: "artifact not found".into(),
    }
}

/// Resolver backed by a fixed map of coordinates.
#[derive(Debug, Clone, Default)]
pub struct InMemoryResolver {
    artifacts: HashMap<Coordinate, Vec<ArchiveEntry>>,
}

impl InMemoryResolver {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_artifact(mut self, coordinate: Coordinate, entries: Vec<ArchiveEntry>) -> Self {
        self.artifacts.insert(coordinate, entries);
        self
    }
}

#[async_trait]
impl ArtifactResolver for InMemoryResolver {
    async fn resolve(&self, coordinate: &Coordinate) -> Result<ResolvedArtifact> {
        let entries = self
            .artifacts
            .get(coordinate)
            .ok_or_else(|| not_found(coordinate))?;
        Ok(ResolvedArtifact {
            coordinate: coordinate.clone(),
            entries: entries.clone(),
        })
    }
}

#[derive(Deserialize)]
struct IndexEntry {
    path: String,
    #[serde(default)]
    references: Vec<String>,
    #[serde(default)]
    text: Option<String>,
}

impl From<IndexEntry> for ArchiveEntry {
    fn from(value: IndexEntry) -> Self {
        let entry = Self::new(value.path).with_references(value.references);
        match value.text {
            Some(text) => entry.with_contents(text),
            None => entry,
        }
    }
}

#[derive(Deserialize)]
struct IndexFile {
    artifacts: HashMap<Coordinate, Vec<IndexEntry>>,
}

/// Resolver reading a JSON artifact index:
///
/// ```json
/// { "artifacts": { "org.yaml:snakeyaml:1.28": [
///     { "path": "org/yaml/snakeyaml/Yaml.class", "references": ["org/yaml/snakeyaml/DumperOptions"] },
///     { "path": "META-INF/services/org.example.Spi", "text": "org.yaml.snakeyaml.SpiImpl" }
/// ] } }
/// ```
#[derive(Debug, Clone, Default)]
pub struct IndexResolver {
    inner: InMemoryResolver,
}

impl IndexResolver {
    /// # Errors
    ///
    /// Returns `ShadeError::Index` if `json` does not match the index format.
    pub fn from_json(json: &str, origin: &str) -> Result<Self> {
        let index: IndexFile = serde_json::from_str(json).map_err(|source| ShadeError::Index {
            path: origin.to_string(),
            source,
        })?;

        let mut inner = InMemoryResolver::new();
        for (coordinate, entries) in index.artifacts {
            inner = inner.with_artifact(coordinate, entries.into_iter().map(Into::into).collect());
        }
        tracing::debug!("loaded artifact index {} ({} artifacts)", origin, inner.artifacts.len());
        Ok(Self { inner })
    }

    /// # Errors
    ///
    /// Returns `ShadeError::Io` if the file cannot be read and
    /// `ShadeError::Index` if it is not a valid index.
    pub async fn load(path: &Path) -> Result<Self> {
        let origin = path.display().to_string();
        let json = tokio::fs::read_to_string(path)
            .await
            .map_err(|source| ShadeError::Io {
                path: origin.clone(),
                source,
            })?;
        Self::from_json(&json, &origin)
    }
}

#[async_trait]
impl ArtifactResolver for IndexResolver {
    async fn resolve(&self, coordinate: &Coordinate) -> Result<ResolvedArtifact> {
        self.inner.resolve(coordinate).await
    }
}
