//! Merges the module's own entries with resolved dependency entries.

use crate::resolver::ResolvedArtifact;
use crate::types::ArchiveEntry;
use bytes::Bytes;
use std::collections::BTreeMap;
use vendor_core::Coordinate;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryOrigin {
    Project,
    Dependency(Coordinate),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergedEntry {
    pub entry: ArchiveEntry,
    pub origin: EntryOrigin,
}

/// Archive contents keyed by entry path.
#[derive(Debug, Clone, Default)]
pub struct MergedArchive {
    pub entries: BTreeMap<String, MergedEntry>,
}

impl MergedArchive {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn into_entries(self) -> Vec<ArchiveEntry> {
        self.entries.into_values().map(|m| m.entry).collect()
    }
}

fn append_service_lines(existing: &mut ArchiveEntry, incoming: &ArchiveEntry) {
    let mut lines = existing.text_lines();
    for line in incoming.text_lines() {
        if !lines.contains(&line) {
            lines.push(line);
        }
    }
    let mut text = lines.join("\n");
    text.push('\n');
    existing.contents = Bytes::from(text);
}

/// Merges `project` entries with every resolved dependency.
///
/// Project entries take precedence. Among dependencies the first artifact to
/// provide a path wins, except service descriptors, whose provider lines are
/// concatenated. Dependency signature files and manifests are dropped.
pub fn merge_entries(project: Vec<ArchiveEntry>, dependencies: Vec<ResolvedArtifact>) -> MergedArchive {
    let mut archive = MergedArchive::default();

    for entry in project {
        archive.entries.insert(
            entry.path.clone(),
            MergedEntry {
                entry,
                origin: EntryOrigin::Project,
            },
        );
    }

    for artifact in dependencies {
        for entry in artifact.entries {
            if entry.is_signature_file() || entry.is_manifest() {
                tracing::trace!("dropping {} from {}", entry.path, artifact.coordinate);
                continue;
            }

            match archive.entries.get_mut(&entry.path) {
                Some(existing) if entry.service_name().is_some() => {
                    append_service_lines(&mut existing.entry, &entry);
                }
                Some(_) => {
                    tracing::debug!(
                        "duplicate entry {} in {}, keeping first",
                        entry.path,
                        artifact.coordinate
                    );
                }
                None => {
                    archive.entries.insert(
                        entry.path.clone(),
                        MergedEntry {
                            entry,
                            origin: EntryOrigin::Dependency(artifact.coordinate.clone()),
                        },
                    );
                }
            }
        }
    }

    tracing::debug!("merged archive has {} entries", archive.len());
    archive
}
