//! Package relocation.
//!
//! Rewrites entry paths, class references and service descriptors so that
//! vendored classes live under a private package prefix and cannot collide
//! with a consumer's own copy of the same library.

use crate::error::{Result, ShadeError};
use crate::merge::{EntryOrigin, MergedArchive, MergedEntry};
use bytes::Bytes;
use serde::{Deserialize, Serialize};

/// Moves classes under the dotted package `pattern` to `destination`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelocationRule {
    pub pattern: String,
    pub destination: String,
}

impl RelocationRule {
    pub fn new(pattern: impl Into<String>, destination: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            destination: destination.into(),
        }
    }

    /// # Errors
    ///
    /// Returns `ShadeError::InvalidRule` for empty or malformed package names.
    pub fn validate(&self) -> Result<()> {
        for (what, value) in [("pattern", &self.pattern), ("destination", &self.destination)] {
            let valid = !value.is_empty()
                && value
                    .split('.')
                    .all(|seg| !seg.is_empty() && !seg.contains(['/', ' ']));
            if !valid {
                return Err(ShadeError::InvalidRule(format!(
                    "{what} '{value}' is not a package name"
                )));
            }
        }
        Ok(())
    }

    /// Relocates `name` written with `separator` between package segments.
    ///
    /// Matches on segment boundaries only: `org.yaml` moves `org.yaml.Foo`
    /// but leaves `org.yamlx.Foo` alone.
    fn apply(&self, name: &str, separator: char) -> Option<String> {
        let pattern = self.pattern.replace('.', &separator.to_string());
        let destination = self.destination.replace('.', &separator.to_string());

        if name == pattern {
            return Some(destination);
        }
        let rest = name.strip_prefix(&pattern)?.strip_prefix(separator)?;
        Some(format!("{destination}{separator}{rest}"))
    }
}

/// First matching rule wins.
fn relocate_name(rules: &[RelocationRule], name: &str, separator: char) -> Option<String> {
    rules.iter().find_map(|rule| rule.apply(name, separator))
}

fn relocate_or_keep(rules: &[RelocationRule], name: &str, separator: char) -> String {
    relocate_name(rules, name, separator).unwrap_or_else(|| name.to_string())
}

/// Applies `rules` to every entry of `archive`. Returns the number of
/// relocated entries that made it into the archive.
///
/// When two entries land on the same path the project's own entry wins;
/// between dependency entries the first in path order is kept.
pub fn relocate(archive: &mut MergedArchive, rules: &[RelocationRule]) -> usize {
    if rules.is_empty() {
        return 0;
    }

    let mut relocated: Vec<(String, String, MergedEntry)> = Vec::with_capacity(archive.len());
    for (path, mut merged) in std::mem::take(&mut archive.entries) {
        let entry = &mut merged.entry;

        entry.references = entry
            .references
            .iter()
            .map(|r| relocate_or_keep(rules, r, '/'))
            .collect();

        let service = entry.service_name().map(str::to_string);
        let new_path = if let Some(service) = service {
            let lines: Vec<String> = entry
                .text_lines()
                .iter()
                .map(|line| relocate_or_keep(rules, line, '.'))
                .collect();
            let mut text = lines.join("\n");
            text.push('\n');
            entry.contents = Bytes::from(text);
            format!("META-INF/services/{}", relocate_or_keep(rules, &service, '.'))
        } else if path.starts_with("META-INF/") {
            path.clone()
        } else {
            relocate_or_keep(rules, &path, '/')
        };

        entry.path.clone_from(&new_path);
        relocated.push((path, new_path, merged));
    }

    // Stable: path order is preserved within each origin.
    relocated.sort_by_key(|(_, _, merged)| merged.origin != EntryOrigin::Project);

    let mut moved = 0;
    for (path, new_path, merged) in relocated {
        if archive.entries.contains_key(&new_path) {
            tracing::warn!("relocation of {} collides with existing {}, dropping it", path, new_path);
            continue;
        }
        if new_path != path {
            tracing::trace!("relocated {} -> {}", path, new_path);
            moved += 1;
        }
        archive.entries.insert(new_path, merged);
    }

    tracing::debug!("relocated {} entries with {} rules", moved, rules.len());
    moved
}
