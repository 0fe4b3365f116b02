//! Removes dependency classes that nothing reachable refers to.

use crate::merge::{EntryOrigin, MergedArchive};
use std::collections::{HashSet, VecDeque};

fn matches_keep(class_name: &str, keep: &[String]) -> bool {
    let dotted = class_name.replace('/', ".");
    keep.iter().any(|prefix| {
        dotted == *prefix
            || dotted
                .strip_prefix(prefix.as_str())
                .is_some_and(|rest| rest.starts_with('.') || rest.starts_with('$'))
    })
}

/// Strips unreachable dependency classes from `archive`.
///
/// Roots are every project class, every dependency class under a `keep`
/// package prefix and every provider named in a service descriptor.
/// Non-class entries are always retained. Returns the number of removed
/// entries.
pub fn minimize(archive: &mut MergedArchive, keep: &[String]) -> usize {
    let mut reachable: HashSet<String> = HashSet::new();
    let mut queue: VecDeque<String> = VecDeque::new();

    for merged in archive.entries.values() {
        let entry = &merged.entry;
        if let Some(class) = entry.class_name() {
            if merged.origin == EntryOrigin::Project || matches_keep(class, keep) {
                queue.push_back(class.to_string());
            }
        } else if entry.service_name().is_some() {
            queue.extend(entry.text_lines().iter().map(|l| l.replace('.', "/")));
        } else {
            queue.extend(entry.references.iter().cloned());
        }
    }

    while let Some(class) = queue.pop_front() {
        if !reachable.insert(class.clone()) {
            continue;
        }
        if let Some(merged) = archive.entries.get(&format!("{class}.class")) {
            queue.extend(
                merged
                    .entry
                    .references
                    .iter()
                    .filter(|r| !reachable.contains(*r))
                    .cloned(),
            );
        }
    }

    let before = archive.len();
    archive.entries.retain(|_, merged| match merged.entry.class_name() {
        Some(class) => reachable.contains(class),
        None => true,
    });
    let removed = before - archive.len();

    tracing::debug!(
        "minimize kept {} of {} entries ({} removed)",
        archive.len(),
        before,
        removed
    );
    removed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::merge::merge_entries;
    use crate::resolver::ResolvedArtifact;
    use crate::types::ArchiveEntry;

    fn snakeyaml(entries: Vec<ArchiveEntry>) -> Vec<ResolvedArtifact> {
        vec![ResolvedArtifact {
            coordinate: "org.yaml:snakeyaml:1.28".parse().unwrap(),
            entries,
        }]
    }

    #[test]
    fn test_keeps_transitively_reachable_classes() {
        let project = vec![
            ArchiveEntry::new("org/example/Loader.class").with_references(["org/yaml/snakeyaml/Yaml"]),
        ];
        let deps = snakeyaml(vec![
            ArchiveEntry::new("org/yaml/snakeyaml/Yaml.class")
                .with_references(["org/yaml/snakeyaml/DumperOptions"]),
            ArchiveEntry::new("org/yaml/snakeyaml/DumperOptions.class"),
            ArchiveEntry::new("org/yaml/snakeyaml/Unused.class"),
            ArchiveEntry::new("org/yaml/snakeyaml/Unused$Inner.class"),
        ]);

        let mut archive = merge_entries(project, deps);
        let removed = minimize(&mut archive, &[]);

        assert_eq!(removed, 2);
        assert!(archive.entries.contains_key("org/yaml/snakeyaml/Yaml.class"));
        assert!(archive.entries.contains_key("org/yaml/snakeyaml/DumperOptions.class"));
        assert!(!archive.entries.contains_key("org/yaml/snakeyaml/Unused.class"));
    }

    #[test]
    fn test_cycles_terminate() {
        let project = vec![ArchiveEntry::new("p/Main.class").with_references(["d/A"])];
        let deps = snakeyaml(vec![
            ArchiveEntry::new("d/A.class").with_references(["d/B"]),
            ArchiveEntry::new("d/B.class").with_references(["d/A"]),
        ]);
        let mut archive = merge_entries(project, deps);
        assert_eq!(minimize(&mut archive, &[]), 0);
        assert_eq!(archive.len(), 3);
    }

    #[test]
    fn test_keep_prefixes_are_roots() {
        let deps = snakeyaml(vec![
            ArchiveEntry::new("org/yaml/snakeyaml/reader/StreamReader.class")
                .with_references(["org/yaml/snakeyaml/reader/UnicodeReader"]),
            ArchiveEntry::new("org/yaml/snakeyaml/reader/UnicodeReader.class"),
            ArchiveEntry::new("org/yaml/snakeyaml/readerx/Other.class"),
        ]);
        let mut archive = merge_entries(vec![], deps);
        minimize(&mut archive, &["org.yaml.snakeyaml.reader".to_string()]);

        assert_eq!(archive.len(), 2);
        assert!(!archive.entries.contains_key("org/yaml/snakeyaml/readerx/Other.class"));
    }

    #[test]
    fn test_resources_and_service_providers_survive() {
        let deps = snakeyaml(vec![
            ArchiveEntry::new("org/yaml/snakeyaml/messages.properties"),
            ArchiveEntry::new("META-INF/services/org.example.Spi")
                .with_contents("org.yaml.snakeyaml.SpiImpl\n"),
            ArchiveEntry::new("org/yaml/snakeyaml/SpiImpl.class"),
            ArchiveEntry::new("org/yaml/snakeyaml/Dead.class"),
        ]);
        let mut archive = merge_entries(vec![], deps);
        let removed = minimize(&mut archive, &[]);

        assert_eq!(removed, 1);
        assert!(archive.entries.contains_key("org/yaml/snakeyaml/messages.properties"));
        assert!(archive.entries.contains_key("org/yaml/snakeyaml/SpiImpl.class"));
    }

    #[test]
    fn test_matches_keep() {
        let keep = vec!["org.yaml.snakeyaml.Yaml".to_string()];
        assert!(matches_keep("org/yaml/snakeyaml/Yaml", &keep));
        assert!(matches_keep("org/yaml/snakeyaml/Yaml$1", &keep));
        assert!(!matches_keep("org/yaml/snakeyaml/YamlX", &keep));
    }
}
