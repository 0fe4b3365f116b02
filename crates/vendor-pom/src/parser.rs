//! pom.xml parser.
//!
//! Uses the quick-xml SAX reader and tracks the element path from the root so
//! that only direct children of `project > dependencies > dependency` are
//! read. Dependencies nested under `dependencyManagement`, `build/plugins`,
//! `profiles` or `exclusions` never leak into the result.

use crate::error::{PomError, Result};
use crate::types::{MavenScope, PomDependency, PomDocument};
use quick_xml::Reader;
use quick_xml::events::{BytesText, Event};

struct LineOffsetTable {
    line_starts: Vec<usize>,
}

impl LineOffsetTable {
    fn new(content: &str) -> Self {
        let mut line_starts = vec![0];
        for (i, c) in content.char_indices() {
            if c == '\n' {
                line_starts.push(i + 1);
            }
        }
        Self { line_starts }
    }

    /// 1-based line containing byte `offset`.
    fn line_of(&self, offset: usize) -> usize {
        self.line_starts.partition_point(|&start| start <= offset)
    }
}

fn parse_error(err: impl std::fmt::Display) -> PomError {
    PomError::ParseError {
        message: err.to_string(),
    }
}

fn decode_text(e: &BytesText<'_>) -> String {
    match e.decode() {
        Ok(cow) => quick_xml::escape::unescape(&cow)
            .map(|c| c.into_owned())
            .unwrap_or_else(|_| cow.to_string()),
        Err(_) => String::from_utf8_lossy(e.as_ref()).into_owned(),
    }
}

/// Trimmed element text, `None` when empty.
fn non_empty(text: &str) -> Option<String> {
    let trimmed = text.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// Parses a pom.xml document.
///
/// # Errors
///
/// - `PomError::ParseError` if the content is not well-formed XML
/// - `PomError::MissingProject` if the root element is not `<project>`
pub fn parse_pom_xml(content: &str) -> Result<PomDocument> {
    let line_table = LineOffsetTable::new(content);
    let mut doc = PomDocument::default();

    let mut reader = Reader::from_str(content);
    let mut path: Vec<String> = Vec::new();
    let mut text = String::new();
    let mut current_dep: Option<PomDependency> = None;
    let mut root_seen = false;

    loop {
        let pos = reader.buffer_position() as usize;
        let event = reader.read_event().map_err(parse_error)?;

        match event {
            Event::Start(ref e) | Event::Empty(ref e) => {
                let is_empty = matches!(event, Event::Empty(_));
                let tag = String::from_utf8_lossy(e.local_name().as_ref()).into_owned();

                if path.is_empty() {
                    if root_seen {
                        return Err(parse_error(format!(
                            "multiple root elements: unexpected <{tag}>"
                        )));
                    }
                    root_seen = true;
                    if tag != "project" {
                        return Err(PomError::MissingProject { found: Some(tag) });
                    }
                }

                let is_dependency = tag == "dependency"
                    && path.len() == 2
                    && path[0] == "project"
                    && path[1] == "dependencies";

                if is_dependency {
                    let dep = PomDependency {
                        line: line_table.line_of(pos),
                        ..PomDependency::default()
                    };
                    if is_empty {
                        doc.dependencies.push(dep);
                    } else {
                        current_dep = Some(dep);
                    }
                }

                if !is_empty {
                    path.push(tag);
                    text.clear();
                }
            }
            Event::Text(ref e) => text.push_str(&decode_text(e)),
            Event::CData(ref e) => text.push_str(&String::from_utf8_lossy(e.as_ref())),
            Event::GeneralRef(ref e) => match e.resolve_char_ref().map_err(parse_error)? {
                Some(ch) => text.push(ch),
                None => {
                    let name = String::from_utf8_lossy(e.as_ref()).into_owned();
                    let value = quick_xml::escape::resolve_predefined_entity(&name)
                        .ok_or_else(|| parse_error(format!("undefined entity '&{name};'")))?;
                    text.push_str(value);
                }
            },
            Event::End(_) => {
                let names: Vec<&str> = path.iter().map(String::as_str).collect();
                match names.as_slice() {
                    ["project", "groupId"] => doc.group_id = non_empty(&text),
                    ["project", "artifactId"] => doc.artifact_id = non_empty(&text),
                    ["project", "version"] => doc.version = non_empty(&text),
                    ["project", "properties", key] => {
                        doc.properties
                            .insert((*key).to_string(), text.trim().to_string());
                    }
                    ["project", "dependencies", "dependency"] => {
                        if let Some(dep) = current_dep.take() {
                            tracing::trace!("parsed dependency {} at line {}", dep.label(), dep.line);
                            doc.dependencies.push(dep);
                        }
                    }
                    ["project", "dependencies", "dependency", field] => {
                        if let Some(dep) = current_dep.as_mut() {
                            let value = non_empty(&text);
                            match *field {
                                "groupId" => dep.group_id = value,
                                "artifactId" => dep.artifact_id = value,
                                "version" => dep.version = value,
                                "scope" => {
                                    dep.scope = value.map(|s| match s.parse::<MavenScope>() {
                                        Ok(scope) => scope,
                                        Err(never) => match never {},
                                    });
                                }
                                _ => {}
                            }
                        }
                    }
                    _ => {}
                }
                path.pop();
                text.clear();
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if let Some(open) = path.last() {
        return Err(parse_error(format!(
            "unexpected end of document inside <{open}>"
        )));
    }
    if !root_seen {
        return Err(PomError::MissingProject { found: None });
    }

    tracing::debug!(
        "parsed pom.xml for {}:{} with {} dependencies",
        doc.group_id.as_deref().unwrap_or("?"),
        doc.artifact_id.as_deref().unwrap_or("?"),
        doc.dependencies.len()
    );

    Ok(doc)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_pom() {
        let xml = r#"<?xml version="1.0" encoding="UTF-8"?>
<project>
  <groupId>org.yaml</groupId>
  <artifactId>snakeyaml</artifactId>
  <version>1.28</version>
  <dependencies>
    <dependency>
      <groupId>junit</groupId>
      <artifactId>junit</artifactId>
      <version>4.13.1</version>
      <scope>test</scope>
    </dependency>
  </dependencies>
</project>"#;

        let doc = parse_pom_xml(xml).unwrap();
        assert_eq!(doc.group_id.as_deref(), Some("org.yaml"));
        assert_eq!(doc.artifact_id.as_deref(), Some("snakeyaml"));
        assert_eq!(doc.version.as_deref(), Some("1.28"));
        assert_eq!(doc.dependencies.len(), 1);

        let dep = &doc.dependencies[0];
        assert_eq!(dep.group_id.as_deref(), Some("junit"));
        assert_eq!(dep.artifact_id.as_deref(), Some("junit"));
        assert_eq!(dep.version.as_deref(), Some("4.13.1"));
        assert_eq!(dep.scope, Some(MavenScope::Test));
        assert_eq!(dep.line, 7);
    }

    #[test]
    fn test_parse_missing_scope_is_none() {
        let xml = r"<project>
  <dependencies>
    <dependency>
      <groupId>a</groupId>
      <artifactId>b</artifactId>
    </dependency>
  </dependencies>
</project>";

        let doc = parse_pom_xml(xml).unwrap();
        assert_eq!(doc.dependencies.len(), 1);
        assert!(doc.dependencies[0].scope.is_none());
        assert!(doc.dependencies[0].version.is_none());
    }

    #[test]
    fn test_ignores_dependency_management_and_plugins() {
        let xml = r"<project>
  <dependencyManagement>
    <dependencies>
      <dependency>
        <groupId>org.springframework.boot</groupId>
        <artifactId>spring-boot-dependencies</artifactId>
        <version>3.2.0</version>
        <scope>import</scope>
      </dependency>
    </dependencies>
  </dependencyManagement>
  <build>
    <plugins>
      <plugin>
        <groupId>org.apache.maven.plugins</groupId>
        <artifactId>maven-compiler-plugin</artifactId>
        <dependencies>
          <dependency>
            <groupId>x</groupId>
            <artifactId>y</artifactId>
          </dependency>
        </dependencies>
      </plugin>
    </plugins>
  </build>
</project>";

        let doc = parse_pom_xml(xml).unwrap();
        assert!(doc.dependencies.is_empty());
    }

    #[test]
    fn test_exclusions_do_not_override_fields() {
        let xml = r"<project>
  <dependencies>
    <dependency>
      <groupId>org.example</groupId>
      <artifactId>lib</artifactId>
      <version>1.0</version>
      <exclusions>
        <exclusion>
          <groupId>commons-logging</groupId>
          <artifactId>commons-logging</artifactId>
        </exclusion>
      </exclusions>
    </dependency>
  </dependencies>
</project>";

        let doc = parse_pom_xml(xml).unwrap();
        assert_eq!(doc.dependencies.len(), 1);
        assert_eq!(doc.dependencies[0].group_id.as_deref(), Some("org.example"));
        assert_eq!(doc.dependencies[0].artifact_id.as_deref(), Some("lib"));
    }

    #[test]
    fn test_project_version_not_confused_with_parent() {
        let xml = r"<project>
  <parent>
    <groupId>org.sonatype.oss</groupId>
    <artifactId>oss-parent</artifactId>
    <version>9</version>
  </parent>
  <artifactId>child</artifactId>
</project>";

        let doc = parse_pom_xml(xml).unwrap();
        assert!(doc.group_id.is_none());
        assert!(doc.version.is_none());
        assert_eq!(doc.artifact_id.as_deref(), Some("child"));
    }

    #[test]
    fn test_self_closing_dependency() {
        let xml = "<project><dependencies><dependency/></dependencies></project>";
        let doc = parse_pom_xml(xml).unwrap();
        assert_eq!(doc.dependencies.len(), 1);
        assert!(doc.dependencies[0].coordinate().is_none());
    }

    #[test]
    fn test_empty_elements_are_absent() {
        let xml = "<project><dependencies><dependency>\
            <groupId>a</groupId><artifactId>b</artifactId>\
            <version></version><scope>  </scope>\
            </dependency></dependencies></project>";
        let doc = parse_pom_xml(xml).unwrap();
        let dep = &doc.dependencies[0];
        assert!(dep.version.is_none());
        assert!(dep.scope.is_none());
    }

    #[test]
    fn test_entities_are_resolved() {
        let xml = "<project><dependencies><dependency>\
            <groupId>a&amp;b</groupId><artifactId>&#x63;d</artifactId>\
            </dependency></dependencies></project>";
        let doc = parse_pom_xml(xml).unwrap();
        assert_eq!(doc.dependencies[0].group_id.as_deref(), Some("a&b"));
        assert_eq!(doc.dependencies[0].artifact_id.as_deref(), Some("cd"));
    }

    #[test]
    fn test_parse_with_namespaces() {
        let xml = r#"<?xml version="1.0" encoding="UTF-8"?>
<project xmlns="http://maven.apache.org/POM/4.0.0"
         xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance">
  <dependencies>
    <dependency>
      <groupId>junit</groupId>
      <artifactId>junit</artifactId>
      <version>4.13.2</version>
    </dependency>
  </dependencies>
</project>"#;

        let doc = parse_pom_xml(xml).unwrap();
        assert_eq!(doc.dependencies.len(), 1);
    }

    #[test]
    fn test_parse_properties() {
        let xml = r"<project>
  <properties>
    <java.version>17</java.version>
    <project.build.sourceEncoding>UTF-8</project.build.sourceEncoding>
  </properties>
</project>";

        let doc = parse_pom_xml(xml).unwrap();
        assert_eq!(doc.properties.get("java.version"), Some(&"17".to_string()));
        assert_eq!(
            doc.properties.get("project.build.sourceEncoding"),
            Some(&"UTF-8".to_string())
        );
    }

    #[test]
    fn test_no_dependencies_element() {
        let xml = "<project><modelVersion>4.0.0</modelVersion></project>";
        let doc = parse_pom_xml(xml).unwrap();
        assert!(doc.dependencies.is_empty());
    }

    #[test]
    fn test_wrong_root_element() {
        let err = parse_pom_xml("<settings></settings>").unwrap_err();
        assert!(matches!(err, PomError::MissingProject { found: Some(ref f) } if f == "settings"));
    }

    #[test]
    fn test_empty_document() {
        let err = parse_pom_xml("").unwrap_err();
        assert!(matches!(err, PomError::MissingProject { found: None }));
    }

    #[test]
    fn test_malformed_xml() {
        let err = parse_pom_xml(r#"<project attr="unclosed></project>"#).unwrap_err();
        assert!(matches!(err, PomError::ParseError { .. }));

        let err = parse_pom_xml("<project><dependencies></project>").unwrap_err();
        assert!(matches!(err, PomError::ParseError { .. }));
    }

    #[test]
    fn test_truncated_document() {
        let err = parse_pom_xml("<project><dependencies>").unwrap_err();
        assert!(matches!(err, PomError::ParseError { .. }));
    }

    #[test]
    fn test_line_table() {
        let table = LineOffsetTable::new("a\nbc\nd");
        assert_eq!(table.line_of(0), 1);
        assert_eq!(table.line_of(2), 2);
        assert_eq!(table.line_of(5), 3);
    }
}
