//! Integration tests using fixture files.

use vendor_core::{ConfigurationContainer, ConfigurationName};
use vendor_pom::{
    KotlinDslFormatter, PomError, SkipReason, import_dependencies, import_pom_file, parse_pom_xml,
};

fn fixture_path(name: &str) -> std::path::PathBuf {
    std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name)
}

fn load_fixture(name: &str) -> String {
    let path = fixture_path(name);
    std::fs::read_to_string(&path).unwrap_or_else(|e| panic!("failed to read {name}: {e}"))
}

fn rendered(container: &ConfigurationContainer) -> Vec<String> {
    container
        .iter()
        .flat_map(|c| {
            c.dependencies()
                .iter()
                .map(|d| KotlinDslFormatter.render(c.name(), d))
        })
        .collect()
}

#[test]
fn test_fixture_snakeyaml_pom() {
    let doc = parse_pom_xml(&load_fixture("snakeyaml_pom.xml")).unwrap();
    assert_eq!(doc.artifact_id.as_deref(), Some("snakeyaml"));
    // build/plugins entries are not dependencies
    assert_eq!(doc.dependencies.len(), 4);

    let mut container = ConfigurationContainer::new();
    let report = import_dependencies(&doc, &mut container);
    assert!(report.is_clean());

    let tests = container
        .get(&ConfigurationName::TestImplementation)
        .unwrap();
    assert_eq!(tests.dependencies().len(), 4);
    assert!(container.get(&ConfigurationName::Implementation).is_none());
}

#[test]
fn test_fixture_mixed_scopes() {
    let doc = parse_pom_xml(&load_fixture("mixed_scopes.xml")).unwrap();
    assert_eq!(doc.dependencies.len(), 7);

    let mut container = ConfigurationContainer::new();
    let report = import_dependencies(&doc, &mut container);

    assert_eq!(
        rendered(&container),
        vec![
            "implementation(\"org.yaml:snakeyaml:1.28\")",
            "implementation(\"org.slf4j:slf4j-api:2.0.9\")",
            "testImplementation(\"junit:junit\")",
            "runtime(\"ch.qos.logback:logback-classic:1.4.14\")",
            "compileOnly(\"javax.servlet:javax.servlet-api:4.0.1\")",
        ]
    );

    assert_eq!(report.skipped.len(), 2);
    let system = report
        .skipped
        .iter()
        .find(|s| s.label == "com.sun:tools")
        .expect("system-scoped dependency should be reported");
    assert_eq!(system.reason, SkipReason::UnmappedScope("system".into()));
    assert_eq!(system.line, 31);

    let no_group = report
        .skipped
        .iter()
        .find(|s| s.reason == SkipReason::MissingCoordinates)
        .expect("dependency without groupId should be reported");
    assert_eq!(no_group.label, "?:no-group");
}

#[test]
fn test_fixture_no_dependencies() {
    let doc = parse_pom_xml(&load_fixture("no_dependencies.xml")).unwrap();
    let mut container = ConfigurationContainer::new();
    let report = import_dependencies(&doc, &mut container);
    assert!(report.registered.is_empty());
    assert_eq!(container.registration_count(), 0);
}

#[test]
fn test_fixture_malformed_pom() {
    let err = parse_pom_xml(&load_fixture("malformed_pom.xml")).unwrap_err();
    assert!(matches!(err, PomError::ParseError { .. }));
}

#[tokio::test]
async fn test_import_pom_file_twice_is_stable() {
    let mut container = ConfigurationContainer::new();
    let path = fixture_path("mixed_scopes.xml");

    let first = import_pom_file(&path, &mut container).await.unwrap();
    let snapshot = rendered(&container);
    let second = import_pom_file(&path, &mut container).await.unwrap();

    assert_eq!(first.registered.len(), 5);
    assert!(second.registered.is_empty());
    assert_eq!(second.already_present, 5);
    assert_eq!(rendered(&container), snapshot);
}

#[tokio::test]
async fn test_import_missing_file_registers_nothing() {
    let mut container = ConfigurationContainer::new();
    let err = import_pom_file(&fixture_path("does_not_exist.xml"), &mut container)
        .await
        .unwrap_err();
    assert!(matches!(err, PomError::Io { .. }));
    assert_eq!(container.registration_count(), 0);
}

#[tokio::test]
async fn test_import_malformed_file_registers_nothing() {
    let mut container = ConfigurationContainer::new();
    let result = import_pom_file(&fixture_path("malformed_pom.xml"), &mut container).await;
    assert!(result.is_err());
    assert_eq!(container.iter().count(), 0);
}

#[test]
fn test_end_to_end_snakeyaml_scenario() {
    let xml = "<project><dependencies>\
        <dependency><groupId>org.yaml</groupId><artifactId>snakeyaml</artifactId>\
        <version>1.28</version><scope>compile</scope></dependency>\
        <dependency><groupId>junit</groupId><artifactId>junit</artifactId>\
        <scope>test</scope></dependency>\
        </dependencies></project>";

    let doc = parse_pom_xml(xml).unwrap();
    let mut container = ConfigurationContainer::new();
    import_dependencies(&doc, &mut container);

    assert_eq!(
        rendered(&container),
        vec![
            "implementation(\"org.yaml:snakeyaml:1.28\")",
            "testImplementation(\"junit:junit\")",
        ]
    );
}
