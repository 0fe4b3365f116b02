//! Renders registrations as Gradle Kotlin DSL declarations.

use vendor_core::{ConfigurationContainer, ConfigurationName, Coordinate};

pub struct KotlinDslFormatter;

impl KotlinDslFormatter {
    /// `implementation("org.yaml:snakeyaml:1.28")`
    pub fn render(&self, configuration: &ConfigurationName, coordinate: &Coordinate) -> String {
        format!("{configuration}(\"{coordinate}\")")
    }

    /// Full `dependencies { }` block for every non-empty configuration.
    pub fn render_block(&self, container: &ConfigurationContainer) -> String {
        let mut out = String::from("dependencies {\n");
        for config in container.iter() {
            for coordinate in config.dependencies() {
                out.push_str("    ");
                out.push_str(&self.render(config.name(), coordinate));
                out.push('\n');
            }
        }
        out.push('}');
        out
    }
}
