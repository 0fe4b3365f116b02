//! pom.xml parsing and dependency import for vendored subprojects.
//!
//! Reads the `project > dependencies` section of a vendored library's POM,
//! maps Maven scopes to build configurations and registers the resulting
//! coordinates into a [`vendor_core::DependencySink`].

pub mod error;
pub mod formatter;
pub mod importer;
pub mod loader;
pub mod parser;
pub mod types;

pub use error::{PomError, Result};
pub use formatter::KotlinDslFormatter;
pub use importer::{
    ImportReport, SkipReason, SkippedDependency, configuration_for, import_dependencies,
    import_pom_file,
};
pub use loader::load_pom_from_disk;
pub use parser::parse_pom_xml;
pub use types::{MavenScope, PomDependency, PomDocument};
