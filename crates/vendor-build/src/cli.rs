//! Command line interface.

use crate::config::VendorConfig;
use crate::error::{BuildError, Result};
use crate::pipeline::run_build;
use crate::subproject::{SubprojectConventions, VendoredSubproject};
use crate::test_run::{EXCLUDE_FLAG, TestRunSpec};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use vendor_pom::{ImportReport, KotlinDslFormatter, SkipReason};

#[derive(Parser, Debug)]
#[command(name = "vendor-build")]
#[command(version)]
#[command(about = "Import and package vendored third-party subprojects", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Import a pom.xml and print the resulting registrations
    Import {
        /// Path to the vendored library's pom.xml
        pom: PathBuf,
        /// Print the import report as JSON instead of Kotlin DSL
        #[arg(long)]
        json: bool,
    },
    /// Build the shaded artifact and print the publication plan as JSON
    Package {
        /// JSON build configuration
        #[arg(long, value_name = "FILE")]
        config: PathBuf,
        /// Directory relative paths in the configuration resolve against
        #[arg(long, value_name = "DIR", default_value = ".")]
        root: PathBuf,
    },
    /// Print the environment and exclusions for the vendored test run
    TestEnv {
        /// JSON build configuration providing extra entries
        #[arg(long, value_name = "FILE")]
        config: Option<PathBuf>,
    },
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<String> {
    serde_json::to_string_pretty(value).map_err(|e| BuildError::InvalidConfig(e.to_string()))
}

fn describe_skips(report: &ImportReport) -> String {
    let mut out = String::new();
    for skipped in &report.skipped {
        let reason = match &skipped.reason {
            SkipReason::MissingCoordinates => "missing groupId or artifactId".to_string(),
            SkipReason::UnmappedScope(scope) => format!("unmapped scope '{scope}'"),
        };
        out.push_str(&format!(
            "// skipped {} (line {}): {}\n",
            skipped.label, skipped.line, reason
        ));
    }
    out
}

/// Runs `command` and returns what should be printed on stdout.
///
/// # Errors
///
/// Propagates any import, configuration or packaging failure.
pub async fn execute(command: Commands) -> Result<String> {
    match command {
        Commands::Import { pom, json } => {
            let mut project = VendoredSubproject::new(SubprojectConventions::default());
            let report = project.import_pom(&pom).await?;
            if json {
                return to_json(&report);
            }
            let mut out = describe_skips(&report);
            out.push_str(&KotlinDslFormatter.render_block(project.container()));
            Ok(out)
        }
        Commands::Package { config, root } => {
            let config = VendorConfig::load(&config).await?;
            let outcome = run_build(&config, &root).await?;
            to_json(&outcome.packaging.plan)
        }
        Commands::TestEnv { config } => {
            let run = match config {
                Some(path) => VendorConfig::load(&path).await?.test,
                None => TestRunSpec::default(),
            };
            let mut out = String::new();
            for (key, value) in run.environment() {
                out.push_str(&format!("{key}={value:?}\n"));
            }
            for selector in run.excluded_tests() {
                out.push_str(&format!("{EXCLUDE_FLAG} {selector}\n"));
            }
            Ok(out)
        }
    }
}
