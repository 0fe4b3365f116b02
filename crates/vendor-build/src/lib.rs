//! Build driver for vendored third-party subprojects.
//!
//! Ties POM import ([`vendor_pom`]) and shaded packaging ([`vendor_shade`])
//! to a JSON configuration and the conventions shared by every vendored
//! subproject.

pub mod cli;
pub mod config;
pub mod error;
pub mod pipeline;
pub mod subproject;
pub mod test_run;

pub use config::{ArtifactSettings, SIGNING_KEY_ENV, ShadeSettings, VendorConfig};
pub use error::{BuildError, Result};
pub use pipeline::{BuildOutcome, run_build};
pub use subproject::{SubprojectConventions, VendoredSubproject};
pub use test_run::TestRunSpec;
