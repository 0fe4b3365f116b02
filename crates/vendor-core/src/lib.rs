//! Core abstractions shared by the vendor-build crates.
//!
//! Provides Maven coordinates, the named dependency configurations a vendored
//! subproject registers into, and the common error type every other crate
//! converts into.

pub mod configuration;
pub mod coordinate;
pub mod error;

pub use configuration::{
    Configuration, ConfigurationContainer, ConfigurationName, DependencySink,
};
pub use coordinate::Coordinate;
pub use error::{Result, VendorError};
