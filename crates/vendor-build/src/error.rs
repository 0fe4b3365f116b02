//! Errors surfaced by the build driver.

use thiserror::Error;
use vendor_core::VendorError;
use vendor_pom::PomError;
use vendor_shade::ShadeError;

#[derive(Error, Debug)]
pub enum BuildError {
    #[error(transparent)]
    Pom(#[from] PomError),

    #[error(transparent)]
    Shade(#[from] ShadeError),

    #[error("Failed to parse configuration '{path}': {source}")]
    ConfigParse {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("I/O error reading '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, BuildError>;

impl From<BuildError> for VendorError {
    fn from(err: BuildError) -> Self {
        match err {
            BuildError::Pom(e) => e.into(),
            BuildError::Shade(e) => e.into(),
            BuildError::ConfigParse { source, .. } => Self::Json(source),
            BuildError::InvalidConfig(msg) => Self::Config(msg),
            BuildError::Io { source, .. } => Self::Io(source),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shade_error_is_transparent() {
        let err: BuildError = ShadeError::InvalidRule("pattern '' is not a package name".into()).into();
        assert_eq!(
            err.to_string(),
            "Invalid relocation rule: pattern '' is not a package name"
        );
    }

    #[test]
    fn test_conversion_to_vendor_error() {
        let err = BuildError::InvalidConfig("artifact.baseName is empty".into());
        let vendor: VendorError = err.into();
        assert!(matches!(vendor, VendorError::Config(ref m) if m == "artifact.baseName is empty"));

        let io = BuildError::Io {
            path: "vendor.json".into(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
        };
        assert!(matches!(VendorError::from(io), VendorError::Io(_)));
    }
}
