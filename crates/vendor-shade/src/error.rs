//! Errors specific to shaded packaging.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ShadeError {
    #[error("Failed to resolve '{coordinate}' in shaded configuration: {message}")]
    ResolutionFailed { coordinate: String, message: String },

    #[error(
        "Outgoing variant '{variant}' must expose exactly one default-classifier artifact, found {count}"
    )]
    PublicationConflict { variant: String, count: usize },

    #[error("Invalid relocation rule: {0}")]
    InvalidRule(String),

    #[error("Shaded configuration cannot reuse the build configuration '{0}'")]
    ReservedConfiguration(String),

    #[error("Failed to parse artifact index '{path}': {source}")]
    Index {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("I/O error reading '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, ShadeError>;

impl From<ShadeError> for vendor_core::VendorError {
    fn from(err: ShadeError) -> Self {
        match err {
            ShadeError::ResolutionFailed {
                coordinate,
                message,
            } => Self::Resolution {
                coordinate,
                message,
            },
            ShadeError::PublicationConflict { .. } => Self::PublicationConflict(err.to_string()),
            ShadeError::InvalidRule(msg) => Self::Config(msg),
            ShadeError::ReservedConfiguration(_) => Self::Config(err.to_string()),
            ShadeError::Index { source, .. } => Self::Json(source),
            ShadeError::Io { source, .. } => Self::Io(source),
        }
    }
}
