//! Error types shared across the vendor-build workspace.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum VendorError {
    #[error("Failed to parse {file_type}: {source}")]
    ParseError {
        file_type: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("Invalid coordinate '{0}': expected 'groupId:artifactId[:version]'")]
    InvalidCoordinate(String),

    #[error("Failed to resolve '{coordinate}': {message}")]
    Resolution { coordinate: String, message: String },

    #[error("Publication conflict: {0}")]
    PublicationConflict(String),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, VendorError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_coordinate_display() {
        let err = VendorError::InvalidCoordinate("snakeyaml".into());
        assert_eq!(
            err.to_string(),
            "Invalid coordinate 'snakeyaml': expected 'groupId:artifactId[:version]'"
        );
    }

    #[test]
    fn test_parse_error_keeps_source() {
        use std::error::Error;

        let err = VendorError::ParseError {
            file_type: "pom.xml".into(),
            source: Box::new(std::io::Error::other("unexpected eof")),
        };
        assert!(err.to_string().contains("pom.xml"));
        assert!(err.source().is_some());
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::from(std::io::ErrorKind::NotFound);
        let err: VendorError = io_err.into();
        assert!(matches!(err, VendorError::Io(_)));
    }
}
