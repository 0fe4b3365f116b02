//! Errors specific to pom.xml loading and parsing.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum PomError {
    #[error("Failed to parse pom.xml: {message}")]
    ParseError { message: String },

    #[error("pom.xml has no <project> root element{}", found_suffix(.found))]
    MissingProject { found: Option<String> },

    #[error("pom.xml too large: {size} bytes (max: {limit} bytes)")]
    TooLarge { size: u64, limit: u64 },

    #[error("I/O error reading '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, PomError>;

fn found_suffix(found: &Option<String>) -> String {
    found
        .as_ref()
        .map(|f| format!(" (found <{f}>)"))
        .unwrap_or_default()
}

impl From<PomError> for vendor_core::VendorError {
    fn from(err: PomError) -> Self {
        match err {
            PomError::Io { source, .. } => Self::Io(source),
            other => Self::ParseError {
                file_type: "pom.xml".into(),
                source: Box::new(other),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vendor_core::VendorError;

    #[test]
    fn test_missing_project_display() {
        let err = PomError::MissingProject {
            found: Some("settings".into()),
        };
        assert_eq!(
            err.to_string(),
            "pom.xml has no <project> root element (found <settings>)"
        );

        let err = PomError::MissingProject { found: None };
        assert_eq!(err.to_string(), "pom.xml has no <project> root element");
    }

    #[test]
    fn test_parse_error_to_vendor_error() {
        let err = PomError::ParseError {
            message: "syntax error".into(),
        };
        let vendor_err: VendorError = err.into();
        assert!(matches!(vendor_err, VendorError::ParseError { .. }));
        assert!(vendor_err.to_string().contains("syntax error"));
    }

    #[test]
    fn test_io_error_to_vendor_error() {
        let err = PomError::Io {
            path: "vendor/snakeyaml/pom.xml".into(),
            source: std::io::Error::from(std::io::ErrorKind::NotFound),
        };
        let vendor_err: VendorError = err.into();
        assert!(matches!(vendor_err, VendorError::Io(_)));
    }
}
