//! Reads pom.xml files from disk.

use crate::error::{PomError, Result};
use std::path::Path;

/// Maximum accepted pom.xml size in bytes (10MB).
const MAX_POM_SIZE: u64 = 10_000_000;

/// Loads a pom.xml from disk.
///
/// # Errors
///
/// - `PomError::Io` - file missing, unreadable, or not valid UTF-8
/// - `PomError::TooLarge` - file exceeds `MAX_POM_SIZE`
pub async fn load_pom_from_disk(path: &Path) -> Result<String> {
    let io_err = |source| PomError::Io {
        path: path.display().to_string(),
        source,
    };

    tracing::debug!("Loading pom from disk: {:?}", path);

    let metadata = tokio::fs::metadata(path).await.map_err(io_err)?;
    let size = metadata.len();
    if size > MAX_POM_SIZE {
        tracing::error!(
            "pom.xml exceeds maximum size: {} bytes (limit: {} bytes)",
            size,
            MAX_POM_SIZE
        );
        return Err(PomError::TooLarge {
            size,
            limit: MAX_POM_SIZE,
        });
    }

    let content = tokio::fs::read_to_string(path).await.map_err(io_err)?;
    tracing::trace!("Loaded {:?} ({} bytes)", path, content.len());
    Ok(content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[tokio::test]
    async fn test_load_existing_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "<project/>").unwrap();

        let content = load_pom_from_disk(file.path()).await.unwrap();
        assert_eq!(content, "<project/>");
    }

    #[tokio::test]
    async fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_pom_from_disk(&dir.path().join("pom.xml"))
            .await
            .unwrap_err();
        assert!(matches!(err, PomError::Io { .. }));
        assert!(err.to_string().contains("pom.xml"));
    }

    #[tokio::test]
    async fn test_load_invalid_utf8() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(&[0x3c, 0xff, 0xfe, 0x3e]).unwrap();

        let err = load_pom_from_disk(file.path()).await.unwrap_err();
        assert!(matches!(err, PomError::Io { .. }));
    }
}
