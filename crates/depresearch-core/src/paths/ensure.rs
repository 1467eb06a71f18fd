//! Directory creation.

use std::fs;
use std::path::Path;

use super::error::PathError;

/// Ensure the provided directory exists, creating it (and parents) if missing.
///
/// Fails if the path exists but is not a directory.
pub fn ensure_directory(path: &Path) -> Result<(), PathError> {
    if path.exists() {
        if !path.is_dir() {
            return Err(PathError::NotADirectory(path.to_path_buf()));
        }
        return Ok(());
    }

    fs::create_dir_all(path).map_err(|e| PathError::CreateFailed {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn creates_nested_directories() {
        let temp = tempdir().unwrap();
        let nested = temp.path().join("a").join("b");

        ensure_directory(&nested).unwrap();
        assert!(nested.is_dir());

        // Second call is a no-op
        ensure_directory(&nested).unwrap();
    }

    #[test]
    fn rejects_existing_file() {
        let temp = tempdir().unwrap();
        let file = temp.path().join("workspace");
        fs::write(&file, "not a dir").unwrap();

        let err = ensure_directory(&file).unwrap_err();
        assert!(matches!(err, PathError::NotADirectory(_)));
    }
}
