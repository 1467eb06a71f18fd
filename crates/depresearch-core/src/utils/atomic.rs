//! Atomic file replacement using temp file + rename.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Write `contents` to `path` atomically.
///
/// 1. Create the parent directory if missing
/// 2. Write to `<name>.tmp` next to the target
/// 3. Rename over the target (atomic on Unix/macOS)
///
/// Readers observe either the previous file or the new one, never a torn write.
pub fn write_atomic(path: &Path, contents: &str) -> io::Result<()> {
    write_with_mode(path, contents, None)
}

/// Like [`write_atomic`] but restricts the file to its owner (`0600` on Unix).
pub fn write_atomic_private(path: &Path, contents: &str) -> io::Result<()> {
    write_with_mode(path, contents, Some(0o600))
}

fn write_with_mode(path: &Path, contents: &str, mode: Option<u32>) -> io::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let temp_path = temp_path_for(path);
    fs::write(&temp_path, contents)?;

    if let Some(mode) = mode {
        restrict_permissions(&temp_path, mode)?;
    }

    if let Err(e) = fs::rename(&temp_path, path) {
        let _ = fs::remove_file(&temp_path);
        return Err(e);
    }
    Ok(())
}

fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(ToOwned::to_owned).unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

#[cfg(unix)]
fn restrict_permissions(path: &Path, mode: u32) -> io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, fs::Permissions::from_mode(mode))
}

#[cfg(not(unix))]
fn restrict_permissions(_path: &Path, _mode: u32) -> io::Result<()> {
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn replaces_existing_contents_and_cleans_temp() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("config.json");

        write_atomic(&path, "first").unwrap();
        write_atomic(&path, "second").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "second");
        assert!(!temp.path().join("config.json.tmp").exists());
    }

    #[test]
    fn creates_missing_parent() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("nested").join("server.pid");

        write_atomic(&path, "42\n").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "42\n");
    }

    #[cfg(unix)]
    #[test]
    fn private_write_is_owner_only() {
        use std::os::unix::fs::PermissionsExt;

        let temp = tempdir().unwrap();
        let path = temp.path().join(".env");

        write_atomic_private(&path, "SECRET=1\n").unwrap();
        let mode = fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }
}
