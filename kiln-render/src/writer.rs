//! File sink — atomic output writes and stale-output removal.
//!
//! ## `write` protocol
//!
//! 1. Render content into memory (already done by caller).
//! 2. Create the parent directory chain.
//! 3. Write to `<path>.kiln.tmp` and fsync; the handle is closed on drop.
//! 4. Rename to the final path (atomic on POSIX).
//!
//! A failure at step 3 or 4 removes the temp file and leaves any previous
//! file at `path` untouched, so readers never observe a truncated output.

use std::fs::{self, File};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use crate::error::{write_err, RenderError};

pub const TMP_SUFFIX: &str = ".kiln.tmp";

/// Temp-file path used while writing `path`.
pub fn tmp_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_os_string();
    name.push(TMP_SUFFIX);
    PathBuf::from(name)
}

/// Atomically replace `path` with `bytes`, creating parent directories.
pub fn write(path: &Path, bytes: &[u8]) -> Result<(), RenderError> {
    write_with_tmp(path, bytes, &tmp_path(path))
}

fn write_with_tmp(path: &Path, bytes: &[u8], tmp: &Path) -> Result<(), RenderError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| write_err(parent, e))?;
    }
    if let Some(tmp_parent) = tmp.parent() {
        fs::create_dir_all(tmp_parent).map_err(|e| write_err(tmp_parent, e))?;
    }

    if let Err(e) = write_file(tmp, bytes) {
        let _ = fs::remove_file(tmp);
        return Err(write_err(tmp, e));
    }

    if let Err(e) = fs::rename(tmp, path) {
        let _ = fs::remove_file(tmp);
        return Err(write_err(path, e));
    }
    Ok(())
}

fn write_file(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    let mut file = File::create(path)?;
    file.write_all(bytes)?;
    file.sync_all()
}

/// Remove `path` if present. Returns whether a file was removed.
pub fn delete_if_exists(path: &Path) -> Result<bool, RenderError> {
    match fs::remove_file(path) {
        Ok(()) => {
            tracing::debug!("removed stale output: {}", path.display());
            Ok(true)
        }
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
        Err(e) => Err(write_err(path, e)),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn write_creates_file_with_exact_bytes() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("index.html");
        write(&path, b"<html></html>").unwrap();
        assert_eq!(fs::read(&path).unwrap(), b"<html></html>");
    }

    #[test]
    fn write_replaces_existing_content() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("index.html");
        write(&path, b"a much longer first version").unwrap();
        write(&path, b"v2").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "v2");
    }

    #[test]
    fn creates_parent_directories() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("blog").join("2024").join("post.html");
        write(&path, b"content").unwrap();
        assert!(path.exists());
    }

    #[test]
    fn tmp_file_removed_after_write() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("clean.html");
        write(&path, b"data").unwrap();
        assert!(!tmp_path(&path).exists(), ".kiln.tmp must be cleaned up");
    }

    #[test]
    fn delete_if_exists_reports_removal() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("old-draft.html");
        fs::write(&path, "stale").unwrap();
        assert!(delete_if_exists(&path).unwrap());
        assert!(!path.exists());
        assert!(!delete_if_exists(&path).unwrap(), "absence is not an error");
    }

    #[test]
    fn delete_if_exists_on_directory_is_error() {
        let tmp = TempDir::new().unwrap();
        let dir = tmp.path().join("post.html");
        fs::create_dir_all(&dir).unwrap();
        let err = delete_if_exists(&dir).unwrap_err();
        assert!(matches!(err, RenderError::Write { .. }), "got: {err}");
    }

    #[test]
    fn rename_onto_directory_fails_and_cleans_tmp() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("post.html");
        fs::create_dir_all(&path).unwrap();
        fs::write(path.join("keep.txt"), "untouched").unwrap();

        let err = write(&path, b"new content").unwrap_err();

        assert!(matches!(err, RenderError::Write { .. }), "got: {err}");
        assert!(path.is_dir());
        assert_eq!(fs::read_to_string(path.join("keep.txt")).unwrap(), "untouched");
        assert!(!tmp_path(&path).exists(), ".kiln.tmp should be cleaned up");
    }

    #[test]
    #[cfg(unix)]
    fn rename_failure_leaves_original_and_cleans_tmp() {
        use std::os::unix::fs::PermissionsExt;

        let root = TempDir::new().unwrap();
        let readonly_dir = root.path().join("readonly");
        fs::create_dir_all(&readonly_dir).unwrap();

        let path = readonly_dir.join("post.html");
        fs::write(&path, "original").unwrap();

        let mut perms = fs::metadata(&readonly_dir).unwrap().permissions();
        perms.set_mode(0o555);
        fs::set_permissions(&readonly_dir, perms).unwrap();

        let tmp_dir = TempDir::new().unwrap();
        let tmp = tmp_dir.path().join("post.html.kiln.tmp");

        let result = write_with_tmp(&path, b"new content", &tmp);

        let mut perms = fs::metadata(&readonly_dir).unwrap().permissions();
        perms.set_mode(0o755);
        fs::set_permissions(&readonly_dir, perms).unwrap();

        // Root ignores directory permissions; only assert when the rename was refused.
        if result.is_err() {
            assert_eq!(fs::read_to_string(&path).unwrap(), "original");
            assert!(!tmp.exists(), ".kiln.tmp should be cleaned up");
        }
    }
}
