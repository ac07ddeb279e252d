// markscrub/src/utils/output.rs
//! Reading and all-or-nothing writing of documents.

use anyhow::{Context, Result};
use log::debug;
use std::fs;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

/// Reads a whole UTF-8 document.
pub fn read_document(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("Failed to read input file: {}", path.display()))
}

/// Writes `contents` to `path` through a temporary file in the same
/// directory, renamed over the destination once fully written. On failure
/// the destination is left as it was. An existing destination keeps its
/// permissions.
pub fn write_atomic(path: &Path, contents: &str) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut temp = NamedTempFile::new_in(dir)
        .with_context(|| format!("Failed to create a temporary file in {}", dir.display()))?;
    temp.write_all(contents.as_bytes())
        .with_context(|| format!("Failed to write temporary file for {}", path.display()))?;
    temp.as_file()
        .sync_all()
        .with_context(|| format!("Failed to flush temporary file for {}", path.display()))?;
    if let Ok(existing) = fs::metadata(path) {
        temp.as_file()
            .set_permissions(existing.permissions())
            .with_context(|| format!("Failed to copy permissions of {}", path.display()))?;
    }
    temp.persist(path)
        .with_context(|| format!("Failed to replace output file: {}", path.display()))?;

    debug!("Wrote {} bytes to {}.", contents.len(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_atomic_creates_and_replaces() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("out.html");

        write_atomic(&path, "first")?;
        assert_eq!(fs::read_to_string(&path)?, "first");

        write_atomic(&path, "second")?;
        assert_eq!(read_document(&path)?, "second");
        assert_eq!(fs::read_dir(dir.path())?.count(), 1);
        Ok(())
    }

    #[cfg(unix)]
    #[test]
    fn test_write_atomic_keeps_existing_permissions() -> Result<()> {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir()?;
        let path = dir.path().join("changelog.html");
        fs::write(&path, "x")?;
        fs::set_permissions(&path, fs::Permissions::from_mode(0o644))?;

        write_atomic(&path, "y")?;
        assert_eq!(fs::read_to_string(&path)?, "y");
        assert_eq!(fs::metadata(&path)?.permissions().mode() & 0o777, 0o644);
        Ok(())
    }

    #[test]
    fn test_write_atomic_into_missing_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("out.html");
        assert!(write_atomic(&path, "x").is_err());
        assert!(!path.exists());
    }
}
