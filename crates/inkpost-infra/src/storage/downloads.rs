//! Safe resolution of requested file names inside a restricted root.

use std::path::{Path, PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ResolveError {
    /// The name carries path separators or parent-directory tokens, or the
    /// canonicalized target escapes the root.
    #[error("invalid filename")]
    Rejected,

    /// No regular file of that name exists under the root.
    #[error("file not found")]
    NotFound,
}

/// Resolve `requested` to a regular file directly under `root`.
///
/// The containment check runs against the canonicalized path, not the raw
/// string, so symlinks pointing outside the root are rejected too.
pub fn resolve_download(root: &Path, requested: &str) -> Result<PathBuf, ResolveError> {
    if requested.is_empty()
        || requested.contains('/')
        || requested.contains('\\')
        || requested.contains("..")
    {
        return Err(ResolveError::Rejected);
    }

    let resolved = root
        .join(requested)
        .canonicalize()
        .map_err(|_| ResolveError::NotFound)?;
    if !resolved.is_file() {
        return Err(ResolveError::NotFound);
    }

    let root = root.canonicalize().map_err(|_| ResolveError::NotFound)?;
    if !resolved.starts_with(&root) {
        return Err(ResolveError::Rejected);
    }

    Ok(resolved)
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    fn downloads_root() -> tempfile::TempDir {
        let tmp = tempfile::tempdir().unwrap();
        fs::write(tmp.path().join("existing.pdf"), b"%PDF").unwrap();
        fs::create_dir(tmp.path().join("nested")).unwrap();
        tmp
    }

    #[test]
    fn plain_existing_file_resolves() {
        let root = downloads_root();
        let path = resolve_download(root.path(), "existing.pdf").unwrap();
        assert!(path.is_file());
        assert_eq!(path.file_name().unwrap(), "existing.pdf");
    }

    #[test]
    fn traversal_and_separator_names_are_rejected() {
        let root = downloads_root();
        for name in ["../../etc/passwd", "a/b", "a\\b", "..", "existing..pdf"] {
            assert!(
                matches!(resolve_download(root.path(), name), Err(ResolveError::Rejected)),
                "{name} should be rejected"
            );
        }
    }

    #[test]
    fn missing_file_is_not_found() {
        let root = downloads_root();
        assert!(matches!(
            resolve_download(root.path(), "missing.pdf"),
            Err(ResolveError::NotFound)
        ));
    }

    #[test]
    fn directories_do_not_count_as_files() {
        let root = downloads_root();
        assert!(matches!(
            resolve_download(root.path(), "nested"),
            Err(ResolveError::NotFound)
        ));
    }

    #[cfg(unix)]
    #[test]
    fn symlink_escaping_the_root_is_rejected() {
        let root = downloads_root();
        let outside = tempfile::NamedTempFile::new().unwrap();
        std::os::unix::fs::symlink(outside.path(), root.path().join("sneaky.pdf")).unwrap();

        assert!(matches!(
            resolve_download(root.path(), "sneaky.pdf"),
            Err(ResolveError::Rejected)
        ));
    }
}
