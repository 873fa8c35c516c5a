//! ZIP extraction into post content directories.
//!
//! Uploaded archives come from archiving tools in the wild: some wrap the
//! payload in a single top-level folder, some carry `__MACOSX` sidecar
//! directories. Extraction normalizes both so the required content file
//! always ends up at the destination root.

use std::fs;
use std::io::{self, Cursor};
use std::path::{Path, PathBuf};

use zip::ZipArchive;

use inkpost_core::error::ExtractError;

/// Sidecar directory some macOS archiving tools add; pruned wherever it
/// appears in the tree.
const METADATA_DIR: &str = "__MACOSX";

/// Expand `archive` into `dest`, guaranteeing `required` at the root of the
/// final tree.
///
/// `dest` is created by this call; an existing non-empty `dest` is an error.
/// On failure the partially written destination is left in place so the
/// caller can order cleanup relative to its own rollback.
pub fn extract(archive: &[u8], dest: &Path, required: &str) -> Result<(), ExtractError> {
    let mut zip =
        ZipArchive::new(Cursor::new(archive)).map_err(|_| ExtractError::InvalidArchive)?;

    prepare_destination(dest)?;

    for index in 0..zip.len() {
        let mut entry = zip
            .by_index(index)
            .map_err(|_| ExtractError::InvalidArchive)?;

        // Entries with absolute paths or `..` components must never touch
        // the filesystem (zip-slip).
        let Some(relative) = entry.enclosed_name() else {
            return Err(ExtractError::UnsafeEntry(entry.name().to_owned()));
        };

        let out_path = dest.join(relative);
        if entry.is_dir() {
            fs::create_dir_all(&out_path)?;
        } else {
            if let Some(parent) = out_path.parent() {
                fs::create_dir_all(parent)?;
            }
            let mut out = fs::File::create(&out_path)?;
            io::copy(&mut entry, &mut out)?;
        }
    }

    remove_metadata_dirs(dest)?;
    ensure_required_at_root(dest, required)
}

/// The destination must be absent or an empty directory.
fn prepare_destination(dest: &Path) -> Result<(), ExtractError> {
    match fs::read_dir(dest) {
        Ok(mut entries) => {
            if entries.next().is_some() {
                return Err(ExtractError::DestinationNotEmpty(dest.to_path_buf()));
            }
            Ok(())
        }
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            fs::create_dir_all(dest)?;
            Ok(())
        }
        Err(err) => Err(err.into()),
    }
}

/// Prune `__MACOSX` directories anywhere under `dir`.
fn remove_metadata_dirs(dir: &Path) -> io::Result<()> {
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        if !entry.file_type()?.is_dir() {
            continue;
        }
        if entry.file_name() == METADATA_DIR {
            fs::remove_dir_all(entry.path())?;
        } else {
            remove_metadata_dirs(&entry.path())?;
        }
    }
    Ok(())
}

/// Verify `required` sits at the destination root, flattening a single
/// wrapper directory if that is where it landed.
///
/// Only one level of wrapping with exactly one top-level directory is
/// recognized; anything deeper or ambiguous is a hard failure rather than a
/// guess.
fn ensure_required_at_root(dest: &Path, required: &str) -> Result<(), ExtractError> {
    if dest.join(required).is_file() {
        return Ok(());
    }

    let top_level: Vec<PathBuf> = fs::read_dir(dest)?
        .map(|entry| entry.map(|e| e.path()))
        .collect::<io::Result<_>>()?;

    let [wrapper] = top_level.as_slice() else {
        return Err(missing(required));
    };
    if !wrapper.is_dir() || !wrapper.join(required).is_file() {
        return Err(missing(required));
    }

    for child in fs::read_dir(wrapper)? {
        let child = child?;
        fs::rename(child.path(), dest.join(child.file_name()))?;
    }
    fs::remove_dir(wrapper)?;
    Ok(())
}

fn missing(required: &str) -> ExtractError {
    ExtractError::MissingRequiredFile(required.to_owned())
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    const REQUIRED: &str = "post.md";

    /// Build an archive in memory; `None` bodies become directory entries.
    fn zip_bytes(entries: &[(&str, Option<&str>)]) -> Vec<u8> {
        let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
        let options = zip::write::SimpleFileOptions::default();
        for (name, body) in entries {
            match body {
                Some(body) => {
                    writer.start_file(*name, options).unwrap();
                    writer.write_all(body.as_bytes()).unwrap();
                }
                None => writer.add_directory(*name, options).unwrap(),
            }
        }
        writer.finish().unwrap().into_inner()
    }

    fn names_at(dir: &Path) -> Vec<String> {
        let mut names: Vec<String> = fs::read_dir(dir)
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }

    #[test]
    fn root_level_archive_extracts_in_place() {
        let tmp = tempfile::tempdir().unwrap();
        let dest = tmp.path().join("0001");
        let bytes = zip_bytes(&[
            (REQUIRED, Some("# title")),
            ("assets/pic.png", Some("png-bytes")),
        ]);

        extract(&bytes, &dest, REQUIRED).unwrap();

        assert_eq!(names_at(&dest), ["assets", REQUIRED]);
        assert_eq!(fs::read_to_string(dest.join(REQUIRED)).unwrap(), "# title");
        assert!(dest.join("assets/pic.png").is_file());
    }

    #[test]
    fn macosx_folders_are_pruned() {
        let tmp = tempfile::tempdir().unwrap();
        let dest = tmp.path().join("0002");
        let bytes = zip_bytes(&[
            (REQUIRED, Some("body")),
            ("__MACOSX/._post.md", Some("resource fork")),
        ]);

        extract(&bytes, &dest, REQUIRED).unwrap();

        assert_eq!(names_at(&dest), [REQUIRED]);
    }

    #[test]
    fn single_wrapper_directory_is_flattened() {
        let tmp = tempfile::tempdir().unwrap();
        let dest = tmp.path().join("0003");
        let bytes = zip_bytes(&[
            ("bundle/post.md", Some("# nested")),
            ("bundle/assets/pic.png", Some("png-bytes")),
            ("__MACOSX/junk", Some("x")),
        ]);

        extract(&bytes, &dest, REQUIRED).unwrap();

        // Identical end state to the root-level layout.
        assert_eq!(names_at(&dest), ["assets", REQUIRED]);
        assert_eq!(fs::read_to_string(dest.join(REQUIRED)).unwrap(), "# nested");
        assert!(dest.join("assets/pic.png").is_file());
        assert!(!dest.join("bundle").exists());
    }

    #[test]
    fn missing_required_file_fails_and_leaves_cleanup_to_caller() {
        let tmp = tempfile::tempdir().unwrap();
        let dest = tmp.path().join("0004");
        let bytes = zip_bytes(&[("readme.txt", Some("hello"))]);

        let err = extract(&bytes, &dest, REQUIRED).unwrap_err();

        assert!(matches!(err, ExtractError::MissingRequiredFile(_)));
        // The extractor never deletes its own output.
        assert!(dest.join("readme.txt").is_file());
    }

    #[test]
    fn empty_archive_is_missing_required_file() {
        let tmp = tempfile::tempdir().unwrap();
        let dest = tmp.path().join("0005");
        let bytes = zip_bytes(&[]);

        let err = extract(&bytes, &dest, REQUIRED).unwrap_err();
        assert!(matches!(err, ExtractError::MissingRequiredFile(_)));
    }

    #[test]
    fn multiple_top_level_directories_are_ambiguous() {
        let tmp = tempfile::tempdir().unwrap();
        let dest = tmp.path().join("0006");
        let bytes = zip_bytes(&[
            ("one/post.md", Some("a")),
            ("two/other.txt", Some("b")),
        ]);

        let err = extract(&bytes, &dest, REQUIRED).unwrap_err();
        assert!(matches!(err, ExtractError::MissingRequiredFile(_)));
    }

    #[test]
    fn deeper_nesting_is_not_searched() {
        let tmp = tempfile::tempdir().unwrap();
        let dest = tmp.path().join("0007");
        let bytes = zip_bytes(&[("outer/inner/post.md", Some("deep"))]);

        let err = extract(&bytes, &dest, REQUIRED).unwrap_err();
        assert!(matches!(err, ExtractError::MissingRequiredFile(_)));
    }

    #[test]
    fn traversal_entries_are_rejected() {
        let tmp = tempfile::tempdir().unwrap();
        let dest = tmp.path().join("0008");
        // The writer API would be within its rights to refuse `..` names, so
        // write a benign name of equal length and corrupt it in the raw
        // bytes, as a hostile archive would carry it.
        let benign = zip_bytes(&[(REQUIRED, Some("ok")), ("AA/evil.txt", Some("x"))]);
        let hostile: Vec<u8> = {
            let mut bytes = benign;
            let needle = b"AA/evil.txt";
            while let Some(pos) = bytes
                .windows(needle.len())
                .position(|window| window == needle)
            {
                bytes[pos..pos + needle.len()].copy_from_slice(b"../evil.txt");
            }
            bytes
        };

        let err = extract(&hostile, &dest, REQUIRED).unwrap_err();

        assert!(matches!(err, ExtractError::UnsafeEntry(_)));
        assert!(!tmp.path().join("evil.txt").exists());
    }

    #[test]
    fn garbage_bytes_are_not_an_archive() {
        let tmp = tempfile::tempdir().unwrap();
        let dest = tmp.path().join("0009");

        let err = extract(b"definitely not a zip", &dest, REQUIRED).unwrap_err();

        assert!(matches!(err, ExtractError::InvalidArchive));
        // Validation happens before the destination is created.
        assert!(!dest.exists());
    }

    #[test]
    fn non_empty_destination_is_refused() {
        let tmp = tempfile::tempdir().unwrap();
        let dest = tmp.path().join("0010");
        fs::create_dir_all(&dest).unwrap();
        fs::write(dest.join("leftover"), "stale").unwrap();
        let bytes = zip_bytes(&[(REQUIRED, Some("new"))]);

        let err = extract(&bytes, &dest, REQUIRED).unwrap_err();
        assert!(matches!(err, ExtractError::DestinationNotEmpty(_)));
    }
}
