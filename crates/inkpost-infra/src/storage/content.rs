//! Filesystem content store for post directories.

use std::io;
use std::path::PathBuf;

use async_trait::async_trait;

use inkpost_core::domain::CONTENT_FILE_NAME;
use inkpost_core::error::{ExtractError, StorageError};
use inkpost_core::ports::ContentStore;

use crate::archive;

/// Post content directories under a single `posts` root.
///
/// Layout: `<posts_root>/<directory_name>/post.md` plus arbitrary assets.
pub struct FsContentStore {
    posts_root: PathBuf,
}

impl FsContentStore {
    pub fn new(posts_root: impl Into<PathBuf>) -> Self {
        Self {
            posts_root: posts_root.into(),
        }
    }
}

#[async_trait]
impl ContentStore for FsContentStore {
    async fn ingest_archive(&self, directory: &str, archive: Vec<u8>) -> Result<(), ExtractError> {
        let dest = self.posts_root.join(directory);
        tokio::fs::create_dir_all(&self.posts_root).await?;

        // Decompression is blocking work; keep it off the async scheduler.
        tokio::task::spawn_blocking(move || archive::extract(&archive, &dest, CONTENT_FILE_NAME))
            .await
            .map_err(|join_err| ExtractError::Io(io::Error::other(join_err)))?
    }

    async fn read_content(&self, directory: &str) -> Result<String, StorageError> {
        let path = self.posts_root.join(directory).join(CONTENT_FILE_NAME);
        match tokio::fs::read_to_string(&path).await {
            Ok(content) => Ok(content),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Err(StorageError::NotFound(path)),
            Err(err) => Err(err.into()),
        }
    }

    async fn remove(&self, directory: &str) -> Result<(), StorageError> {
        let path = self.posts_root.join(directory);
        match tokio::fs::remove_dir_all(&path).await {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}
