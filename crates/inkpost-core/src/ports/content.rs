//! Port for the filesystem content tree backing blog posts.

use async_trait::async_trait;

use crate::error::{ExtractError, StorageError};

/// Storage for per-post content directories.
///
/// Implementations are expected to run blocking filesystem and decompression
/// work off the async scheduler.
#[async_trait]
pub trait ContentStore: Send + Sync {
    /// Expand `archive` into the directory named `directory`, which must not
    /// already hold content. On failure the partially written directory is
    /// left in place; the caller decides cleanup ordering relative to its
    /// own rollback.
    async fn ingest_archive(&self, directory: &str, archive: Vec<u8>) -> Result<(), ExtractError>;

    /// Read the post's markdown content file from the directory root.
    async fn read_content(&self, directory: &str) -> Result<String, StorageError>;

    /// Recursively delete the directory. A directory that is already gone is
    /// a success.
    async fn remove(&self, directory: &str) -> Result<(), StorageError>;
}
