//! Error types shared across the domain layer.

use std::path::PathBuf;

use thiserror::Error;

/// Repository-level errors.
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Database connection failed: {0}")]
    Connection(String),

    #[error("Query execution failed: {0}")]
    Query(String),

    #[error("Entity not found")]
    NotFound,

    #[error("Constraint violation: {0}")]
    Constraint(String),
}

/// Failures while expanding an uploaded archive into a post directory.
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("not a valid ZIP archive")]
    InvalidArchive,

    #[error("archive does not contain {0} at its root")]
    MissingRequiredFile(String),

    #[error("archive entry escapes the destination directory: {0}")]
    UnsafeEntry(String),

    #[error("destination {} already exists and is not empty", .0.display())]
    DestinationNotEmpty(PathBuf),

    #[error("filesystem error during extraction")]
    Io(#[from] std::io::Error),
}

/// Filesystem failures outside the extraction path.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("storage i/o failure")]
    Io(#[from] std::io::Error),
}

/// Errors surfaced by the blog service.
#[derive(Debug, Error)]
pub enum BlogError {
    /// No post row with the requested id.
    #[error("blog post not found")]
    NotFound,

    /// The row exists but its content file cannot be read. Reported
    /// separately from [`BlogError::NotFound`] so callers can tell "never
    /// existed" from "exists but broken" (or not yet populated).
    #[error("post content unavailable")]
    ContentUnavailable(#[source] StorageError),

    /// Archive ingestion failed; the draft row and any partial directory
    /// have already been rolled back when this is returned.
    #[error("archive ingestion failed: {0}")]
    Ingestion(#[source] ExtractError),

    #[error(transparent)]
    Repo(#[from] RepoError),
}
