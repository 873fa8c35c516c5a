//! The blog post lifecycle: archive ingestion, content reads, metadata
//! updates and deletion.

use std::path::PathBuf;
use std::sync::Arc;

use crate::domain::{CONTENT_FILE_NAME, Post, PostPatch};
use crate::error::{BlogError, RepoError, StorageError};
use crate::naming::directory_name;
use crate::ports::{ContentStore, PostRepository};

/// Orchestrates post rows and their content directories.
///
/// Creation is a two-phase commit: a draft row is inserted first to obtain
/// the id the directory name derives from, then the archive is expanded, and
/// the row is finalized only once the directory is fully populated. Any
/// failure in between rolls back both sides.
pub struct BlogService {
    posts: Arc<dyn PostRepository>,
    content: Arc<dyn ContentStore>,
}

impl BlogService {
    pub fn new(posts: Arc<dyn PostRepository>, content: Arc<dyn ContentStore>) -> Self {
        Self { posts, content }
    }

    /// Ingest an uploaded archive as a new post.
    pub async fn create_post(&self, title: &str, archive: Vec<u8>) -> Result<Post, BlogError> {
        let draft = self.posts.insert_draft(title).await?;
        let directory = directory_name(draft.id);
        tracing::debug!(post_id = draft.id, %directory, "draft row inserted");

        if let Err(cause) = self.content.ingest_archive(&directory, archive).await {
            self.roll_back(draft.id, &directory).await;
            return Err(BlogError::Ingestion(cause));
        }

        match self.posts.set_directory(draft.id, &directory).await {
            Ok(()) => {
                tracing::info!(post_id = draft.id, %directory, "blog post created");
                Ok(Post {
                    directory_name: directory,
                    ..draft
                })
            }
            Err(err) => {
                self.roll_back(draft.id, &directory).await;
                Err(err.into())
            }
        }
    }

    /// Undo a half-finished ingestion: the row goes first, then the
    /// directory. Directory removal is best-effort and only logged.
    async fn roll_back(&self, id: i64, directory: &str) {
        if let Err(err) = self.posts.delete(id).await {
            tracing::error!(post_id = id, error = %err, "rollback could not delete draft row");
        }
        if let Err(err) = self.content.remove(directory).await {
            tracing::warn!(%directory, error = %err, "rollback could not remove post directory");
        }
    }

    /// Fetch a post together with its markdown content.
    pub async fn read_post(&self, id: i64) -> Result<(Post, String), BlogError> {
        let post = self.posts.find_by_id(id).await?.ok_or(BlogError::NotFound)?;

        // A draft whose archive has not landed yet is "not ready", not
        // corrupt: the ingestion window inserts the row before the directory.
        if post.directory_name.is_empty() {
            return Err(BlogError::ContentUnavailable(StorageError::NotFound(
                PathBuf::from(CONTENT_FILE_NAME),
            )));
        }

        let content = self
            .content
            .read_content(&post.directory_name)
            .await
            .map_err(BlogError::ContentUnavailable)?;
        Ok((post, content))
    }

    pub async fn list_posts(&self) -> Result<Vec<Post>, BlogError> {
        Ok(self.posts.list().await?)
    }

    /// Patch post metadata. `updated_at` is refreshed by the repository.
    pub async fn update_post(&self, id: i64, patch: PostPatch) -> Result<Post, BlogError> {
        match self.posts.update_meta(id, patch).await {
            Ok(post) => Ok(post),
            Err(RepoError::NotFound) => Err(BlogError::NotFound),
            Err(err) => Err(err.into()),
        }
    }

    /// Delete a post row. The content directory is removed fire-and-forget:
    /// the row deletion result is never blocked on, or failed by, the
    /// filesystem outcome.
    pub async fn delete_post(&self, id: i64) -> Result<(), BlogError> {
        let post = self.posts.find_by_id(id).await?.ok_or(BlogError::NotFound)?;

        match self.posts.delete(id).await {
            Ok(()) => {}
            Err(RepoError::NotFound) => return Err(BlogError::NotFound),
            Err(err) => return Err(err.into()),
        }

        if !post.directory_name.is_empty() {
            let content = Arc::clone(&self.content);
            let directory = post.directory_name;
            tokio::spawn(async move {
                if let Err(err) = content.remove(&directory).await {
                    tracing::warn!(%directory, error = %err, "post directory cleanup failed");
                }
            });
        }

        tracing::info!(post_id = id, "blog post deleted");
        Ok(())
    }
}
