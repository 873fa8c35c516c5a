use async_trait::async_trait;

use crate::domain::{Post, PostPatch, User};
use crate::error::RepoError;

/// User repository.
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_by_id(&self, id: i64) -> Result<Option<User>, RepoError>;

    /// Find a user by their (lowercase) email address.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError>;

    /// Insert a new user, id and timestamps assigned by the store.
    async fn insert(&self, email: &str, password_hash: &str) -> Result<User, RepoError>;

    async fn list(&self) -> Result<Vec<User>, RepoError>;

    /// Insert a row preserving its id and timestamps (backup restore).
    async fn restore(&self, user: User) -> Result<User, RepoError>;
}

/// Blog post repository.
#[async_trait]
pub trait PostRepository: Send + Sync {
    async fn find_by_id(&self, id: i64) -> Result<Option<Post>, RepoError>;

    async fn list(&self) -> Result<Vec<Post>, RepoError>;

    /// Insert a draft row with an empty directory name, obtaining the
    /// store-assigned id that the directory name is derived from.
    async fn insert_draft(&self, title: &str) -> Result<Post, RepoError>;

    /// Finalize a draft by recording its derived directory name.
    async fn set_directory(&self, id: i64, directory: &str) -> Result<(), RepoError>;

    /// Apply a metadata patch, refreshing `updated_at`.
    /// Returns [`RepoError::NotFound`] for an unknown id.
    async fn update_meta(&self, id: i64, patch: PostPatch) -> Result<Post, RepoError>;

    /// Delete a row. Returns [`RepoError::NotFound`] if nothing was deleted.
    async fn delete(&self, id: i64) -> Result<(), RepoError>;

    async fn find_by_directory(&self, directory: &str) -> Result<Option<Post>, RepoError>;

    /// Insert a row preserving its id, directory and timestamps (backup
    /// restore).
    async fn restore(&self, post: Post) -> Result<Post, RepoError>;
}
