//! Application state - shared across all handlers.

use std::sync::Arc;

use inkpost_core::BlogService;
use inkpost_core::ports::{PostRepository, UserRepository};
use inkpost_infra::database::DbConn;
use inkpost_infra::{FsContentStore, SqlitePostRepository, SqliteUserRepository};

use crate::config::AppConfig;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserRepository>,
    pub posts: Arc<dyn PostRepository>,
    pub blog: Arc<BlogService>,
    pub config: AppConfig,
}

impl AppState {
    /// Wire the repositories and the blog service over one connection pool.
    pub fn new(db: DbConn, config: AppConfig) -> Self {
        let users: Arc<dyn UserRepository> = Arc::new(SqliteUserRepository::new(db.clone()));
        let posts: Arc<dyn PostRepository> = Arc::new(SqlitePostRepository::new(db));
        let content = Arc::new(FsContentStore::new(config.posts_dir()));
        let blog = Arc::new(BlogService::new(Arc::clone(&posts), content));

        tracing::info!("application state initialized");

        Self {
            users,
            posts,
            blog,
            config,
        }
    }
}
