//! # Inkpost Infrastructure
//!
//! Concrete implementations of the ports defined in `inkpost-core`:
//! SQLite repositories via SeaORM, JWT + Argon2 authentication, ZIP archive
//! extraction and the filesystem content store.

pub mod archive;
pub mod auth;
pub mod database;
pub mod storage;

pub use auth::{Argon2PasswordService, JwtConfig, JwtTokenService};
pub use database::{SqlitePostRepository, SqliteUserRepository, connect};
pub use storage::{FsContentStore, ResolveError, resolve_download};
