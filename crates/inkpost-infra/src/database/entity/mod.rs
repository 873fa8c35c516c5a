//! SeaORM entities for the `users` and `blog_posts` tables.

pub mod post;
pub mod user;
