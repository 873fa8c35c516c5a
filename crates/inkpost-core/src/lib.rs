//! # Inkpost Core
//!
//! The domain layer of the inkpost blog backend.
//! This crate contains the blog post ingestion workflow and the ports it
//! talks through, with zero infrastructure dependencies.

pub mod domain;
pub mod error;
pub mod naming;
pub mod ports;
pub mod service;

pub use error::BlogError;
pub use service::BlogService;
