//! Application configuration loaded from environment variables.

use std::env;
use std::path::PathBuf;

use inkpost_infra::JwtConfig;

/// Application configuration, built once at startup and handed to components
/// explicitly - core logic never reads the environment on its own.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    /// Root of the blog content tree; posts live under `<blog_root>/posts`.
    pub blog_root: PathBuf,
    /// Root of static project resources; downloads live under
    /// `<resources_root>/downloadable`.
    pub resources_root: PathBuf,
    pub jwt: JwtConfig,
    registration_allowlist: Vec<String>,
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let secret =
            env::var("JWT_SECRET").unwrap_or_else(|_| "change-me-in-production".to_string());
        if secret == "change-me-in-production" {
            tracing::warn!("Using default JWT secret. Set JWT_SECRET for production use.");
        }

        Self {
            host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| "sqlite://data/blog.db?mode=rwc".to_string()),
            blog_root: env::var("PATH_BLOG")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("data/blog")),
            resources_root: env::var("PATH_PROJECT_RESOURCES")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("data/resources")),
            jwt: JwtConfig {
                secret,
                issuer: env::var("JWT_ISSUER").unwrap_or_else(|_| "inkpost".to_string()),
            },
            registration_allowlist: env::var("REGISTRATION_ALLOWLIST")
                .map(|raw| parse_allowlist(&raw))
                .unwrap_or_default(),
        }
    }

    /// Directory holding one subdirectory per post.
    pub fn posts_dir(&self) -> PathBuf {
        self.blog_root.join("posts")
    }

    /// Directory of publicly downloadable files.
    pub fn downloads_dir(&self) -> PathBuf {
        self.resources_root.join("downloadable")
    }

    /// Case-insensitive allow-list membership. An empty allow-list means
    /// registration is closed.
    pub fn may_register(&self, email: &str) -> bool {
        let email = email.to_lowercase();
        self.registration_allowlist
            .iter()
            .any(|allowed| *allowed == email)
    }

    /// Filesystem path of the SQLite database file, when the URL points at
    /// one (used to provision its parent directory at boot).
    pub fn sqlite_file(&self) -> Option<PathBuf> {
        let raw = self.database_url.strip_prefix("sqlite://")?;
        let path = raw.split('?').next().unwrap_or(raw);
        (path != ":memory:" && !path.is_empty()).then(|| PathBuf::from(path))
    }
}

#[cfg(test)]
impl AppConfig {
    /// Fixed configuration for unit tests.
    pub(crate) fn for_tests(allowlist: &str) -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            database_url: "sqlite://data/blog.db?mode=rwc".to_string(),
            blog_root: PathBuf::from("data/blog"),
            resources_root: PathBuf::from("data/resources"),
            jwt: JwtConfig {
                secret: "test".to_string(),
                issuer: "test".to_string(),
            },
            registration_allowlist: parse_allowlist(allowlist),
        }
    }
}

/// Comma-separated, trimmed, lowercased.
fn parse_allowlist(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(str::to_lowercase)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn allowlist_is_trimmed_and_case_insensitive() {
        let config = AppConfig::for_tests(" Writer@Example.com , second@example.com ,");

        assert!(config.may_register("writer@example.com"));
        assert!(config.may_register("WRITER@EXAMPLE.COM"));
        assert!(config.may_register("second@example.com"));
        assert!(!config.may_register("other@example.com"));
    }

    #[test]
    fn empty_allowlist_closes_registration() {
        let config = AppConfig::for_tests("");
        assert!(!config.may_register("anyone@example.com"));
    }

    #[test]
    fn sqlite_file_is_parsed_from_the_url() {
        let config = AppConfig::for_tests("");
        assert_eq!(config.sqlite_file(), Some(PathBuf::from("data/blog.db")));
    }
}
