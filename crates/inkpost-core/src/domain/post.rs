use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The markdown file every post directory must contain at its root.
pub const CONTENT_FILE_NAME: &str = "post.md";

/// Blog post entity - metadata for one markdown post.
///
/// The post body itself lives on the filesystem under the directory named by
/// `directory_name`; see [`crate::naming::directory_name`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub thumbnail: Option<String>,
    /// Zero-padded token derived from `id`, empty only for a draft row whose
    /// archive has not been ingested yet.
    pub directory_name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Partial update of post metadata. `None` leaves the field unchanged.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PostPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub thumbnail: Option<String>,
}

impl PostPatch {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.description.is_none() && self.thumbnail.is_none()
    }
}
