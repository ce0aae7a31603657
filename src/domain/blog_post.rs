use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::types::{BlogPostId, BlogTitle, CoverImageUrl};

/// Cover shown on blog cards when the post has no valid cover image.
pub const BLOG_COVER_PLACEHOLDER_URL: &str =
    "https://placehold.co/800x600/FFB6C1/4A235A?text=Blog";

/// Blog article with markdown content.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BlogPost {
    pub id: BlogPostId,
    pub title: BlogTitle,
    /// Markdown source, rendered by the presentation layer.
    pub content: String,
    pub cover_image_url: Option<CoverImageUrl>,
    pub created_at: Option<DateTime<Utc>>,
}

impl BlogPost {
    pub fn display_cover_url(&self) -> &str {
        self.cover_image_url
            .as_ref()
            .map(CoverImageUrl::as_str)
            .unwrap_or(BLOG_COVER_PLACEHOLDER_URL)
    }
}
