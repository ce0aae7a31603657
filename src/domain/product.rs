use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::types::{
    CategoryId, MediaType, MediaUrl, ProductId, ProductStatus, ProductTitle, TagName,
};

/// Image shown on product cards whose first media URL is missing or invalid.
pub const PRODUCT_PLACEHOLDER_URL: &str =
    "https://placehold.co/600x400/F9A8D4/4A235A?text=Image";

/// A handmade item listed in the shop catalog.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub title: ProductTitle,
    pub description: String,
    pub status: ProductStatus,
    /// References into the `categories` collection; may dangle.
    pub category_ids: Vec<CategoryId>,
    pub tags: Vec<TagName>,
    pub media_urls: Vec<MediaUrl>,
    pub media_type: MediaType,
    pub is_featured: bool,
    pub created_at: Option<DateTime<Utc>>,
}

impl Product {
    /// Returns `true` when the product is listed under `category_id`.
    pub fn in_category(&self, category_id: &CategoryId) -> bool {
        self.category_ids.contains(category_id)
    }

    /// Returns `true` when the product carries `tag`.
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t.as_str() == tag)
    }

    /// Returns `true` when both products share at least one category.
    pub fn shares_category_with(&self, other: &Product) -> bool {
        self.category_ids.iter().any(|id| other.in_category(id))
    }

    /// URL of the card image, falling back to [`PRODUCT_PLACEHOLDER_URL`].
    pub fn display_image_url(&self) -> &str {
        self.media_urls
            .first()
            .map(MediaUrl::as_str)
            .unwrap_or(PRODUCT_PLACEHOLDER_URL)
    }
}
