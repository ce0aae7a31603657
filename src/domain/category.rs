use serde::{Deserialize, Serialize};

use crate::domain::types::{CategoryId, CategoryName};

/// Icon shown for categories without one.
pub const DEFAULT_CATEGORY_ICON: &str = "🎀";

/// Grouping used to browse the catalog.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: CategoryId,
    pub name: CategoryName,
    pub description: String,
    /// Free text; the shop stores emoji here as often as URLs.
    pub icon_url: String,
    /// Display position, ascending.
    pub order: i64,
}

impl Category {
    pub fn display_icon(&self) -> &str {
        if self.icon_url.is_empty() {
            DEFAULT_CATEGORY_ICON
        } else {
            &self.icon_url
        }
    }
}
