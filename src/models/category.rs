use crate::domain::category::Category as DomainCategory;
use crate::domain::types::{CategoryId, CategoryName, TypeConstraintError};
use crate::models::document::Document;

/// Name of the categories collection.
pub const CATEGORIES_COLLECTION: &str = "categories";
/// Field defining category display order.
pub const ORDER_FIELD: &str = "order";

impl TryFrom<Document> for DomainCategory {
    type Error = TypeConstraintError;

    fn try_from(doc: Document) -> Result<Self, Self::Error> {
        Ok(Self {
            id: CategoryId::new(doc.id.as_str())?,
            name: CategoryName::new(doc.string_or_default("name"))?,
            description: doc.string_or_default("description"),
            icon_url: doc.string_or_default("iconUrl"),
            order: doc.integer(ORDER_FIELD).unwrap_or(0),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converts_category_with_defaults() {
        let doc = Document::new("toys").with("name", "Toys").with("order", 2_i64);
        let category = DomainCategory::try_from(doc).unwrap();

        assert_eq!(category.id, "toys");
        assert_eq!(category.order, 2);
        assert_eq!(category.display_icon(), crate::domain::category::DEFAULT_CATEGORY_ICON);
    }

    #[test]
    fn rejects_blank_name() {
        let doc = Document::new("toys").with("name", "   ");
        assert_eq!(
            DomainCategory::try_from(doc).unwrap_err(),
            TypeConstraintError::EmptyString("category name")
        );
    }
}
