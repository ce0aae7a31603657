use crate::domain::product::Product as DomainProduct;
use crate::domain::types::{
    CategoryId, MediaType, MediaUrl, ProductId, ProductStatus, ProductTitle, TagName,
    TypeConstraintError,
};
use crate::models::document::Document;

/// Name of the products collection.
pub const PRODUCTS_COLLECTION: &str = "products";
/// Boolean field marking the featured product.
pub const IS_FEATURED_FIELD: &str = "isFeatured";

impl TryFrom<Document> for DomainProduct {
    type Error = TypeConstraintError;

    fn try_from(doc: Document) -> Result<Self, Self::Error> {
        let id = ProductId::new(doc.id.as_str())?;
        let title = ProductTitle::new(doc.string_or_default("title"))?;

        let raw_status = doc.string_or_default("status");
        let status = ProductStatus::try_from(raw_status.as_str()).unwrap_or_else(|_| {
            log::warn!("Product {id} has unknown status '{raw_status}', treating as out of stock");
            ProductStatus::OutOfStock
        });

        let media_type = match doc.string("mediaType") {
            Some(raw) => MediaType::try_from(raw).unwrap_or_else(|e| {
                log::warn!("Product {id}: {e}, defaulting to image");
                MediaType::Image
            }),
            None => MediaType::Image,
        };

        let mut category_ids: Vec<CategoryId> = Vec::new();
        for raw in doc.string_array("categoryIds") {
            if let Ok(category_id) = CategoryId::new(raw) {
                if !category_ids.contains(&category_id) {
                    category_ids.push(category_id);
                }
            }
        }

        let mut tags: Vec<TagName> = Vec::new();
        for raw in doc.string_array("tags") {
            if let Ok(tag) = TagName::new(raw) {
                if !tags.contains(&tag) {
                    tags.push(tag);
                }
            }
        }

        let media_urls = doc
            .string_array("mediaUrls")
            .into_iter()
            .filter_map(|raw| match MediaUrl::new(raw.as_str()) {
                Ok(url) => Some(url),
                Err(_) => {
                    log::warn!("Product {id}: dropping invalid media url '{raw}'");
                    None
                }
            })
            .collect();

        Ok(Self {
            description: doc.string_or_default("description"),
            is_featured: doc.bool(IS_FEATURED_FIELD).unwrap_or(false),
            created_at: doc.created_at(),
            id,
            title,
            status,
            category_ids,
            tags,
            media_urls,
            media_type,
        })
    }
}
