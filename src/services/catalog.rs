//! In-memory filtering and ordering of the product catalog.
//!
//! Everything here is a pure function of its inputs: the product list is
//! fetched once and every change of the [`FilterSpec`] re-derives the view
//! synchronously.

use std::cmp::Ordering;
use std::collections::BTreeSet;

use icu_collator::options::{CollatorOptions, Strength};
use icu_collator::{Collator, CollatorBorrowed, CollatorPreferences};

use crate::domain::blog_post::BlogPost;
use crate::domain::category::Category;
use crate::domain::product::Product;
use crate::domain::types::{BlogPostId, CategoryId, ProductStatus, SortOrder};

/// Number of related products shown under a product.
pub const RELATED_PRODUCTS_LIMIT: usize = 5;
/// Number of related posts shown under a blog post.
pub const RELATED_POSTS_LIMIT: usize = 2;

/// Visitor-selected criteria applied to the product list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSpec {
    /// Case-insensitive substring of the title; empty matches everything.
    pub search_term: String,
    pub category_id: Option<CategoryId>,
    pub status: Option<ProductStatus>,
    /// Every selected tag must be present on a product.
    pub tags: BTreeSet<String>,
    pub sort_order: SortOrder,
}

impl FilterSpec {
    pub fn set_search_term(&mut self, search_term: impl Into<String>) {
        self.search_term = search_term.into();
    }

    pub fn set_category(&mut self, category_id: Option<CategoryId>) {
        self.category_id = category_id;
    }

    pub fn set_status(&mut self, status: Option<ProductStatus>) {
        self.status = status;
    }

    pub fn set_sort_order(&mut self, sort_order: SortOrder) {
        self.sort_order = sort_order;
    }

    /// Select `tag` if it is not selected, deselect it otherwise.
    pub fn toggle_tag(&mut self, tag: &str) {
        if !self.tags.remove(tag) {
            self.tags.insert(tag.to_string());
        }
    }

    /// Reset every criterion to its default in one step.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Returns `true` when no criterion restricts the list.
    pub fn is_unfiltered(&self) -> bool {
        self.search_term.is_empty()
            && self.category_id.is_none()
            && self.status.is_none()
            && self.tags.is_empty()
    }

    fn matches(&self, product: &Product, search_lower: &str) -> bool {
        (search_lower.is_empty() || product.title.to_lowercase().contains(search_lower))
            && self
                .category_id
                .as_ref()
                .is_none_or(|id| product.in_category(id))
            && self.status.is_none_or(|status| product.status == status)
            && self.tags.iter().all(|tag| product.has_tag(tag))
    }
}

/// Milliseconds since the epoch; products without a timestamp count as epoch.
fn created_key(product: &Product) -> i64 {
    product
        .created_at
        .map(|created| created.timestamp_millis())
        .unwrap_or(0)
}

/// Root-locale collator at tertiary strength: accents are secondary to the
/// base letter and lowercase sorts before uppercase on case-only differences.
fn title_collator() -> Option<CollatorBorrowed<'static>> {
    let mut options = CollatorOptions::default();
    options.strength = Some(Strength::Tertiary);
    match Collator::try_new(CollatorPreferences::default(), options) {
        Ok(collator) => Some(collator),
        Err(e) => {
            log::warn!("Title collator unavailable, falling back to case-folded order: {e}");
            None
        }
    }
}

fn compare_titles(collator: Option<&CollatorBorrowed<'_>>, a: &str, b: &str) -> Ordering {
    match collator {
        Some(collator) => collator.compare(a, b),
        None => a.to_lowercase().cmp(&b.to_lowercase()).then_with(|| b.cmp(a)),
    }
}

/// Filter and order `products` according to `spec`.
///
/// The input is left untouched; the returned vector is newly allocated.
/// Sorting is stable, so ties keep their relative order from `products`.
pub fn apply(products: &[Product], spec: &FilterSpec) -> Vec<Product> {
    let mut items: Vec<Product> = if spec.is_unfiltered() {
        products.to_vec()
    } else {
        let search_lower = spec.search_term.to_lowercase();
        products
            .iter()
            .filter(|product| spec.matches(product, &search_lower))
            .cloned()
            .collect()
    };

    match spec.sort_order {
        SortOrder::Newest => items.sort_by(|a, b| created_key(b).cmp(&created_key(a))),
        SortOrder::Oldest => items.sort_by_key(created_key),
        SortOrder::Alphabetical => {
            let collator = title_collator();
            items.sort_by(|a, b| compare_titles(collator.as_ref(), &a.title, &b.title));
        }
    }

    items
}

/// Every tag used by at least one product, without duplicates.
pub fn available_tags(products: &[Product]) -> BTreeSet<String> {
    products
        .iter()
        .flat_map(|product| product.tags.iter().map(|tag| tag.as_str().to_string()))
        .collect()
}

/// Other products sharing at least one category with `product`, in list order.
pub fn related_products<'a>(
    products: &'a [Product],
    product: &Product,
    limit: usize,
) -> Vec<&'a Product> {
    products
        .iter()
        .filter(|other| other.id != product.id && other.shares_category_with(product))
        .take(limit)
        .collect()
}

/// Categories referenced by `ids`, in `ids` order. Dangling ids are skipped.
pub fn resolve_categories<'a>(categories: &'a [Category], ids: &[CategoryId]) -> Vec<&'a Category> {
    ids.iter()
        .filter_map(|id| categories.iter().find(|category| &category.id == id))
        .collect()
}

/// Posts other than `id`, in list order.
pub fn related_posts<'a>(posts: &'a [BlogPost], id: &BlogPostId, limit: usize) -> Vec<&'a BlogPost> {
    posts
        .iter()
        .filter(|post| &post.id != id)
        .take(limit)
        .collect()
}
