//! All data regions of the storefront, loaded side by side.
//!
//! Each region keeps its own state, so a failed blog fetch still lets the
//! catalog render, and vice versa.

use std::collections::BTreeSet;

use crate::domain::blog_post::BlogPost;
use crate::domain::category::Category;
use crate::domain::product::Product;
use crate::domain::types::OrderDirection;
use crate::models::blog_post::BLOG_POSTS_COLLECTION;
use crate::models::category::{CATEGORIES_COLLECTION, ORDER_FIELD};
use crate::models::product::PRODUCTS_COLLECTION;
use crate::repository::DocumentStore;
use crate::services::catalog::{
    self, FilterSpec, RELATED_POSTS_LIMIT, RELATED_PRODUCTS_LIMIT,
};

use super::FetchError;
use super::featured::{FeaturedFetcher, FeaturedState};
use super::fetch::{CollectionFetcher, CollectionState, FetchParams};

/// Result of looking an item up in a fetched collection.
#[derive(Debug, PartialEq)]
pub enum Lookup<'a, T> {
    /// The owning collection has not settled yet.
    Loading,
    /// The owning collection failed to load.
    Failed(&'a FetchError),
    NotFound,
    Found(T),
}

/// A product together with what its detail page shows next to it.
#[derive(Debug, PartialEq)]
pub struct ProductDetail<'a> {
    pub product: &'a Product,
    /// Resolved categories; dangling ids are left out.
    pub categories: Vec<&'a Category>,
    pub related: Vec<&'a Product>,
}

#[derive(Debug, PartialEq)]
pub struct BlogPostDetail<'a> {
    pub post: &'a BlogPost,
    pub related: Vec<&'a BlogPost>,
}

/// Categories in display order.
pub fn categories_params() -> FetchParams {
    FetchParams::new(CATEGORIES_COLLECTION, ORDER_FIELD, OrderDirection::Ascending)
}

pub fn products_params() -> FetchParams {
    FetchParams::newest_first(PRODUCTS_COLLECTION)
}

pub fn blog_posts_params() -> FetchParams {
    FetchParams::newest_first(BLOG_POSTS_COLLECTION)
}

/// Fetch states of every region, owned by whoever renders them.
#[derive(Debug, Default)]
pub struct Storefront {
    categories: CollectionFetcher<Category>,
    products: CollectionFetcher<Product>,
    blog_posts: CollectionFetcher<BlogPost>,
    featured: FeaturedFetcher,
}

impl Storefront {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run all region fetches concurrently. Regions that already settled
    /// are not fetched again.
    pub async fn load<S>(&mut self, store: &S)
    where
        S: DocumentStore + ?Sized,
    {
        let (categories_params, products_params, blog_posts_params) =
            (categories_params(), products_params(), blog_posts_params());
        let Self {
            categories,
            products,
            blog_posts,
            featured,
        } = self;

        tokio::join!(
            categories.refresh(store, &categories_params),
            products.refresh(store, &products_params),
            blog_posts.refresh(store, &blog_posts_params),
            featured.load(store),
        );

        log::debug!(
            "Storefront loaded: {} categories, {} products, {} posts",
            categories.state().data.len(),
            products.state().data.len(),
            blog_posts.state().data.len()
        );
    }

    pub fn categories(&self) -> &CollectionState<Category> {
        self.categories.state()
    }

    pub fn products(&self) -> &CollectionState<Product> {
        self.products.state()
    }

    pub fn blog_posts(&self) -> &CollectionState<BlogPost> {
        self.blog_posts.state()
    }

    pub fn featured(&self) -> &FeaturedState {
        self.featured.state()
    }

    /// Product list filtered and ordered by `spec`.
    pub fn catalog(&self, spec: &FilterSpec) -> Vec<Product> {
        catalog::apply(&self.products().data, spec)
    }

    /// Tag choices offered by the catalog filter.
    pub fn available_tags(&self) -> BTreeSet<String> {
        catalog::available_tags(&self.products().data)
    }

    pub fn product_detail(&self, id: &str) -> Lookup<'_, ProductDetail<'_>> {
        let products = self.products();
        if products.loading {
            return Lookup::Loading;
        }
        if let Some(error) = &products.error {
            return Lookup::Failed(error);
        }
        let Some(product) = products.data.iter().find(|p| p.id.as_str() == id) else {
            return Lookup::NotFound;
        };

        Lookup::Found(ProductDetail {
            product,
            categories: catalog::resolve_categories(
                &self.categories().data,
                &product.category_ids,
            ),
            related: catalog::related_products(&products.data, product, RELATED_PRODUCTS_LIMIT),
        })
    }

    pub fn blog_post_detail(&self, id: &str) -> Lookup<'_, BlogPostDetail<'_>> {
        let posts = self.blog_posts();
        if posts.loading {
            return Lookup::Loading;
        }
        if let Some(error) = &posts.error {
            return Lookup::Failed(error);
        }
        let Some(post) = posts.data.iter().find(|p| p.id.as_str() == id) else {
            return Lookup::NotFound;
        };

        Lookup::Found(BlogPostDetail {
            post,
            related: catalog::related_posts(&posts.data, &post.id, RELATED_POSTS_LIMIT),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::document::Document;
    use crate::repository::test::TestStore;
    use chrono::{TimeZone, Utc};

    fn day(d: u32) -> chrono::DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 2, d, 0, 0, 0).unwrap()
    }

    fn store() -> TestStore {
        TestStore::new()
            .with_collection(
                "categories",
                vec![Document::new("toys").with("name", "Toys").with("order", 1_i64)],
            )
            .with_collection(
                "products",
                vec![
                    Document::new("p1")
                        .with("title", "Bear")
                        .with("categoryIds", vec!["toys", "missing"])
                        .with("tags", vec!["soft"])
                        .with("createdAt", day(1)),
                    Document::new("p2")
                        .with("title", "Bunny")
                        .with("categoryIds", vec!["toys"])
                        .with("tags", vec!["soft", "gift"])
                        .with("isFeatured", true)
                        .with("createdAt", day(2)),
                ],
            )
            .failing("blogPosts")
    }

    #[tokio::test]
    async fn failing_region_does_not_affect_siblings() {
        let store = store();
        let mut storefront = Storefront::new();
        storefront.load(&store).await;

        assert_eq!(storefront.products().data.len(), 2);
        assert_eq!(storefront.products().error, None);
        assert_eq!(storefront.categories().data.len(), 1);
        assert_eq!(storefront.featured().item.as_ref().unwrap().id, "p2");
        assert!(storefront.blog_posts().data.is_empty());
        assert_eq!(
            storefront.blog_posts().error_message(),
            Some("Failed to load blogPosts.")
        );
        assert_eq!(store.issued_queries().len(), 4);
    }

    #[tokio::test]
    async fn product_detail_resolves_categories_and_related() {
        let mut storefront = Storefront::new();
        assert_eq!(storefront.product_detail("p1"), Lookup::Loading);

        storefront.load(&store()).await;

        let Lookup::Found(detail) = storefront.product_detail("p1") else {
            panic!("expected product p1");
        };
        assert_eq!(detail.product.title, "Bear");
        assert_eq!(detail.categories.len(), 1);
        assert_eq!(detail.related.len(), 1);
        assert_eq!(detail.related[0].id, "p2");
        assert_eq!(storefront.product_detail("nope"), Lookup::NotFound);
    }

    #[tokio::test]
    async fn blog_detail_reports_region_failure() {
        let mut storefront = Storefront::new();
        storefront.load(&store()).await;

        let Lookup::Failed(error) = storefront.blog_post_detail("b1") else {
            panic!("expected failure");
        };
        assert_eq!(error.scope, "blogPosts");
    }

    #[tokio::test]
    async fn catalog_and_tags_derive_from_loaded_products() {
        let mut storefront = Storefront::new();
        storefront.load(&store()).await;

        let mut spec = FilterSpec::default();
        spec.toggle_tag("gift");
        let view = storefront.catalog(&spec);
        assert_eq!(view.len(), 1);
        assert_eq!(view[0].id, "p2");

        let tags: Vec<String> = storefront.available_tags().into_iter().collect();
        assert_eq!(tags, vec!["gift", "soft"]);
    }
}
