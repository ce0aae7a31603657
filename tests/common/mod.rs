//! Helpers for integration tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use handmade_storefront::models::document::Document;
use handmade_storefront::models::query::RunQueryResponseItem;
use handmade_storefront::repository::firestore::documents_from_rows;
use handmade_storefront::repository::{
    CollectionQuery, DocumentStore, RepositoryError, RepositoryResult,
};
use serde_json::{Value as Json, json};

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Document store serving canned `runQuery` responses per collection.
///
/// Fixtures are written in the order the store would return them, so the
/// ordering clause of a query is not re-applied.
#[derive(Default)]
pub struct FixtureStore {
    responses: HashMap<String, Vec<Document>>,
    unavailable: Vec<String>,
    queries: AtomicUsize,
}

impl FixtureStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a collection from a `runQuery` response body.
    pub fn with_response(mut self, collection: &str, body: Json) -> Self {
        let rows: Vec<RunQueryResponseItem> =
            serde_json::from_value(body).expect("fixture should match the wire format");
        self.responses
            .insert(collection.to_string(), documents_from_rows(rows));
        self
    }

    pub fn unavailable(mut self, collection: &str) -> Self {
        self.unavailable.push(collection.to_string());
        self
    }

    pub fn query_count(&self) -> usize {
        self.queries.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl DocumentStore for FixtureStore {
    async fn run_query(&self, query: &CollectionQuery) -> RepositoryResult<Vec<Document>> {
        self.queries.fetch_add(1, Ordering::SeqCst);
        if self.unavailable.contains(&query.collection) {
            return Err(RepositoryError::Status {
                code: 403,
                body: "Missing or insufficient permissions.".into(),
            });
        }

        let mut docs = self
            .responses
            .get(&query.collection)
            .cloned()
            .unwrap_or_default();
        if let Some(filter) = &query.filter {
            docs.retain(|d| d.get(&filter.field) == Some(&filter.value));
        }
        if let Some(limit) = query.limit {
            docs.truncate(limit as usize);
        }
        Ok(docs)
    }
}

fn row(collection: &str, id: &str, fields: Json) -> Json {
    json!({
        "document": {
            "name": format!("projects/shop/databases/(default)/documents/{collection}/{id}"),
            "fields": fields,
            "createTime": "2024-01-01T00:00:00Z",
            "updateTime": "2024-01-01T00:00:00Z"
        },
        "readTime": "2024-06-01T00:00:00Z"
    })
}

/// Products in descending `createdAt` order, as the store returns them.
pub fn products_response() -> Json {
    json!([
        row("products", "scarf", json!({
            "title": { "stringValue": "Rainbow Scarf" },
            "description": { "stringValue": "Long and warm" },
            "status": { "stringValue": "Available" },
            "categoryIds": { "arrayValue": { "values": [{ "stringValue": "wear" }] } },
            "tags": { "arrayValue": { "values": [
                { "stringValue": "winter" }, { "stringValue": "gift" }
            ] } },
            "mediaUrls": { "arrayValue": { "values": [
                { "stringValue": "https://cdn.example.com/scarf.jpg" }
            ] } },
            "mediaType": { "stringValue": "image" },
            "isFeatured": { "booleanValue": true },
            "createdAt": { "timestampValue": "2024-05-03T09:00:00Z" }
        })),
        row("products", "octopus", json!({
            "title": { "stringValue": "amigurumi octopus" },
            "status": { "stringValue": "Made to Order" },
            "categoryIds": { "arrayValue": { "values": [
                { "stringValue": "toys" }, { "stringValue": "deleted-category" }
            ] } },
            "tags": { "arrayValue": { "values": [{ "stringValue": "gift" }] } },
            "createdAt": { "timestampValue": "2024-04-20T09:00:00Z" }
        })),
        row("products", "blanket", json!({
            "title": { "stringValue": "Baby Blanket" },
            "status": { "stringValue": "Out of Stock" },
            "categoryIds": { "arrayValue": { "values": [{ "stringValue": "wear" }] } },
            "tags": { "arrayValue": {} },
            "createdAt": { "timestampValue": "2024-03-01T09:00:00Z" }
        })),
        { "readTime": "2024-06-01T00:00:00Z" }
    ])
}

/// Categories in ascending `order`.
pub fn categories_response() -> Json {
    json!([
        row("categories", "toys", json!({
            "name": { "stringValue": "Toys" },
            "iconUrl": { "stringValue": "🧸" },
            "order": { "integerValue": "1" }
        })),
        row("categories", "wear", json!({
            "name": { "stringValue": "Wearables" },
            "order": { "integerValue": "2" }
        }))
    ])
}

pub fn blog_posts_response() -> Json {
    json!([
        row("blogPosts", "dyeing", json!({
            "title": { "stringValue": "Dyeing yarn at home" },
            "content": { "stringValue": "## Materials\n- yarn" },
            "coverImageUrl": { "stringValue": "https://cdn.example.com/dye.jpg" },
            "createdAt": { "timestampValue": "2024-05-10T09:00:00Z" }
        }))
    ])
}
