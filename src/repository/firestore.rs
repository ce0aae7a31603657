use async_trait::async_trait;

use crate::models::config::StoreConfig;
use crate::models::document::Document;
use crate::models::query::{
    CollectionSelector, FieldFilter, FieldReference, Filter, Order, RunQueryRequest,
    RunQueryResponseItem, StructuredQuery,
};
use crate::repository::{CollectionQuery, DocumentStore, RepositoryError, RepositoryResult};

/// [`DocumentStore`] talking to the Firestore REST API.
///
/// The underlying `reqwest::Client` is cheap to clone, so the repository can
/// be shared between fetchers freely.
#[derive(Clone)]
pub struct FirestoreRepository {
    client: reqwest::Client,
    config: StoreConfig,
}

impl FirestoreRepository {
    pub fn new(config: StoreConfig) -> RepositoryResult<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("handmade-storefront/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| RepositoryError::Config(format!("failed to build HTTP client: {e}")))?;
        Ok(Self { client, config })
    }

    /// Build a repository from `FIREBASE_*` environment variables.
    pub fn from_env() -> RepositoryResult<Self> {
        Self::new(StoreConfig::from_env()?)
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }
}

/// Translate a [`CollectionQuery`] into the `runQuery` request body.
pub fn request_body(query: &CollectionQuery) -> RunQueryRequest {
    RunQueryRequest {
        structured_query: StructuredQuery {
            from: vec![CollectionSelector {
                collection_id: query.collection.clone(),
            }],
            filter: query.filter.as_ref().map(|filter| Filter {
                field_filter: FieldFilter {
                    field: FieldReference {
                        field_path: filter.field.clone(),
                    },
                    op: "EQUAL",
                    value: filter.value.clone(),
                },
            }),
            order_by: query
                .order_by
                .iter()
                .map(|order| Order {
                    field: FieldReference {
                        field_path: order.field.clone(),
                    },
                    direction: order.direction,
                })
                .collect(),
            limit: query.limit,
        },
    }
}

/// Collect the documents of a `runQuery` response, skipping read-time rows.
pub fn documents_from_rows(rows: Vec<RunQueryResponseItem>) -> Vec<Document> {
    rows.into_iter()
        .filter_map(|row| row.document)
        .map(Document::from)
        .collect()
}

#[async_trait]
impl DocumentStore for FirestoreRepository {
    async fn run_query(&self, query: &CollectionQuery) -> RepositoryResult<Vec<Document>> {
        log::debug!(
            "Querying collection '{}' (order: {:?}, filter: {:?}, limit: {:?})",
            query.collection,
            query.order_by,
            query.filter,
            query.limit
        );

        let mut request = self
            .client
            .post(self.config.run_query_url())
            .json(&request_body(query));
        if let Some(api_key) = &self.config.api_key {
            request = request.query(&[("key", api_key)]);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(RepositoryError::Status {
                code: status.as_u16(),
                body,
            });
        }

        let rows: Vec<RunQueryResponseItem> = response
            .json()
            .await
            .map_err(|e| RepositoryError::Decode(e.to_string()))?;

        Ok(documents_from_rows(rows))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::OrderDirection;
    use serde_json::json;

    #[test]
    fn ordered_collection_request_has_no_filter_or_limit() {
        let query = CollectionQuery::new("categories").order_by("order", OrderDirection::Ascending);
        let body = serde_json::to_value(request_body(&query)).unwrap();

        assert_eq!(
            body,
            json!({
                "structuredQuery": {
                    "from": [{ "collectionId": "categories" }],
                    "orderBy": [{
                        "field": { "fieldPath": "order" },
                        "direction": "ASCENDING"
                    }]
                }
            })
        );
    }

    #[test]
    fn featured_request_filters_and_limits() {
        let query = CollectionQuery::new("products")
            .where_eq("isFeatured", true)
            .limit(1);
        let body = serde_json::to_value(request_body(&query)).unwrap();

        assert_eq!(
            body,
            json!({
                "structuredQuery": {
                    "from": [{ "collectionId": "products" }],
                    "where": { "fieldFilter": {
                        "field": { "fieldPath": "isFeatured" },
                        "op": "EQUAL",
                        "value": { "booleanValue": true }
                    } },
                    "limit": 1
                }
            })
        );
    }

    #[test]
    fn skips_rows_without_documents() {
        let rows: Vec<RunQueryResponseItem> = serde_json::from_value(json!([
            {
                "document": {
                    "name": "projects/p/databases/(default)/documents/products/a",
                    "fields": { "title": { "stringValue": "A" } }
                },
                "readTime": "2024-06-01T00:00:00Z"
            },
            { "readTime": "2024-06-01T00:00:00Z" }
        ]))
        .unwrap();

        let docs = documents_from_rows(rows);
        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0].id, "a");
        assert_eq!(docs[0].string("title"), Some("A"));
    }

    #[tokio::test]
    async fn unreachable_store_reports_transport_error() {
        let mut config = StoreConfig::new("shop");
        config.base_url = "http://127.0.0.1:9/v1".into();
        let repo = FirestoreRepository::new(config).unwrap();

        let err = repo
            .run_query(&CollectionQuery::new("products"))
            .await
            .unwrap_err();
        assert!(matches!(err, RepositoryError::Transport(_)));
    }
}
