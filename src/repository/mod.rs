use async_trait::async_trait;

use crate::domain::types::OrderDirection;
use crate::models::document::{Document, Value};

pub mod errors;
pub mod firestore;

pub use errors::{RepositoryError, RepositoryResult};
pub use firestore::FirestoreRepository;

/// Store-side ordering clause.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderBy {
    pub field: String,
    pub direction: OrderDirection,
}

/// Store-side equality filter.
#[derive(Debug, Clone, PartialEq)]
pub struct EqualityFilter {
    pub field: String,
    pub value: Value,
}

/// Query parameters for reading one collection.
///
/// Without a limit the whole collection is returned.
#[derive(Debug, Clone, PartialEq)]
pub struct CollectionQuery {
    /// Collection name, e.g. `products`.
    pub collection: String,
    pub order_by: Option<OrderBy>,
    pub filter: Option<EqualityFilter>,
    pub limit: Option<u32>,
}

impl CollectionQuery {
    pub fn new(collection: impl Into<String>) -> Self {
        Self {
            collection: collection.into(),
            order_by: None,
            filter: None,
            limit: None,
        }
    }
    pub fn order_by(mut self, field: impl Into<String>, direction: OrderDirection) -> Self {
        self.order_by = Some(OrderBy {
            field: field.into(),
            direction,
        });
        self
    }
    pub fn where_eq(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.filter = Some(EqualityFilter {
            field: field.into(),
            value: value.into(),
        });
        self
    }
    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }
}

/// Read-only access to a remote document database.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Run a single query and return the matching documents in store order.
    async fn run_query(&self, query: &CollectionQuery) -> RepositoryResult<Vec<Document>>;
}
