use thiserror::Error;

use crate::repository::RepositoryError;

/// Failure of one fetch, kept in that fetch's state for the presentation
/// layer to display.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct FetchError {
    /// What failed: a collection name or `featured product`.
    pub scope: String,
    /// Human-readable message shown to visitors.
    pub message: String,
    #[source]
    pub cause: RepositoryError,
}

impl FetchError {
    /// Error for a failed collection load, e.g. `Failed to load products.`
    pub fn collection(collection: &str, cause: RepositoryError) -> Self {
        Self {
            scope: collection.to_string(),
            message: format!("Failed to load {collection}."),
            cause,
        }
    }

    /// Error for a failed featured product lookup.
    pub fn featured(cause: RepositoryError) -> Self {
        Self {
            scope: "featured product".to_string(),
            message: "Could not load the featured product.".to_string(),
            cause,
        }
    }
}
