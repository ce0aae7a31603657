//! Lookup of the single product highlighted on the home page.

use crate::domain::product::Product;
use crate::models::product::{IS_FEATURED_FIELD, PRODUCTS_COLLECTION};
use crate::repository::{CollectionQuery, DocumentStore};

use super::FetchError;
use super::fetch::normalize_documents;

/// `{item, loading, error}` triple of the featured product.
///
/// `item == None` on a settled state without error means the shop has no
/// featured product, which is a valid outcome.
#[derive(Debug, Clone, PartialEq)]
pub struct FeaturedState {
    pub item: Option<Product>,
    pub loading: bool,
    pub error: Option<FetchError>,
}

impl FeaturedState {
    pub fn loading() -> Self {
        Self {
            item: None,
            loading: true,
            error: None,
        }
    }

    pub fn settled(result: Result<Option<Product>, FetchError>) -> Self {
        match result {
            Ok(item) => Self {
                item,
                loading: false,
                error: None,
            },
            Err(error) => Self {
                item: None,
                loading: false,
                error: Some(error),
            },
        }
    }

    pub fn is_settled(&self) -> bool {
        !self.loading
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error.as_ref().map(|e| e.message.as_str())
    }
}

impl Default for FeaturedState {
    fn default() -> Self {
        Self::loading()
    }
}

/// Products flagged as featured, at most one. If several carry the flag the
/// store decides which one is returned.
pub fn featured_query() -> CollectionQuery {
    CollectionQuery::new(PRODUCTS_COLLECTION)
        .where_eq(IS_FEATURED_FIELD, true)
        .limit(1)
}

pub async fn fetch_featured<S>(store: &S) -> Result<Option<Product>, FetchError>
where
    S: DocumentStore + ?Sized,
{
    match store.run_query(&featured_query()).await {
        Ok(documents) => Ok(normalize_documents(documents, "featured product")
            .into_iter()
            .next()),
        Err(e) => {
            log::error!("Error fetching featured product: {e}");
            Err(FetchError::featured(e))
        }
    }
}

pub async fn load_featured<S>(store: &S) -> FeaturedState
where
    S: DocumentStore + ?Sized,
{
    FeaturedState::settled(fetch_featured(store).await)
}

/// Owner of the featured state; fetches once for its whole lifetime.
#[derive(Debug, Default)]
pub struct FeaturedFetcher {
    state: FeaturedState,
}

impl FeaturedFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &FeaturedState {
        &self.state
    }

    /// Fetch on the first call; later calls return the settled state.
    pub async fn load<S>(&mut self, store: &S) -> &FeaturedState
    where
        S: DocumentStore + ?Sized,
    {
        if self.state.loading {
            self.state = load_featured(store).await;
        }
        &self.state
    }
}
