//! One-shot loading of a whole ordered collection.

use crate::domain::types::{OrderDirection, TypeConstraintError};
use crate::models::document::{CREATED_AT_FIELD, Document};
use crate::repository::{CollectionQuery, DocumentStore};

use super::FetchError;

/// Inputs of a collection fetch. A fetcher re-runs only when these change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchParams {
    pub collection: String,
    pub order_field: String,
    pub direction: OrderDirection,
}

impl FetchParams {
    pub fn new(
        collection: impl Into<String>,
        order_field: impl Into<String>,
        direction: OrderDirection,
    ) -> Self {
        Self {
            collection: collection.into(),
            order_field: order_field.into(),
            direction,
        }
    }

    /// Most recently created documents first.
    pub fn newest_first(collection: impl Into<String>) -> Self {
        Self::new(collection, CREATED_AT_FIELD, OrderDirection::Descending)
    }

    /// Store query for these parameters; no result limit.
    pub fn query(&self) -> CollectionQuery {
        CollectionQuery::new(self.collection.as_str())
            .order_by(self.order_field.as_str(), self.direction)
    }
}

/// `{data, loading, error}` triple of one collection.
#[derive(Debug, Clone, PartialEq)]
pub struct CollectionState<T> {
    pub data: Vec<T>,
    pub loading: bool,
    pub error: Option<FetchError>,
}

impl<T> CollectionState<T> {
    /// State while a fetch is in flight.
    pub fn loading() -> Self {
        Self {
            data: Vec::new(),
            loading: true,
            error: None,
        }
    }

    /// Settled state for a finished fetch. Failures leave `data` empty.
    pub fn settled(result: Result<Vec<T>, FetchError>) -> Self {
        match result {
            Ok(data) => Self {
                data,
                loading: false,
                error: None,
            },
            Err(error) => Self {
                data: Vec::new(),
                loading: false,
                error: Some(error),
            },
        }
    }

    pub fn is_settled(&self) -> bool {
        !self.loading
    }

    /// Message to show in place of the data, if the fetch failed.
    pub fn error_message(&self) -> Option<&str> {
        self.error.as_ref().map(|e| e.message.as_str())
    }
}

impl<T> Default for CollectionState<T> {
    fn default() -> Self {
        Self::loading()
    }
}

/// Convert documents into entities, skipping those that fail validation.
pub(crate) fn normalize_documents<T>(documents: Vec<Document>, scope: &str) -> Vec<T>
where
    T: TryFrom<Document, Error = TypeConstraintError>,
{
    documents
        .into_iter()
        .filter_map(|doc| {
            let id = doc.id.clone();
            match T::try_from(doc) {
                Ok(item) => Some(item),
                Err(e) => {
                    log::warn!("Skipping {scope} document '{id}': {e}");
                    None
                }
            }
        })
        .collect()
}

/// Run the query for `params` and normalize the results.
///
/// Errors are logged here; callers only see the scoped [`FetchError`].
pub async fn fetch_collection<T, S>(store: &S, params: &FetchParams) -> Result<Vec<T>, FetchError>
where
    S: DocumentStore + ?Sized,
    T: TryFrom<Document, Error = TypeConstraintError>,
{
    match store.run_query(&params.query()).await {
        Ok(documents) => Ok(normalize_documents(documents, &params.collection)),
        Err(e) => {
            log::error!("Error fetching {}: {e}", params.collection);
            Err(FetchError::collection(&params.collection, e))
        }
    }
}

/// Fetch a collection and return its settled state.
pub async fn load_collection<T, S>(store: &S, params: &FetchParams) -> CollectionState<T>
where
    S: DocumentStore + ?Sized,
    T: TryFrom<Document, Error = TypeConstraintError>,
{
    CollectionState::settled(fetch_collection(store, params).await)
}

/// Owner of one collection's state across parameter changes.
#[derive(Debug)]
pub struct CollectionFetcher<T> {
    state: CollectionState<T>,
    settled_for: Option<FetchParams>,
}

impl<T> Default for CollectionFetcher<T> {
    fn default() -> Self {
        Self {
            state: CollectionState::loading(),
            settled_for: None,
        }
    }
}

impl<T> CollectionFetcher<T>
where
    T: TryFrom<Document, Error = TypeConstraintError>,
{
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &CollectionState<T> {
        &self.state
    }

    pub fn into_state(self) -> CollectionState<T> {
        self.state
    }

    /// Returns `true` unless the current state already settled for `params`.
    pub fn needs_fetch(&self, params: &FetchParams) -> bool {
        self.settled_for.as_ref() != Some(params)
    }

    /// Fetch when `params` differ from the last settled fetch; otherwise keep
    /// the current state.
    pub async fn refresh<S>(&mut self, store: &S, params: &FetchParams) -> &CollectionState<T>
    where
        S: DocumentStore + ?Sized,
    {
        if self.needs_fetch(params) {
            self.reload(store, params).await
        } else {
            &self.state
        }
    }

    /// Fetch from scratch regardless of previous state.
    pub async fn reload<S>(&mut self, store: &S, params: &FetchParams) -> &CollectionState<T>
    where
        S: DocumentStore + ?Sized,
    {
        self.state = CollectionState::loading();
        self.settled_for = None;
        let result = fetch_collection(store, params).await;
        self.state = CollectionState::settled(result);
        self.settled_for = Some(params.clone());
        &self.state
    }
}
