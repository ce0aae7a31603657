use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::domain::types::{CategoryId, TypeConstraintError};
use crate::services::catalog::FilterSpec;

/// Query parameter carrying the preselected category.
pub const CATEGORY_PARAM: &str = "category";

/// Raw query parameters of the catalog page, e.g. `?category=toys`.
#[derive(Debug, Default, Validate)]
pub struct CatalogQueryForm {
    /// Store document ids are at most 1500 bytes long.
    #[validate(length(max = 1500))]
    pub category: Option<String>,
}

impl CatalogQueryForm {
    /// Parse a URL query string. A leading `?` is accepted, values are
    /// percent-decoded and the first occurrence of a parameter wins.
    pub fn parse(query: &str) -> Self {
        let mut form = Self::default();
        let query = query.strip_prefix('?').unwrap_or(query);
        for pair in query.split('&').filter(|pair| !pair.is_empty()) {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            if key != CATEGORY_PARAM || form.category.is_some() {
                continue;
            }
            match urlencoding::decode(&value.replace('+', " ")) {
                Ok(decoded) => form.category = Some(decoded.into_owned()),
                Err(e) => log::warn!("Ignoring undecodable {key} parameter: {e}"),
            }
        }
        form
    }
}

/// Validated catalog query parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogQueryPayload {
    pub category_id: Option<CategoryId>,
}

impl CatalogQueryPayload {
    /// Initial filter state: the preselected category, everything else default.
    pub fn into_filter_spec(self) -> FilterSpec {
        FilterSpec {
            category_id: self.category_id,
            ..FilterSpec::default()
        }
    }
}

#[derive(Debug, Error)]
pub enum CatalogQueryFormError {
    #[error("Catalog query validation failed: {0}")]
    Validation(String),
    #[error("Catalog query contains invalid data: {0}")]
    TypeConstraint(String),
}

impl From<ValidationErrors> for CatalogQueryFormError {
    fn from(value: ValidationErrors) -> Self {
        Self::Validation(value.to_string())
    }
}

impl From<TypeConstraintError> for CatalogQueryFormError {
    fn from(value: TypeConstraintError) -> Self {
        Self::TypeConstraint(value.to_string())
    }
}

impl TryFrom<CatalogQueryForm> for CatalogQueryPayload {
    type Error = CatalogQueryFormError;

    fn try_from(value: CatalogQueryForm) -> Result<Self, Self::Error> {
        value.validate()?;
        let category_id = match value.category {
            Some(raw) if !raw.is_empty() => Some(CategoryId::new(raw)?),
            _ => None,
        };
        Ok(Self { category_id })
    }
}

/// Initial [`FilterSpec`] for a catalog URL query string. Invalid input is
/// logged and yields the unfiltered default.
pub fn initial_filter(query: &str) -> FilterSpec {
    match CatalogQueryPayload::try_from(CatalogQueryForm::parse(query)) {
        Ok(payload) => payload.into_filter_spec(),
        Err(e) => {
            log::warn!("{e}");
            FilterSpec::default()
        }
    }
}
