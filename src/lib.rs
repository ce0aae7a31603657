//! Read-only data core of a handmade-goods storefront.
//!
//! Products, categories and blog posts are read from a remote document
//! store, normalized into typed entities and exposed as independent
//! `{data, loading, error}` states. The product catalog view is derived from
//! the fetched list by a pure filter/sort pass.

#[cfg(feature = "data")]
pub mod domain;
#[cfg(feature = "data")]
pub mod forms;
#[cfg(feature = "data")]
pub mod models;
#[cfg(feature = "client")]
pub mod repository;
#[cfg(feature = "data")]
pub mod services;
