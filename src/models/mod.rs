//! Store-facing representations and their conversion into domain entities.

pub mod blog_post;
pub mod category;
#[cfg(feature = "client")]
pub mod config;
pub mod document;
pub mod product;
#[cfg(feature = "client")]
pub mod query;
