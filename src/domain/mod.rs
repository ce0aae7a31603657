//! Typed entities read from the storefront's document store.

pub mod blog_post;
pub mod category;
pub mod product;
pub mod types;
