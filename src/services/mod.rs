pub mod catalog;
#[cfg(feature = "client")]
pub mod errors;
#[cfg(feature = "client")]
pub mod featured;
#[cfg(feature = "client")]
pub mod fetch;
#[cfg(feature = "client")]
pub mod storefront;

#[cfg(feature = "client")]
pub use errors::FetchError;
