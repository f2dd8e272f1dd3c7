//! Fetch-cache-and-status primitives shared by every store.
//!
//! - [`Identifier`] / [`CacheKey`] normalize caller identifiers
//! - [`EntityCache`] holds immutable records under their id and name keys
//! - [`ListCache`] holds list pages under canonical parameter keys
//! - [`StatusTracker`] records load / error / freshness per key

mod entity;
mod error;
mod identifier;
mod list;
mod status;
mod traits;

pub use entity::EntityCache;
pub use error::FetchError;
pub use identifier::{status_key, CacheKey, Identifier};
pub use list::{ListCache, ListQuery, ListResult};
pub use status::{StatusChange, StatusRecord, StatusTracker};
pub use traits::Cacheable;
