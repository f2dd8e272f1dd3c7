//! Fetch, cache and status layer for the PokeAPI reference catalog, with durable
//! favorites, team and UI preferences.

pub mod api;
pub mod cache;
pub mod config;
pub mod logging;
pub mod media;
pub mod session;
pub mod storage;
pub mod stores;
