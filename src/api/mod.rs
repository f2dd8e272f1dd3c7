//! PokeAPI access: the HTTP transport, response types and typed endpoint calls.

mod client;
mod error;
#[cfg(test)]
pub(crate) mod mock;
mod transport;
pub mod types;

pub use client::{ApiClient, ListParams};
pub use error::ApiError;
pub use transport::{HttpTransport, Transport, DEFAULT_BASE_URL};
