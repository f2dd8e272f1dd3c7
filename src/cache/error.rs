use thiserror::Error;

use crate::api::ApiError;

/// Errors returned by the store `ensure` / `fetch` operations.
#[derive(Debug, Error)]
pub enum FetchError {
  /// The transport failed; the original error is passed through untouched.
  #[error(transparent)]
  Api(#[from] ApiError),

  #[error("identifier must not be empty")]
  EmptyIdentifier,

  /// No numeric id could be resolved for an encounter lookup.
  #[error("Unable to resolve Pokémon id for encounters: {0}")]
  UnresolvedPokemon(String),
}

impl FetchError {
  /// Service-provided message of an HTTP status failure.
  pub fn status_message(&self) -> Option<&str> {
    match self {
      FetchError::Api(err) => err.status_message(),
      _ => None,
    }
  }
}
