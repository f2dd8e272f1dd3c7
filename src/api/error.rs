use thiserror::Error;

/// Errors raised by the transport and the typed endpoint layer.
#[derive(Debug, Error)]
pub enum ApiError {
  /// The service answered with a non-success status.
  #[error("{message}")]
  Status {
    status: u16,
    status_text: String,
    url: String,
    /// `detail` from the JSON error body, else the status text
    message: String,
  },

  #[error("request to {url} failed: {source}")]
  Request {
    url: String,
    #[source]
    source: reqwest::Error,
  },

  #[error("failed to decode response from {url}: {source}")]
  Decode {
    url: String,
    #[source]
    source: serde_json::Error,
  },

  #[error("invalid request URL {url}: {source}")]
  InvalidUrl {
    url: String,
    #[source]
    source: url::ParseError,
  },
}

impl ApiError {
  /// Human message carried by an HTTP status error.
  ///
  /// Returns `None` for every other failure so callers can substitute their own wording.
  pub fn status_message(&self) -> Option<&str> {
    match self {
      ApiError::Status { message, .. } => Some(message),
      _ => None,
    }
  }

  /// HTTP status code, if the service answered at all.
  pub fn status(&self) -> Option<u16> {
    match self {
      ApiError::Status { status, .. } => Some(*status),
      _ => None,
    }
  }
}
