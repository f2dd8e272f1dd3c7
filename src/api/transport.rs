use async_trait::async_trait;
use color_eyre::{eyre::eyre, Result};
use reqwest::header::ACCEPT;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

use super::error::ApiError;

/// Public PokeAPI v2 origin.
pub const DEFAULT_BASE_URL: &str = "https://pokeapi.co/api/v2";

/// Issues GET requests against the catalog service and returns parsed JSON.
///
/// Paths are resolved against the base origin; absolute `http(s)` URLs (pagination
/// links, encounter links embedded in fetched records) are passed through unchanged.
#[async_trait]
pub trait Transport: Send + Sync {
  async fn get_json(&self, path: &str) -> Result<Value, ApiError>;
}

/// reqwest-backed transport.
#[derive(Clone)]
pub struct HttpTransport {
  http: reqwest::Client,
  base_url: String,
}

impl HttpTransport {
  pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
    Url::parse(base_url).map_err(|e| eyre!("Invalid API base URL {}: {}", base_url, e))?;

    let http = reqwest::Client::builder()
      .timeout(timeout)
      .build()
      .map_err(|e| eyre!("Failed to create HTTP client: {}", e))?;

    Ok(Self {
      http,
      base_url: base_url.trim_end_matches('/').to_string(),
    })
  }

  fn build_url(&self, path: &str) -> Result<Url, ApiError> {
    let raw = if path.starts_with("http") {
      path.to_string()
    } else if path.starts_with('/') {
      format!("{}{}", self.base_url, path)
    } else {
      format!("{}/{}", self.base_url, path)
    };

    Url::parse(&raw).map_err(|source| ApiError::InvalidUrl { url: raw, source })
  }
}

#[async_trait]
impl Transport for HttpTransport {
  async fn get_json(&self, path: &str) -> Result<Value, ApiError> {
    let url = self.build_url(path)?;
    let url_text = url.to_string();
    debug!(url = %url_text, "GET");

    let response = self
      .http
      .get(url)
      .header(ACCEPT, "application/json")
      .send()
      .await
      .map_err(|source| ApiError::Request {
        url: url_text.clone(),
        source,
      })?;

    let status = response.status();
    let body = response.text().await.map_err(|source| ApiError::Request {
      url: url_text.clone(),
      source,
    })?;

    if !status.is_success() {
      let status_text = status.canonical_reason().unwrap_or_default().to_string();
      let message = error_detail(&body).unwrap_or_else(|| status_text.clone());
      debug!(url = %url_text, status = status.as_u16(), %message, "request failed");

      return Err(ApiError::Status {
        status: status.as_u16(),
        status_text,
        url: url_text,
        message,
      });
    }

    serde_json::from_str(&body).map_err(|source| ApiError::Decode {
      url: url_text,
      source,
    })
  }
}

/// Best-effort extraction of the `detail` field from an error body.
fn error_detail(body: &str) -> Option<String> {
  let parsed: Value = match serde_json::from_str(body) {
    Ok(value) => value,
    Err(e) => {
      warn!("Failed to parse error response body: {}", e);
      return None;
    }
  };

  match parsed.get("detail")? {
    Value::String(detail) => Some(detail.clone()),
    other => Some(other.to_string()),
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use httpmock::Method::GET;
  use httpmock::MockServer;
  use serde_json::json;
  use std::net::TcpListener;

  fn can_bind_localhost() -> bool {
    TcpListener::bind("127.0.0.1:0").is_ok()
  }

  fn transport_for(server: &MockServer) -> HttpTransport {
    HttpTransport::new(&server.url("/api/v2"), Duration::from_secs(5)).unwrap()
  }

  #[test]
  fn test_build_url_prefixes_base() {
    let transport = HttpTransport::new(DEFAULT_BASE_URL, Duration::from_secs(1)).unwrap();

    assert_eq!(
      transport.build_url("/pokemon/1").unwrap().as_str(),
      "https://pokeapi.co/api/v2/pokemon/1"
    );
    assert_eq!(
      transport.build_url("type/fire").unwrap().as_str(),
      "https://pokeapi.co/api/v2/type/fire"
    );
  }

  #[test]
  fn test_build_url_passes_absolute_urls_through() {
    let transport = HttpTransport::new(DEFAULT_BASE_URL, Duration::from_secs(1)).unwrap();
    let link = "https://pokeapi.co/api/v2/pokemon?offset=20&limit=20";

    assert_eq!(transport.build_url(link).unwrap().as_str(), link);
  }

  #[test]
  fn test_new_rejects_invalid_base() {
    assert!(HttpTransport::new("not a url", Duration::from_secs(1)).is_err());
  }

  #[test]
  fn test_error_detail() {
    assert_eq!(error_detail(r#"{"detail":"boom"}"#), Some("boom".to_string()));
    assert_eq!(error_detail(r#"{"detail":42}"#), Some("42".to_string()));
    assert_eq!(error_detail(r#"{"error":"x"}"#), None);
    assert_eq!(error_detail("Not Found"), None);
  }

  #[tokio::test]
  async fn test_get_json_success_sends_accept_header() {
    if !can_bind_localhost() {
      eprintln!("Skipping test: cannot bind localhost");
      return;
    }
    let server = MockServer::start_async().await;
    let mock = server
      .mock_async(|when, then| {
        when
          .method(GET)
          .path("/api/v2/pokemon/1")
          .header("accept", "application/json");
        then.status(200).json_body(json!({ "id": 1, "name": "bulbasaur" }));
      })
      .await;

    let value = transport_for(&server).get_json("/pokemon/1").await.unwrap();

    mock.assert_async().await;
    assert_eq!(value["name"], "bulbasaur");
  }

  #[tokio::test]
  async fn test_get_json_uses_detail_as_message() {
    if !can_bind_localhost() {
      eprintln!("Skipping test: cannot bind localhost");
      return;
    }
    let server = MockServer::start_async().await;
    server
      .mock_async(|when, then| {
        when.method(GET).path("/api/v2/pokemon/1");
        then.status(500).json_body(json!({ "detail": "boom" }));
      })
      .await;

    let err = transport_for(&server).get_json("/pokemon/1").await.unwrap_err();

    match err {
      ApiError::Status {
        status,
        status_text,
        url,
        message,
      } => {
        assert_eq!(status, 500);
        assert_eq!(status_text, "Internal Server Error");
        assert!(url.ends_with("/api/v2/pokemon/1"));
        assert_eq!(message, "boom");
      }
      other => panic!("unexpected error: {other:?}"),
    }
  }

  #[tokio::test]
  async fn test_get_json_falls_back_to_status_text() {
    if !can_bind_localhost() {
      eprintln!("Skipping test: cannot bind localhost");
      return;
    }
    let server = MockServer::start_async().await;
    server
      .mock_async(|when, then| {
        when.method(GET).path("/api/v2/pokemon/missingno");
        then.status(404).body("Not Found");
      })
      .await;

    let err = transport_for(&server)
      .get_json("/pokemon/missingno")
      .await
      .unwrap_err();

    assert_eq!(err.status(), Some(404));
    assert_eq!(err.status_message(), Some("Not Found"));
  }

  #[tokio::test]
  async fn test_get_json_reports_invalid_body() {
    if !can_bind_localhost() {
      eprintln!("Skipping test: cannot bind localhost");
      return;
    }
    let server = MockServer::start_async().await;
    server
      .mock_async(|when, then| {
        when.method(GET).path("/api/v2/pokemon/1");
        then.status(200).body("<html>");
      })
      .await;

    let err = transport_for(&server).get_json("/pokemon/1").await.unwrap_err();

    assert!(matches!(err, ApiError::Decode { .. }));
  }
}
