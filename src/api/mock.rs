//! Scripted transport for unit tests.

use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use super::error::ApiError;
use super::transport::Transport;

enum Scripted {
  Json(Value),
  Status { status: u16, message: String },
}

/// Answers from a fixed route table and counts calls per path.
///
/// Every request yields to the scheduler once before answering, so futures polled
/// together interleave at the transport boundary like real network calls do.
#[derive(Default)]
pub struct MockTransport {
  routes: Mutex<HashMap<String, Scripted>>,
  calls: Mutex<HashMap<String, usize>>,
}

impl MockTransport {
  pub fn new() -> Arc<Self> {
    Arc::new(Self::default())
  }

  pub fn respond(&self, path: &str, body: Value) {
    self
      .routes
      .lock()
      .unwrap()
      .insert(path.to_string(), Scripted::Json(body));
  }

  pub fn fail(&self, path: &str, status: u16, message: &str) {
    self.routes.lock().unwrap().insert(
      path.to_string(),
      Scripted::Status {
        status,
        message: message.to_string(),
      },
    );
  }

  pub fn calls(&self, path: &str) -> usize {
    self.calls.lock().unwrap().get(path).copied().unwrap_or(0)
  }

  pub fn total_calls(&self) -> usize {
    self.calls.lock().unwrap().values().sum()
  }
}

#[async_trait]
impl Transport for MockTransport {
  async fn get_json(&self, path: &str) -> Result<Value, ApiError> {
    *self
      .calls
      .lock()
      .unwrap()
      .entry(path.to_string())
      .or_insert(0) += 1;

    tokio::task::yield_now().await;

    let routes = self.routes.lock().unwrap();
    match routes.get(path) {
      Some(Scripted::Json(body)) => Ok(body.clone()),
      Some(Scripted::Status { status, message }) => Err(ApiError::Status {
        status: *status,
        status_text: "Scripted Failure".to_string(),
        url: path.to_string(),
        message: message.clone(),
      }),
      None => Err(ApiError::Status {
        status: 404,
        status_text: "Not Found".to_string(),
        url: path.to_string(),
        message: "Not Found".to_string(),
      }),
    }
  }
}
