//! Per-key load / error / freshness bookkeeping.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::cell::RefCell;
use std::collections::HashMap;
use tokio::sync::mpsc;

/// Load state of one cache key.
///
/// The default value (not loading, no error, never updated) is what callers see for
/// keys that were never requested.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StatusRecord {
  pub is_loading: bool,
  pub has_error: bool,
  pub error_message: Option<String>,
  pub updated_at: Option<DateTime<Utc>>,
}

impl StatusRecord {
  pub fn loading() -> Self {
    Self {
      is_loading: true,
      ..Self::default()
    }
  }

  pub fn success() -> Self {
    Self {
      updated_at: Some(Utc::now()),
      ..Self::default()
    }
  }

  pub fn failure(message: impl Into<String>) -> Self {
    Self {
      is_loading: false,
      has_error: true,
      error_message: Some(message.into()),
      updated_at: Some(Utc::now()),
    }
  }
}

/// A status transition, delivered to subscribers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusChange {
  pub key: String,
  pub record: StatusRecord,
}

/// Status records keyed by `"<resource>:<key>"`.
///
/// Records are never removed; a later request overwrites the previous outcome.
#[derive(Default)]
pub struct StatusTracker {
  records: RefCell<HashMap<String, StatusRecord>>,
  subscribers: RefCell<Vec<mpsc::UnboundedSender<StatusChange>>>,
}

impl StatusTracker {
  pub fn new() -> Self {
    Self::default()
  }

  /// Current record for `key`, or the all-clear default.
  pub fn get(&self, key: &str) -> StatusRecord {
    self
      .records
      .borrow()
      .get(&key.to_lowercase())
      .cloned()
      .unwrap_or_default()
  }

  pub fn mark_loading(&self, key: &str) {
    self.set(key, StatusRecord::loading());
  }

  pub fn mark_success(&self, key: &str) {
    self.set(key, StatusRecord::success());
  }

  pub fn mark_error(&self, key: &str, message: impl Into<String>) {
    self.set(key, StatusRecord::failure(message));
  }

  /// Receive every subsequent status transition.
  pub fn subscribe(&self) -> mpsc::UnboundedReceiver<StatusChange> {
    let (tx, rx) = mpsc::unbounded_channel();
    self.subscribers.borrow_mut().push(tx);
    rx
  }

  /// Keys that currently have a record, sorted.
  pub fn keys(&self) -> Vec<String> {
    let mut keys: Vec<String> = self.records.borrow().keys().cloned().collect();
    keys.sort();
    keys
  }

  fn set(&self, key: &str, record: StatusRecord) {
    let key = key.to_lowercase();
    self
      .records
      .borrow_mut()
      .insert(key.clone(), record.clone());

    // Drop subscribers whose receiver is gone
    self.subscribers.borrow_mut().retain(|tx| {
      tx.send(StatusChange {
        key: key.clone(),
        record: record.clone(),
      })
      .is_ok()
    });
  }
}
