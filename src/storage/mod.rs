//! Durable key/value storage for client-side state.
//!
//! Values are JSON strings under fixed string keys, the same contract a browser's
//! local storage offers. Stores that own durable state recover from every error here.

mod sqlite;

use color_eyre::{eyre::eyre, Result};
use std::collections::HashMap;
use std::sync::Mutex;

pub use sqlite::SqliteStorage;

/// Trait for storage backends.
pub trait Storage: Send + Sync {
  fn get_item(&self, key: &str) -> Result<Option<String>>;

  fn set_item(&self, key: &str, value: &str) -> Result<()>;

  fn remove_item(&self, key: &str) -> Result<()>;
}

/// Storage that lives only as long as the process.
/// Used for `--ephemeral` sessions and tests.
#[derive(Default)]
pub struct MemoryStorage {
  items: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
  pub fn new() -> Self {
    Self::default()
  }
}

impl Storage for MemoryStorage {
  fn get_item(&self, key: &str) -> Result<Option<String>> {
    let items = self
      .items
      .lock()
      .map_err(|e| eyre!("Lock poisoned: {}", e))?;
    Ok(items.get(key).cloned())
  }

  fn set_item(&self, key: &str, value: &str) -> Result<()> {
    let mut items = self
      .items
      .lock()
      .map_err(|e| eyre!("Lock poisoned: {}", e))?;
    items.insert(key.to_string(), value.to_string());
    Ok(())
  }

  fn remove_item(&self, key: &str) -> Result<()> {
    let mut items = self
      .items
      .lock()
      .map_err(|e| eyre!("Lock poisoned: {}", e))?;
    items.remove(key);
    Ok(())
  }
}
