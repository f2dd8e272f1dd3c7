//! In-memory entity cache with the idempotent `ensure` operation.

use std::cell::RefCell;
use std::collections::HashMap;
use std::future::Future;
use std::rc::Rc;
use tracing::debug;

use crate::api::ApiError;

use super::error::FetchError;
use super::identifier::{status_key, CacheKey};
use super::status::StatusTracker;
use super::traits::Cacheable;

/// Fetched records of one kind, keyed by every canonical key of each record.
///
/// Entries are shared as `Rc<T>` and never mutated: a hit returns the same allocation
/// the first fetch produced.
pub struct EntityCache<T> {
  entries: RefCell<HashMap<String, Rc<T>>>,
}

impl<T> Default for EntityCache<T> {
  fn default() -> Self {
    Self {
      entries: RefCell::new(HashMap::new()),
    }
  }
}

impl<T: Cacheable> EntityCache<T> {
  pub fn new() -> Self {
    Self::default()
  }

  /// Cached record under `key` (case-insensitive).
  pub fn get(&self, key: &str) -> Option<Rc<T>> {
    self.entries.borrow().get(&key.to_lowercase()).cloned()
  }

  pub fn contains(&self, key: &str) -> bool {
    self.entries.borrow().contains_key(&key.to_lowercase())
  }

  /// Number of distinct records held.
  pub fn len(&self) -> usize {
    let entries = self.entries.borrow();
    let mut ids: Vec<u32> = entries.values().map(|entity| entity.id()).collect();
    ids.sort_unstable();
    ids.dedup();
    ids.len()
  }

  pub fn is_empty(&self) -> bool {
    self.entries.borrow().is_empty()
  }

  /// Store `entity` under all of its keys, replacing whatever was there.
  pub fn insert(&self, entity: T) -> Rc<T> {
    let entity = Rc::new(entity);
    let mut entries = self.entries.borrow_mut();
    for key in entity.cache_keys() {
      entries.insert(key, Rc::clone(&entity));
    }
    entity
  }

  /// Return the record under `key`, fetching it on a miss.
  ///
  /// 1. Hit - return immediately, no status change, no network call
  /// 2. Miss - mark `"<resource>:<key>"` loading and run `fetcher`
  /// 3. Success - store under every key of the record, mark fresh
  /// 4. Failure - mark errored and return the transport error unchanged
  ///
  /// The cache is not consulted again after `fetcher` resolves, so two overlapping
  /// misses for the same key both fetch and the later write wins.
  pub async fn ensure<F, Fut>(
    &self,
    key: &CacheKey,
    status: &StatusTracker,
    fetcher: F,
  ) -> Result<Rc<T>, FetchError>
  where
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<T, ApiError>>,
  {
    if let Some(cached) = self.get(&key.to_string()) {
      debug!(resource = T::resource(), %key, "cache hit");
      return Ok(cached);
    }

    let status_key = status_key(T::resource(), key);
    debug!(resource = T::resource(), %key, "cache miss, fetching");
    status.mark_loading(&status_key);

    match fetcher().await {
      Ok(entity) => {
        let entity = self.insert(entity);
        status.mark_success(&status_key);
        Ok(entity)
      }
      Err(err) => {
        let message = err.status_message().unwrap_or(T::fallback_message());
        debug!(resource = T::resource(), %key, error = %err, "fetch failed");
        status.mark_error(&status_key, message);
        Err(err.into())
      }
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use std::cell::Cell;

  #[derive(Debug, Clone, PartialEq)]
  struct Berry {
    id: u32,
    name: String,
  }

  impl Cacheable for Berry {
    fn resource() -> &'static str {
      "berry"
    }

    fn fallback_message() -> &'static str {
      "Failed to load berry"
    }

    fn id(&self) -> u32 {
      self.id
    }

    fn name(&self) -> Option<&str> {
      Some(&self.name)
    }
  }

  fn cheri() -> Berry {
    Berry {
      id: 1,
      name: "Cheri".to_string(),
    }
  }

  fn decode_error() -> ApiError {
    ApiError::Decode {
      url: "/berry/1".to_string(),
      source: serde_json::from_str::<u32>("x").unwrap_err(),
    }
  }

  #[tokio::test]
  async fn test_ensure_stores_under_id_and_name() {
    let cache = EntityCache::<Berry>::new();
    let status = StatusTracker::new();

    let berry = cache
      .ensure(&CacheKey::Name("cheri".to_string()), &status, || async {
        Ok(cheri())
      })
      .await
      .unwrap();

    assert!(Rc::ptr_eq(&berry, &cache.get("1").unwrap()));
    assert!(Rc::ptr_eq(&berry, &cache.get("CHERI").unwrap()));
    assert_eq!(cache.len(), 1);
    assert!(status.get("berry:cheri").updated_at.is_some());
  }

  #[tokio::test]
  async fn test_ensure_hit_skips_fetcher() {
    let cache = EntityCache::<Berry>::new();
    let status = StatusTracker::new();
    let counter = Cell::new(0);
    let calls = &counter;
    let fetch = move || async move {
      calls.set(calls.get() + 1);
      Ok(cheri())
    };

    let first = cache.ensure(&CacheKey::Id(1), &status, fetch).await.unwrap();
    let second = cache.ensure(&CacheKey::Id(1), &status, fetch).await.unwrap();

    assert_eq!(counter.get(), 1);
    assert!(Rc::ptr_eq(&first, &second));
  }

  #[tokio::test]
  async fn test_ensure_failure_uses_fallback_message() {
    let cache = EntityCache::<Berry>::new();
    let status = StatusTracker::new();

    let err = cache
      .ensure(&CacheKey::Id(1), &status, || async { Err(decode_error()) })
      .await
      .unwrap_err();

    assert!(matches!(err, FetchError::Api(ApiError::Decode { .. })));
    let record = status.get("berry:1");
    assert!(record.has_error);
    assert_eq!(record.error_message.as_deref(), Some("Failed to load berry"));
    assert!(cache.is_empty());
  }

  #[tokio::test]
  async fn test_ensure_retries_after_failure() {
    let cache = EntityCache::<Berry>::new();
    let status = StatusTracker::new();

    let _ = cache
      .ensure(&CacheKey::Id(1), &status, || async { Err(decode_error()) })
      .await;
    let berry = cache
      .ensure(&CacheKey::Id(1), &status, || async { Ok(cheri()) })
      .await
      .unwrap();

    assert_eq!(berry.name, "Cheri");
    let record = status.get("berry:1");
    assert!(!record.has_error);
    assert!(record.error_message.is_none());
  }
}
