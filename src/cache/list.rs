//! Paginated list cache keyed by canonical parameter signatures.

use std::cell::RefCell;
use std::collections::HashMap;
use std::future::Future;
use std::rc::Rc;
use tracing::debug;

use crate::api::types::{NamedApiResource, Paginated};
use crate::api::{ApiError, ListParams};

use super::error::FetchError;
use super::status::StatusTracker;

/// Caller-facing list parameters; omitted fields take the list's defaults.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ListQuery {
  pub limit: Option<u32>,
  pub offset: Option<u32>,
}

impl ListQuery {
  pub fn page(limit: u32, offset: u32) -> Self {
    Self {
      limit: Some(limit),
      offset: Some(offset),
    }
  }

  pub fn resolve(&self, defaults: ListParams) -> ListParams {
    ListParams {
      limit: self.limit.unwrap_or(defaults.limit),
      offset: self.offset.unwrap_or(defaults.offset),
    }
  }
}

/// One cached page.
#[derive(Debug, Clone, PartialEq)]
pub struct ListResult {
  pub params_key: String,
  pub results: Paginated<NamedApiResource>,
}

/// Pages of one list endpoint. Every `(limit, offset)` pair is its own entry; pages
/// are never merged or invalidated by each other.
pub struct ListCache {
  resource: &'static str,
  defaults: ListParams,
  fallback_message: &'static str,
  entries: RefCell<HashMap<String, Rc<ListResult>>>,
}

impl ListCache {
  pub fn new(resource: &'static str, default_limit: u32, fallback_message: &'static str) -> Self {
    Self {
      resource,
      defaults: ListParams {
        limit: default_limit,
        offset: 0,
      },
      fallback_message,
      entries: RefCell::new(HashMap::new()),
    }
  }

  pub fn defaults(&self) -> ListParams {
    self.defaults
  }

  /// Cache and status key for resolved parameters, e.g. `list:limit:20|offset:0`.
  pub fn cache_key(&self, params: &ListParams) -> String {
    format!("{}:{}", self.resource, params.params_key())
  }

  /// Key `query` resolves to once defaults are filled in.
  pub fn key_for(&self, query: &ListQuery) -> String {
    self.cache_key(&query.resolve(self.defaults))
  }

  pub fn get(&self, cache_key: &str) -> Option<Rc<ListResult>> {
    self.entries.borrow().get(cache_key).cloned()
  }

  pub fn len(&self) -> usize {
    self.entries.borrow().len()
  }

  pub fn is_empty(&self) -> bool {
    self.entries.borrow().is_empty()
  }

  /// Return the page for `query`, fetching it on a miss.
  pub async fn fetch<F, Fut>(
    &self,
    query: ListQuery,
    status: &StatusTracker,
    fetcher: F,
  ) -> Result<Rc<ListResult>, FetchError>
  where
    F: FnOnce(ListParams) -> Fut,
    Fut: Future<Output = Result<Paginated<NamedApiResource>, ApiError>>,
  {
    let params = query.resolve(self.defaults);
    let cache_key = self.cache_key(&params);

    if let Some(cached) = self.get(&cache_key) {
      debug!(key = %cache_key, "list cache hit");
      return Ok(cached);
    }

    debug!(key = %cache_key, "list cache miss, fetching");
    status.mark_loading(&cache_key);

    match fetcher(params).await {
      Ok(results) => {
        let entry = Rc::new(ListResult {
          params_key: params.params_key(),
          results,
        });
        self
          .entries
          .borrow_mut()
          .insert(cache_key.clone(), Rc::clone(&entry));
        status.mark_success(&cache_key);
        Ok(entry)
      }
      Err(err) => {
        let message = err.status_message().unwrap_or(self.fallback_message);
        status.mark_error(&cache_key, message);
        Err(err.into())
      }
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn page(names: &[&str]) -> Paginated<NamedApiResource> {
    Paginated {
      count: 1302,
      next: None,
      previous: None,
      results: names
        .iter()
        .map(|name| NamedApiResource {
          name: name.to_string(),
          url: format!("https://pokeapi.co/api/v2/pokemon/{}/", name),
        })
        .collect(),
    }
  }

  #[tokio::test]
  async fn test_defaults_and_explicit_share_entry() {
    let cache = ListCache::new("list", 20, "Failed to load Pokémon list");
    let status = StatusTracker::new();
    let requested = RefCell::new(Vec::new());
    let seen = &requested;
    let fetcher = move |params: ListParams| async move {
      seen.borrow_mut().push(params);
      Ok(page(&["bulbasaur"]))
    };

    let first = cache
      .fetch(ListQuery::page(20, 0), &status, fetcher)
      .await
      .unwrap();
    let second = cache
      .fetch(ListQuery::default(), &status, fetcher)
      .await
      .unwrap();

    assert_eq!(first.params_key, "limit:20|offset:0");
    assert!(Rc::ptr_eq(&first, &second));
    assert_eq!(
      *requested.borrow(),
      vec![ListParams {
        limit: 20,
        offset: 0
      }]
    );
    assert!(status.get("list:limit:20|offset:0").updated_at.is_some());
  }

  #[tokio::test]
  async fn test_pages_are_cached_independently() {
    let cache = ListCache::new("move-list", 50, "Failed to load moves");
    let status = StatusTracker::new();

    cache
      .fetch(ListQuery::default(), &status, |_| async { Ok(page(&["pound"])) })
      .await
      .unwrap();
    cache
      .fetch(
        ListQuery {
          limit: None,
          offset: Some(50),
        },
        &status,
        |_| async { Ok(page(&["thunder-wave"])) },
      )
      .await
      .unwrap();

    assert_eq!(cache.len(), 2);
    let first = cache.get("move-list:limit:50|offset:0").unwrap();
    assert_eq!(first.results.results[0].name, "pound");
    let second = cache.get("move-list:limit:50|offset:50").unwrap();
    assert_eq!(second.results.results[0].name, "thunder-wave");
  }

  #[tokio::test]
  async fn test_failure_marks_status_and_leaves_cache_empty() {
    let cache = ListCache::new("location-list", 20, "Failed to load locations");
    let status = StatusTracker::new();

    let err = cache
      .fetch(ListQuery::default(), &status, |_| async {
        Err(ApiError::Status {
          status: 503,
          status_text: "Service Unavailable".to_string(),
          url: "/location".to_string(),
          message: "Service Unavailable".to_string(),
        })
      })
      .await
      .unwrap_err();

    assert_eq!(err.status_message(), Some("Service Unavailable"));
    assert!(cache.is_empty());
    let record = status.get(&cache.key_for(&ListQuery::default()));
    assert!(record.has_error);
    assert_eq!(record.error_message.as_deref(), Some("Service Unavailable"));
  }
}
