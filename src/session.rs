//! Per-process context owning every store.

use color_eyre::Result;
use std::sync::Arc;
use tracing::debug;

use crate::api::{ApiClient, HttpTransport, Transport};
use crate::config::Config;
use crate::storage::{MemoryStorage, SqliteStorage, Storage};
use crate::stores::{CatalogStore, FavoritesStore, FilterStore, PokemonStore, UiStore};

/// Built once at startup and passed to whatever drives the stores.
pub struct Session {
  pub pokemon: PokemonStore,
  pub catalog: CatalogStore,
  pub favorites: FavoritesStore,
  pub filters: FilterStore,
  pub ui: UiStore,
}

impl Session {
  pub fn new(transport: Arc<dyn Transport>, storage: Arc<dyn Storage>) -> Self {
    let api = ApiClient::new(transport);
    Self {
      pokemon: PokemonStore::new(api.clone()),
      catalog: CatalogStore::new(api),
      favorites: FavoritesStore::new(storage.clone()),
      filters: FilterStore::new(),
      ui: UiStore::new(storage),
    }
  }

  /// HTTP transport from config; SQLite storage unless `ephemeral`.
  pub fn from_config(config: &Config, ephemeral: bool) -> Result<Self> {
    let transport = HttpTransport::new(&config.api.base_url, config.api.timeout())?;

    let storage: Arc<dyn Storage> = if ephemeral {
      debug!("Using in-memory storage");
      Arc::new(MemoryStorage::new())
    } else {
      let path = config.storage.resolved_path()?;
      debug!("Using storage at {}", path.display());
      Arc::new(SqliteStorage::open(&path)?)
    };

    Ok(Self::new(Arc::new(transport), storage))
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::api::mock::MockTransport;
  use serde_json::json;

  #[tokio::test]
  async fn test_stores_share_transport() {
    let transport = MockTransport::new();
    transport.respond("/pokemon/1", json!({"id": 1, "name": "bulbasaur"}));
    transport.respond("/ability/overgrow", json!({"id": 65, "name": "overgrow"}));
    let session = Session::new(transport.clone(), Arc::new(MemoryStorage::new()));

    session.pokemon.ensure_pokemon(1u32).await.unwrap();
    session.catalog.ensure_ability("overgrow").await.unwrap();

    assert_eq!(transport.total_calls(), 2);
    assert!(session.pokemon.status("pokemon:1").updated_at.is_some());
    assert!(session.catalog.status("ability:overgrow").updated_at.is_some());
  }

  #[test]
  fn test_persistent_stores_share_storage() {
    let storage = Arc::new(MemoryStorage::new());
    let mut session = Session::new(MockTransport::new(), storage.clone());
    session.favorites.toggle(25);
    session.ui.set_theme(crate::stores::Theme::Dark);

    let mut reopened = Session::new(MockTransport::new(), storage);

    assert!(reopened.favorites.is_favorite(25));
    assert_eq!(reopened.ui.theme(), crate::stores::Theme::Dark);
  }

  #[test]
  fn test_from_config_ephemeral() {
    let session = Session::from_config(&Config::default(), true).unwrap();
    assert!(session.pokemon.pokemon_by_id(1).is_none());
    assert!(!session.filters.is_dirty());
  }
}
