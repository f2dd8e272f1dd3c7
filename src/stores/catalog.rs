//! Abilities, moves, items and locations.

use std::rc::Rc;
use tokio::sync::mpsc;

use crate::api::types::{Ability, Item, Location, LocationArea, Move};
use crate::api::ApiClient;
use crate::cache::{
  EntityCache, FetchError, Identifier, ListCache, ListQuery, ListResult, StatusChange,
  StatusRecord, StatusTracker,
};

/// Store for the reference catalog outside of pokemon proper.
pub struct CatalogStore {
  api: ApiClient,
  abilities: EntityCache<Ability>,
  moves: EntityCache<Move>,
  items: EntityCache<Item>,
  locations: EntityCache<Location>,
  location_areas: EntityCache<LocationArea>,
  move_lists: ListCache,
  location_lists: ListCache,
  status: StatusTracker,
}

impl CatalogStore {
  pub fn new(api: ApiClient) -> Self {
    Self {
      api,
      abilities: EntityCache::new(),
      moves: EntityCache::new(),
      items: EntityCache::new(),
      locations: EntityCache::new(),
      location_areas: EntityCache::new(),
      move_lists: ListCache::new("move-list", 50, "Failed to load moves"),
      location_lists: ListCache::new("location-list", 20, "Failed to load locations"),
      status: StatusTracker::new(),
    }
  }

  pub fn ability(&self, name: &str) -> Option<Rc<Ability>> {
    self.abilities.get(name)
  }

  pub fn move_by_name(&self, name: &str) -> Option<Rc<Move>> {
    self.moves.get(name)
  }

  pub fn item(&self, name: &str) -> Option<Rc<Item>> {
    self.items.get(name)
  }

  pub fn location_by_id(&self, id: u32) -> Option<Rc<Location>> {
    self.locations.get(&id.to_string())
  }

  pub fn location_area(&self, name: &str) -> Option<Rc<LocationArea>> {
    self.location_areas.get(name)
  }

  pub fn move_list_by_key(&self, key: &str) -> Option<Rc<ListResult>> {
    self.move_lists.get(key)
  }

  pub fn location_list_by_key(&self, key: &str) -> Option<Rc<ListResult>> {
    self.location_lists.get(key)
  }

  pub fn move_list_key(&self, query: &ListQuery) -> String {
    self.move_lists.key_for(query)
  }

  pub fn location_list_key(&self, query: &ListQuery) -> String {
    self.location_lists.key_for(query)
  }

  pub fn status(&self, key: &str) -> StatusRecord {
    self.status.get(key)
  }

  pub fn subscribe(&self) -> mpsc::UnboundedReceiver<StatusChange> {
    self.status.subscribe()
  }

  pub async fn ensure_ability(
    &self,
    identifier: impl Into<Identifier>,
  ) -> Result<Rc<Ability>, FetchError> {
    let key = identifier.into().normalize()?;
    let api = &self.api;
    let path = key.to_string();
    self
      .abilities
      .ensure(&key, &self.status, move || async move {
        api.ability(&path).await
      })
      .await
  }

  pub async fn ensure_move(
    &self,
    identifier: impl Into<Identifier>,
  ) -> Result<Rc<Move>, FetchError> {
    let key = identifier.into().normalize()?;
    let api = &self.api;
    let path = key.to_string();
    self
      .moves
      .ensure(&key, &self.status, move || async move {
        api.move_detail(&path).await
      })
      .await
  }

  pub async fn ensure_item(
    &self,
    identifier: impl Into<Identifier>,
  ) -> Result<Rc<Item>, FetchError> {
    let key = identifier.into().normalize()?;
    let api = &self.api;
    let path = key.to_string();
    self
      .items
      .ensure(&key, &self.status, move || async move { api.item(&path).await })
      .await
  }

  pub async fn ensure_location(
    &self,
    identifier: impl Into<Identifier>,
  ) -> Result<Rc<Location>, FetchError> {
    let key = identifier.into().normalize()?;
    let api = &self.api;
    let path = key.to_string();
    self
      .locations
      .ensure(&key, &self.status, move || async move {
        api.location(&path).await
      })
      .await
  }

  pub async fn ensure_location_area(
    &self,
    identifier: impl Into<Identifier>,
  ) -> Result<Rc<LocationArea>, FetchError> {
    let key = identifier.into().normalize()?;
    let api = &self.api;
    let path = key.to_string();
    self
      .location_areas
      .ensure(&key, &self.status, move || async move {
        api.location_area(&path).await
      })
      .await
  }

  /// Page of the move list (default limit 50, offset 0).
  pub async fn fetch_move_list(&self, query: ListQuery) -> Result<Rc<ListResult>, FetchError> {
    let api = &self.api;
    self
      .move_lists
      .fetch(query, &self.status, move |params| async move {
        api.move_list(params).await
      })
      .await
  }

  /// Page of the location list (default limit 20, offset 0).
  pub async fn fetch_location_list(
    &self,
    query: ListQuery,
  ) -> Result<Rc<ListResult>, FetchError> {
    let api = &self.api;
    self
      .location_lists
      .fetch(query, &self.status, move |params| async move {
        api.location_list(params).await
      })
      .await
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::api::mock::MockTransport;
  use serde_json::{json, Value};
  use std::sync::Arc;

  fn overgrow() -> Value {
    json!({
      "id": 65,
      "name": "overgrow",
      "generation": { "name": "generation-iii", "url": "" },
      "effect_entries": [{
        "effect": "Boosts Grass moves.",
        "short_effect": "Boosts Grass moves.",
        "language": { "name": "en", "url": "" }
      }]
    })
  }

  fn ember() -> Value {
    json!({
      "id": 10,
      "name": "ember",
      "accuracy": 100,
      "power": 40,
      "pp": 25,
      "priority": 0,
      "type": { "name": "fire", "url": "" },
      "damage_class": { "name": "special", "url": "" },
      "effect_entries": []
    })
  }

  fn store_with(transport: &Arc<MockTransport>) -> CatalogStore {
    CatalogStore::new(ApiClient::new(transport.clone()))
  }

  #[tokio::test]
  async fn test_caches_abilities_after_fetching() {
    let transport = MockTransport::new();
    transport.respond("/ability/overgrow", overgrow());
    let store = store_with(&transport);

    let ability = store.ensure_ability("overgrow").await.unwrap();
    assert_eq!(ability.name, "overgrow");
    assert!(store.ability("overgrow").is_some());

    let second = store.ensure_ability("overgrow").await.unwrap();
    assert_eq!(second, ability);
    assert_eq!(transport.calls("/ability/overgrow"), 1);
  }

  #[tokio::test]
  async fn test_move_reachable_by_name_id_and_case() {
    let transport = MockTransport::new();
    transport.respond("/move/ember", ember());
    let store = store_with(&transport);

    let move_detail = store.ensure_move("ember").await.unwrap();
    let by_id = store.ensure_move(10u32).await.unwrap();
    let shouted = store.ensure_move("EMBER").await.unwrap();

    assert_eq!(transport.total_calls(), 1);
    assert!(Rc::ptr_eq(&move_detail, &by_id));
    assert!(Rc::ptr_eq(&move_detail, &shouted));
    assert_eq!(store.move_by_name("ember"), Some(move_detail));
  }

  #[tokio::test]
  async fn test_move_list_then_move() {
    let transport = MockTransport::new();
    transport.respond(
      "/move?limit=20&offset=0",
      json!({
        "count": 1,
        "next": null,
        "previous": null,
        "results": [{ "name": "ember", "url": "/move/ember" }]
      }),
    );
    transport.respond("/move/ember", ember());
    let store = store_with(&transport);

    let list = store
      .fetch_move_list(ListQuery::page(20, 0))
      .await
      .unwrap();
    assert_eq!(list.results.results.len(), 1);

    let move_detail = store.ensure_move("ember").await.unwrap();
    assert_eq!(move_detail.name, "ember");
    assert_eq!(store.move_by_name("ember").as_deref(), Some(&*move_detail));
  }

  #[tokio::test]
  async fn test_move_list_default_limit_is_fifty() {
    let transport = MockTransport::new();
    transport.respond(
      "/move?limit=50&offset=0",
      json!({ "count": 0, "next": null, "previous": null, "results": [] }),
    );
    let store = store_with(&transport);

    let list = store.fetch_move_list(ListQuery::default()).await.unwrap();
    store
      .fetch_move_list(ListQuery {
        limit: Some(50),
        offset: None,
      })
      .await
      .unwrap();

    assert_eq!(list.params_key, "limit:50|offset:0");
    assert_eq!(transport.total_calls(), 1);
    assert!(store
      .move_list_by_key(&store.move_list_key(&ListQuery::default()))
      .is_some());
  }

  #[tokio::test]
  async fn test_location_list_failure_marks_status() {
    let transport = MockTransport::new();
    transport.fail("/location?limit=20&offset=0", 502, "Bad Gateway");
    let store = store_with(&transport);

    let err = store
      .fetch_location_list(ListQuery::default())
      .await
      .unwrap_err();

    assert_eq!(err.status_message(), Some("Bad Gateway"));
    let record = store.status("location-list:limit:20|offset:0");
    assert!(record.has_error);
    assert_eq!(record.error_message.as_deref(), Some("Bad Gateway"));
    assert!(store
      .location_list_by_key(&store.location_list_key(&ListQuery::default()))
      .is_none());
  }

  #[tokio::test]
  async fn test_locations_and_areas() {
    let transport = MockTransport::new();
    transport.respond(
      "/location/1",
      json!({
        "id": 1,
        "name": "canalave-city",
        "areas": [{ "name": "canalave-city-area", "url": "https://pokeapi.co/api/v2/location-area/1/" }]
      }),
    );
    transport.respond(
      "/location-area/canalave-city-area",
      json!({ "id": 1, "name": "canalave-city-area", "pokemon_encounters": [] }),
    );
    let store = store_with(&transport);

    let location = store.ensure_location("1").await.unwrap();
    store.ensure_location("canalave-city").await.unwrap();
    let area = store
      .ensure_location_area(location.areas[0].name.as_str())
      .await
      .unwrap();
    store.ensure_location_area(1u32).await.unwrap();

    assert_eq!(area.name, "canalave-city-area");
    assert_eq!(transport.total_calls(), 2);
    assert!(store.location_by_id(1).is_some());
    assert!(store.location_area("Canalave-City-Area").is_some());
  }

  #[tokio::test]
  async fn test_item_not_found_records_message() {
    let transport = MockTransport::new();
    let store = store_with(&transport);

    let err = store.ensure_item("master-bal").await.unwrap_err();

    assert_eq!(err.to_string(), "Not Found");
    let record = store.status("item:master-bal");
    assert!(record.has_error);
    assert_eq!(record.error_message.as_deref(), Some("Not Found"));
    assert!(store.item("master-bal").is_none());
  }
}
