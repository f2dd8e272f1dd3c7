use serde::de::DeserializeOwned;
use std::collections::BTreeMap;
use std::sync::Arc;

use super::error::ApiError;
use super::transport::Transport;
use super::types::{
  Ability, EvolutionChain, Item, Location, LocationArea, Move, NamedApiResource, Paginated,
  Pokemon, PokemonEncounterArea, PokemonSpecies, PokemonType,
};

/// Fully resolved pagination parameters for a list endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListParams {
  pub limit: u32,
  pub offset: u32,
}

impl ListParams {
  fn pairs(&self) -> BTreeMap<&'static str, String> {
    BTreeMap::from([
      ("limit", self.limit.to_string()),
      ("offset", self.offset.to_string()),
    ])
  }

  /// Canonical cache signature: names sorted, `name:value` joined by `|`.
  pub fn params_key(&self) -> String {
    self
      .pairs()
      .iter()
      .map(|(name, value)| format!("{}:{}", name, value))
      .collect::<Vec<_>>()
      .join("|")
  }

  /// URL query string for the list endpoint.
  pub fn query(&self) -> String {
    url::form_urlencoded::Serializer::new(String::new())
      .extend_pairs(self.pairs())
      .finish()
  }
}

/// Typed PokeAPI endpoints on top of a [`Transport`].
#[derive(Clone)]
pub struct ApiClient {
  transport: Arc<dyn Transport>,
}

impl ApiClient {
  pub fn new(transport: Arc<dyn Transport>) -> Self {
    Self { transport }
  }

  async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
    let value = self.transport.get_json(path).await?;
    serde_json::from_value(value).map_err(|source| ApiError::Decode {
      url: path.to_string(),
      source,
    })
  }

  pub async fn pokemon(&self, identifier: &str) -> Result<Pokemon, ApiError> {
    self.get(&format!("/pokemon/{}", identifier)).await
  }

  pub async fn pokemon_species(&self, identifier: &str) -> Result<PokemonSpecies, ApiError> {
    self.get(&format!("/pokemon-species/{}", identifier)).await
  }

  pub async fn pokemon_type(&self, identifier: &str) -> Result<PokemonType, ApiError> {
    self.get(&format!("/type/{}", identifier)).await
  }

  pub async fn evolution_chain(&self, identifier: &str) -> Result<EvolutionChain, ApiError> {
    self.get(&format!("/evolution-chain/{}", identifier)).await
  }

  pub async fn ability(&self, identifier: &str) -> Result<Ability, ApiError> {
    self.get(&format!("/ability/{}", identifier)).await
  }

  pub async fn move_detail(&self, identifier: &str) -> Result<Move, ApiError> {
    self.get(&format!("/move/{}", identifier)).await
  }

  pub async fn item(&self, identifier: &str) -> Result<Item, ApiError> {
    self.get(&format!("/item/{}", identifier)).await
  }

  pub async fn location(&self, identifier: &str) -> Result<Location, ApiError> {
    self.get(&format!("/location/{}", identifier)).await
  }

  pub async fn location_area(&self, identifier: &str) -> Result<LocationArea, ApiError> {
    self.get(&format!("/location-area/{}", identifier)).await
  }

  /// Encounter areas for a pokemon.
  ///
  /// An absolute `endpoint` (the `location_area_encounters` link of a fetched pokemon)
  /// is requested as-is; otherwise the id-based path is used.
  pub async fn pokemon_encounters(
    &self,
    pokemon_id: u32,
    endpoint: Option<&str>,
  ) -> Result<Vec<PokemonEncounterArea>, ApiError> {
    match endpoint {
      Some(url) if url.starts_with("http") => self.get(url).await,
      _ => self.get(&format!("/pokemon/{}/encounters", pokemon_id)).await,
    }
  }

  pub async fn pokemon_list(
    &self,
    params: ListParams,
  ) -> Result<Paginated<NamedApiResource>, ApiError> {
    self.get(&format!("/pokemon?{}", params.query())).await
  }

  pub async fn move_list(&self, params: ListParams) -> Result<Paginated<NamedApiResource>, ApiError> {
    self.get(&format!("/move?{}", params.query())).await
  }

  pub async fn location_list(
    &self,
    params: ListParams,
  ) -> Result<Paginated<NamedApiResource>, ApiError> {
    self.get(&format!("/location?{}", params.query())).await
  }
}
