//! Pokemon, species, type, evolution chain and encounter caches.

use std::rc::Rc;
use tokio::sync::mpsc;

use crate::api::types::{
  EvolutionChain, Pokemon, PokemonEncounters, PokemonSpecies, PokemonType,
};
use crate::api::ApiClient;
use crate::cache::{
  CacheKey, EntityCache, FetchError, Identifier, ListCache, ListQuery, ListResult, StatusChange,
  StatusRecord, StatusTracker,
};

/// Store for pokemon and the records hanging off them.
pub struct PokemonStore {
  api: ApiClient,
  pokemon: EntityCache<Pokemon>,
  species: EntityCache<PokemonSpecies>,
  types: EntityCache<PokemonType>,
  evolution_chains: EntityCache<EvolutionChain>,
  encounters: EntityCache<PokemonEncounters>,
  lists: ListCache,
  status: StatusTracker,
}

impl PokemonStore {
  pub fn new(api: ApiClient) -> Self {
    Self {
      api,
      pokemon: EntityCache::new(),
      species: EntityCache::new(),
      types: EntityCache::new(),
      evolution_chains: EntityCache::new(),
      encounters: EntityCache::new(),
      lists: ListCache::new("list", 20, "Failed to load Pokémon list"),
      status: StatusTracker::new(),
    }
  }

  // ==========================================================================
  // Lookups (cache only, never fetch)
  // ==========================================================================

  pub fn pokemon_by_id(&self, id: u32) -> Option<Rc<Pokemon>> {
    self.pokemon.get(&id.to_string())
  }

  pub fn pokemon_by_name(&self, name: &str) -> Option<Rc<Pokemon>> {
    self.pokemon.get(name)
  }

  pub fn species_by_id(&self, id: u32) -> Option<Rc<PokemonSpecies>> {
    self.species.get(&id.to_string())
  }

  pub fn type_by_name(&self, name: &str) -> Option<Rc<PokemonType>> {
    self.types.get(name)
  }

  pub fn evolution_chain_by_id(&self, id: u32) -> Option<Rc<EvolutionChain>> {
    self.evolution_chains.get(&id.to_string())
  }

  pub fn encounters_by_pokemon_id(&self, id: u32) -> Option<Rc<PokemonEncounters>> {
    self.encounters.get(&id.to_string())
  }

  /// Cached list page by its cache key (`list:limit:20|offset:0`).
  pub fn list_by_key(&self, key: &str) -> Option<Rc<ListResult>> {
    self.lists.get(key)
  }

  /// Cache key a list query resolves to.
  pub fn list_key(&self, query: &ListQuery) -> String {
    self.lists.key_for(query)
  }

  pub fn status(&self, key: &str) -> StatusRecord {
    self.status.get(key)
  }

  pub fn subscribe(&self) -> mpsc::UnboundedReceiver<StatusChange> {
    self.status.subscribe()
  }

  // ==========================================================================
  // Fetch-or-return-cached
  // ==========================================================================

  pub async fn ensure_pokemon(
    &self,
    identifier: impl Into<Identifier>,
  ) -> Result<Rc<Pokemon>, FetchError> {
    let key = identifier.into().normalize()?;
    let api = &self.api;
    let path = key.to_string();
    self
      .pokemon
      .ensure(&key, &self.status, move || async move {
        api.pokemon(&path).await
      })
      .await
  }

  pub async fn ensure_species(
    &self,
    identifier: impl Into<Identifier>,
  ) -> Result<Rc<PokemonSpecies>, FetchError> {
    let key = identifier.into().normalize()?;
    let api = &self.api;
    let path = key.to_string();
    self
      .species
      .ensure(&key, &self.status, move || async move {
        api.pokemon_species(&path).await
      })
      .await
  }

  pub async fn ensure_type(
    &self,
    identifier: impl Into<Identifier>,
  ) -> Result<Rc<PokemonType>, FetchError> {
    let key = identifier.into().normalize()?;
    let api = &self.api;
    let path = key.to_string();
    self
      .types
      .ensure(&key, &self.status, move || async move {
        api.pokemon_type(&path).await
      })
      .await
  }

  pub async fn ensure_evolution_chain(
    &self,
    identifier: impl Into<Identifier>,
  ) -> Result<Rc<EvolutionChain>, FetchError> {
    let key = identifier.into().normalize()?;
    let api = &self.api;
    let path = key.to_string();
    self
      .evolution_chains
      .ensure(&key, &self.status, move || async move {
        api.evolution_chain(&path).await
      })
      .await
  }

  /// Evolution chain of a species, following the species' chain link.
  ///
  /// Returns `Ok(None)` when the species has no chain.
  pub async fn ensure_evolution_chain_for_species(
    &self,
    identifier: impl Into<Identifier>,
  ) -> Result<Option<Rc<EvolutionChain>>, FetchError> {
    let species = self.ensure_species(identifier).await?;
    match species.evolution_chain_id() {
      Some(chain_id) => Ok(Some(self.ensure_evolution_chain(chain_id).await?)),
      None => Ok(None),
    }
  }

  /// Encounter areas for a pokemon, cached per numeric pokemon id.
  ///
  /// A name is resolved to its id through the pokemon cache, fetching the pokemon if
  /// needed. `endpoint` is an absolute encounters link taken from an already-fetched
  /// record; when present it is requested instead of the id-based path.
  pub async fn ensure_pokemon_encounters(
    &self,
    identifier: impl Into<Identifier>,
    endpoint: Option<&str>,
  ) -> Result<Rc<PokemonEncounters>, FetchError> {
    let key = identifier.into().normalize()?;
    let pokemon_id = match &key {
      CacheKey::Id(id) => *id,
      CacheKey::Name(name) => match self.pokemon.get(name) {
        Some(pokemon) => pokemon.id,
        None => self.ensure_pokemon(key.clone()).await?.id,
      },
    };

    let api = &self.api;
    let endpoint = endpoint.map(str::to_string);
    self
      .encounters
      .ensure(&CacheKey::Id(pokemon_id), &self.status, move || async move {
        let areas = api
          .pokemon_encounters(pokemon_id, endpoint.as_deref())
          .await?;
        Ok(PokemonEncounters { pokemon_id, areas })
      })
      .await
  }

  /// Encounter areas given only an encounters link (`.../pokemon/{id}/encounters`).
  pub async fn ensure_encounters_from_link(
    &self,
    link: &str,
  ) -> Result<Rc<PokemonEncounters>, FetchError> {
    let pokemon_id = encounters_link_id(link)
      .ok_or_else(|| FetchError::UnresolvedPokemon(link.to_string()))?;
    self.ensure_pokemon_encounters(pokemon_id, Some(link)).await
  }

  /// Page of the pokemon list (default limit 20, offset 0).
  pub async fn fetch_pokemon_list(&self, query: ListQuery) -> Result<Rc<ListResult>, FetchError> {
    let api = &self.api;
    self
      .lists
      .fetch(query, &self.status, move |params| async move {
        api.pokemon_list(params).await
      })
      .await
  }
}

fn encounters_link_id(link: &str) -> Option<u32> {
  let base = link.trim_end_matches('/').strip_suffix("/encounters")?;
  crate::api::types::resource_id(base)
}
