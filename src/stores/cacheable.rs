//! Cacheable implementations for PokeAPI records.

use crate::api::types::{
  Ability, EvolutionChain, Item, Location, LocationArea, Move, Pokemon, PokemonEncounters,
  PokemonSpecies, PokemonType,
};
use crate::cache::Cacheable;

/// Implements `Cacheable` for records keyed by both `id` and `name`.
macro_rules! named_cacheable {
  ($ty:ty, $resource:literal, $fallback:literal) => {
    impl Cacheable for $ty {
      fn resource() -> &'static str {
        $resource
      }

      fn fallback_message() -> &'static str {
        $fallback
      }

      fn id(&self) -> u32 {
        self.id
      }

      fn name(&self) -> Option<&str> {
        Some(&self.name)
      }
    }
  };
}

named_cacheable!(Pokemon, "pokemon", "Failed to load Pokémon");
named_cacheable!(PokemonSpecies, "species", "Failed to load species");
named_cacheable!(PokemonType, "type", "Failed to load type");
named_cacheable!(Ability, "ability", "Failed to load ability");
named_cacheable!(Move, "move", "Failed to load move");
named_cacheable!(Item, "item", "Failed to load item");
named_cacheable!(Location, "location", "Failed to load location");
named_cacheable!(LocationArea, "location-area", "Failed to load location area");

// Evolution chains and encounter lists have no name; they are reachable by id only.

impl Cacheable for EvolutionChain {
  fn resource() -> &'static str {
    "evolution-chain"
  }

  fn fallback_message() -> &'static str {
    "Failed to load evolution chain"
  }

  fn id(&self) -> u32 {
    self.id
  }
}

impl Cacheable for PokemonEncounters {
  fn resource() -> &'static str {
    "encounters"
  }

  fn fallback_message() -> &'static str {
    "Failed to load encounter data"
  }

  fn id(&self) -> u32 {
    self.pokemon_id
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_named_records_use_id_and_lowercased_name() {
    let ember = Move {
      id: 52,
      name: "Ember".to_string(),
      ..Move::default()
    };

    assert_eq!(ember.cache_keys(), vec!["52".to_string(), "ember".to_string()]);
    assert_eq!(<Move as Cacheable>::resource(), "move");
  }

  #[test]
  fn test_encounters_keyed_by_pokemon_id() {
    let encounters = PokemonEncounters {
      pokemon_id: 25,
      areas: Vec::new(),
    };

    assert_eq!(encounters.cache_keys(), vec!["25".to_string()]);
  }
}
