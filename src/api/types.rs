//! Serde types matching PokeAPI v2 responses.
//!
//! Only `id` and `name` are required on top-level records; everything else defaults so
//! that partial payloads still decode.

use serde::{Deserialize, Serialize};

// ============================================================================
// Shared building blocks
// ============================================================================

/// Reference to another resource, as embedded in most responses.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct NamedApiResource {
  pub name: String,
  pub url: String,
}

/// Page of a list endpoint.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Paginated<T> {
  pub count: u32,
  pub next: Option<String>,
  pub previous: Option<String>,
  pub results: Vec<T>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Name {
  pub name: String,
  pub language: NamedApiResource,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct EffectEntry {
  pub effect: String,
  #[serde(default)]
  pub short_effect: String,
  pub language: NamedApiResource,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FlavorTextEntry {
  pub flavor_text: String,
  pub language: NamedApiResource,
  #[serde(default)]
  pub version: Option<NamedApiResource>,
  #[serde(default)]
  pub version_group: Option<NamedApiResource>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct GenerationGameIndex {
  pub game_index: u32,
  pub generation: NamedApiResource,
}

// ============================================================================
// Pokemon
// ============================================================================

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PokemonAbility {
  pub is_hidden: bool,
  pub slot: u32,
  pub ability: NamedApiResource,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PokemonMoveVersionDetail {
  pub level_learned_at: u32,
  pub version_group: NamedApiResource,
  pub move_learn_method: NamedApiResource,
  #[serde(default)]
  pub order: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PokemonMove {
  #[serde(rename = "move")]
  pub move_ref: NamedApiResource,
  #[serde(default)]
  pub version_group_details: Vec<PokemonMoveVersionDetail>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PokemonHeldItemVersion {
  pub rarity: u32,
  pub version: NamedApiResource,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PokemonHeldItem {
  pub item: NamedApiResource,
  #[serde(default)]
  pub version_details: Vec<PokemonHeldItemVersion>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PokemonTypeSlot {
  pub slot: u32,
  #[serde(rename = "type")]
  pub type_ref: NamedApiResource,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PokemonStat {
  pub base_stat: u32,
  pub effort: u32,
  pub stat: NamedApiResource,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PokemonSprites {
  pub back_default: Option<String>,
  pub back_female: Option<String>,
  pub back_shiny: Option<String>,
  pub back_shiny_female: Option<String>,
  pub front_default: Option<String>,
  pub front_female: Option<String>,
  pub front_shiny: Option<String>,
  pub front_shiny_female: Option<String>,
  #[serde(default)]
  pub other: Option<serde_json::Value>,
  #[serde(default)]
  pub versions: Option<serde_json::Value>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PokemonGameIndex {
  pub game_index: u32,
  pub version: NamedApiResource,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PokemonPastType {
  pub generation: NamedApiResource,
  pub types: Vec<PokemonTypeSlot>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PokemonPastAbilitySlot {
  pub ability: Option<NamedApiResource>,
  pub is_hidden: bool,
  pub slot: u32,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PokemonPastAbility {
  pub generation: NamedApiResource,
  pub abilities: Vec<PokemonPastAbilitySlot>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PokemonCries {
  pub latest: Option<String>,
  pub legacy: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Pokemon {
  pub id: u32,
  pub name: String,
  #[serde(default)]
  pub base_experience: Option<u32>,
  #[serde(default)]
  pub height: u32,
  #[serde(default)]
  pub weight: u32,
  #[serde(default)]
  pub is_default: bool,
  #[serde(default)]
  pub order: i32,
  #[serde(default)]
  pub abilities: Vec<PokemonAbility>,
  #[serde(default)]
  pub forms: Vec<NamedApiResource>,
  #[serde(default)]
  pub game_indices: Vec<PokemonGameIndex>,
  #[serde(default)]
  pub held_items: Vec<PokemonHeldItem>,
  /// Link to the encounters sub-resource.
  #[serde(default)]
  pub location_area_encounters: String,
  #[serde(default)]
  pub moves: Vec<PokemonMove>,
  #[serde(default)]
  pub species: NamedApiResource,
  #[serde(default)]
  pub sprites: PokemonSprites,
  #[serde(default)]
  pub stats: Vec<PokemonStat>,
  #[serde(default)]
  pub types: Vec<PokemonTypeSlot>,
  #[serde(default)]
  pub past_types: Vec<PokemonPastType>,
  #[serde(default)]
  pub past_abilities: Vec<PokemonPastAbility>,
  #[serde(default)]
  pub cries: Option<PokemonCries>,
}

// ============================================================================
// Species
// ============================================================================

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PokemonDexNumber {
  pub entry_number: u32,
  pub pokedex: NamedApiResource,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PokemonSpeciesGenus {
  pub genus: String,
  pub language: NamedApiResource,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PokemonSpeciesVariety {
  pub is_default: bool,
  pub pokemon: NamedApiResource,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ApiResource {
  pub url: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FormDescription {
  pub description: String,
  pub language: NamedApiResource,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PokemonSpecies {
  pub id: u32,
  pub name: String,
  #[serde(default)]
  pub order: i32,
  #[serde(default)]
  pub gender_rate: i32,
  #[serde(default)]
  pub capture_rate: u32,
  #[serde(default)]
  pub base_happiness: Option<u32>,
  #[serde(default)]
  pub is_baby: bool,
  #[serde(default)]
  pub is_legendary: bool,
  #[serde(default)]
  pub is_mythical: bool,
  #[serde(default)]
  pub hatch_counter: Option<u32>,
  #[serde(default)]
  pub has_gender_differences: bool,
  #[serde(default)]
  pub forms_switchable: bool,
  #[serde(default)]
  pub growth_rate: Option<NamedApiResource>,
  #[serde(default)]
  pub pokedex_numbers: Vec<PokemonDexNumber>,
  #[serde(default)]
  pub egg_groups: Vec<NamedApiResource>,
  #[serde(default)]
  pub color: Option<NamedApiResource>,
  #[serde(default)]
  pub shape: Option<NamedApiResource>,
  #[serde(default)]
  pub evolves_from_species: Option<NamedApiResource>,
  #[serde(default)]
  pub evolution_chain: Option<ApiResource>,
  #[serde(default)]
  pub habitat: Option<NamedApiResource>,
  #[serde(default)]
  pub generation: Option<NamedApiResource>,
  #[serde(default)]
  pub names: Vec<Name>,
  #[serde(default)]
  pub flavor_text_entries: Vec<FlavorTextEntry>,
  #[serde(default)]
  pub form_descriptions: Vec<FormDescription>,
  #[serde(default)]
  pub genera: Vec<PokemonSpeciesGenus>,
  #[serde(default)]
  pub varieties: Vec<PokemonSpeciesVariety>,
}

impl PokemonSpecies {
  /// Numeric id of the evolution chain, parsed from its resource URL.
  pub fn evolution_chain_id(&self) -> Option<u32> {
    self
      .evolution_chain
      .as_ref()
      .and_then(|chain| resource_id(&chain.url))
  }
}

// ============================================================================
// Types
// ============================================================================

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TypeDamageRelations {
  #[serde(default)]
  pub no_damage_to: Vec<NamedApiResource>,
  #[serde(default)]
  pub half_damage_to: Vec<NamedApiResource>,
  #[serde(default)]
  pub double_damage_to: Vec<NamedApiResource>,
  #[serde(default)]
  pub no_damage_from: Vec<NamedApiResource>,
  #[serde(default)]
  pub half_damage_from: Vec<NamedApiResource>,
  #[serde(default)]
  pub double_damage_from: Vec<NamedApiResource>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PastDamageRelation {
  pub generation: NamedApiResource,
  pub damage_relations: TypeDamageRelations,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TypePokemon {
  pub slot: u32,
  pub pokemon: NamedApiResource,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PokemonType {
  pub id: u32,
  pub name: String,
  #[serde(default)]
  pub damage_relations: TypeDamageRelations,
  #[serde(default)]
  pub past_damage_relations: Vec<PastDamageRelation>,
  #[serde(default)]
  pub game_indices: Vec<GenerationGameIndex>,
  #[serde(default)]
  pub generation: Option<NamedApiResource>,
  #[serde(default)]
  pub move_damage_class: Option<NamedApiResource>,
  #[serde(default)]
  pub names: Vec<Name>,
  #[serde(default)]
  pub pokemon: Vec<TypePokemon>,
  #[serde(default)]
  pub moves: Vec<NamedApiResource>,
}

// ============================================================================
// Moves, abilities and items
// ============================================================================

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Move {
  pub id: u32,
  pub name: String,
  #[serde(default)]
  pub accuracy: Option<u32>,
  #[serde(default)]
  pub power: Option<u32>,
  #[serde(default)]
  pub pp: Option<u32>,
  #[serde(default)]
  pub priority: i32,
  #[serde(rename = "type", default)]
  pub type_ref: Option<NamedApiResource>,
  #[serde(default)]
  pub damage_class: Option<NamedApiResource>,
  #[serde(default)]
  pub effect_entries: Vec<EffectEntry>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AbilityPokemon {
  pub is_hidden: bool,
  pub slot: u32,
  pub pokemon: NamedApiResource,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Ability {
  pub id: u32,
  pub name: String,
  #[serde(default)]
  pub is_main_series: bool,
  #[serde(default)]
  pub generation: Option<NamedApiResource>,
  #[serde(default)]
  pub names: Vec<Name>,
  #[serde(default)]
  pub effect_entries: Vec<EffectEntry>,
  #[serde(default)]
  pub flavor_text_entries: Vec<FlavorTextEntry>,
  #[serde(default)]
  pub pokemon: Vec<AbilityPokemon>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ItemSprites {
  pub default: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Item {
  pub id: u32,
  pub name: String,
  #[serde(default)]
  pub cost: u32,
  #[serde(default)]
  pub sprites: ItemSprites,
  #[serde(default)]
  pub effect_entries: Vec<EffectEntry>,
}

// ============================================================================
// Locations and encounters
// ============================================================================

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Location {
  pub id: u32,
  pub name: String,
  #[serde(default)]
  pub region: Option<NamedApiResource>,
  #[serde(default)]
  pub names: Vec<Name>,
  #[serde(default)]
  pub areas: Vec<NamedApiResource>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct EncounterDetail {
  pub chance: u32,
  #[serde(default)]
  pub condition_values: Vec<NamedApiResource>,
  pub max_level: u32,
  pub min_level: u32,
  pub method: NamedApiResource,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct VersionEncounterDetail {
  pub max_chance: u32,
  #[serde(default)]
  pub encounter_details: Vec<EncounterDetail>,
  pub version: NamedApiResource,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PokemonEncounter {
  pub pokemon: NamedApiResource,
  #[serde(default)]
  pub version_details: Vec<VersionEncounterDetail>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct LocationArea {
  pub id: u32,
  pub name: String,
  #[serde(default)]
  pub game_index: u32,
  #[serde(default)]
  pub location: Option<NamedApiResource>,
  #[serde(default)]
  pub names: Vec<Name>,
  #[serde(default)]
  pub pokemon_encounters: Vec<PokemonEncounter>,
}

/// One entry of `/pokemon/{id}/encounters`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PokemonEncounterArea {
  pub location_area: NamedApiResource,
  #[serde(default)]
  pub version_details: Vec<VersionEncounterDetail>,
}

/// Encounter areas of a single pokemon, keyed by its numeric id.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PokemonEncounters {
  pub pokemon_id: u32,
  pub areas: Vec<PokemonEncounterArea>,
}

// ============================================================================
// Evolution chains
// ============================================================================

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct EvolutionDetail {
  #[serde(default)]
  pub item: Option<NamedApiResource>,
  #[serde(default)]
  pub trigger: Option<NamedApiResource>,
  #[serde(default)]
  pub gender: Option<u32>,
  #[serde(default)]
  pub held_item: Option<NamedApiResource>,
  #[serde(default)]
  pub known_move: Option<NamedApiResource>,
  #[serde(default)]
  pub known_move_type: Option<NamedApiResource>,
  #[serde(default)]
  pub location: Option<NamedApiResource>,
  #[serde(default)]
  pub min_level: Option<u32>,
  #[serde(default)]
  pub min_happiness: Option<u32>,
  #[serde(default)]
  pub min_beauty: Option<u32>,
  #[serde(default)]
  pub min_affection: Option<u32>,
  #[serde(default)]
  pub needs_overworld_rain: bool,
  #[serde(default)]
  pub party_species: Option<NamedApiResource>,
  #[serde(default)]
  pub party_type: Option<NamedApiResource>,
  #[serde(default)]
  pub relative_physical_stats: Option<i32>,
  #[serde(default)]
  pub time_of_day: String,
  #[serde(default)]
  pub trade_species: Option<NamedApiResource>,
  #[serde(default)]
  pub turn_upside_down: bool,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct EvolutionChainLink {
  #[serde(default)]
  pub is_baby: bool,
  pub species: NamedApiResource,
  #[serde(default)]
  pub evolution_details: Option<Vec<EvolutionDetail>>,
  #[serde(default)]
  pub evolves_to: Vec<EvolutionChainLink>,
}

impl EvolutionChainLink {
  /// Species names in depth-first order, starting with this link.
  pub fn species_names(&self) -> Vec<&str> {
    let mut names = vec![self.species.name.as_str()];
    for next in &self.evolves_to {
      names.extend(next.species_names());
    }
    names
  }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct EvolutionChain {
  pub id: u32,
  #[serde(default)]
  pub baby_trigger_item: Option<NamedApiResource>,
  pub chain: EvolutionChainLink,
}

/// Trailing numeric id of a resource URL such as `.../evolution-chain/1/`.
pub fn resource_id(url: &str) -> Option<u32> {
  url
    .trim_end_matches('/')
    .rsplit('/')
    .next()
    .and_then(|segment| segment.parse().ok())
}

/// Localized name lookup shared by records that carry a `names` list.
pub fn localized_name<'a>(names: &'a [Name], language: &str) -> Option<&'a str> {
  names
    .iter()
    .find(|n| n.language.name == language)
    .map(|n| n.name.as_str())
}
