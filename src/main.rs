use clap::{Parser, Subcommand, ValueEnum};
use color_eyre::{eyre::eyre, Result};
use serde::Serialize;
use std::path::PathBuf;
use tracing::info;

use pokedex::api::types::{NamedApiResource, Pokemon};
use pokedex::cache::ListQuery;
use pokedex::config::Config;
use pokedex::media;
use pokedex::session::Session;
use pokedex::stores::{Theme, TEAM_SIZE};

#[derive(Parser, Debug)]
#[command(name = "pokedex")]
#[command(about = "Browse the PokeAPI catalog with a local cache, favorites and team")]
#[command(version)]
struct Args {
  /// Path to config file (default: $XDG_CONFIG_HOME/pokedex/config.yaml)
  #[arg(short, long, global = true)]
  config: Option<PathBuf>,

  /// Keep favorites, team and preferences in memory only
  #[arg(long, global = true)]
  ephemeral: bool,

  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
  /// Show a pokemon by id or name
  Pokemon {
    identifier: String,
    /// Print the full record as JSON
    #[arg(long)]
    json: bool,
  },
  /// Show a pokemon species
  Species { identifier: String },
  /// Show a type
  Type { identifier: String },
  /// Show a move
  Move { identifier: String },
  /// Show an ability
  Ability { identifier: String },
  /// Show an item
  Item { identifier: String },
  /// Show a location
  Location { identifier: String },
  /// Show a location area
  Area { identifier: String },
  /// Show the evolution chain of a species
  Evolution { species: String },
  /// List where a pokemon can be encountered
  Encounters { identifier: String },
  /// Page through a list endpoint
  List {
    kind: ListKind,
    #[arg(long)]
    limit: Option<u32>,
    #[arg(long)]
    offset: Option<u32>,
  },
  /// Manage favorite pokemon
  Favorite {
    #[command(subcommand)]
    action: FavoriteAction,
  },
  /// Manage the six-slot team
  Team {
    #[command(subcommand)]
    action: TeamAction,
  },
  /// Show or set the color theme
  Theme { theme: Option<Theme> },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum ListKind {
  Pokemon,
  Moves,
  Locations,
}

#[derive(Subcommand, Debug)]
enum FavoriteAction {
  /// Add the pokemon if absent, remove it otherwise
  Toggle { id: u32 },
  Remove { id: u32 },
  Clear,
  Show,
}

#[derive(Subcommand, Debug)]
enum TeamAction {
  /// Put a pokemon in the first free slot
  Add { id: u32 },
  /// Set a slot (1-6); omit the id to empty it
  Set { slot: usize, id: Option<u32> },
  /// Swap two slots (1-6)
  Swap { a: usize, b: usize },
  Remove { id: u32 },
  Clear,
  Show,
}

#[tokio::main]
async fn main() -> Result<()> {
  color_eyre::install()?;

  let args = Args::parse();

  // Load configuration
  let config = Config::load(args.config.as_deref())?;
  let _log_guard = pokedex::logging::init(&config.log)?;
  info!("Using API at {}", config.api.base_url);

  let mut session = Session::from_config(&config, args.ephemeral)?;
  run(&mut session, args.command).await
}

async fn run(session: &mut Session, command: Command) -> Result<()> {
  match command {
    Command::Pokemon { identifier, json } => {
      let pokemon = session.pokemon.ensure_pokemon(identifier.as_str()).await?;
      if json {
        print_json(&*pokemon)
      } else {
        print_pokemon(&pokemon, session.favorites.is_favorite(pokemon.id));
        Ok(())
      }
    }
    Command::Species { identifier } => {
      print_json(&*session.pokemon.ensure_species(identifier.as_str()).await?)
    }
    Command::Type { identifier } => {
      print_json(&*session.pokemon.ensure_type(identifier.as_str()).await?)
    }
    Command::Move { identifier } => {
      print_json(&*session.catalog.ensure_move(identifier.as_str()).await?)
    }
    Command::Ability { identifier } => {
      print_json(&*session.catalog.ensure_ability(identifier.as_str()).await?)
    }
    Command::Item { identifier } => {
      print_json(&*session.catalog.ensure_item(identifier.as_str()).await?)
    }
    Command::Location { identifier } => {
      print_json(&*session.catalog.ensure_location(identifier.as_str()).await?)
    }
    Command::Area { identifier } => {
      let area = session.catalog.ensure_location_area(identifier.as_str()).await?;
      print_json(&*area)
    }
    Command::Evolution { species } => {
      match session
        .pokemon
        .ensure_evolution_chain_for_species(species.as_str())
        .await?
      {
        Some(chain) => println!("{}", chain.chain.species_names().join(" -> ")),
        None => println!("{} has no evolution chain", species),
      }
      Ok(())
    }
    Command::Encounters { identifier } => {
      let encounters = session
        .pokemon
        .ensure_pokemon_encounters(identifier.as_str(), None)
        .await?;
      if encounters.areas.is_empty() {
        println!("No known encounter areas");
      }
      for area in &encounters.areas {
        println!("{}", area.location_area.name);
      }
      Ok(())
    }
    Command::List {
      kind,
      limit,
      offset,
    } => {
      let query = ListQuery { limit, offset };
      let list = match kind {
        ListKind::Pokemon => session.pokemon.fetch_pokemon_list(query).await?,
        ListKind::Moves => session.catalog.fetch_move_list(query).await?,
        ListKind::Locations => session.catalog.fetch_location_list(query).await?,
      };
      println!("{} of {} ({})", list.results.results.len(), list.results.count, list.params_key);
      for entry in &list.results.results {
        println!("{}", format_resource(entry));
      }
      Ok(())
    }
    Command::Favorite { action } => run_favorite(session, action),
    Command::Team { action } => run_team(session, action),
    Command::Theme { theme } => {
      if let Some(theme) = theme {
        session.ui.set_theme(theme);
      }
      println!("{:?}", session.ui.theme());
      Ok(())
    }
  }
}

fn run_favorite(session: &mut Session, action: FavoriteAction) -> Result<()> {
  let favorites = &mut session.favorites;
  match action {
    FavoriteAction::Toggle { id } => {
      if favorites.toggle(id) {
        println!("Added {} to favorites", id);
      } else {
        println!("Removed {} from favorites", id);
      }
    }
    FavoriteAction::Remove { id } => favorites.remove(id),
    FavoriteAction::Clear => favorites.clear(),
    FavoriteAction::Show => {
      println!("{} favorite(s)", favorites.total());
      for id in favorites.ids() {
        println!("{}", id);
      }
    }
  }
  Ok(())
}

fn run_team(session: &mut Session, action: TeamAction) -> Result<()> {
  let favorites = &mut session.favorites;
  match action {
    TeamAction::Add { id } => favorites.add_to_team(id),
    TeamAction::Set { slot, id } => favorites.set_team_slot(slot_index(slot)?, id),
    TeamAction::Swap { a, b } => favorites.swap_team_slots(slot_index(a)?, slot_index(b)?),
    TeamAction::Remove { id } => favorites.remove_from_team(id),
    TeamAction::Clear => favorites.clear_team(),
    TeamAction::Show => {}
  }

  for (index, slot) in favorites.team().iter().enumerate() {
    match slot {
      Some(id) => println!("{}. {}", index + 1, id),
      None => println!("{}. -", index + 1),
    }
  }
  Ok(())
}

/// Slots are numbered from 1 on the command line.
fn slot_index(slot: usize) -> Result<usize> {
  if (1..=TEAM_SIZE).contains(&slot) {
    Ok(slot - 1)
  } else {
    Err(eyre!("Team slot must be between 1 and {}, got {}", TEAM_SIZE, slot))
  }
}

fn print_pokemon(pokemon: &Pokemon, is_favorite: bool) {
  let types: Vec<&str> = pokemon
    .types
    .iter()
    .map(|slot| slot.type_ref.name.as_str())
    .collect();

  println!(
    "#{} {}{}",
    pokemon.id,
    pokemon.name,
    if is_favorite { " *" } else { "" }
  );
  println!("types:  {}", types.join(", "));
  println!("height: {}  weight: {}", pokemon.height, pokemon.weight);
  for stat in &pokemon.stats {
    println!("{:>16} {}", stat.stat.name, stat.base_stat);
  }
  println!("image:  {}", media::preferred_image_url(pokemon));
  println!("sprite: {}", media::fallback_sprite_url(pokemon.id));
}

fn format_resource(resource: &NamedApiResource) -> String {
  match pokedex::api::types::resource_id(&resource.url) {
    Some(id) => format!("{:>5}  {}", id, resource.name),
    None => format!("{:>5}  {}", "-", resource.name),
  }
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
  let json = serde_json::to_string_pretty(value).map_err(|e| eyre!("Failed to format record: {}", e))?;
  println!("{}", json);
  Ok(())
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_slot_index_is_one_based() {
    assert_eq!(slot_index(1).unwrap(), 0);
    assert_eq!(slot_index(6).unwrap(), 5);
    assert!(slot_index(0).is_err());
    assert!(slot_index(7).is_err());
  }

  #[test]
  fn test_args_parse() {
    let args = Args::try_parse_from(["pokedex", "--ephemeral", "list", "moves", "--limit", "10"]).unwrap();
    assert!(args.ephemeral);
    assert!(matches!(
      args.command,
      Command::List {
        kind: ListKind::Moves,
        limit: Some(10),
        offset: None
      }
    ));

    let args = Args::try_parse_from(["pokedex", "theme", "dark"]).unwrap();
    assert!(matches!(args.command, Command::Theme { theme: Some(Theme::Dark) }));
  }
}
