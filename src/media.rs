//! Image URLs for pokemon artwork.

use crate::api::types::Pokemon;

const SPRITES_BASE: &str = "https://raw.githubusercontent.com/PokeAPI/sprites/master/sprites/pokemon";

pub fn official_artwork_url(id: u32) -> String {
  format!("{}/other/official-artwork/{}.png", SPRITES_BASE, id)
}

pub fn fallback_sprite_url(id: u32) -> String {
  format!("{}/{}.png", SPRITES_BASE, id)
}

/// Best image for a record: the artwork it lists, then its front sprite, then the
/// conventional artwork path for its id.
pub fn preferred_image_url(pokemon: &Pokemon) -> String {
  pokemon
    .sprites
    .other
    .as_ref()
    .and_then(|other| other.get("official-artwork"))
    .and_then(|artwork| artwork.get("front_default"))
    .and_then(|url| url.as_str())
    .map(str::to_string)
    .or_else(|| pokemon.sprites.front_default.clone())
    .unwrap_or_else(|| official_artwork_url(pokemon.id))
}

#[cfg(test)]
mod tests {
  use super::*;
  use serde_json::json;

  #[test]
  fn test_urls_for_id() {
    assert_eq!(
      official_artwork_url(25),
      "https://raw.githubusercontent.com/PokeAPI/sprites/master/sprites/pokemon/other/official-artwork/25.png"
    );
    assert_eq!(
      fallback_sprite_url(25),
      "https://raw.githubusercontent.com/PokeAPI/sprites/master/sprites/pokemon/25.png"
    );
  }

  #[test]
  fn test_preferred_image_order() {
    let mut pokemon: Pokemon = serde_json::from_value(json!({"id": 4, "name": "charmander"})).unwrap();
    assert_eq!(preferred_image_url(&pokemon), official_artwork_url(4));

    pokemon.sprites.front_default = Some("front.png".to_string());
    assert_eq!(preferred_image_url(&pokemon), "front.png");

    pokemon.sprites.other = Some(json!({"official-artwork": {"front_default": "art.png"}}));
    assert_eq!(preferred_image_url(&pokemon), "art.png");
  }
}
