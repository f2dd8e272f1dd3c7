//! Favorite pokemon and the six-slot team, persisted to local storage.

use serde::de::DeserializeOwned;
use std::sync::Arc;
use tracing::warn;

use crate::storage::Storage;

pub const FAVORITES_KEY: &str = "pokedex:favorites";
pub const TEAM_KEY: &str = "pokedex:team";
pub const TEAM_SIZE: usize = 6;

pub type TeamSlots = [Option<u32>; TEAM_SIZE];

/// Durable favorites set and team roster.
///
/// State is loaded lazily on the first call that needs it and written back after
/// every mutation. Storage failures are logged and never surface to the caller.
pub struct FavoritesStore {
  storage: Arc<dyn Storage>,
  ids: Vec<u32>,
  team: TeamSlots,
  hydrated: bool,
}

impl FavoritesStore {
  pub fn new(storage: Arc<dyn Storage>) -> Self {
    Self {
      storage,
      ids: Vec::new(),
      team: [None; TEAM_SIZE],
      hydrated: false,
    }
  }

  /// Load persisted state. Only the first call has any effect.
  pub fn hydrate(&mut self) {
    if self.hydrated {
      return;
    }
    let ids = read_json::<Vec<u32>>(self.storage.as_ref(), FAVORITES_KEY).unwrap_or_default();
    self.ids = dedup_ids(ids);
    self.team = read_json::<Vec<Option<u32>>>(self.storage.as_ref(), TEAM_KEY)
      .map(|slots| normalize_team(&slots))
      .unwrap_or([None; TEAM_SIZE]);
    self.hydrated = true;
  }

  pub fn is_hydrated(&self) -> bool {
    self.hydrated
  }

  // ==========================================================================
  // Favorites
  // ==========================================================================

  /// Favorite ids in the order they were added.
  pub fn ids(&mut self) -> &[u32] {
    self.hydrate();
    &self.ids
  }

  pub fn total(&mut self) -> usize {
    self.hydrate();
    self.ids.len()
  }

  pub fn is_favorite(&mut self, id: u32) -> bool {
    self.hydrate();
    self.ids.contains(&id)
  }

  /// Remove `id` if present, else append it. Returns whether it is now a favorite.
  pub fn toggle(&mut self, id: u32) -> bool {
    self.hydrate();
    let added = if self.ids.contains(&id) {
      self.ids.retain(|value| *value != id);
      false
    } else {
      self.ids.push(id);
      true
    };
    self.persist_favorites();
    added
  }

  pub fn remove(&mut self, id: u32) {
    self.hydrate();
    self.ids.retain(|value| *value != id);
    self.persist_favorites();
  }

  pub fn clear(&mut self) {
    self.hydrate();
    self.ids.clear();
    self.persist_favorites();
  }

  // ==========================================================================
  // Team
  // ==========================================================================

  pub fn team(&mut self) -> TeamSlots {
    self.hydrate();
    self.team
  }

  pub fn team_size(&mut self) -> usize {
    self.hydrate();
    self.team.iter().flatten().count()
  }

  pub fn is_in_team(&mut self, id: u32) -> bool {
    self.hydrate();
    self.team.contains(&Some(id))
  }

  /// Put `id` in the first empty slot, or over the last slot when the team is full.
  /// Does nothing if `id` is already on the team.
  pub fn add_to_team(&mut self, id: u32) {
    self.hydrate();
    if self.team.contains(&Some(id)) {
      return;
    }
    let mut next = self.team;
    let slot = next
      .iter()
      .position(Option::is_none)
      .unwrap_or(TEAM_SIZE - 1);
    next[slot] = Some(id);
    self.replace_team(next);
  }

  /// Assign `slot`. An id already held by another slot moves here, leaving that slot
  /// empty. Out-of-range slots are ignored.
  pub fn set_team_slot(&mut self, slot: usize, id: Option<u32>) {
    self.hydrate();
    if slot >= TEAM_SIZE {
      warn!(slot, "Ignoring out-of-range team slot");
      return;
    }
    let mut next = self.team;
    if let Some(id) = id {
      for other in next.iter_mut().filter(|s| **s == Some(id)) {
        *other = None;
      }
    }
    next[slot] = id;
    self.replace_team(next);
  }

  pub fn swap_team_slots(&mut self, a: usize, b: usize) {
    self.hydrate();
    if a >= TEAM_SIZE || b >= TEAM_SIZE {
      warn!(a, b, "Ignoring out-of-range team swap");
      return;
    }
    let mut next = self.team;
    next.swap(a, b);
    self.replace_team(next);
  }

  pub fn remove_from_team(&mut self, id: u32) {
    self.hydrate();
    let mut next = self.team;
    for slot in next.iter_mut().filter(|s| **s == Some(id)) {
      *slot = None;
    }
    self.replace_team(next);
  }

  pub fn clear_team(&mut self) {
    self.hydrate();
    self.replace_team([None; TEAM_SIZE]);
  }

  fn replace_team(&mut self, next: TeamSlots) {
    self.team = next;
    write_json(self.storage.as_ref(), TEAM_KEY, &self.team);
  }

  fn persist_favorites(&self) {
    write_json(self.storage.as_ref(), FAVORITES_KEY, &self.ids);
  }
}

pub(crate) fn read_json<T: DeserializeOwned>(storage: &dyn Storage, key: &str) -> Option<T> {
  let raw = match storage.get_item(key) {
    Ok(raw) => raw?,
    Err(e) => {
      warn!("Failed to read {} from storage: {}", key, e);
      return None;
    }
  };

  match serde_json::from_str(&raw) {
    Ok(value) => Some(value),
    Err(e) => {
      warn!("Failed to parse {} from storage: {}", key, e);
      None
    }
  }
}

pub(crate) fn write_json<T: serde::Serialize + ?Sized>(storage: &dyn Storage, key: &str, value: &T) {
  let raw = match serde_json::to_string(value) {
    Ok(raw) => raw,
    Err(e) => {
      warn!("Failed to serialize {}: {}", key, e);
      return;
    }
  };

  if let Err(e) = storage.set_item(key, &raw) {
    warn!("Failed to persist {} to storage: {}", key, e);
  }
}

fn dedup_ids(ids: Vec<u32>) -> Vec<u32> {
  let mut unique = Vec::with_capacity(ids.len());
  for id in ids {
    if !unique.contains(&id) {
      unique.push(id);
    }
  }
  unique
}

/// Fit persisted slots to exactly six, clearing repeated ids.
fn normalize_team(slots: &[Option<u32>]) -> TeamSlots {
  let mut team = [None; TEAM_SIZE];
  for (index, slot) in slots.iter().take(TEAM_SIZE).enumerate() {
    if let Some(id) = slot {
      if !team.contains(&Some(*id)) {
        team[index] = Some(*id);
      }
    }
  }
  team
}
