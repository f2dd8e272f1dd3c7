//! Presentation preferences and transient notifications.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

use super::favorites::{read_json, write_json};
use crate::storage::Storage;

pub const UI_KEY: &str = "pokedex:ui";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
  #[default]
  System,
  Light,
  Dark,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LayoutDensity {
  #[default]
  Comfortable,
  Compact,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ToastVariant {
  #[default]
  Info,
  Success,
  Warning,
  Error,
}

/// Payload for [`UiStore::show_toast`]. A missing id is generated.
#[derive(Debug, Clone, Default)]
pub struct ToastRequest {
  pub id: Option<String>,
  pub title: String,
  pub description: Option<String>,
  pub variant: ToastVariant,
  pub auto_close_ms: Option<u64>,
}

impl ToastRequest {
  pub fn new(title: impl Into<String>, variant: ToastVariant) -> Self {
    Self {
      title: title.into(),
      variant,
      ..Default::default()
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
  pub id: String,
  pub title: String,
  pub description: Option<String>,
  pub variant: ToastVariant,
  pub created_at: DateTime<Utc>,
  pub auto_close_ms: Option<u64>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct PersistedPreferences {
  #[serde(default)]
  theme: Theme,
  #[serde(default)]
  layout_density: LayoutDensity,
}

pub struct UiStore {
  storage: Arc<dyn Storage>,
  theme: Theme,
  layout_density: LayoutDensity,
  command_palette_open: bool,
  loading_overlay_visible: bool,
  toasts: Vec<Toast>,
  hydrated: bool,
}

impl UiStore {
  pub fn new(storage: Arc<dyn Storage>) -> Self {
    Self {
      storage,
      theme: Theme::default(),
      layout_density: LayoutDensity::default(),
      command_palette_open: false,
      loading_overlay_visible: false,
      toasts: Vec::new(),
      hydrated: false,
    }
  }

  /// Load persisted theme and density. Only the first call has any effect.
  pub fn hydrate(&mut self) {
    if self.hydrated {
      return;
    }
    let prefs = read_json::<PersistedPreferences>(self.storage.as_ref(), UI_KEY).unwrap_or_default();
    self.theme = prefs.theme;
    self.layout_density = prefs.layout_density;
    self.hydrated = true;
  }

  pub fn theme(&mut self) -> Theme {
    self.hydrate();
    self.theme
  }

  pub fn layout_density(&mut self) -> LayoutDensity {
    self.hydrate();
    self.layout_density
  }

  /// `System` defers to the platform preference supplied by the caller.
  pub fn is_dark(&mut self, system_prefers_dark: bool) -> bool {
    match self.theme() {
      Theme::Dark => true,
      Theme::Light => false,
      Theme::System => system_prefers_dark,
    }
  }

  pub fn set_theme(&mut self, theme: Theme) {
    self.hydrate();
    self.theme = theme;
    self.persist();
  }

  pub fn set_layout_density(&mut self, density: LayoutDensity) {
    self.hydrate();
    self.layout_density = density;
    self.persist();
  }

  pub fn is_command_palette_open(&self) -> bool {
    self.command_palette_open
  }

  /// Flip the palette, or force it to the given state.
  pub fn toggle_command_palette(&mut self, force: Option<bool>) {
    self.command_palette_open = force.unwrap_or(!self.command_palette_open);
  }

  pub fn is_loading_overlay_visible(&self) -> bool {
    self.loading_overlay_visible
  }

  pub fn set_loading_overlay(&mut self, visible: bool) {
    self.loading_overlay_visible = visible;
  }

  pub fn toasts(&self) -> &[Toast] {
    &self.toasts
  }

  /// Queue a toast and return its id.
  pub fn show_toast(&mut self, request: ToastRequest) -> String {
    let id = request.id.unwrap_or_else(|| Uuid::new_v4().to_string());
    self.toasts.push(Toast {
      id: id.clone(),
      title: request.title,
      description: request.description,
      variant: request.variant,
      created_at: Utc::now(),
      auto_close_ms: request.auto_close_ms,
    });
    id
  }

  pub fn dismiss_toast(&mut self, id: &str) {
    self.toasts.retain(|toast| toast.id != id);
  }

  pub fn clear_toasts(&mut self) {
    self.toasts.clear();
  }

  fn persist(&self) {
    let prefs = PersistedPreferences {
      theme: self.theme,
      layout_density: self.layout_density,
    };
    write_json(self.storage.as_ref(), UI_KEY, &prefs);
  }
}
