//! Domain stores built on the cache layer and local storage.

mod cacheable;
mod catalog;
mod favorites;
mod filters;
mod pokemon;
mod ui;

pub use catalog::CatalogStore;
pub use favorites::{FavoritesStore, TeamSlots, FAVORITES_KEY, TEAM_KEY, TEAM_SIZE};
pub use filters::{
  FilterQuery, FilterStore, Pagination, PaginationUpdate, SortDirection, SortField,
  DEFAULT_PAGE_LIMIT,
};
pub use pokemon::PokemonStore;
pub use ui::{LayoutDensity, Theme, Toast, ToastRequest, ToastVariant, UiStore, UI_KEY};
