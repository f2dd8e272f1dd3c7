//! Search, sort and pagination criteria for the browse view.

use serde::Serialize;

pub const DEFAULT_PAGE_LIMIT: u32 = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SortField {
  #[default]
  Id,
  Name,
  BaseExperience,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
  #[default]
  Asc,
  Desc,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Pagination {
  pub limit: u32,
  pub offset: u32,
}

impl Default for Pagination {
  fn default() -> Self {
    Self {
      limit: DEFAULT_PAGE_LIMIT,
      offset: 0,
    }
  }
}

/// Partial pagination change; `None` keeps the current value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PaginationUpdate {
  pub limit: Option<u32>,
  pub offset: Option<u32>,
}

/// Query parameters derived from the current criteria.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilterQuery {
  pub search: Option<String>,
  pub types: Vec<String>,
  pub generations: Vec<String>,
  pub habitats: Vec<String>,
  pub sort_field: SortField,
  pub sort_direction: SortDirection,
  pub limit: u32,
  pub offset: u32,
}

/// Canonical form used for dirty tracking; collections sorted, search trimmed.
#[derive(Serialize)]
struct Snapshot<'a> {
  search_query: String,
  types: Vec<&'a str>,
  generations: Vec<&'a str>,
  habitats: Vec<&'a str>,
  sort_field: SortField,
  sort_direction: SortDirection,
  limit: u32,
  offset: u32,
}

/// Browse criteria with an applied/dirty distinction.
///
/// Changing search, selections or sort resets the page offset to 0; direct pagination
/// updates do not.
#[derive(Debug, Clone)]
pub struct FilterStore {
  search_query: String,
  selected_types: Vec<String>,
  selected_generations: Vec<String>,
  selected_habitats: Vec<String>,
  sort_field: SortField,
  sort_direction: SortDirection,
  pagination: Pagination,
  last_applied_snapshot: String,
}

impl Default for FilterStore {
  fn default() -> Self {
    let mut store = Self {
      search_query: String::new(),
      selected_types: Vec::new(),
      selected_generations: Vec::new(),
      selected_habitats: Vec::new(),
      sort_field: SortField::default(),
      sort_direction: SortDirection::default(),
      pagination: Pagination::default(),
      last_applied_snapshot: String::new(),
    };
    store.last_applied_snapshot = store.snapshot();
    store
  }
}

impl FilterStore {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn search_query(&self) -> &str {
    &self.search_query
  }

  pub fn selected_types(&self) -> &[String] {
    &self.selected_types
  }

  pub fn selected_generations(&self) -> &[String] {
    &self.selected_generations
  }

  pub fn selected_habitats(&self) -> &[String] {
    &self.selected_habitats
  }

  pub fn sort(&self) -> (SortField, SortDirection) {
    (self.sort_field, self.sort_direction)
  }

  pub fn pagination(&self) -> Pagination {
    self.pagination
  }

  /// Search text (if non-blank) plus each selected type, generation and habitat.
  pub fn active_filters_count(&self) -> usize {
    usize::from(!self.search_query.trim().is_empty())
      + self.selected_types.len()
      + self.selected_generations.len()
      + self.selected_habitats.len()
  }

  pub fn query_params(&self) -> FilterQuery {
    let search = self.search_query.trim();
    FilterQuery {
      search: (!search.is_empty()).then(|| search.to_string()),
      types: self.selected_types.clone(),
      generations: self.selected_generations.clone(),
      habitats: self.selected_habitats.clone(),
      sort_field: self.sort_field,
      sort_direction: self.sort_direction,
      limit: self.pagination.limit,
      offset: self.pagination.offset,
    }
  }

  /// Whether the criteria differ from the last applied snapshot.
  pub fn is_dirty(&self) -> bool {
    self.last_applied_snapshot != self.snapshot()
  }

  pub fn set_search_query(&mut self, query: &str) {
    self.search_query = query.to_string();
    self.reset_offset();
  }

  pub fn set_types<S: AsRef<str>>(&mut self, types: &[S]) {
    self.selected_types = lowercase_all(types);
    self.reset_offset();
  }

  pub fn toggle_type(&mut self, type_name: &str) {
    let normalized = type_name.to_lowercase();
    if self.selected_types.contains(&normalized) {
      self.selected_types.retain(|value| *value != normalized);
    } else {
      self.selected_types.push(normalized);
    }
    self.reset_offset();
  }

  pub fn set_generations<S: AsRef<str>>(&mut self, generations: &[S]) {
    self.selected_generations = lowercase_all(generations);
    self.reset_offset();
  }

  pub fn set_habitats<S: AsRef<str>>(&mut self, habitats: &[S]) {
    self.selected_habitats = lowercase_all(habitats);
    self.reset_offset();
  }

  pub fn set_sort(&mut self, field: SortField, direction: SortDirection) {
    self.sort_field = field;
    self.sort_direction = direction;
    self.reset_offset();
  }

  pub fn set_pagination(&mut self, update: PaginationUpdate) {
    if let Some(limit) = update.limit {
      self.pagination.limit = limit;
    }
    if let Some(offset) = update.offset {
      self.pagination.offset = offset;
    }
  }

  /// Restore default criteria. The applied snapshot is left alone.
  pub fn reset_filters(&mut self) {
    self.search_query.clear();
    self.selected_types.clear();
    self.selected_generations.clear();
    self.selected_habitats.clear();
    self.sort_field = SortField::default();
    self.sort_direction = SortDirection::default();
    self.pagination = Pagination::default();
  }

  pub fn reset_offset(&mut self) {
    self.pagination.offset = 0;
  }

  pub fn mark_applied(&mut self) {
    self.last_applied_snapshot = self.snapshot();
  }

  fn snapshot(&self) -> String {
    let snapshot = Snapshot {
      search_query: self.search_query.trim().to_lowercase(),
      types: sorted(&self.selected_types),
      generations: sorted(&self.selected_generations),
      habitats: sorted(&self.selected_habitats),
      sort_field: self.sort_field,
      sort_direction: self.sort_direction,
      limit: self.pagination.limit,
      offset: self.pagination.offset,
    };
    // Plain strings, integers and unit enums always serialize
    serde_json::to_string(&snapshot).unwrap_or_default()
  }
}

fn lowercase_all<S: AsRef<str>>(values: &[S]) -> Vec<String> {
  values.iter().map(|v| v.as_ref().to_lowercase()).collect()
}

fn sorted(values: &[String]) -> Vec<&str> {
  let mut sorted: Vec<&str> = values.iter().map(String::as_str).collect();
  sorted.sort_unstable();
  sorted
}
