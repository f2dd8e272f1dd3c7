//! Identifier normalization and key construction.

use std::fmt;

use super::error::FetchError;

/// Identifier as supplied by a caller: a numeric id or free-form text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Identifier {
  Id(u32),
  Text(String),
}

impl From<u32> for Identifier {
  fn from(id: u32) -> Self {
    Identifier::Id(id)
  }
}

impl From<&str> for Identifier {
  fn from(text: &str) -> Self {
    Identifier::Text(text.to_string())
  }
}

impl From<String> for Identifier {
  fn from(text: String) -> Self {
    Identifier::Text(text)
  }
}

impl From<&String> for Identifier {
  fn from(text: &String) -> Self {
    Identifier::Text(text.clone())
  }
}

impl From<CacheKey> for Identifier {
  fn from(key: CacheKey) -> Self {
    match key {
      CacheKey::Id(id) => Identifier::Id(id),
      CacheKey::Name(name) => Identifier::Text(name),
    }
  }
}

/// Normalized lookup key: a numeric id or a lower-cased name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CacheKey {
  Id(u32),
  Name(String),
}

impl CacheKey {
  pub fn id(&self) -> Option<u32> {
    match self {
      CacheKey::Id(id) => Some(*id),
      CacheKey::Name(_) => None,
    }
  }
}

impl fmt::Display for CacheKey {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      CacheKey::Id(id) => write!(f, "{}", id),
      CacheKey::Name(name) => f.write_str(name),
    }
  }
}

impl Identifier {
  /// Canonicalize into a [`CacheKey`].
  ///
  /// Text that trims to an integral, non-negative number becomes a numeric key
  /// (`" 25 "`, `"25.0"`); any other non-empty text becomes a lower-cased name key.
  pub fn normalize(&self) -> Result<CacheKey, FetchError> {
    match self {
      Identifier::Id(id) => Ok(CacheKey::Id(*id)),
      Identifier::Text(text) => {
        let trimmed = text.trim();
        if trimmed.is_empty() {
          return Err(FetchError::EmptyIdentifier);
        }
        match parse_numeric(trimmed) {
          Some(id) => Ok(CacheKey::Id(id)),
          None => Ok(CacheKey::Name(text.to_lowercase())),
        }
      }
    }
  }
}

fn parse_numeric(text: &str) -> Option<u32> {
  if let Ok(id) = text.parse::<u32>() {
    return Some(id);
  }

  let value = text.parse::<f64>().ok()?;
  let integral = value.is_finite() && value.fract() == 0.0;
  if integral && value >= 0.0 && value <= f64::from(u32::MAX) {
    Some(value as u32)
  } else {
    None
  }
}

/// Status bookkeeping key: `"<resource>:<key>"`, lower-cased.
pub fn status_key(resource: &str, key: impl fmt::Display) -> String {
  format!("{}:{}", resource, key).to_lowercase()
}

#[cfg(test)]
mod tests {
  use super::*;

  fn normalize(identifier: impl Into<Identifier>) -> CacheKey {
    identifier.into().normalize().unwrap()
  }

  #[test]
  fn test_integer_is_numeric_key() {
    assert_eq!(normalize(25u32), CacheKey::Id(25));
  }

  #[test]
  fn test_numeric_string_is_numeric_key() {
    assert_eq!(normalize("1"), CacheKey::Id(1));
    assert_eq!(normalize(" 42 "), CacheKey::Id(42));
    assert_eq!(normalize("7.0"), CacheKey::Id(7));
  }

  #[test]
  fn test_name_is_lowercased() {
    assert_eq!(normalize("Pikachu"), CacheKey::Name("pikachu".to_string()));
    assert_eq!(normalize("EMBER"), CacheKey::Name("ember".to_string()));
  }

  #[test]
  fn test_non_integral_numbers_are_names() {
    assert_eq!(normalize("1.5"), CacheKey::Name("1.5".to_string()));
    assert_eq!(normalize("-3"), CacheKey::Name("-3".to_string()));
    assert_eq!(normalize("mr-mime"), CacheKey::Name("mr-mime".to_string()));
  }

  #[test]
  fn test_empty_identifier_is_rejected() {
    assert!(matches!(
      Identifier::from("   ").normalize(),
      Err(FetchError::EmptyIdentifier)
    ));
  }

  #[test]
  fn test_status_key() {
    assert_eq!(status_key("pokemon", CacheKey::Id(1)), "pokemon:1");
    assert_eq!(status_key("Type", "Fire"), "type:fire");
  }
}
