//! Core traits for the entity caches.

/// Trait for records that can live in an [`EntityCache`](super::EntityCache).
///
/// A record is stored under every key returned by [`cache_keys`](Cacheable::cache_keys)
/// so a later lookup by id or by name hits the same allocation.
pub trait Cacheable {
  /// Resource name used as the status key prefix (e.g. "pokemon", "move")
  fn resource() -> &'static str;

  /// Message recorded when a fetch fails without a service-provided message.
  fn fallback_message() -> &'static str;

  /// Numeric id assigned by the service.
  fn id(&self) -> u32;

  /// Name of the record, if the resource is named.
  fn name(&self) -> Option<&str> {
    None
  }

  /// Every key this record is reachable under.
  fn cache_keys(&self) -> Vec<String> {
    let mut keys = vec![self.id().to_string()];
    if let Some(name) = self.name() {
      keys.push(name.to_lowercase());
    }
    keys
  }
}
