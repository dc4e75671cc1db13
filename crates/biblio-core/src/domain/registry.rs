use std::collections::HashMap;
use std::hash::Hash;

/// Mapa id -> entidad que conserva el orden de inserción.
///
/// - Reemplazar una clave existente mantiene su posición.
/// - Borrar desplaza el resto (O(n), colecciones pequeñas).
#[derive(Debug, Clone)]
pub struct Registry<K, V> {
  entries: Vec<V>,
  index: HashMap<K, usize>,
}

impl<K, V> Default for Registry<K, V> {
  fn default() -> Self {
    Self { entries: Vec::new(), index: HashMap::new() }
  }
}

impl<K, V> Registry<K, V>
where
  K: Eq + Hash + Clone,
{
  pub fn new() -> Self {
    Self::default()
  }

  pub fn len(&self) -> usize {
    self.entries.len()
  }

  pub fn is_empty(&self) -> bool {
    self.entries.is_empty()
  }

  pub fn contains_key(&self, key: &K) -> bool {
    self.index.contains_key(key)
  }

  pub fn get(&self, key: &K) -> Option<&V> {
    self.index.get(key).map(|&i| &self.entries[i])
  }

  pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
    self.index.get(key).map(|&i| &mut self.entries[i])
  }

  /// Inserta o reemplaza; devuelve el valor anterior si lo había.
  pub fn insert(&mut self, key: K, value: V) -> Option<V> {
    match self.index.get(&key) {
      Some(&i) => Some(std::mem::replace(&mut self.entries[i], value)),
      None => {
        self.index.insert(key, self.entries.len());
        self.entries.push(value);
        None
      }
    }
  }

  pub fn remove(&mut self, key: &K) -> Option<V> {
    let pos = self.index.remove(key)?;
    let removed = self.entries.remove(pos);

    for i in self.index.values_mut() {
      if *i > pos {
        *i -= 1;
      }
    }

    Some(removed)
  }

  pub fn values(&self) -> std::slice::Iter<'_, V> {
    self.entries.iter()
  }

  pub fn values_mut(&mut self) -> std::slice::IterMut<'_, V> {
    self.entries.iter_mut()
  }

  /// Vista contigua, lista para persistir tal cual.
  pub fn as_slice(&self) -> &[V] {
    &self.entries
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn registry(keys: &[&'static str]) -> Registry<&'static str, String> {
    let mut r = Registry::new();
    for k in keys {
      r.insert(*k, k.to_uppercase());
    }
    r
  }

  #[test]
  fn iteration_follows_insertion_order() {
    let r = registry(&["c", "a", "b"]);

    assert_eq!(r.as_slice(), &["C", "A", "B"]);
  }

  #[test]
  fn replace_keeps_position() {
    let mut r = registry(&["c", "a", "b"]);

    let old = r.insert("a", "nuevo".to_string());

    assert_eq!(old.as_deref(), Some("A"));
    assert_eq!(r.as_slice(), &["C", "nuevo", "B"]);
    assert_eq!(r.len(), 3);
  }

  #[test]
  fn remove_shifts_later_entries() {
    let mut r = registry(&["c", "a", "b"]);

    assert_eq!(r.remove(&"c").as_deref(), Some("C"));
    assert_eq!(r.remove(&"zz"), None);

    assert_eq!(r.get(&"a").map(String::as_str), Some("A"));
    assert_eq!(r.get(&"b").map(String::as_str), Some("B"));
    assert!(!r.contains_key(&"c"));
  }

  #[test]
  fn removed_key_can_be_reinserted_at_the_end() {
    let mut r = registry(&["a", "b"]);

    r.remove(&"a");
    r.insert("a", "otra".to_string());

    assert_eq!(r.as_slice(), &["B", "otra"]);
  }
}
