//! Ordered, key-unique option storage.

use std::{
  collections::HashMap,
  hash::Hash,
};

#[cfg(feature = "serde")]
use serde::{
  Deserialize,
  Deserializer,
  Serialize,
  Serializer,
};

use crate::{
  key::OptionKey,
  value::OptionValue,
};

/// A single named value stored in a bag.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct OptionEntry<K = OptionKey> {
  key:   K,
  #[cfg_attr(feature = "serde", serde(rename = "val"))]
  value: OptionValue,
}

impl<K> OptionEntry<K> {
  pub fn new(key: impl Into<K>, value: impl Into<OptionValue>) -> Self {
    Self {
      key:   key.into(),
      value: value.into(),
    }
  }

  pub fn key(&self) -> &K {
    &self.key
  }

  pub fn value(&self) -> &OptionValue {
    &self.value
  }

  pub fn into_parts(self) -> (K, OptionValue) {
    (self.key, self.value)
  }
}

/// An ordered collection of options with unique keys.
///
/// Entries keep the position at which their key was first set. Setting the
/// key again replaces the value in place, so iteration order is always the
/// order in which distinct keys were introduced.
#[derive(Debug, Clone)]
pub struct OptionBag<K = OptionKey> {
  options: Vec<OptionEntry<K>>,
  index:   HashMap<K, usize>,
}

// The index is derived from `options`, so only the ordered entries matter.
impl<K: PartialEq> PartialEq for OptionBag<K> {
  fn eq(&self, other: &Self) -> bool {
    self.options == other.options
  }
}

impl<K: Eq> Eq for OptionBag<K> {}

impl<K> Default for OptionBag<K> {
  fn default() -> Self {
    Self {
      options: Vec::new(),
      index:   HashMap::new(),
    }
  }
}

impl OptionBag {
  pub fn new() -> Self {
    Self::default()
  }
}

impl<K> OptionBag<K>
where
  K: Eq + Hash + Clone,
{
  /// Build a bag from an existing ordered sequence, rebuilding the index.
  ///
  /// A key that appears more than once keeps its first position and its last
  /// value, exactly as if the sequence had been replayed through `set`.
  pub fn from_options(options: impl IntoIterator<Item = OptionEntry<K>>) -> Self {
    let mut bag = Self::default();
    for entry in options {
      let (key, value) = entry.into_parts();
      bag.set(key, value);
    }
    bag
  }

  pub fn set(&mut self, key: impl Into<K>, value: impl Into<OptionValue>) -> &mut Self {
    let key = key.into();
    let value = value.into();
    match self.index.get(&key) {
      Some(&pos) => self.options[pos].value = value,
      None => {
        self.index.insert(key.clone(), self.options.len());
        self.options.push(OptionEntry { key, value });
      },
    }
    self
  }

  pub fn with_option(mut self, key: impl Into<K>, value: impl Into<OptionValue>) -> Self {
    self.set(key, value);
    self
  }

  pub fn get(&self, key: impl Into<K>) -> Option<&OptionEntry<K>> {
    self
      .index
      .get(&key.into())
      .map(|&pos| &self.options[pos])
  }

  pub fn value(&self, key: impl Into<K>) -> Option<&OptionValue> {
    self.get(key).map(OptionEntry::value)
  }

  pub fn contains_key(&self, key: impl Into<K>) -> bool {
    self.index.contains_key(&key.into())
  }

  /// Copy the value stored under `other_key` in `other` into `own_key`.
  ///
  /// Nothing happens when `other` has no such option.
  pub fn copy_from(
    &mut self,
    other: &impl AsRef<OptionBag<K>>,
    own_key: impl Into<K>,
    other_key: impl Into<K>,
  ) -> &mut Self {
    if let Some(value) = other.as_ref().value(other_key) {
      let value = value.clone();
      self.set(own_key, value);
    }
    self
  }
}

impl<K> OptionBag<K> {
  pub fn len(&self) -> usize {
    self.options.len()
  }

  pub fn is_empty(&self) -> bool {
    self.options.is_empty()
  }

  /// Entries in insertion order.
  pub fn options(&self) -> &[OptionEntry<K>] {
    &self.options
  }

  pub fn iter(&self) -> std::slice::Iter<'_, OptionEntry<K>> {
    self.options.iter()
  }

  pub fn into_options(self) -> Vec<OptionEntry<K>> {
    self.options
  }
}

impl<K> AsRef<OptionBag<K>> for OptionBag<K> {
  fn as_ref(&self) -> &OptionBag<K> {
    self
  }
}

impl<'a, K> IntoIterator for &'a OptionBag<K> {
  type Item = &'a OptionEntry<K>;
  type IntoIter = std::slice::Iter<'a, OptionEntry<K>>;

  fn into_iter(self) -> Self::IntoIter {
    self.iter()
  }
}

impl<K> FromIterator<OptionEntry<K>> for OptionBag<K>
where
  K: Eq + Hash + Clone,
{
  fn from_iter<I: IntoIterator<Item = OptionEntry<K>>>(iter: I) -> Self {
    Self::from_options(iter)
  }
}

#[cfg(feature = "serde")]
impl<K: Serialize> Serialize for OptionBag<K> {
  fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
    self.options.serialize(serializer)
  }
}

#[cfg(feature = "serde")]
impl<'de, K> Deserialize<'de> for OptionBag<K>
where
  K: Deserialize<'de> + Eq + Hash + Clone,
{
  fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
    Vec::<OptionEntry<K>>::deserialize(deserializer).map(Self::from_options)
  }
}
