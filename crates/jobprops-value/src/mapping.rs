//! Any-keyed mappings
//!
//! Provides [`AnyMapping`], a mapping whose keys are themselves
//! [`DynamicValue`]s. Documents decoded from YAML may carry integer or boolean
//! keys, and auto-vivified nodes use this flavor as well.

use crate::value::DynamicValue;

/// Mapping from [`DynamicValue`] keys to [`DynamicValue`] values
///
/// Keys are compared by value. Iteration follows insertion order, but equality
/// ignores it: two mappings with the same entries are equal regardless of the
/// order the entries were added in.
#[derive(Debug, Clone, Default)]
pub struct AnyMapping {
    entries: Vec<(DynamicValue, DynamicValue)>,
}

impl AnyMapping {
    /// Create an empty mapping
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Number of entries
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the mapping has no entries
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Look up a value by key
    #[must_use]
    pub fn get(&self, key: &DynamicValue) -> Option<&DynamicValue> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    /// Look up a value by key, mutably
    pub fn get_mut(&mut self, key: &DynamicValue) -> Option<&mut DynamicValue> {
        self.entries
            .iter_mut()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }

    /// Look up a value by string key
    ///
    /// Only string keys with the same text match; a key of `1` is not found
    /// by `get_str("1")`.
    #[must_use]
    pub fn get_str(&self, key: &str) -> Option<&DynamicValue> {
        self.entries
            .iter()
            .find(|(k, _)| k.as_str() == Some(key))
            .map(|(_, v)| v)
    }

    /// Look up a value by string key, mutably
    pub fn get_str_mut(&mut self, key: &str) -> Option<&mut DynamicValue> {
        self.entries
            .iter_mut()
            .find(|(k, _)| k.as_str() == Some(key))
            .map(|(_, v)| v)
    }

    /// Check if a string key is present
    #[inline]
    #[must_use]
    pub fn contains_str(&self, key: &str) -> bool {
        self.get_str(key).is_some()
    }

    /// Insert a value, returning the previous value stored at an equal key
    pub fn insert(&mut self, key: DynamicValue, value: DynamicValue) -> Option<DynamicValue> {
        match self.get_mut(&key) {
            Some(slot) => Some(std::mem::replace(slot, value)),
            None => {
                self.entries.push((key, value));
                None
            }
        }
    }

    /// Remove an entry by string key, returning its value
    pub fn remove_str(&mut self, key: &str) -> Option<DynamicValue> {
        let position = self.entries.iter().position(|(k, _)| k.as_str() == Some(key))?;
        Some(self.entries.remove(position).1)
    }

    /// Get the value at a string key, inserting one built by `default` if absent
    pub fn entry_str_or_insert_with(
        &mut self,
        key: &str,
        default: impl FnOnce() -> DynamicValue,
    ) -> &mut DynamicValue {
        let position = match self.entries.iter().position(|(k, _)| k.as_str() == Some(key)) {
            Some(position) => position,
            None => {
                self.entries.push((DynamicValue::from(key), default()));
                self.entries.len() - 1
            }
        };
        &mut self.entries[position].1
    }

    /// Iterate over entries in insertion order
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = (&DynamicValue, &DynamicValue)> {
        self.entries.iter().map(|(k, v)| (k, v))
    }

    /// Iterate over values mutably
    #[inline]
    pub fn values_mut(&mut self) -> impl Iterator<Item = &mut DynamicValue> {
        self.entries.iter_mut().map(|(_, v)| v)
    }
}

impl PartialEq for AnyMapping {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self
                .entries
                .iter()
                .all(|(k, v)| other.get(k).is_some_and(|o| o == v))
    }
}

impl FromIterator<(DynamicValue, DynamicValue)> for AnyMapping {
    fn from_iter<I: IntoIterator<Item = (DynamicValue, DynamicValue)>>(iter: I) -> Self {
        let mut mapping = Self::new();
        for (k, v) in iter {
            mapping.insert(k, v);
        }
        mapping
    }
}

impl IntoIterator for AnyMapping {
    type Item = (DynamicValue, DynamicValue);
    type IntoIter = std::vec::IntoIter<(DynamicValue, DynamicValue)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}
