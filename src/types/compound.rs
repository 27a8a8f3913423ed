//! Name-keyed compounds.

use std::collections::HashMap;
use std::collections::hash_map;

use super::{NbtString, Tag};

/// A mapping from unique names to tags. Iteration order carries no meaning.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Compound(HashMap<NbtString, Tag>);

impl Compound {
    pub fn new() -> Self {
        Self(HashMap::new())
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self(HashMap::with_capacity(capacity))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, name: impl AsRef<[u8]>) -> Option<&Tag> {
        self.0.get(name.as_ref())
    }

    pub fn get_mut(&mut self, name: impl AsRef<[u8]>) -> Option<&mut Tag> {
        self.0.get_mut(name.as_ref())
    }

    pub fn contains_key(&self, name: impl AsRef<[u8]>) -> bool {
        self.0.contains_key(name.as_ref())
    }

    /// Inserts an entry, returning the tag it replaced.
    pub fn insert(&mut self, name: impl Into<NbtString>, tag: impl Into<Tag>) -> Option<Tag> {
        self.0.insert(name.into(), tag.into())
    }

    pub fn remove(&mut self, name: impl AsRef<[u8]>) -> Option<Tag> {
        self.0.remove(name.as_ref())
    }

    pub fn iter(&self) -> hash_map::Iter<'_, NbtString, Tag> {
        self.0.iter()
    }

    pub fn keys(&self) -> hash_map::Keys<'_, NbtString, Tag> {
        self.0.keys()
    }

    pub fn values(&self) -> hash_map::Values<'_, NbtString, Tag> {
        self.0.values()
    }
}

impl<K: Into<NbtString>, V: Into<Tag>> FromIterator<(K, V)> for Compound {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

impl<'a> IntoIterator for &'a Compound {
    type Item = (&'a NbtString, &'a Tag);
    type IntoIter = hash_map::Iter<'a, NbtString, Tag>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl IntoIterator for Compound {
    type Item = (NbtString, Tag);
    type IntoIter = hash_map::IntoIter<NbtString, Tag>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_replaces() {
        let mut c = Compound::new();
        assert!(c.insert("x", 1i32).is_none());
        assert_eq!(c.insert("x", 2i32), Some(Tag::Int(1)));
        assert_eq!(c.len(), 1);
        assert_eq!(c.get("x"), Some(&Tag::Int(2)));
    }

    #[test]
    fn equality_ignores_insertion_order() {
        let a: Compound = [("a", Tag::Int(1)), ("b", Tag::Int(2))].into_iter().collect();
        let b: Compound = [("b", Tag::Int(2)), ("a", Tag::Int(1))].into_iter().collect();
        assert_eq!(a, b);
    }

    #[test]
    fn remove_and_contains() {
        let mut c = Compound::new();
        c.insert("k", "v");
        assert!(c.contains_key("k"));
        assert_eq!(c.remove("k"), Some(Tag::from("v")));
        assert!(c.is_empty());
    }
}
