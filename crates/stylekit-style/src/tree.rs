//! Style trees: ordered string-keyed maps of numbers, strings, and subtrees.
//!
//! Insertion order is part of a tree's meaning. Grayscale conversion tracks
//! the most recent background it saw, so a `backgroundColor` that precedes a
//! `color` influences it and not the other way around.

use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A leaf or nested value in a [`StyleTree`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StyleValue {
    Number(f64),
    Text(String),
    Tree(StyleTree),
}

impl StyleValue {
    #[must_use]
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_tree(&self) -> Option<&StyleTree> {
        match self {
            Self::Tree(t) => Some(t),
            _ => None,
        }
    }
}

impl From<f64> for StyleValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<i32> for StyleValue {
    fn from(value: i32) -> Self {
        Self::Number(f64::from(value))
    }
}

impl From<&str> for StyleValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<String> for StyleValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<StyleTree> for StyleValue {
    fn from(value: StyleTree) -> Self {
        Self::Tree(value)
    }
}

/// Ordered style mapping. Keys are unique; re-inserting a key keeps its
/// original position.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct StyleTree {
    entries: Vec<(String, StyleValue)>,
}

impl StyleTree {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Insert or replace, returning the previous value.
    pub fn insert(
        &mut self,
        key: impl Into<String>,
        value: impl Into<StyleValue>,
    ) -> Option<StyleValue> {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, slot)) => Some(std::mem::replace(slot, value)),
            None => {
                self.entries.push((key, value));
                None
            }
        }
    }

    /// Builder form of [`insert`](Self::insert).
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<StyleValue>) -> Self {
        self.insert(key, value);
        self
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&StyleValue> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    /// Walk nested trees by key path.
    #[must_use]
    pub fn get_path(&self, path: &[&str]) -> Option<&StyleValue> {
        let (last, parents) = path.split_last()?;
        let mut tree = self;
        for key in parents {
            tree = tree.get(key)?.as_tree()?;
        }
        tree.get(last)
    }

    pub fn remove(&mut self, key: &str) -> Option<StyleValue> {
        let idx = self.entries.iter().position(|(k, _)| k == key)?;
        Some(self.entries.remove(idx).1)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &StyleValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Rebuild the tree by mapping every entry, keeping order.
    pub fn map_entries<F>(&self, mut f: F) -> Self
    where
        F: FnMut(&str, &StyleValue) -> StyleValue,
    {
        self.entries
            .iter()
            .map(|(k, v)| (k.clone(), f(k, v)))
            .collect()
    }
}

impl<K, V> FromIterator<(K, V)> for StyleTree
where
    K: Into<String>,
    V: Into<StyleValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut tree = Self::new();
        for (k, v) in iter {
            tree.insert(k, v);
        }
        tree
    }
}

impl IntoIterator for StyleTree {
    type Item = (String, StyleValue);
    type IntoIter = std::vec::IntoIter<(String, StyleValue)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl Serialize for StyleTree {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (k, v) in &self.entries {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

struct TreeVisitor;

impl<'de> Visitor<'de> for TreeVisitor {
    type Value = StyleTree;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a style object")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut tree = StyleTree::new();
        while let Some((key, value)) = access.next_entry::<String, StyleValue>()? {
            tree.insert(key, value);
        }
        Ok(tree)
    }
}

impl<'de> Deserialize<'de> for StyleTree {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(TreeVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> StyleTree {
        StyleTree::new()
            .with("backgroundColor", "#000")
            .with("padding", 16)
            .with("text", StyleTree::new().with("color", "#fff"))
    }

    #[test]
    fn insertion_order_is_preserved() {
        let keys: Vec<_> = sample().keys().map(str::to_owned).collect();
        assert_eq!(keys, ["backgroundColor", "padding", "text"]);
    }

    #[test]
    fn reinsert_keeps_position() {
        let mut tree = sample();
        let old = tree.insert("backgroundColor", "#111");
        assert_eq!(old, Some(StyleValue::from("#000")));
        assert_eq!(tree.keys().next(), Some("backgroundColor"));
        assert_eq!(tree.len(), 3);
    }

    #[test]
    fn path_lookup() {
        let tree = sample();
        assert_eq!(
            tree.get_path(&["text", "color"]).and_then(StyleValue::as_text),
            Some("#fff")
        );
        assert_eq!(tree.get_path(&["padding", "x"]), None);
        assert_eq!(tree.get_path(&[]), None);
    }

    #[test]
    fn remove_and_contains() {
        let mut tree = sample();
        assert!(tree.contains_key("padding"));
        assert_eq!(tree.remove("padding"), Some(StyleValue::Number(16.0)));
        assert!(!tree.contains_key("padding"));
        assert_eq!(tree.remove("padding"), None);
    }

    #[test]
    fn json_round_trip_keeps_order() {
        let json = r##"{"zIndex":2,"color":"#fff","nested":{"b":1,"a":"x"}}"##;
        let tree: StyleTree = serde_json::from_str(json).unwrap();
        let keys: Vec<_> = tree.keys().collect();
        assert_eq!(keys, ["zIndex", "color", "nested"]);
        let nested: Vec<_> = tree.get("nested").unwrap().as_tree().unwrap().keys().collect();
        assert_eq!(nested, ["b", "a"]);
        let again: StyleTree =
            serde_json::from_str(&serde_json::to_string(&tree).unwrap()).unwrap();
        assert_eq!(again, tree);
    }

    #[test]
    fn map_entries_preserves_keys() {
        let doubled = sample().map_entries(|_, v| match v {
            StyleValue::Number(n) => StyleValue::Number(n * 2.0),
            other => other.clone(),
        });
        assert_eq!(doubled.get("padding"), Some(&StyleValue::Number(32.0)));
        assert_eq!(doubled.get("backgroundColor"), sample().get("backgroundColor"));
    }
}
