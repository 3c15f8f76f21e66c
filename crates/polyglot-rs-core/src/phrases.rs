//! Flat phrase storage.
//!
//! [`PhraseStore`] keeps the dotted-key view of every dictionary it was
//! extended with. It is owned by exactly one [`Polyglot`](crate::engine::Polyglot)
//! and is only mutated through `&mut` methods, so a shared engine needs an
//! external lock around `extend`, `unset`, `clear` and `replace`.

use std::collections::HashMap;

use crate::dictionary::Dictionary;

/// What [`PhraseStore::unset`] removes.
#[derive(Debug, Clone, Copy)]
pub enum UnsetTarget<'a> {
    /// One exact dotted key. Any prefix is ignored.
    Key(&'a str),
    /// Every leaf the tree would add under the prefix.
    Tree(&'a Dictionary),
}

impl<'a> From<&'a str> for UnsetTarget<'a> {
    fn from(key: &'a str) -> Self {
        Self::Key(key)
    }
}

impl<'a> From<&'a String> for UnsetTarget<'a> {
    fn from(key: &'a String) -> Self {
        Self::Key(key.as_str())
    }
}

impl<'a> From<&'a Dictionary> for UnsetTarget<'a> {
    fn from(tree: &'a Dictionary) -> Self {
        Self::Tree(tree)
    }
}

/// Mapping from dotted key to phrase template.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PhraseStore {
    phrases: HashMap<String, String>,
}

impl PhraseStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Flattens `tree` under `prefix` into the store, overwriting existing keys.
    ///
    /// # Examples
    ///
    /// ```
    /// use polyglot_rs_core::dictionary::Dictionary;
    /// use polyglot_rs_core::phrases::PhraseStore;
    ///
    /// let mut store = PhraseStore::new();
    /// store.extend(&Dictionary::new().leaf("save", "Save"), Some("actions"));
    /// assert_eq!(store.get("actions.save"), Some("Save"));
    /// ```
    pub fn extend(&mut self, tree: &Dictionary, prefix: Option<&str>) {
        tree.for_each_leaf(prefix, &mut |key, phrase| {
            self.phrases.insert(key, phrase.to_string());
        });
    }

    /// Removes a single key or every leaf of a tree. Absent keys are ignored.
    pub fn unset<'a>(&mut self, target: impl Into<UnsetTarget<'a>>, prefix: Option<&str>) {
        match target.into() {
            UnsetTarget::Key(key) => {
                self.phrases.remove(key);
            }
            UnsetTarget::Tree(tree) => tree.for_each_leaf(prefix, &mut |key, _| {
                self.phrases.remove(&key);
            }),
        }
    }

    /// Removes every phrase.
    pub fn clear(&mut self) {
        self.phrases.clear();
    }

    /// Clears the store, then extends it with `tree`.
    pub fn replace(&mut self, tree: &Dictionary) {
        self.clear();
        self.extend(tree, None);
    }

    /// Returns `true` if a phrase is stored under exactly `key`.
    pub fn has(&self, key: &str) -> bool {
        self.phrases.contains_key(key)
    }

    /// Returns the phrase template stored under `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.phrases.get(key).map(String::as_str)
    }

    /// Number of stored phrases.
    pub fn len(&self) -> usize {
        self.phrases.len()
    }

    /// Returns `true` if the store holds no phrases.
    pub fn is_empty(&self) -> bool {
        self.phrases.is_empty()
    }

    /// Returns all keys, sorted.
    pub fn keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self.phrases.keys().map(String::as_str).collect();
        keys.sort_unstable();
        keys
    }

    /// Iterates over `(key, phrase)` pairs in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.phrases.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}
