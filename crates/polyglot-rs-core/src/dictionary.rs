//! Nested phrase dictionaries.
//!
//! A [`Dictionary`] is the shape translation files are authored in: a map
//! whose values are either a phrase template ([`PhraseNode::Leaf`]) or another
//! dictionary ([`PhraseNode::Node`]). The [`PhraseStore`](crate::phrases::PhraseStore)
//! flattens it into dotted keys.
//!
//! ## JSON Format
//!
//! ```json
//! {
//!   "nav": { "home": "Home", "settings": "Settings" },
//!   "items": "%{smart_count} item |||| %{smart_count} items"
//! }
//! ```
//!
//! Only strings and objects are accepted. Numbers, booleans, arrays and
//! `null` are rejected with [`I18nError::InvalidDictionary`].

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{I18nError, I18nResult};

/// A single dictionary value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PhraseNode {
    /// A phrase template.
    Leaf(String),
    /// A nested dictionary whose keys are joined to the parent with `.`.
    Node(Dictionary),
}

impl From<&str> for PhraseNode {
    fn from(phrase: &str) -> Self {
        Self::Leaf(phrase.to_string())
    }
}

impl From<String> for PhraseNode {
    fn from(phrase: String) -> Self {
        Self::Leaf(phrase)
    }
}

impl From<Dictionary> for PhraseNode {
    fn from(dictionary: Dictionary) -> Self {
        Self::Node(dictionary)
    }
}

/// A nested tree of phrase templates.
///
/// # Examples
///
/// ```
/// use polyglot_rs_core::dictionary::Dictionary;
///
/// let dict = Dictionary::new()
///     .leaf("title", "Inbox")
///     .node("greeting", Dictionary::new().leaf("morning", "Good morning"));
///
/// let flat = dict.flatten(None);
/// assert_eq!(flat.len(), 2);
/// assert!(flat.contains(&("greeting.morning".to_string(), "Good morning".to_string())));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Dictionary {
    entries: BTreeMap<String, PhraseNode>,
}

impl Dictionary {
    /// Creates an empty dictionary.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a phrase template under `key`.
    #[must_use]
    pub fn leaf(mut self, key: impl Into<String>, phrase: impl Into<String>) -> Self {
        self.entries
            .insert(key.into(), PhraseNode::Leaf(phrase.into()));
        self
    }

    /// Adds a nested dictionary under `key`.
    #[must_use]
    pub fn node(mut self, key: impl Into<String>, child: Self) -> Self {
        self.entries.insert(key.into(), PhraseNode::Node(child));
        self
    }

    /// Inserts a value, replacing any previous value for `key`.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<PhraseNode>) {
        self.entries.insert(key.into(), value.into());
    }

    /// Deep-merges `other` into `self`. Nested dictionaries are merged key by
    /// key; any other collision is won by `other`.
    pub fn merge(&mut self, other: Self) {
        for (key, node) in other.entries {
            if let (Some(PhraseNode::Node(existing)), PhraseNode::Node(incoming)) =
                (self.entries.get_mut(&key), &node)
            {
                existing.merge(incoming.clone());
                continue;
            }
            self.entries.insert(key, node);
        }
    }

    /// Returns the value stored directly under `key`.
    pub fn get(&self, key: &str) -> Option<&PhraseNode> {
        self.entries.get(key)
    }

    /// Number of direct entries (not leaves).
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the dictionary has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over the direct entries in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &PhraseNode)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Parses a dictionary from a JSON document.
    pub fn from_json_str(json_str: &str) -> I18nResult<Self> {
        let value: serde_json::Value = serde_json::from_str(json_str)
            .map_err(|e| I18nError::InvalidDictionary(format!("Invalid JSON: {e}")))?;
        Self::from_value(&value)
    }

    /// Reads and parses a JSON dictionary file.
    pub fn from_file(path: impl AsRef<Path>) -> I18nResult<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&content).map_err(|e| match e {
            I18nError::InvalidDictionary(msg) => I18nError::InvalidDictionary(format!(
                "{}: {msg}",
                path.as_ref().display()
            )),
            other => other,
        })
    }

    /// Converts an already-parsed JSON value.
    ///
    /// The root must be an object. Errors name the dotted path of the
    /// offending value.
    pub fn from_value(value: &serde_json::Value) -> I18nResult<Self> {
        match value {
            serde_json::Value::Object(map) => Self::from_map(map, None),
            other => Err(I18nError::InvalidDictionary(format!(
                "expected an object at the root, found {}",
                kind(other)
            ))),
        }
    }

    fn from_map(
        map: &serde_json::Map<String, serde_json::Value>,
        prefix: Option<&str>,
    ) -> I18nResult<Self> {
        let mut dict = Self::new();
        for (key, value) in map {
            let path = join_key(prefix, key);
            let node = match value {
                serde_json::Value::String(s) => PhraseNode::Leaf(s.clone()),
                serde_json::Value::Object(child) => {
                    PhraseNode::Node(Self::from_map(child, Some(&path))?)
                }
                other => {
                    return Err(I18nError::InvalidDictionary(format!(
                        "{path}: expected a string or an object, found {}",
                        kind(other)
                    )))
                }
            };
            dict.entries.insert(key.clone(), node);
        }
        Ok(dict)
    }

    /// Returns every `(dotted key, phrase)` pair this tree contributes when
    /// extended under `prefix`.
    pub fn flatten(&self, prefix: Option<&str>) -> Vec<(String, String)> {
        let mut out = Vec::new();
        self.for_each_leaf(prefix, &mut |key, phrase| {
            out.push((key, phrase.to_string()));
        });
        out
    }

    pub(crate) fn for_each_leaf<F>(&self, prefix: Option<&str>, f: &mut F)
    where
        F: FnMut(String, &str),
    {
        for (key, node) in &self.entries {
            let full_key = join_key(prefix, key);
            match node {
                PhraseNode::Leaf(phrase) => f(full_key, phrase),
                PhraseNode::Node(child) => child.for_each_leaf(Some(&full_key), f),
            }
        }
    }
}

impl<K, V> FromIterator<(K, V)> for Dictionary
where
    K: Into<String>,
    V: Into<PhraseNode>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// Joins a key onto a prefix. An empty prefix counts as no prefix.
pub(crate) fn join_key(prefix: Option<&str>, key: &str) -> String {
    match prefix {
        Some(p) if !p.is_empty() => format!("{p}.{key}"),
        _ => key.to_string(),
    }
}

const fn kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}
