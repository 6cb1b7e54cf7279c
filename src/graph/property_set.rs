//! Property sets: ordered key/value maps where null means absent
//!
//! Assigning the absent marker (`None` / [`Candidate::Null`]) to a key removes
//! it, so a key is present exactly when it holds a canonical value.

use super::error::{GraphError, GraphResult};
use super::property::{cast_with, Candidate, PropertyValue};
use crate::config::CastConfig;
use indexmap::IndexMap;
use rustc_hash::FxHasher;
use serde::{Deserialize, Serialize, Serializer};
use std::collections::HashMap;
use std::fmt;
use std::hash::{Hash, Hasher};

/// Ordered mapping from property key to canonical value
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(try_from = "IndexMap<String, serde_json::Value>")]
pub struct PropertySet {
    values: IndexMap<String, PropertyValue>,
    config: CastConfig,
}

impl PropertySet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty set that casts with the given bounds
    pub fn with_config(config: CastConfig) -> Self {
        PropertySet {
            values: IndexMap::new(),
            config,
        }
    }

    /// Build a set from key/value pairs, casting every value
    pub fn from_pairs<K, V, I>(pairs: I) -> GraphResult<Self>
    where
        K: Into<String>,
        V: Into<Candidate>,
        I: IntoIterator<Item = (K, V)>,
    {
        let mut set = PropertySet::new();
        set.update(pairs)?;
        Ok(set)
    }

    pub fn config(&self) -> &CastConfig {
        &self.config
    }

    /// Get a property value; unset keys are `None`, never an error
    pub fn get(&self, key: &str) -> Option<&PropertyValue> {
        self.values.get(key)
    }

    /// Set a property value
    ///
    /// The absent marker removes the key. Anything else is cast first; on a
    /// cast failure the set is left unchanged.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Candidate>) -> GraphResult<()> {
        let key = key.into();
        match self.prepare(value.into())? {
            Some(value) => {
                self.values.insert(key, value);
            }
            None => {
                self.values.shift_remove(&key);
            }
        }
        Ok(())
    }

    /// Remove a property, returning its value if it was set
    pub fn remove(&mut self, key: &str) -> Option<PropertyValue> {
        self.values.shift_remove(key)
    }

    /// Clear every key, then apply `set` for each pair
    pub fn replace<K, V, I>(&mut self, pairs: I) -> GraphResult<()>
    where
        K: Into<String>,
        V: Into<Candidate>,
        I: IntoIterator<Item = (K, V)>,
    {
        let prepared = self.prepare_all(pairs)?;
        self.values.clear();
        self.apply(prepared);
        Ok(())
    }

    /// Apply `set` for each pair, merging into the existing keys
    pub fn update<K, V, I>(&mut self, pairs: I) -> GraphResult<()>
    where
        K: Into<String>,
        V: Into<Candidate>,
        I: IntoIterator<Item = (K, V)>,
    {
        let prepared = self.prepare_all(pairs)?;
        self.apply(prepared);
        Ok(())
    }

    /// Return the existing value, or store and return the cast default
    ///
    /// An absent-marker default leaves the set untouched and returns `None`.
    pub fn set_default(
        &mut self,
        key: impl Into<String>,
        default: impl Into<Candidate>,
    ) -> GraphResult<Option<PropertyValue>> {
        let key = key.into();
        if let Some(existing) = self.values.get(&key) {
            return Ok(Some(existing.clone()));
        }
        let value = self.prepare(default.into())?;
        if let Some(value) = &value {
            self.values.insert(key, value.clone());
        }
        Ok(value)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn clear(&mut self) {
        self.values.clear();
    }

    /// Keys in insertion order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    pub fn iter(&self) -> indexmap::map::Iter<'_, String, PropertyValue> {
        self.values.iter()
    }

    fn prepare(&self, candidate: Candidate) -> GraphResult<Option<PropertyValue>> {
        if candidate.is_null() {
            return Ok(None);
        }
        cast_with(&self.config, candidate).map(Some)
    }

    // Cast everything up front so a bad value leaves the set untouched.
    fn prepare_all<K, V, I>(&self, pairs: I) -> GraphResult<Vec<(String, Option<PropertyValue>)>>
    where
        K: Into<String>,
        V: Into<Candidate>,
        I: IntoIterator<Item = (K, V)>,
    {
        pairs
            .into_iter()
            .map(|(key, value)| Ok((key.into(), self.prepare(value.into())?)))
            .collect()
    }

    fn apply(&mut self, prepared: Vec<(String, Option<PropertyValue>)>) {
        for (key, value) in prepared {
            match value {
                Some(value) => {
                    self.values.insert(key, value);
                }
                None => {
                    self.values.shift_remove(&key);
                }
            }
        }
    }
}

impl PartialEq for PropertySet {
    fn eq(&self, other: &Self) -> bool {
        self.values == other.values
    }
}

impl<V> PartialEq<HashMap<String, V>> for PropertySet
where
    V: Clone + Into<Candidate>,
{
    fn eq(&self, other: &HashMap<String, V>) -> bool {
        match PropertySet::from_pairs(other.iter().map(|(k, v)| (k.clone(), v.clone()))) {
            Ok(coerced) => *self == coerced,
            Err(_) => false,
        }
    }
}

// XOR of per-entry hashes, so insertion order never matters.
impl Hash for PropertySet {
    fn hash<H: Hasher>(&self, state: &mut H) {
        let mut combined = 0u64;
        for (key, value) in &self.values {
            let mut hasher = FxHasher::default();
            key.hash(&mut hasher);
            value.hash(&mut hasher);
            combined ^= hasher.finish();
        }
        state.write_u64(combined);
    }
}

impl Serialize for PropertySet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.values.serialize(serializer)
    }
}

impl TryFrom<IndexMap<String, serde_json::Value>> for PropertySet {
    type Error = GraphError;

    fn try_from(map: IndexMap<String, serde_json::Value>) -> GraphResult<Self> {
        PropertySet::from_pairs(map)
    }
}

impl<'a> IntoIterator for &'a PropertySet {
    type Item = (&'a String, &'a PropertyValue);
    type IntoIter = indexmap::map::Iter<'a, String, PropertyValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.iter()
    }
}

impl fmt::Display for PropertySet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, (key, value)) in self.values.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}: {}", key, value)?;
        }
        write!(f, "}}")
    }
}
