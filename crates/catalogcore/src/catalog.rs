//! In-memory catalog: channel id → product code → product name
//!
//! `ProductMap` keeps entries in insertion order, and its serde impls write
//! and read them in that order, so `/list` output is stable across restarts.
//! On disk a product map is a JSON object whose keys are the codes as strings.

use std::collections::BTreeMap;
use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Products of a single channel, unique by code, in insertion order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductMap {
    entries: Vec<(i64, String)>,
}

impl ProductMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn position(&self, code: i64) -> Option<usize> {
        self.entries.iter().position(|(c, _)| *c == code)
    }

    pub fn contains(&self, code: i64) -> bool {
        self.position(code).is_some()
    }

    pub fn get(&self, code: i64) -> Option<&str> {
        self.position(code).map(|i| self.entries[i].1.as_str())
    }

    /// Appends the product unless the code is taken.
    ///
    /// Returns `false` and leaves the existing name untouched when the code
    /// is already present.
    pub fn insert_new(&mut self, code: i64, name: impl Into<String>) -> bool {
        if self.contains(code) {
            return false;
        }
        self.entries.push((code, name.into()));
        true
    }

    /// Removes the product and returns its name; the remaining entries keep their order.
    pub fn remove(&mut self, code: i64) -> Option<String> {
        self.position(code).map(|i| self.entries.remove(i).1)
    }

    /// Entries as `(code, name)` in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (i64, &str)> + '_ {
        self.entries.iter().map(|(code, name)| (*code, name.as_str()))
    }

    // Last value wins, first position is kept.
    fn upsert(&mut self, code: i64, name: String) {
        match self.position(code) {
            Some(i) => self.entries[i].1 = name,
            None => self.entries.push((code, name)),
        }
    }
}

impl FromIterator<(i64, String)> for ProductMap {
    fn from_iter<I: IntoIterator<Item = (i64, String)>>(iter: I) -> Self {
        let mut map = ProductMap::new();
        for (code, name) in iter {
            map.upsert(code, name);
        }
        map
    }
}

impl Serialize for ProductMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.entries.iter().map(|(code, name)| (code, name)))
    }
}

struct ProductMapVisitor;

impl<'de> Visitor<'de> for ProductMapVisitor {
    type Value = ProductMap;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("an object mapping integer product codes to product names")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut map = ProductMap::new();
        while let Some((code, name)) = access.next_entry::<i64, String>()? {
            map.upsert(code, name);
        }
        Ok(map)
    }
}

impl<'de> Deserialize<'de> for ProductMap {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(ProductMapVisitor)
    }
}

/// All channels' products. Channels are kept sorted by id so the file is stable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Catalog {
    channels: BTreeMap<String, ProductMap>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.channels.is_empty()
    }

    pub fn channel(&self, channel_id: &str) -> Option<&ProductMap> {
        self.channels.get(channel_id)
    }

    pub fn channel_mut(&mut self, channel_id: &str) -> Option<&mut ProductMap> {
        self.channels.get_mut(channel_id)
    }

    /// Product map of the channel, created empty on first use
    pub fn channel_entry(&mut self, channel_id: &str) -> &mut ProductMap {
        self.channels.entry(channel_id.to_string()).or_default()
    }

    pub fn channels(&self) -> impl Iterator<Item = (&str, &ProductMap)> + '_ {
        self.channels.iter().map(|(id, products)| (id.as_str(), products))
    }
}
