//! Keyed record lists for index-free editing.
//!
//! Every record in a list section gets a generated key when it enters the
//! editor. Updates and removals address the key, so an edit that was started
//! before another record was removed still lands on the right record.
//! On the wire an `EntryList<T>` is a plain JSON array of `T`.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntryKey(Uuid);

impl EntryKey {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for EntryKey {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for EntryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone)]
pub struct Entry<T> {
    pub key: EntryKey,
    pub value: T,
}

#[derive(Debug, Clone)]
pub struct EntryList<T> {
    entries: Vec<Entry<T>>,
}

impl<T> EntryList<T> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Appends a record and returns the key assigned to it.
    pub fn push(&mut self, value: T) -> EntryKey {
        let key = EntryKey::new();
        self.entries.push(Entry { key, value });
        key
    }

    pub fn get(&self, key: EntryKey) -> Option<&T> {
        self.entries
            .iter()
            .find(|e| e.key == key)
            .map(|e| &e.value)
    }

    pub fn get_mut(&mut self, key: EntryKey) -> Option<&mut T> {
        self.entries
            .iter_mut()
            .find(|e| e.key == key)
            .map(|e| &mut e.value)
    }

    /// Removes the record with `key`. Returns `false` if no such record exists.
    pub fn remove(&mut self, key: EntryKey) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.key != key);
        self.entries.len() != before
    }

    pub fn key_at(&self, index: usize) -> Option<EntryKey> {
        self.entries.get(index).map(|e| e.key)
    }

    pub fn keys(&self) -> Vec<EntryKey> {
        self.entries.iter().map(|e| e.key).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Entry<T>> {
        self.entries.iter()
    }

    pub fn values(&self) -> impl Iterator<Item = &T> {
        self.entries.iter().map(|e| &e.value)
    }
}

impl<T: Clone> EntryList<T> {
    pub fn to_vec(&self) -> Vec<T> {
        self.values().cloned().collect()
    }
}

impl<T> Default for EntryList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> From<Vec<T>> for EntryList<T> {
    fn from(values: Vec<T>) -> Self {
        values.into_iter().collect()
    }
}

impl<T> FromIterator<T> for EntryList<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|value| Entry {
                    key: EntryKey::new(),
                    value,
                })
                .collect(),
        }
    }
}

// Keys are session-local, equality is over the records only.
impl<T: PartialEq> PartialEq for EntryList<T> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.values().zip(other.values()).all(|(a, b)| a == b)
    }
}

impl<T: Serialize> Serialize for EntryList<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.values())
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for EntryList<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let values = Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default();
        Ok(values.into())
    }
}
