use std::collections::HashMap;

use super::{KeyValueStore, StorageResult, Write};

/// A store that lives only as long as the process.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store pre-populated with raw entries.
    pub fn with_entries<K, V>(entries: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            entries: entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    pub(super) fn apply_in_place(entries: &mut HashMap<String, String>, writes: Vec<Write>) {
        for write in writes {
            match write {
                Write::Set(key, value) => {
                    entries.insert(key, value);
                }
                Write::Remove(key) => {
                    entries.remove(&key);
                }
            }
        }
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn apply(&mut self, writes: Vec<Write>) -> StorageResult<()> {
        Self::apply_in_place(&mut self.entries, writes);
        Ok(())
    }
}
