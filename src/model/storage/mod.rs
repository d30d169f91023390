//! The key-value storage adapter and the typed layer built on top of it.
//!
//! A [`KeyValueStore`] holds plain strings by key, the way a browser's local
//! storage does. Everything the election persists goes through
//! [`TypedStore`], which gives each key an explicit schema via
//! [`StoredValue`] and validates it on read.

use std::io::Error as IoError;

use rocket::serde::json::serde_json::{self, Error as JsonError};
use serde::{de::DeserializeOwned, Serialize};
use thiserror::Error;

mod file;
mod memory;
mod shared;

pub use file::FileStore;
pub use memory::MemoryStore;
pub use shared::SharedStore;

pub type StorageResult<T> = std::result::Result<T, StorageError>;

/// Failures of the storage adapter or of the data held in it.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Storage IO failure: {0}")]
    Io(#[from] IoError),
    #[error("Stored value for `{key}` is malformed: {reason}")]
    Malformed { key: String, reason: String },
    #[error("Failed to serialise value for `{key}`: {source}")]
    Serialize {
        key: String,
        #[source]
        source: JsonError,
    },
    #[error("Store lock poisoned by an earlier panic")]
    Poisoned,
}

impl StorageError {
    pub fn malformed(key: impl Into<String>, reason: impl ToString) -> Self {
        Self::Malformed {
            key: key.into(),
            reason: reason.to_string(),
        }
    }
}

/// A single pending write against a [`KeyValueStore`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Write {
    Set(String, String),
    Remove(String),
}

/// A synchronous string store with no transactions beyond [`KeyValueStore::apply`].
pub trait KeyValueStore {
    /// Read the value at `key`, if any.
    fn get(&self, key: &str) -> StorageResult<Option<String>>;

    /// Apply all writes as one unit: either every write lands or none do.
    fn apply(&mut self, writes: Vec<Write>) -> StorageResult<()>;

    fn set(&mut self, key: &str, value: String) -> StorageResult<()> {
        self.apply(vec![Write::Set(key.to_string(), value)])
    }

    fn remove(&mut self, key: &str) -> StorageResult<()> {
        self.apply(vec![Write::Remove(key.to_string())])
    }
}

/// A type that is persisted under a fixed key.
pub trait StoredValue: Serialize + DeserializeOwned {
    /// The storage key.
    const KEY: &'static str;

    /// The value to use when the key is absent.
    fn absent() -> Self;
}

/// Writes collected for a single [`KeyValueStore::apply`].
#[derive(Debug, Default)]
pub struct Batch(Vec<Write>);

impl Batch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a typed value to be stored under its key.
    pub fn save<T: StoredValue>(&mut self, value: &T) -> StorageResult<&mut Self> {
        self.0.push(Write::Set(T::KEY.to_string(), encode(value)?));
        Ok(self)
    }

    /// Queue the removal of a typed value's key.
    pub fn clear<T: StoredValue>(&mut self) -> &mut Self {
        self.0.push(Write::Remove(T::KEY.to_string()));
        self
    }

    pub fn into_writes(self) -> Vec<Write> {
        self.0
    }
}

/// Schema-checked access to any [`KeyValueStore`].
pub trait TypedStore: KeyValueStore {
    /// Load and validate the value for `T`, or its absent value if the key is not set.
    fn load<T: StoredValue>(&self) -> StorageResult<T> {
        match self.get(T::KEY)? {
            Some(raw) => decode(T::KEY, &raw),
            None => Ok(T::absent()),
        }
    }

    fn save<T: StoredValue>(&mut self, value: &T) -> StorageResult<()> {
        self.set(T::KEY, encode(value)?)
    }

    fn clear<T: StoredValue>(&mut self) -> StorageResult<()> {
        self.remove(T::KEY)
    }

    fn commit(&mut self, batch: Batch) -> StorageResult<()> {
        self.apply(batch.into_writes())
    }
}

impl<S: KeyValueStore + ?Sized> TypedStore for S {}

fn encode<T: StoredValue>(value: &T) -> StorageResult<String> {
    serde_json::to_string(value).map_err(|source| StorageError::Serialize {
        key: T::KEY.to_string(),
        source,
    })
}

fn decode<T: StoredValue>(key: &str, raw: &str) -> StorageResult<T> {
    serde_json::from_str(raw).map_err(|e| StorageError::malformed(key, e))
}
