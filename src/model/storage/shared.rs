use std::sync::Mutex;

use rocket::tokio::task;

use crate::election::{Election, ElectionRules};
use crate::error::Result;

use super::{KeyValueStore, StorageError};

type DynStore = dyn KeyValueStore + Send;

/// The one store of a running server, placed into Rocket's managed state.
///
/// Every call into the election state machine holds the lock for its whole
/// duration, so requests are applied one at a time.
pub struct SharedStore(Mutex<Box<DynStore>>);

impl SharedStore {
    pub fn new(store: impl KeyValueStore + Send + 'static) -> Self {
        Self(Mutex::new(Box::new(store)))
    }

    /// Run `f` against the raw store.
    pub fn with_store<T>(&self, f: impl FnOnce(&mut DynStore) -> T) -> Result<T> {
        let mut guard = self.0.lock().map_err(|_| StorageError::Poisoned)?;
        Ok(f(&mut **guard))
    }

    /// Run `f` against an election over this store.
    ///
    /// Operations may hash passwords or write files, so on a multi-threaded
    /// runtime the worker hands its other tasks off while `f` runs.
    pub fn election<T>(
        &self,
        rules: ElectionRules,
        f: impl FnOnce(&mut Election<'_, DynStore>) -> Result<T>,
    ) -> Result<T> {
        task::block_in_place(|| {
            let mut guard = self.0.lock().map_err(|_| StorageError::Poisoned)?;
            let mut election = Election::new(&mut **guard, rules);
            f(&mut election)
        })
    }
}
