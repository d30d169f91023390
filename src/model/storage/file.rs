use std::collections::HashMap;
use std::fs;
use std::io::{ErrorKind, Write as _};
use std::path::{Path, PathBuf};

use rocket::serde::json::serde_json;
use tempfile::NamedTempFile;

use super::{KeyValueStore, MemoryStore, StorageError, StorageResult, Write};

/// A store persisted as one JSON object of key → string value.
///
/// The whole file is rewritten on every write, going through a uniquely named
/// temporary file in the same directory that is then persisted over the store,
/// so a crash never leaves a half-written store behind. Reads are served from
/// the in-memory copy.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    entries: HashMap<String, String>,
}

impl FileStore {
    /// Open the store at `path`, creating an empty one if the file does not exist.
    pub fn open(path: impl Into<PathBuf>) -> StorageResult<Self> {
        let path = path.into();
        let entries = match fs::read_to_string(&path) {
            Ok(contents) if contents.trim().is_empty() => HashMap::new(),
            Ok(contents) => serde_json::from_str(&contents)
                .map_err(|e| StorageError::malformed(path.display().to_string(), e))?,
            Err(e) if e.kind() == ErrorKind::NotFound => HashMap::new(),
            Err(e) => return Err(e.into()),
        };
        debug!(
            "Opened file store at {} with {} keys",
            path.display(),
            entries.len()
        );
        Ok(Self { path, entries })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self, entries: &HashMap<String, String>) -> StorageResult<()> {
        let contents = serde_json::to_string_pretty(entries).map_err(|source| {
            StorageError::Serialize {
                key: self.path.display().to_string(),
                source,
            }
        })?;
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let mut tmp = NamedTempFile::new_in(dir)?;
        tmp.write_all(contents.as_bytes())?;
        tmp.as_file().sync_all()?;
        tmp.persist(&self.path).map_err(|e| e.error)?;
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn apply(&mut self, writes: Vec<Write>) -> StorageResult<()> {
        // Only adopt the new state once it is on disk.
        let mut updated = self.entries.clone();
        MemoryStore::apply_in_place(&mut updated, writes);
        self.flush(&updated)?;
        self.entries = updated;
        Ok(())
    }
}
