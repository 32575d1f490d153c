//! Read side of the shared key-value store the producer writes into.

pub mod file;

use std::collections::HashMap;

use crate::error::Result;

pub use file::{open_store, DirStore, JsonFileStore};

pub const SUNG_SONGS_KEY: &str = "sungSongs";
pub const CURRENT_SONG_KEY: &str = "currentSong";

/// Something the board can read song data from. The board never writes.
pub trait SharedStore {
    /// `Ok(None)` when the key simply isn't there.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Several keys from one consistent view of the store, in `keys` order.
    fn get_many(&self, keys: &[&str]) -> Result<Vec<Option<String>>> {
        keys.iter().map(|key| self.get(key)).collect()
    }
}

impl<T: SharedStore + ?Sized> SharedStore for Box<T> {
    fn get(&self, key: &str) -> Result<Option<String>> {
        (**self).get(key)
    }

    fn get_many(&self, keys: &[&str]) -> Result<Vec<Option<String>>> {
        (**self).get_many(keys)
    }
}

/// In-process store, handy for tests and embedding.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, key: &str, value: &str) {
        self.values.insert(key.to_string(), value.to_string());
    }

    pub fn remove(&mut self, key: &str) {
        self.values.remove(key);
    }
}

impl SharedStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.values.get(key).cloned())
    }
}
