//! Change detection over the shared store 🔍
//!
//! Polls and notifications both end up here; the board only re-renders when
//! the observed values actually differ from last time.

use crate::store::{SharedStore, CURRENT_SONG_KEY, SUNG_SONGS_KEY};

/// Why the board is looking at the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notification {
    /// Periodic poll
    Poll,
    /// The store reported a mutation of `key`
    StorageChanged(String),
    /// Producer says "the list was updated"
    ListUpdated,
}

impl Notification {
    /// Storage events for unrelated keys are ignored.
    pub fn is_relevant(&self) -> bool {
        match self {
            Notification::StorageChanged(key) => key == SUNG_SONGS_KEY || key == CURRENT_SONG_KEY,
            Notification::Poll | Notification::ListUpdated => true,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContentSnapshot {
    pub sung_songs: String,
    pub current_song: String,
}

/// Which halves of a snapshot changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContentChange {
    pub sung_songs: bool,
    pub current_song: bool,
}

#[derive(Debug, Default)]
pub struct ChangeDetector {
    last: ContentSnapshot,
}

impl ChangeDetector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last(&self) -> &ContentSnapshot {
        &self.last
    }

    /// Record `snapshot`; `Some` only when it differs from the last one.
    pub fn observe(&mut self, snapshot: ContentSnapshot) -> Option<ContentChange> {
        let change = ContentChange {
            sung_songs: snapshot.sung_songs != self.last.sung_songs,
            current_song: snapshot.current_song != self.last.current_song,
        };
        if !change.sung_songs && !change.current_song {
            return None;
        }
        self.last = snapshot;
        Some(change)
    }
}

/// Read both keys in one go. Missing values and read failures are the empty
/// string.
pub fn read_snapshot<K: SharedStore + ?Sized>(store: &K) -> ContentSnapshot {
    match store.get_many(&[SUNG_SONGS_KEY, CURRENT_SONG_KEY]) {
        Ok(values) => {
            let mut values = values.into_iter().map(Option::unwrap_or_default);
            ContentSnapshot {
                sung_songs: values.next().unwrap_or_default(),
                current_song: values.next().unwrap_or_default(),
            }
        }
        Err(e) => {
            tracing::warn!(error = %e, "store read failed, treating as empty");
            ContentSnapshot::default()
        }
    }
}
