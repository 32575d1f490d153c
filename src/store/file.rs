use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use super::SharedStore;
use crate::error::{BoardError, Result};

/// One file per key inside a directory (`<dir>/sungSongs`, `<dir>/currentSong`).
#[derive(Debug, Clone)]
pub struct DirStore {
    dir: PathBuf,
}

impl DirStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn path(&self) -> &Path {
        &self.dir
    }
}

impl SharedStore for DirStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.dir.join(key);
        match fs::read_to_string(&path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(source) => Err(BoardError::Io { path, source }),
        }
    }
}

/// A single JSON object of string values, like a web storage dump:
/// `{"sungSongs": "A\nB", "currentSong": "C"}`.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn read_all(&self) -> Result<HashMap<String, serde_json::Value>> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(HashMap::new()),
            Err(source) => {
                return Err(BoardError::Io {
                    path: self.path.clone(),
                    source,
                })
            }
        };
        // Producers may truncate before writing
        if content.trim().is_empty() {
            return Ok(HashMap::new());
        }
        serde_json::from_str(&content).map_err(|source| BoardError::Json {
            path: self.path.clone(),
            source,
        })
    }
}

fn string_value(value: &serde_json::Value) -> Option<String> {
    match value {
        serde_json::Value::String(s) => Some(s.clone()),
        serde_json::Value::Null => None,
        other => Some(other.to_string()),
    }
}

impl SharedStore for JsonFileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let values = self.read_all()?;
        Ok(values.get(key).and_then(string_value))
    }

    /// One read and parse for all keys, so a rewrite in between can't mix
    /// old and new values.
    fn get_many(&self, keys: &[&str]) -> Result<Vec<Option<String>>> {
        let values = self.read_all()?;
        Ok(keys
            .iter()
            .map(|key| values.get(*key).and_then(string_value))
            .collect())
    }
}

/// Pick a backend from the path: `*.json` is a JSON file, anything else a
/// directory.
pub fn open_store(path: &Path) -> Box<dyn SharedStore> {
    let is_json = path
        .extension()
        .map(|ext| ext.eq_ignore_ascii_case("json"))
        .unwrap_or(false);
    if is_json {
        Box::new(JsonFileStore::new(path))
    } else {
        Box::new(DirStore::new(path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{CURRENT_SONG_KEY, SUNG_SONGS_KEY};

    #[test]
    fn test_dir_store_reads_files() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(SUNG_SONGS_KEY), "A\nB").unwrap();

        let store = DirStore::new(dir.path());
        assert_eq!(store.get(SUNG_SONGS_KEY).unwrap(), Some("A\nB".to_string()));
        assert_eq!(store.get(CURRENT_SONG_KEY).unwrap(), None);
    }

    #[test]
    fn test_dir_store_missing_dir_is_empty() {
        let store = DirStore::new("/definitely/not/here/singboard");
        assert_eq!(store.get(SUNG_SONGS_KEY).unwrap(), None);
    }

    #[test]
    fn test_json_store() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");
        fs::write(&path, r#"{"sungSongs": "A\n//B", "currentSong": null, "n": 3}"#).unwrap();

        let store = JsonFileStore::new(&path);
        assert_eq!(store.get(SUNG_SONGS_KEY).unwrap(), Some("A\n//B".to_string()));
        assert_eq!(store.get(CURRENT_SONG_KEY).unwrap(), None);
        assert_eq!(store.get("n").unwrap(), Some("3".to_string()));
    }

    #[test]
    fn test_json_store_get_many() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");
        fs::write(&path, r#"{"sungSongs": "A\nB", "currentSong": "C"}"#).unwrap();

        let store = JsonFileStore::new(&path);
        assert_eq!(
            store.get_many(&[SUNG_SONGS_KEY, CURRENT_SONG_KEY, "other"]).unwrap(),
            vec![Some("A\nB".to_string()), Some("C".to_string()), None]
        );

        fs::write(&path, "{broken").unwrap();
        assert!(store.get_many(&[SUNG_SONGS_KEY]).is_err());
    }

    #[test]
    fn test_json_store_errors() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");

        fs::write(&path, "").unwrap();
        assert_eq!(JsonFileStore::new(&path).get(SUNG_SONGS_KEY).unwrap(), None);

        fs::write(&path, "{not json").unwrap();
        assert!(matches!(
            JsonFileStore::new(&path).get(SUNG_SONGS_KEY),
            Err(BoardError::Json { .. })
        ));
    }

    #[test]
    fn test_open_store_picks_backend() {
        let dir = tempfile::tempdir().unwrap();
        let json = dir.path().join("songs.JSON");
        fs::write(&json, r#"{"currentSong": "X"}"#).unwrap();

        assert_eq!(open_store(&json).get(CURRENT_SONG_KEY).unwrap(), Some("X".to_string()));
        assert_eq!(open_store(dir.path()).get(CURRENT_SONG_KEY).unwrap(), None);
    }
}
