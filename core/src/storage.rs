//! Durable key/value storage for the player list.
//!
//! The scorer never talks to a concrete storage mechanism directly; it is
//! handed something implementing [`Store`].

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::types::Players;

/// The key the player list is stored under unless configured otherwise.
pub const DEFAULT_STORAGE_KEY: &str = "sushiGoPlayers";

pub trait Store {
    /// Read the value stored under `key`, or `None` if nothing has been stored.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Store `value` under `key`, replacing anything already there.
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// An in-process store. Nothing survives the process, which makes it the
/// store of choice for tests.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: HashMap<String, String>,
    read_only: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store that already holds `value` under `key`.
    pub fn with_value(key: &str, value: &str) -> Self {
        let mut values = HashMap::new();
        values.insert(key.to_string(), value.to_string());
        Self {
            values,
            read_only: false,
        }
    }

    /// Reject every write with `StorageError::Unavailable`, like a browser
    /// store that has run out of quota.
    #[must_use]
    pub fn read_only(self) -> Self {
        Self {
            read_only: true,
            ..self
        }
    }

    pub fn value(&self, key: &str) -> Option<&'_ str> {
        self.values.get(key).map(String::as_str)
    }
}

impl Store for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        if self.read_only {
            return Err(StorageError::Unavailable);
        }
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Stand-in for hosts with no durable store at all. Reads find nothing and
/// writes are dropped.
#[derive(Debug, Copy, Clone, Default)]
pub struct NullStore;

impl Store for NullStore {
    fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
        Ok(None)
    }

    fn set(&mut self, _key: &str, _value: &str) -> Result<(), StorageError> {
        Ok(())
    }
}

/// Keeps each key in its own `<key>.json` file inside a directory.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &'_ Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, StorageError> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !valid {
            return Err(StorageError::InvalidKey(key.to_string()));
        }
        Ok(self.dir.join(format!("{}.json", key)))
    }
}

impl Store for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        match fs::read_to_string(self.path_for(key)?) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        let path = self.path_for(key)?;
        fs::create_dir_all(&self.dir)?;
        // Write beside the target and rename over it so a reader never sees a
        // half-written snapshot.
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, value)?;
        fs::rename(&tmp, &path)?;
        Ok(())
    }
}

/// Serialize the player list into its stored form.
pub fn encode_snapshot(players: &Players) -> Result<String, SnapshotError> {
    Ok(serde_json::to_string(players)?)
}

/// Parse a stored player list. Fails on anything that isn't an array of
/// `{"name": ..., "scores": [a, b, c]}` with numeric scores.
pub fn decode_snapshot(snapshot: &str) -> Result<Players, SnapshotError> {
    Ok(serde_json::from_str(snapshot)?)
}

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Storage is unavailable")]
    Unavailable,
    #[error("Invalid storage key {0:?}")]
    InvalidKey(String),
    #[error("Storage I/O failed: {0}")]
    Io(#[from] io::Error),
}

#[derive(Error, Debug)]
#[error("Malformed snapshot: {0}")]
pub struct SnapshotError(#[from] serde_json::Error);

#[cfg(test)]
mod tests {
    use std::fs;

    use super::{
        decode_snapshot, encode_snapshot, FileStore, MemoryStore, NullStore, StorageError, Store,
        DEFAULT_STORAGE_KEY,
    };
    use crate::types::{Player, Players};

    fn scratch_dir(name: &str) -> std::path::PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "sushi-go-core-{}-{}",
            name,
            std::process::id()
        ));
        let _ = fs::remove_dir_all(&dir);
        dir
    }

    #[test]
    pub fn test_snapshot_round_trip() {
        let players = Players::from_players(vec![
            Player::new("Alice").with_scores([3, 6, 1]),
            Player::new("").with_scores([-2, 0, 40]),
            Player::new("Player 3"),
        ]);
        let snapshot = encode_snapshot(&players).unwrap();
        assert_eq!(decode_snapshot(&snapshot).unwrap(), players);
    }

    #[test]
    pub fn test_decode_snapshot_rejects_malformed() {
        assert!(decode_snapshot("not json").is_err());
        assert!(decode_snapshot(r#"{"name":"A","scores":[0,0,0]}"#).is_err());
        assert!(decode_snapshot(r#"[{"name":"A","scores":[0,0]}]"#).is_err());
        assert!(decode_snapshot(r#"[{"name":"A","scores":[0,0,0,0]}]"#).is_err());
        assert!(decode_snapshot(r#"[{"name":"A","scores":[0,"1",0]}]"#).is_err());
        assert!(decode_snapshot(r#"[{"scores":[0,0,0]}]"#).is_err());
    }

    #[test]
    pub fn test_decode_snapshot_keeps_oversized_scores() {
        let players =
            decode_snapshot(r#"[{"name":"A","scores":[1e+21,0,0]},{"name":"B","scores":[1,2,3]}]"#)
                .unwrap();
        assert_eq!(
            players,
            Players::from_players(vec![
                Player::new("A").with_scores([i64::MAX, 0, 0]),
                Player::new("B").with_scores([1, 2, 3]),
            ])
        );
    }

    #[test]
    pub fn test_memory_store() {
        let mut store = MemoryStore::new();
        assert_eq!(store.get(DEFAULT_STORAGE_KEY).unwrap(), None);
        store.set(DEFAULT_STORAGE_KEY, "[]").unwrap();
        assert_eq!(store.get(DEFAULT_STORAGE_KEY).unwrap().as_deref(), Some("[]"));
        store.set(DEFAULT_STORAGE_KEY, "[1]").unwrap();
        assert_eq!(store.value(DEFAULT_STORAGE_KEY), Some("[1]"));
    }

    #[test]
    pub fn test_read_only_memory_store() {
        let mut store = MemoryStore::with_value("k", "v").read_only();
        assert!(matches!(store.set("k", "w"), Err(StorageError::Unavailable)));
        assert_eq!(store.value("k"), Some("v"));
    }

    #[test]
    pub fn test_null_store() {
        let mut store = NullStore;
        store.set(DEFAULT_STORAGE_KEY, "[]").unwrap();
        assert_eq!(store.get(DEFAULT_STORAGE_KEY).unwrap(), None);
    }

    #[test]
    pub fn test_file_store() {
        let dir = scratch_dir("file-store");
        let mut store = FileStore::new(&dir);
        assert_eq!(store.dir(), dir.as_path());

        assert_eq!(store.get(DEFAULT_STORAGE_KEY).unwrap(), None);
        store.set(DEFAULT_STORAGE_KEY, "[]").unwrap();
        store.set(DEFAULT_STORAGE_KEY, r#"[{"name":"A","scores":[1,2,3]}]"#).unwrap();

        let reopened = FileStore::new(&dir);
        assert_eq!(
            reopened.get(DEFAULT_STORAGE_KEY).unwrap().as_deref(),
            Some(r#"[{"name":"A","scores":[1,2,3]}]"#)
        );
        assert!(!dir.join("sushiGoPlayers.json.tmp").exists());

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    pub fn test_file_store_rejects_path_like_keys() {
        let mut store = FileStore::new(scratch_dir("bad-keys"));
        assert!(matches!(
            store.set("../escape", "[]"),
            Err(StorageError::InvalidKey(_))
        ));
        assert!(matches!(store.get(""), Err(StorageError::InvalidKey(_))));
    }
}
