//! Local storage: a small key/value table in SQLite holding JSON values

use std::path::Path;
use std::sync::{Arc, Mutex};

use rusqlite::{params, Connection, OptionalExtension};
use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;

/// Storage keys shared with the web UI
pub mod keys {
    pub const LAST_LOCATION: &str = "lastLocation";
    pub const RECENT_LOCATIONS: &str = "recentLocations";
    pub const LAST_TRANSLATION: &str = "lastTranslation";
    pub const NOTES: &str = "bible_notes";
    pub const BOOKMARKS: &str = "bible_bookmarks";
    pub const SETTINGS: &str = "bible_settings";
    pub const THEME: &str = "theme";
}

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("json error in {key}: {source}")]
    Json {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("could not find app data directory")]
    NoDataDir,

    #[error("storage lock poisoned")]
    Poisoned,
}

/// Shared handle to the key/value store. Cloning is cheap; all clones see
/// the same connection.
#[derive(Clone)]
pub struct LocalStorage {
    conn: Arc<Mutex<Connection>>,
}

impl LocalStorage {
    /// Opens (or creates) the storage database at `path`
    pub fn open(path: &Path) -> Result<Self, StorageError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let conn = Connection::open(path)?;
        Self::init(conn)
    }

    pub fn open_in_memory() -> Result<Self, StorageError> {
        Self::init(Connection::open_in_memory()?)
    }

    fn init(conn: Connection) -> Result<Self, StorageError> {
        conn.execute(
            "CREATE TABLE IF NOT EXISTS local_storage (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL
            )",
            [],
        )?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    fn with_conn<T>(
        &self,
        f: impl FnOnce(&Connection) -> rusqlite::Result<T>,
    ) -> Result<T, StorageError> {
        let conn = self.conn.lock().map_err(|_| StorageError::Poisoned)?;
        Ok(f(&conn)?)
    }

    pub fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.with_conn(|conn| {
            conn.query_row(
                "SELECT value FROM local_storage WHERE key = ?1",
                params![key],
                |row| row.get(0),
            )
            .optional()
        })
    }

    pub fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO local_storage (key, value) VALUES (?1, ?2)
                 ON CONFLICT(key) DO UPDATE SET value = excluded.value",
                params![key, value],
            )
        })?;
        Ok(())
    }

    pub fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        self.with_conn(|conn| {
            conn.execute("DELETE FROM local_storage WHERE key = ?1", params![key])
        })?;
        Ok(())
    }

    pub fn clear(&self) -> Result<(), StorageError> {
        self.with_conn(|conn| conn.execute("DELETE FROM local_storage", []))?;
        Ok(())
    }

    pub fn keys(&self) -> Result<Vec<String>, StorageError> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare("SELECT key FROM local_storage ORDER BY key")?;
            let rows = stmt.query_map([], |row| row.get(0))?;
            rows.collect()
        })
    }

    /// Reads and deserializes a JSON value. A missing key is `Ok(None)`.
    pub fn load_json<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StorageError> {
        match self.get_item(key)? {
            Some(raw) => serde_json::from_str(&raw)
                .map(Some)
                .map_err(|source| StorageError::Json {
                    key: key.to_string(),
                    source,
                }),
            None => Ok(None),
        }
    }

    pub fn save_json<T: Serialize + ?Sized>(
        &self,
        key: &str,
        value: &T,
    ) -> Result<(), StorageError> {
        let raw = serde_json::to_string(value).map_err(|source| StorageError::Json {
            key: key.to_string(),
            source,
        })?;
        self.set_item(key, &raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Sample {
        name: String,
        count: u32,
    }

    #[test]
    fn set_item_overwrites_existing_value() {
        let storage = LocalStorage::open_in_memory().unwrap();
        storage.set_item("theme", "light").unwrap();
        storage.set_item("theme", "dark").unwrap();

        assert_eq!(storage.get_item("theme").unwrap().as_deref(), Some("dark"));
        assert_eq!(storage.keys().unwrap(), vec!["theme".to_string()]);
    }

    #[test]
    fn missing_key_loads_as_none() {
        let storage = LocalStorage::open_in_memory().unwrap();
        let loaded: Option<Sample> = storage.load_json("nothing").unwrap();
        assert!(loaded.is_none());
    }

    #[test]
    fn malformed_json_reports_the_key() {
        let storage = LocalStorage::open_in_memory().unwrap();
        storage.set_item(keys::NOTES, "{not json").unwrap();

        let err = storage.load_json::<Vec<Sample>>(keys::NOTES).unwrap_err();
        assert!(matches!(err, StorageError::Json { ref key, .. } if key == keys::NOTES));
    }

    #[test]
    fn remove_and_clear() {
        let storage = LocalStorage::open_in_memory().unwrap();
        storage.set_item("a", "1").unwrap();
        storage.set_item("b", "2").unwrap();

        storage.remove_item("a").unwrap();
        assert_eq!(storage.keys().unwrap(), vec!["b".to_string()]);

        storage.clear().unwrap();
        assert!(storage.keys().unwrap().is_empty());
    }

    #[test]
    fn values_survive_reopening_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("storage.db");

        {
            let storage = LocalStorage::open(&path).unwrap();
            storage
                .save_json(
                    "sample",
                    &Sample {
                        name: "Gen".into(),
                        count: 50,
                    },
                )
                .unwrap();
        }

        let storage = LocalStorage::open(&path).unwrap();
        let loaded: Option<Sample> = storage.load_json("sample").unwrap();
        assert_eq!(
            loaded,
            Some(Sample {
                name: "Gen".into(),
                count: 50
            })
        );
    }
}
