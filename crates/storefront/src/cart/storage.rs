//! Persistent cart storage.
//!
//! The cart survives restarts through a single JSON file laid out as a
//! string-keyed object, the same shape the original browser client kept in
//! `localStorage`. Only one key is used: `@RocketShoes:cart`. The file is
//! read once at startup and rewritten wholesale after every successful
//! mutation.

use std::fs;
use std::io;
use std::path::PathBuf;

use serde_json::{Map, Value};
use thiserror::Error;

use super::CartItem;

/// Storage key holding the serialized cart.
pub const CART_STORAGE_KEY: &str = "@RocketShoes:cart";

/// Errors that can occur while loading or saving the cart.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Reading or writing the storage file failed.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Serializing the cart failed.
    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Persistence backend for the cart.
///
/// Implementations overwrite the whole cart on every save; there is no
/// incremental update.
pub trait CartStorage: Send + Sync {
    /// Load the persisted cart. Absent storage yields an empty cart.
    fn load(&self) -> Result<Vec<CartItem>, StorageError>;

    /// Overwrite the persisted cart with the given snapshot.
    fn save(&self, items: &[CartItem]) -> Result<(), StorageError>;
}

/// Cart storage backed by a JSON file on disk.
///
/// A malformed file is treated as absent: the load falls back to an empty
/// cart with a warning instead of refusing to start.
pub struct JsonFileStorage {
    path: PathBuf,
}

impl JsonFileStorage {
    /// Create a storage handle for the given file path.
    #[must_use]
    pub const fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Read the full key-value object from disk.
    fn load_map(&self) -> Result<Map<String, Value>, StorageError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Map::new()),
            Err(e) => return Err(e.into()),
        };

        match serde_json::from_str::<Value>(&raw) {
            Ok(Value::Object(map)) => Ok(map),
            Ok(_) => {
                tracing::warn!(
                    path = %self.path.display(),
                    "Storage file is not a JSON object, starting with empty storage"
                );
                Ok(Map::new())
            }
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    path = %self.path.display(),
                    "Malformed storage file, starting with empty storage"
                );
                Ok(Map::new())
            }
        }
    }
}

impl CartStorage for JsonFileStorage {
    fn load(&self) -> Result<Vec<CartItem>, StorageError> {
        let map = self.load_map()?;

        match map.get(CART_STORAGE_KEY) {
            None => Ok(Vec::new()),
            Some(value) => match serde_json::from_value(value.clone()) {
                Ok(items) => Ok(items),
                Err(e) => {
                    tracing::warn!(
                        error = %e,
                        "Persisted cart does not deserialize, starting with an empty cart"
                    );
                    Ok(Vec::new())
                }
            },
        }
    }

    fn save(&self, items: &[CartItem]) -> Result<(), StorageError> {
        let mut map = self.load_map()?;
        map.insert(CART_STORAGE_KEY.to_string(), serde_json::to_value(items)?);
        fs::write(&self.path, serde_json::to_string(&Value::Object(map))?)?;
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use rocket_shoes_core::ProductId;
    use rust_decimal::Decimal;

    fn item(id: i32, amount: i32) -> CartItem {
        CartItem {
            id: ProductId::new(id),
            title: format!("Tênis {id}"),
            price: Decimal::from_str_exact("179.9").unwrap(),
            image: format!("https://example.com/tenis{id}.jpg"),
            amount,
        }
    }

    fn storage_in(dir: &tempfile::TempDir) -> JsonFileStorage {
        JsonFileStorage::new(dir.path().join("storage.json"))
    }

    #[test]
    fn test_load_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let storage = storage_in(&dir);
        assert_eq!(storage.load().unwrap(), Vec::new());
    }

    #[test]
    fn test_save_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let storage = storage_in(&dir);

        let items = vec![item(1, 2), item(2, 1)];
        storage.save(&items).unwrap();
        assert_eq!(storage.load().unwrap(), items);
    }

    #[test]
    fn test_save_overwrites_previous_cart() {
        let dir = tempfile::tempdir().unwrap();
        let storage = storage_in(&dir);

        storage.save(&[item(1, 2), item(2, 1)]).unwrap();
        storage.save(&[item(2, 3)]).unwrap();
        assert_eq!(storage.load().unwrap(), vec![item(2, 3)]);
    }

    #[test]
    fn test_malformed_file_falls_back_to_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("storage.json");
        fs::write(&path, "{not json").unwrap();

        let storage = JsonFileStorage::new(path);
        assert_eq!(storage.load().unwrap(), Vec::new());
    }

    #[test]
    fn test_missing_key_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("storage.json");
        fs::write(&path, r#"{"@RocketShoes:theme": "dark"}"#).unwrap();

        let storage = JsonFileStorage::new(path);
        assert_eq!(storage.load().unwrap(), Vec::new());
    }

    #[test]
    fn test_save_preserves_unrelated_keys() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("storage.json");
        fs::write(&path, r#"{"@RocketShoes:theme": "dark"}"#).unwrap();

        let storage = JsonFileStorage::new(path.clone());
        storage.save(&[item(1, 1)]).unwrap();

        let raw = fs::read_to_string(&path).unwrap();
        let value: Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(value["@RocketShoes:theme"], "dark");
        assert!(value[CART_STORAGE_KEY].is_array());
    }
}
