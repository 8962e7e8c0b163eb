//! Flat JSON record store.
//!
//! The store is a single human-diffable JSON file holding an ordered
//! array of [`ImageRecord`]s. Every operation works on the whole file:
//! `load` reads it, `save` replaces it, `append` is load-then-save.
//! There is no locking; two processes appending to the same store can
//! lose updates. Single-writer use is an external constraint.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::model::ImageRecord;

/// Handle to a JSON record store on disk.
///
/// Construct one explicitly and pass it where it is needed; the store
/// keeps no global state and no open file handles.
#[derive(Debug, Clone)]
pub struct JsonStore {
    path: PathBuf,
}

impl JsonStore {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load all records.
    ///
    /// A missing file is an empty store, not an error. An unreadable
    /// or malformed file (root is not an array) is reported as an
    /// error so callers can tell "no data" from "broken store".
    pub fn load(&self) -> Result<Vec<ImageRecord>> {
        if !self.path.exists() {
            log::warn!("store file not found: {}", self.path.display());
            return Ok(Vec::new());
        }

        let raw = fs::read_to_string(&self.path)?;
        let value: serde_json::Value = serde_json::from_str(&raw)?;

        if !value.is_array() {
            return Err(Error::MalformedStore {
                path: self.path.display().to_string(),
                reason: "expected a top-level array of records".to_string(),
            });
        }

        let records: Vec<ImageRecord> = serde_json::from_value(value)?;
        log::info!("loaded {} records from {}", records.len(), self.path.display());
        Ok(records)
    }

    /// Replace the store contents with `records`.
    ///
    /// The file is written to a temporary sibling and renamed over the
    /// original, so readers never observe a half-written store.
    pub fn save(&self, records: &[ImageRecord]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, serde_json::to_vec_pretty(records)?)?;
        fs::rename(&tmp, &self.path)?;

        log::info!("saved {} records to {}", records.len(), self.path.display());
        Ok(())
    }

    /// Append `new_records` to the store.
    ///
    /// Equivalent to `save(load() + new_records)`: a read-modify-write
    /// with no lock, safe only under the single-writer assumption.
    pub fn append(&self, new_records: Vec<ImageRecord>) -> Result<()> {
        let mut records = self.load()?;
        records.extend(new_records);
        self.save(&records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn sample_records() -> Vec<ImageRecord> {
        vec![
            ImageRecord::new("/photos/a.jpg", "a red car", vec![1.0, 0.0]),
            ImageRecord::new("/photos/b.jpg", "a blue sky", vec![0.0, 1.0]),
        ]
    }

    #[test]
    fn test_missing_file_is_empty_store() {
        let dir = TempDir::new().unwrap();
        let store = JsonStore::new(dir.path().join("absent.json"));
        assert_eq!(store.load().unwrap(), Vec::new());
    }

    #[test]
    fn test_save_load_round_trip() {
        let dir = TempDir::new().unwrap();
        let store = JsonStore::new(dir.path().join("store.json"));
        let records = sample_records();

        store.save(&records).unwrap();
        let loaded = store.load().unwrap();
        assert_eq!(loaded, records);

        // Idempotent: saving what was loaded changes nothing.
        store.save(&loaded).unwrap();
        assert_eq!(store.load().unwrap(), records);
    }

    #[test]
    fn test_append_preserves_existing_order() {
        let dir = TempDir::new().unwrap();
        let store = JsonStore::new(dir.path().join("store.json"));
        let old = sample_records();
        store.save(&old).unwrap();

        let new = vec![ImageRecord::new("/photos/c.jpg", "a green field", vec![0.5, 0.5])];
        store.append(new.clone()).unwrap();

        let combined = store.load().unwrap();
        assert_eq!(combined.len(), old.len() + new.len());
        assert_eq!(&combined[..old.len()], &old[..]);
        assert_eq!(combined[old.len()], new[0]);
    }

    #[test]
    fn test_append_to_missing_file_creates_store() {
        let dir = TempDir::new().unwrap();
        let store = JsonStore::new(dir.path().join("store.json"));
        store.append(sample_records()).unwrap();
        assert_eq!(store.load().unwrap().len(), 2);
    }

    #[test]
    fn test_malformed_root_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("store.json");
        fs::write(&path, r#"{"not": "an array"}"#).unwrap();

        let store = JsonStore::new(&path);
        assert!(matches!(store.load(), Err(Error::MalformedStore { .. })));
    }

    #[test]
    fn test_unparseable_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("store.json");
        fs::write(&path, "not json at all").unwrap();

        let store = JsonStore::new(&path);
        assert!(matches!(store.load(), Err(Error::Serialization(_))));
    }

    #[test]
    fn test_partial_records_survive_the_round_trip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("store.json");
        fs::write(&path, r#"[{"path": "/photos/broken.jpg"}]"#).unwrap();

        let store = JsonStore::new(&path);
        let records = store.load().unwrap();
        assert_eq!(records.len(), 1);
        assert!(!records[0].is_valid());
    }
}
