use serde::{Deserialize, Serialize};
use std::path::Path;

/// One processed image: its path, the description generated by the
/// vision model, and the embedding of that description.
///
/// Every field defaults on deserialization so that a partially written
/// store entry loads as an *invalid* record instead of poisoning the
/// whole file. Validity is checked with [`ImageRecord::is_valid`] (or
/// [`ImageRecord::validate`], which also backfills `filename`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageRecord {
    /// Full path to the image file (unique key within the store).
    #[serde(default)]
    pub path: String,

    /// File name, derived from `path` when the stored form omits it.
    #[serde(default)]
    pub filename: String,

    /// Natural-language description of the image.
    #[serde(default)]
    pub description: String,

    /// Unit-length embedding of `description`, fixed dimension per store.
    #[serde(default)]
    pub embedding: Vec<f32>,
}

impl ImageRecord {
    /// Create a record for a freshly processed image. The filename is
    /// derived from the path.
    #[must_use]
    pub fn new(
        path: impl Into<String>,
        description: impl Into<String>,
        embedding: Vec<f32>,
    ) -> Self {
        let path = path.into();
        let filename = filename_from_path(&path);
        Self {
            path,
            filename,
            description: description.into(),
            embedding,
        }
    }

    /// A record is valid when it carries a path, a non-empty
    /// description, and a non-empty embedding.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        !self.path.is_empty() && !self.description.is_empty() && !self.embedding.is_empty()
    }

    /// Check required fields, backfilling `filename` from `path` when
    /// an otherwise valid record is missing it.
    ///
    /// Returns `false` (and logs which field was at fault) when the
    /// record cannot be repaired into a usable state.
    pub fn validate(&mut self) -> bool {
        if self.path.is_empty() {
            log::warn!("invalid record: missing path");
            return false;
        }

        if self.description.is_empty() {
            log::warn!("invalid record: missing or empty description, path={}", self.path);
            return false;
        }

        if self.embedding.is_empty() {
            log::warn!("invalid record: embedding missing or empty, path={}", self.path);
            return false;
        }

        if self.filename.is_empty() {
            log::info!("record missing filename, deriving from path: {}", self.path);
            self.filename = filename_from_path(&self.path);
        }

        true
    }
}

/// Extract the file name component from a full path.
#[must_use]
pub fn filename_from_path(path: &str) -> String {
    Path::new(path)
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_derives_filename() {
        let record = ImageRecord::new("/photos/cat.jpg", "a cat", vec![1.0, 0.0]);
        assert_eq!(record.filename, "cat.jpg");
        assert!(record.is_valid());
    }

    #[test]
    fn test_validate_backfills_filename() {
        let mut record = ImageRecord {
            path: "/photos/dog.png".to_string(),
            filename: String::new(),
            description: "a dog".to_string(),
            embedding: vec![0.0, 1.0],
        };
        assert!(record.validate());
        assert_eq!(record.filename, "dog.png");
    }

    #[test]
    fn test_validate_rejects_missing_fields() {
        let mut no_description = ImageRecord::new("/photos/a.jpg", "", vec![1.0]);
        assert!(!no_description.validate());

        let mut no_embedding = ImageRecord::new("/photos/a.jpg", "something", vec![]);
        assert!(!no_embedding.validate());

        let mut no_path = ImageRecord::new("", "something", vec![1.0]);
        assert!(!no_path.validate());
    }

    #[test]
    fn test_partial_record_deserializes_as_invalid() {
        let record: ImageRecord =
            serde_json::from_str(r#"{"path": "/photos/broken.jpg"}"#).unwrap();
        assert_eq!(record.path, "/photos/broken.jpg");
        assert!(!record.is_valid());
    }
}
