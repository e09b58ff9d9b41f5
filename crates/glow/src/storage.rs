//! File-backed session persistence.

use std::fs;
use std::path::PathBuf;

use glow_core::storage::{Storage, StorageError};

/// A [`Storage`] backend that keeps one JSON file per key inside a
/// directory.
///
/// The directory is created lazily on the first write. Reads of absent
/// keys report `None` rather than an error, so a fresh profile starts
/// from an empty state.
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    /// Creates a storage rooted at the given directory.
    #[inline]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl Storage for FileStorage {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(value) => Ok(Some(value)),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(StorageError::new(format!(
                "failed to read {key}: {err}"
            ))),
        }
    }

    fn write(&self, key: &str, value: &str) -> Result<(), StorageError> {
        fs::create_dir_all(&self.dir).map_err(|err| {
            StorageError::new(format!("failed to create storage dir: {err}"))
        })?;
        fs::write(self.path_for(key), value).map_err(|err| {
            StorageError::new(format!("failed to write {key}: {err}"))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roundtrip() {
        let dir = std::env::temp_dir().join("glow-storage-test");
        let _ = fs::remove_dir_all(&dir);

        let storage = FileStorage::new(&dir);
        assert!(storage.read("selectedProducts").unwrap().is_none());

        storage.write("selectedProducts", "[]").unwrap();
        assert_eq!(
            storage.read("selectedProducts").unwrap().as_deref(),
            Some("[]")
        );
    }
}
