//! One kind's durable collection: an order-preserving in-memory cache
//! backed by a single JSON file.

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use screenplay_model::{Entity, EntityId, ModelError, Result};

/// In-memory records plus the durable JSON file for one entity kind
///
/// The file holds a pretty-printed JSON array of records. Records keep
/// insertion order in memory and on disk.
#[derive(Debug)]
pub struct Collection<T: Entity> {
    records: Vec<T>,
    path: PathBuf,
}

impl<T: Entity> Collection<T> {
    /// Load the collection from its durable file, validating every
    /// record, or create an empty file if none exists yet so the
    /// canonical location always exists after initialization.
    pub(crate) fn open(dir: &Path) -> Result<Self> {
        let path = dir.join(format!("{}s.json", T::KIND));
        let mut collection = Self {
            records: Vec::new(),
            path,
        };
        if collection.path.exists() {
            collection.load()?;
        } else {
            collection.persist()?;
        }
        Ok(collection)
    }

    fn load(&mut self) -> Result<()> {
        let raw = fs::read_to_string(&self.path)?;
        let records: Vec<T> =
            serde_json::from_str(&raw).map_err(|err| ModelError::Initialization {
                kind: T::KIND,
                detail: err.to_string(),
            })?;
        // A corrupt record aborts startup instead of being dropped.
        for record in &records {
            record.validate().map_err(|err| ModelError::Initialization {
                kind: T::KIND,
                detail: err.to_string(),
            })?;
        }
        self.records = records;
        Ok(())
    }

    /// Serialize the full collection and atomically replace the durable
    /// file, so a reader observes either the old or the new contents.
    pub(crate) fn persist(&self) -> Result<()> {
        let bytes = serde_json::to_vec_pretty(&self.records)?;
        write_atomic(&self.path, &bytes)?;
        tracing::debug!(kind = %T::KIND, records = self.records.len(), "persisted collection");
        Ok(())
    }

    pub fn records(&self) -> &[T] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub(crate) fn push(&mut self, record: T) {
        self.records.push(record);
    }

    pub(crate) fn find(&self, id: EntityId) -> Option<&T> {
        self.records.iter().find(|record| record.id() == id)
    }

    pub(crate) fn find_mut(&mut self, id: EntityId) -> Option<&mut T> {
        self.records.iter_mut().find(|record| record.id() == id)
    }

    /// Remove by id, keeping the order of the remaining records
    pub(crate) fn remove(&mut self, id: EntityId) -> Option<T> {
        let index = self.records.iter().position(|record| record.id() == id)?;
        Some(self.records.remove(index))
    }

    pub(crate) fn truncate_all(&mut self) {
        self.records.clear();
    }
}

/// Write to a sibling temp file, sync, then rename onto the canonical
/// path. The temp file lives in the same directory so the rename never
/// crosses a filesystem boundary.
fn write_atomic(path: &Path, bytes: &[u8]) -> Result<()> {
    let parent = path.parent().ok_or_else(|| {
        std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            "collection path has no parent directory",
        )
    })?;
    let tmp = parent.join(format!(
        ".{}.tmp-{}",
        path.file_name()
            .and_then(|name| name.to_str())
            .unwrap_or("collection"),
        std::process::id()
    ));

    {
        let mut file = File::create(&tmp)?;
        file.write_all(bytes)?;
        file.sync_all()?;
    }
    fs::rename(&tmp, path)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use screenplay_model::Actor;
    use tempfile::tempdir;

    #[test]
    fn test_open_creates_empty_file() {
        let dir = tempdir().unwrap();
        let collection: Collection<Actor> = Collection::open(dir.path()).unwrap();

        assert!(collection.is_empty());
        let raw = fs::read_to_string(dir.path().join("actors.json")).unwrap();
        assert_eq!(raw.trim(), "[]");
    }

    #[test]
    fn test_persist_then_reopen_restores_records() {
        let dir = tempdir().unwrap();
        let mut collection: Collection<Actor> = Collection::open(dir.path()).unwrap();
        collection.push(Actor::new("Maria", "A registered customer"));
        collection.persist().unwrap();

        let reopened: Collection<Actor> = Collection::open(dir.path()).unwrap();
        assert_eq!(reopened.records(), collection.records());
    }

    #[test]
    fn test_malformed_file_is_an_initialization_error() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("actors.json"), "{ not json").unwrap();

        let err = Collection::<Actor>::open(dir.path()).unwrap_err();
        assert!(matches!(err, ModelError::Initialization { .. }));
    }

    #[test]
    fn test_invalid_record_is_an_initialization_error() {
        let dir = tempdir().unwrap();
        let nameless = serde_json::json!([{
            "id": "7d9f8c1a-3f2b-4c5d-9e6f-0a1b2c3d4e5f",
            "name": "",
            "description": "",
            "created_at": "2025-01-01T00:00:00Z",
            "updated_at": "2025-01-01T00:00:00Z",
            "abilities": [],
            "constraints": []
        }]);
        fs::write(dir.path().join("actors.json"), nameless.to_string()).unwrap();

        let err = Collection::<Actor>::open(dir.path()).unwrap_err();
        assert!(matches!(err, ModelError::Initialization { .. }));
    }

    #[test]
    fn test_no_temp_file_left_behind() {
        let dir = tempdir().unwrap();
        let mut collection: Collection<Actor> = Collection::open(dir.path()).unwrap();
        collection.push(Actor::new("Maria", ""));
        collection.persist().unwrap();

        let names: Vec<String> = fs::read_dir(dir.path())
            .unwrap()
            .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["actors.json".to_string()]);
    }
}
