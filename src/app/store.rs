// PlaceBoard - app/store.rs
//
// Record Store: the CRUD contract the board reads from and writes to,
// plus two implementations.
//
//   - `JsonDirStore` keeps one `<collection>.json` file per collection in a
//     directory, shaped `{ "items": [...] }`. Writes are atomic.
//   - `MemoryStore` keeps collections in memory behind a mutex.
//
// Both return clones; callers never hold references into store state.
// There is no caching layer: every `get_all` reads the current contents,
// which is what the reload-on-write workflows rely on.

use crate::core::model::{Collection, ListingRecord};
use crate::platform::fs;
use crate::util::constants::{
    COLLECTION_FILE_EXTENSION, MAX_COLLECTION_FILE_SIZE, MAX_COLLECTION_NAME_LENGTH,
};
use crate::util::error::StoreError;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Generic CRUD access to named collections of records.
pub trait RecordStore: Send + Sync {
    /// Every record in `collection`, in stored order. A collection that has
    /// never been written is empty, not an error.
    fn get_all(&self, collection: &str) -> Result<Vec<ListingRecord>, StoreError>;

    /// The record with `id`, or `StoreError::NotFound`.
    fn get_by_id(&self, collection: &str, id: &str) -> Result<ListingRecord, StoreError>;

    /// Append `record`. Fails with `DuplicateId` if the id is taken.
    fn create(&self, collection: &str, record: ListingRecord) -> Result<ListingRecord, StoreError>;

    /// Shallow-merge `partial` over the stored record with the same id and
    /// return the merged result.
    fn update(&self, collection: &str, partial: ListingRecord) -> Result<ListingRecord, StoreError>;
}

/// Collection names become file names, so restrict them to a safe set.
pub fn validate_collection_name(name: &str) -> Result<(), StoreError> {
    let valid = !name.is_empty()
        && name.len() <= MAX_COLLECTION_NAME_LENGTH
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
    if valid {
        Ok(())
    } else {
        Err(StoreError::InvalidCollection {
            name: name.to_string(),
        })
    }
}

fn find_by_id(
    items: &[ListingRecord],
    collection: &str,
    id: &str,
) -> Result<usize, StoreError> {
    items
        .iter()
        .position(|r| r.id == id)
        .ok_or_else(|| StoreError::NotFound {
            collection: collection.to_string(),
            id: id.to_string(),
        })
}

// =============================================================================
// JSON directory store
// =============================================================================

/// File-backed store: one JSON document per collection.
///
/// A process-wide mutex serialises read-modify-write cycles so concurrent
/// `create`/`update` calls from the same process cannot lose writes.
#[derive(Debug)]
pub struct JsonDirStore {
    root: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonDirStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of the file backing `collection`.
    pub fn collection_path(&self, collection: &str) -> PathBuf {
        self.root
            .join(format!("{collection}.{COLLECTION_FILE_EXTENSION}"))
    }

    fn read_collection(&self, collection: &str) -> Result<Vec<ListingRecord>, StoreError> {
        validate_collection_name(collection)?;
        let path = self.collection_path(collection);

        if let Ok(meta) = std::fs::metadata(&path) {
            if meta.len() > MAX_COLLECTION_FILE_SIZE {
                return Err(StoreError::FileTooLarge {
                    path,
                    size: meta.len(),
                    max_size: MAX_COLLECTION_FILE_SIZE,
                });
            }
        }

        let read = fs::read_if_exists(&path).map_err(|source| StoreError::Io {
            collection: collection.to_string(),
            path: path.clone(),
            source,
        })?;

        let Some(content) = read else {
            tracing::debug!(collection, path = %path.display(), "Collection file absent; empty");
            return Ok(Vec::new());
        };

        let parsed: Collection =
            serde_json::from_str(&content).map_err(|source| StoreError::Json {
                collection: collection.to_string(),
                path: path.clone(),
                source,
            })?;

        tracing::debug!(collection, records = parsed.items.len(), "Collection read");
        Ok(parsed.items)
    }

    fn write_collection(
        &self,
        collection: &str,
        items: Vec<ListingRecord>,
    ) -> Result<(), StoreError> {
        let path = self.collection_path(collection);
        let count = items.len();
        let json = serde_json::to_vec_pretty(&Collection { items }).map_err(|source| {
            StoreError::Json {
                collection: collection.to_string(),
                path: path.clone(),
                source,
            }
        })?;

        fs::write_atomic(&path, &json).map_err(|source| StoreError::Io {
            collection: collection.to_string(),
            path: path.clone(),
            source,
        })?;

        tracing::debug!(collection, records = count, "Collection written");
        Ok(())
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, ()> {
        // The guarded data is `()`, so a poisoned lock carries no broken state.
        self.write_lock
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl RecordStore for JsonDirStore {
    fn get_all(&self, collection: &str) -> Result<Vec<ListingRecord>, StoreError> {
        self.read_collection(collection)
    }

    fn get_by_id(&self, collection: &str, id: &str) -> Result<ListingRecord, StoreError> {
        let mut items = self.read_collection(collection)?;
        let idx = find_by_id(&items, collection, id)?;
        Ok(items.swap_remove(idx))
    }

    fn create(&self, collection: &str, record: ListingRecord) -> Result<ListingRecord, StoreError> {
        let _guard = self.lock();
        let mut items = self.read_collection(collection)?;
        if items.iter().any(|r| r.id == record.id) {
            return Err(StoreError::DuplicateId {
                collection: collection.to_string(),
                id: record.id,
            });
        }
        items.push(record.clone());
        self.write_collection(collection, items)?;
        tracing::info!(collection, id = %record.id, "Record created");
        Ok(record)
    }

    fn update(&self, collection: &str, partial: ListingRecord) -> Result<ListingRecord, StoreError> {
        let _guard = self.lock();
        let mut items = self.read_collection(collection)?;
        let idx = find_by_id(&items, collection, &partial.id)?;
        items[idx].merge(&partial);
        let merged = items[idx].clone();
        self.write_collection(collection, items)?;
        tracing::info!(
            collection,
            id = %merged.id,
            fields = partial.attributes.len(),
            "Record updated"
        );
        Ok(merged)
    }
}

// =============================================================================
// In-memory store
// =============================================================================

/// Store holding all collections in memory.
#[derive(Debug, Default)]
pub struct MemoryStore {
    collections: Mutex<HashMap<String, Vec<ListingRecord>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style seeding of one collection.
    pub fn with_collection(self, collection: &str, items: Vec<ListingRecord>) -> Self {
        self.lock().insert(collection.to_string(), items);
        self
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, Vec<ListingRecord>>> {
        // Every mutation below completes before the guard drops, so a
        // poisoned map is still consistent.
        self.collections
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl RecordStore for MemoryStore {
    fn get_all(&self, collection: &str) -> Result<Vec<ListingRecord>, StoreError> {
        validate_collection_name(collection)?;
        Ok(self.lock().get(collection).cloned().unwrap_or_default())
    }

    fn get_by_id(&self, collection: &str, id: &str) -> Result<ListingRecord, StoreError> {
        validate_collection_name(collection)?;
        let map = self.lock();
        let items = map.get(collection).map(Vec::as_slice).unwrap_or_default();
        let idx = find_by_id(items, collection, id)?;
        Ok(items[idx].clone())
    }

    fn create(&self, collection: &str, record: ListingRecord) -> Result<ListingRecord, StoreError> {
        validate_collection_name(collection)?;
        let mut map = self.lock();
        let items = map.entry(collection.to_string()).or_default();
        if items.iter().any(|r| r.id == record.id) {
            return Err(StoreError::DuplicateId {
                collection: collection.to_string(),
                id: record.id,
            });
        }
        items.push(record.clone());
        Ok(record)
    }

    fn update(&self, collection: &str, partial: ListingRecord) -> Result<ListingRecord, StoreError> {
        validate_collection_name(collection)?;
        let mut map = self.lock();
        let items = map.get_mut(collection).ok_or_else(|| StoreError::NotFound {
            collection: collection.to_string(),
            id: partial.id.clone(),
        })?;
        let idx = find_by_id(items, collection, &partial.id)?;
        items[idx].merge(&partial);
        Ok(items[idx].clone())
    }
}
