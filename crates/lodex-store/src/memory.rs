use std::collections::HashMap;
use std::sync::RwLock;

use lodex_types::ObjectId;

use crate::error::StoreResult;
use crate::traits::ObjectStore;
use crate::zlib::{deflate, inflate};

/// In-memory, HashMap-based object store.
///
/// Intended for tests and embedding. Objects are kept *compressed*, exactly
/// as a loose file would hold them, so reads go through the same inflate path
/// as [`LooseObjectStore`](crate::LooseObjectStore).
pub struct InMemoryObjectStore {
    objects: RwLock<HashMap<ObjectId, Vec<u8>>>,
}

impl InMemoryObjectStore {
    /// Create a new empty in-memory store.
    pub fn new() -> Self {
        Self {
            objects: RwLock::new(HashMap::new()),
        }
    }

    /// Compress and store an inflated record (header included) under `id`.
    ///
    /// The identifier is taken as given; it is not checked against the content.
    pub fn insert(&self, id: ObjectId, plaintext: &[u8]) -> StoreResult<()> {
        let compressed = deflate(plaintext)?;
        self.insert_compressed(id, compressed);
        Ok(())
    }

    /// Store an already-compressed stream verbatim.
    pub fn insert_compressed(&self, id: ObjectId, compressed: Vec<u8>) {
        self.objects
            .write()
            .expect("lock poisoned")
            .insert(id, compressed);
    }

    /// Number of objects currently stored.
    pub fn len(&self) -> usize {
        self.objects.read().expect("lock poisoned").len()
    }

    /// Returns `true` if the store is empty.
    pub fn is_empty(&self) -> bool {
        self.objects.read().expect("lock poisoned").is_empty()
    }
}

impl Default for InMemoryObjectStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ObjectStore for InMemoryObjectStore {
    fn read(&self, id: &ObjectId) -> StoreResult<Option<Vec<u8>>> {
        let map = self.objects.read().expect("lock poisoned");
        match map.get(id) {
            Some(compressed) => inflate(id, compressed).map(Some),
            None => Ok(None),
        }
    }

    fn exists(&self, id: &ObjectId) -> StoreResult<bool> {
        let map = self.objects.read().expect("lock poisoned");
        Ok(map.contains_key(id))
    }
}

impl std::fmt::Debug for InMemoryObjectStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let count = self.len();
        f.debug_struct("InMemoryObjectStore")
            .field("object_count", &count)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StoreError;

    fn oid(byte: u8) -> ObjectId {
        ObjectId::from_raw([byte; 20])
    }

    #[test]
    fn insert_and_read() {
        let store = InMemoryObjectStore::new();
        store.insert(oid(1), b"blob 5\0hello").unwrap();
        assert_eq!(store.read(&oid(1)).unwrap().unwrap(), b"blob 5\0hello");
    }

    #[test]
    fn read_missing_object_returns_none() {
        let store = InMemoryObjectStore::new();
        assert!(store.read(&oid(9)).unwrap().is_none());
    }

    #[test]
    fn locate_missing_object_is_not_found() {
        let store = InMemoryObjectStore::new();
        let err = store.locate(&oid(9)).unwrap_err();
        assert!(matches!(err, StoreError::NotFound(id) if id == oid(9)));
    }

    #[test]
    fn corrupt_compressed_entry() {
        let store = InMemoryObjectStore::new();
        store.insert_compressed(oid(2), b"garbage".to_vec());
        assert!(store.exists(&oid(2)).unwrap());
        let err = store.read(&oid(2)).unwrap_err();
        assert!(matches!(err, StoreError::Decompression { .. }));
    }

    #[test]
    fn insert_overwrites() {
        let store = InMemoryObjectStore::new();
        store.insert(oid(1), b"blob 1\0a").unwrap();
        store.insert(oid(1), b"blob 1\0b").unwrap();
        assert_eq!(store.len(), 1);
        assert_eq!(store.locate(&oid(1)).unwrap(), b"blob 1\0b");
    }

    #[test]
    fn len_and_is_empty() {
        let store = InMemoryObjectStore::new();
        assert!(store.is_empty());
        store.insert(oid(1), b"blob 0\0").unwrap();
        assert!(!store.is_empty());
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn usable_through_a_reference() {
        fn read_via<S: ObjectStore>(store: S, id: &ObjectId) -> Vec<u8> {
            store.locate(id).unwrap()
        }
        let store = InMemoryObjectStore::new();
        store.insert(oid(4), b"blob 2\0hi").unwrap();
        assert_eq!(read_via(&store, &oid(4)), b"blob 2\0hi");
    }

    #[test]
    fn debug_format() {
        let store = InMemoryObjectStore::new();
        store.insert(oid(1), b"blob 1\0x").unwrap();
        let debug = format!("{store:?}");
        assert!(debug.contains("InMemoryObjectStore"));
        assert!(debug.contains("object_count"));
    }
}
