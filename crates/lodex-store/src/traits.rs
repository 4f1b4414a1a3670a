use lodex_types::ObjectId;

use crate::error::{StoreError, StoreResult};

/// Read access to a content-addressed object store.
///
/// Implementations return the *inflated* record, header included; parsing is
/// left entirely to the caller.
pub trait ObjectStore: Send + Sync {
    /// Read and inflate an object by ID.
    ///
    /// Returns `Ok(None)` if the object does not exist.
    /// Returns `Err` on I/O failure or when the stream cannot be inflated.
    fn read(&self, id: &ObjectId) -> StoreResult<Option<Vec<u8>>>;

    /// Check whether an object exists in the store.
    fn exists(&self, id: &ObjectId) -> StoreResult<bool>;

    /// Read an object that must exist.
    ///
    /// Same as [`read`](Self::read) with absence reported as
    /// [`StoreError::NotFound`].
    fn locate(&self, id: &ObjectId) -> StoreResult<Vec<u8>> {
        self.read(id)?.ok_or(StoreError::NotFound(*id))
    }
}

impl<S: ObjectStore + ?Sized> ObjectStore for &S {
    fn read(&self, id: &ObjectId) -> StoreResult<Option<Vec<u8>>> {
        (**self).read(id)
    }

    fn exists(&self, id: &ObjectId) -> StoreResult<bool> {
        (**self).exists(id)
    }
}
