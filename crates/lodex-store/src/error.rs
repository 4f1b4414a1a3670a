use lodex_types::ObjectId;

/// Errors from object store operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The requested object has no storage entry.
    #[error("object not found: {0}")]
    NotFound(ObjectId),

    /// I/O error from the underlying storage backend.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The stored stream could not be inflated (truncated or invalid data).
    #[error("cannot inflate object {id}: {reason}")]
    Decompression { id: ObjectId, reason: String },
}

impl StoreError {
    /// Returns `true` if the object simply does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

/// Result alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
