use lodex_store::StoreError;
use lodex_types::{ObjectId, ObjectKind};

/// Errors from decoding a stored object.
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    /// Locating or inflating an object failed (including "not found").
    #[error(transparent)]
    Store(#[from] StoreError),

    /// The `<type> <size>\0` header does not follow the grammar.
    #[error("malformed header: {0}")]
    MalformedHeader(String),

    /// The header names a type other than blob, tree, commit or tag.
    #[error("unknown object type: {0:?}")]
    UnknownType(String),

    /// The body length disagrees with the size declared in the header.
    #[error("{kind} body is {actual} bytes but header declares {declared}")]
    SizeMismatch {
        kind: ObjectKind,
        declared: u64,
        actual: u64,
    },

    /// A tree entry carries a mode outside the known prefix table.
    #[error("tree entry {index} has unknown mode {mode:?}")]
    UnknownMode { index: usize, mode: String },

    /// A tree entry is cut short or lacks a delimiter.
    #[error("malformed tree entry {index}: {reason}")]
    MalformedTree { index: usize, reason: String },

    /// A required commit line is missing or unparsable.
    #[error("malformed commit: {0}")]
    MalformedCommit(String),

    /// A required tag line is missing or unparsable.
    #[error("malformed tag: {0}")]
    MalformedTag(String),

    /// A referenced object exists but is of the wrong kind.
    #[error("object {id} is a {actual}, expected a {expected}")]
    UnexpectedKind {
        id: ObjectId,
        expected: ObjectKind,
        actual: ObjectKind,
    },
}

impl DecodeError {
    /// Returns `true` if decoding failed because an object does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Store(e) if e.is_not_found())
    }
}

/// Result alias for decode operations.
pub type DecodeResult<T> = Result<T, DecodeError>;
