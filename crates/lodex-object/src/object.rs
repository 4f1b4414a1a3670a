use lodex_types::ObjectKind;
use serde::{Deserialize, Serialize};

use crate::blob::Blob;
use crate::commit::Commit;
use crate::header::Header;
use crate::tag::Tag;
use crate::tree::Tree;

/// A decoded body, one variant per record kind.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Object {
    Blob(Blob),
    Tree(Tree),
    Commit(Commit),
    Tag(Tag),
}

impl Object {
    /// The kind of this object.
    pub fn kind(&self) -> ObjectKind {
        match self {
            Self::Blob(_) => ObjectKind::Blob,
            Self::Tree(_) => ObjectKind::Tree,
            Self::Commit(_) => ObjectKind::Commit,
            Self::Tag(_) => ObjectKind::Tag,
        }
    }

    pub fn as_blob(&self) -> Option<&Blob> {
        match self {
            Self::Blob(b) => Some(b),
            _ => None,
        }
    }

    pub fn as_tree(&self) -> Option<&Tree> {
        match self {
            Self::Tree(t) => Some(t),
            _ => None,
        }
    }

    pub fn as_commit(&self) -> Option<&Commit> {
        match self {
            Self::Commit(c) => Some(c),
            _ => None,
        }
    }

    pub fn as_tag(&self) -> Option<&Tag> {
        match self {
            Self::Tag(t) => Some(t),
            _ => None,
        }
    }
}

/// The result of one decode call: the header and the body it introduced.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecodedObject {
    pub header: Header,
    pub object: Object,
}

impl DecodedObject {
    pub fn kind(&self) -> ObjectKind {
        self.header.kind
    }

    /// Body size as declared by the header.
    pub fn size(&self) -> u64 {
        self.header.declared_size
    }
}
