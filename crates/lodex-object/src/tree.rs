//! Tree bodies: `<mode> <name>\0<20 raw hash bytes>` records packed back to back.
//!
//! Delimiters are only looked for inside the mode and name. The hash is
//! always a fixed-width read, whatever bytes it contains.

use std::fmt;

use lodex_types::{ObjectId, RAW_LEN};
use serde::{Deserialize, Serialize};

use crate::error::{DecodeError, DecodeResult};

/// What a tree entry points at, derived from its mode.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntryKind {
    /// Subtree (`40000`).
    Directory,
    /// Regular or executable file (`100644`, `100755`).
    File,
    /// Symbolic link (`120000`).
    Symlink,
    /// Commit of another repository (`160000`).
    Submodule,
}

impl EntryKind {
    /// Mode prefixes, checked in order.
    const PREFIXES: [(&'static str, EntryKind); 5] = [
        ("100", EntryKind::File),
        ("120", EntryKind::Symlink),
        ("160", EntryKind::Submodule),
        ("040", EntryKind::Directory),
        ("40", EntryKind::Directory),
    ];

    /// Classify a mode string by its leading digits.
    pub fn from_mode(mode: &str) -> Option<Self> {
        Self::PREFIXES
            .iter()
            .find(|(prefix, _)| mode.starts_with(prefix))
            .map(|&(_, kind)| kind)
    }
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Directory => "tree",
            Self::File => "blob",
            Self::Symlink => "link",
            Self::Submodule => "commit",
        };
        f.write_str(s)
    }
}

/// A single entry in a tree object.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeEntry {
    /// Mode digits exactly as stored, e.g. `"100644"` or `"40000"`.
    pub mode: String,
    pub kind: EntryKind,
    pub name: String,
    pub id: ObjectId,
}

/// Directory listing object.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tree {
    /// Entries in on-disk order.
    pub entries: Vec<TreeEntry>,
}

impl Tree {
    /// Look up an entry by name.
    pub fn get(&self, name: &str) -> Option<&TreeEntry> {
        self.entries.iter().find(|e| e.name == name)
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the tree has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Decode a tree body.
///
/// Fails fast: the first truncated entry yields
/// [`DecodeError::MalformedTree`] and the first unrecognised mode yields
/// [`DecodeError::UnknownMode`], both naming the entry index.
pub fn decode_tree(body: &[u8]) -> DecodeResult<Tree> {
    let mut entries = Vec::new();
    let mut rest = body;

    while !rest.is_empty() {
        let index = entries.len();
        let malformed = |reason: &str| DecodeError::MalformedTree {
            index,
            reason: reason.to_string(),
        };

        let mode_end = rest
            .iter()
            .position(|&b| b == b' ' || b == 0)
            .filter(|&at| rest[at] == b' ')
            .ok_or_else(|| malformed("mode is not terminated by a space"))?;
        if mode_end == 0 {
            return Err(malformed("empty mode"));
        }
        let mode = String::from_utf8_lossy(&rest[..mode_end]).into_owned();
        let kind = EntryKind::from_mode(&mode).ok_or_else(|| DecodeError::UnknownMode {
            index,
            mode: mode.clone(),
        })?;

        let after_mode = &rest[mode_end + 1..];
        let name_end = after_mode
            .iter()
            .position(|&b| b == 0)
            .ok_or_else(|| malformed("name is not terminated by NUL"))?;
        let name = String::from_utf8_lossy(&after_mode[..name_end]).into_owned();

        let after_name = &after_mode[name_end + 1..];
        if after_name.len() < RAW_LEN {
            return Err(malformed(&format!(
                "hash needs {RAW_LEN} bytes, {} left",
                after_name.len()
            )));
        }
        let (hash, tail) = after_name.split_at(RAW_LEN);
        let id = ObjectId::from_slice(hash).map_err(|e| malformed(&e.to_string()))?;

        entries.push(TreeEntry {
            mode,
            kind,
            name,
            id,
        });
        rest = tail;
    }

    Ok(Tree { entries })
}
