use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Where the loose object store lives on disk.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreConfig {
    /// The `objects` directory holding the two-character fan-out directories.
    pub objects_dir: PathBuf,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            objects_dir: PathBuf::from(".git").join("objects"),
        }
    }
}

impl StoreConfig {
    /// Configuration for an explicit `objects` directory.
    pub fn new(objects_dir: impl Into<PathBuf>) -> Self {
        Self {
            objects_dir: objects_dir.into(),
        }
    }

    /// Configuration for the `objects` directory inside a repository directory
    /// such as `.git`.
    pub fn for_git_dir(git_dir: impl AsRef<Path>) -> Self {
        Self::new(git_dir.as_ref().join("objects"))
    }
}
