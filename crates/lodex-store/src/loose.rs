use std::io;
use std::path::{Path, PathBuf};

use lodex_types::ObjectId;
use tracing::debug;

use crate::config::StoreConfig;
use crate::error::StoreResult;
use crate::traits::ObjectStore;
use crate::zlib::inflate;

/// Filesystem store reading one zlib-compressed file per object.
///
/// An object `H` lives at `<objects_dir>/<H[0:2]>/<H[2:]>`.
#[derive(Clone, Debug)]
pub struct LooseObjectStore {
    objects_dir: PathBuf,
}

impl LooseObjectStore {
    /// Open a store rooted at an `objects` directory.
    ///
    /// The directory is not checked here; a missing root simply makes every
    /// lookup come back empty.
    pub fn new(objects_dir: impl Into<PathBuf>) -> Self {
        Self {
            objects_dir: objects_dir.into(),
        }
    }

    /// Open the store described by `config`.
    pub fn from_config(config: &StoreConfig) -> Self {
        Self::new(config.objects_dir.clone())
    }

    /// The root `objects` directory.
    pub fn objects_dir(&self) -> &Path {
        &self.objects_dir
    }

    /// Path of the file that would hold `id`.
    pub fn object_path(&self, id: &ObjectId) -> PathBuf {
        self.objects_dir
            .join(id.dir_segment())
            .join(id.file_segment())
    }
}

impl ObjectStore for LooseObjectStore {
    fn read(&self, id: &ObjectId) -> StoreResult<Option<Vec<u8>>> {
        let path = self.object_path(id);
        let compressed = match std::fs::read(&path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(id = %id, path = %path.display(), "loose object missing");
                return Ok(None);
            }
            Err(e) => return Err(e.into()),
        };
        let raw = inflate(id, &compressed)?;
        debug!(
            id = %id,
            compressed = compressed.len(),
            inflated = raw.len(),
            "read loose object"
        );
        Ok(Some(raw))
    }

    fn exists(&self, id: &ObjectId) -> StoreResult<bool> {
        Ok(self.object_path(id).is_file())
    }
}
