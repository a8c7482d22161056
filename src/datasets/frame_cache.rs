use crate::datasets::data_loader::DatasetLoader;
use crate::datasets::error::DatasetError;
use crate::types::dataset_kind::DatasetKind;
use log::{debug, info};
use polars::prelude::DataFrame;
use std::collections::{hash_map::Entry, HashMap};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

/// Memoizes loaded datasets so each file is parsed at most once per cache.
///
/// Entries are keyed by dataset kind and absolute path. Frames are immutable once
/// loaded, so handing out clones (which share their column buffers) is cheap.
#[derive(Debug, Default)]
pub struct DatasetCache {
    frames: Mutex<HashMap<(DatasetKind, PathBuf), DataFrame>>,
}

impl DatasetCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_or_load(&self, kind: DatasetKind, path: &Path) -> Result<DataFrame, DatasetError> {
        let key = (kind, Self::identity(path));

        {
            let cache = self.frames.lock().unwrap_or_else(PoisonError::into_inner);
            if let Some(cached) = cache.get(&key) {
                debug!("Cache hit for {} dataset {:?}", kind, key.1);
                return Ok(cached.clone());
            }
        }

        // Loading happens outside the lock.
        info!("Cache miss for {} dataset {:?}, loading", kind, key.1);
        let loaded = DatasetLoader::load(kind, path)?;

        let mut cache = self.frames.lock().unwrap_or_else(PoisonError::into_inner);
        match cache.entry(key) {
            // Another caller finished first; keep their frame.
            Entry::Occupied(entry) => Ok(entry.get().clone()),
            Entry::Vacant(entry) => {
                entry.insert(loaded.clone());
                Ok(loaded)
            }
        }
    }

    pub fn len(&self) -> usize {
        self.frames
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn identity(path: &Path) -> PathBuf {
        std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf())
    }
}
