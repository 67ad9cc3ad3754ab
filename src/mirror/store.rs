//! Persistence of the extraction cache

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

#[cfg(test)]
use mockall::automock;
use tracing::{debug, warn};

use crate::encoding::strip_bom;
use crate::mirror::error::StoreError;
use crate::mirror::record::CacheMap;

/// Trait for loading and saving the whole extraction cache
#[cfg_attr(test, automock)]
pub trait CacheStorer: Send + Sync {
    /// Returns the saved cache, or an empty one when nothing was saved yet
    fn load(&self) -> Result<CacheMap, StoreError>;

    /// Replaces the saved cache with `cache`
    fn save(&self, cache: &CacheMap) -> Result<(), StoreError>;
}

/// Cache stored as one JSON object, with the previous save kept as `<path>.old`
pub struct JsonCacheFile {
    path: PathBuf,
}

impl JsonCacheFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn backup_path(&self) -> PathBuf {
        let mut name = self.path.clone().into_os_string();
        name.push(".old");
        PathBuf::from(name)
    }
}

impl CacheStorer for JsonCacheFile {
    fn load(&self) -> Result<CacheMap, StoreError> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("No cache at {}, starting empty", self.path.display());
                return Ok(CacheMap::new());
            }
            Err(source) => {
                return Err(StoreError::Read {
                    path: self.path.clone(),
                    source,
                });
            }
        };

        let cache: CacheMap =
            serde_json::from_str(strip_bom(&content)).map_err(|source| StoreError::Parse {
                path: self.path.clone(),
                source,
            })?;
        debug!("Loaded {} records from {}", cache.len(), self.path.display());
        Ok(cache)
    }

    fn save(&self, cache: &CacheMap) -> Result<(), StoreError> {
        let json = serde_json::to_string(cache).map_err(StoreError::Encode)?;

        let backup = self.backup_path();
        match std::fs::rename(&self.path, &backup) {
            Ok(()) => {}
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => warn!(
                "Failed to move {} to {}: {}",
                self.path.display(),
                backup.display(),
                e
            ),
        }

        std::fs::write(&self.path, json).map_err(|source| StoreError::Write {
            path: self.path.clone(),
            source,
        })?;
        debug!("Saved {} records to {}", cache.len(), self.path.display());
        Ok(())
    }
}
