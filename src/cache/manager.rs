//! File-backed price list cache
//!
//! Provides a `CacheManager` that keeps one JSON file per area code in the
//! user cache directory, exactly as it was served by the price service.

use directories::ProjectDirs;
use std::fs;
use std::io::{self, ErrorKind};
use std::path::{Path, PathBuf};
use tracing::debug;

use super::store::{ScheduleStore, StoreError};
use crate::data::AreaCode;

/// Application name used for the cache directory
const APP_NAME: &str = "thepriceisright";

/// Manages reading and writing cached price lists on disk
///
/// Files live in an XDG-compliant cache directory (`~/.cache/thepriceisright/`
/// on Linux) and are named `<AREA>_cache.json`.
#[derive(Debug, Clone)]
pub struct CacheManager {
    /// Directory where cache files are stored
    cache_dir: PathBuf,
}

impl CacheManager {
    /// Creates a new CacheManager using the platform cache directory
    ///
    /// Returns `None` if the cache directory cannot be determined (e.g., no home directory).
    pub fn new() -> Option<Self> {
        Self::default_dir().map(Self::with_dir)
    }

    /// Creates a new CacheManager with a custom cache directory
    pub fn with_dir(cache_dir: PathBuf) -> Self {
        Self { cache_dir }
    }

    /// The platform cache directory for this application, if there is one
    pub fn default_dir() -> Option<PathBuf> {
        let project_dirs = ProjectDirs::from("", "", APP_NAME)?;
        Some(project_dirs.cache_dir().to_path_buf())
    }

    pub fn cache_dir(&self) -> &Path {
        &self.cache_dir
    }

    /// Returns the path to the cache file for the given area
    pub fn cache_path(&self, area: AreaCode) -> PathBuf {
        self.cache_dir.join(format!("{area}_cache.json"))
    }

    /// Sibling file that new content is written to before it replaces the cache file
    fn staging_path(&self, area: AreaCode) -> PathBuf {
        self.cache_dir.join(format!(".{area}_cache.json.tmp"))
    }

    /// Ensures the cache directory exists
    fn ensure_dir(&self) -> io::Result<()> {
        fs::create_dir_all(&self.cache_dir)
    }

    fn write_staged(&self, area: AreaCode, bytes: &[u8]) -> io::Result<()> {
        self.ensure_dir()?;
        let staging = self.staging_path(area);
        if let Err(err) = fs::write(&staging, bytes) {
            let _ = fs::remove_file(&staging);
            return Err(err);
        }
        fs::rename(&staging, self.cache_path(area))
    }
}

impl ScheduleStore for CacheManager {
    fn read(&self, area: AreaCode) -> Result<Vec<u8>, StoreError> {
        let path = self.cache_path(area);
        debug!(path = %path.display(), "Looking for price list cache file");

        match fs::read(&path) {
            Ok(bytes) => Ok(bytes),
            Err(source) if source.kind() == ErrorKind::NotFound => Err(StoreError::NotFound { path }),
            Err(source) => Err(StoreError::Read { path, source }),
        }
    }

    /// Writes through a staging file and renames it into place, so a failed
    /// write leaves the previous cache file untouched
    fn write(&self, area: AreaCode, bytes: &[u8]) -> Result<(), StoreError> {
        let path = self.cache_path(area);
        debug!(path = %path.display(), "Saving new price list cache file");

        self.write_staged(area, bytes)
            .map_err(|source| StoreError::Write { path, source })
    }
}
