//! Byte store for cached price lists

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::data::AreaCode;

/// Errors that can occur when reading or writing the cache
#[derive(Debug, Error)]
pub enum StoreError {
    /// Nothing has been cached for the area yet
    #[error("price list cache file not found at {}", path.display())]
    NotFound { path: PathBuf },

    #[error("error while loading cache file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("error while saving cache file {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Stores one serialized price list per area code
pub trait ScheduleStore: Send + Sync {
    /// Returns the bytes last written for `area`
    ///
    /// Fails with [`StoreError::NotFound`] when nothing has been written yet.
    fn read(&self, area: AreaCode) -> Result<Vec<u8>, StoreError>;

    /// Replaces whatever is stored for `area`
    fn write(&self, area: AreaCode, bytes: &[u8]) -> Result<(), StoreError>;
}
