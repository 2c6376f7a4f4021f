//! File-backed key-value store.
//!
//! Each key maps to one file under the store directory. Writes go to a
//! sibling temporary file first and are renamed into place, so a reader never
//! observes a half-written value.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::{CacheError, KeyValueStore};

const VALUE_EXTENSION: &str = "json";

/// [`KeyValueStore`] persisting values as files in a directory.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Open a store rooted at `dir`, creating the directory if needed.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, CacheError> {
        let dir = dir.into();
        fs::create_dir_all(&dir).map_err(|e| {
            CacheError::OpenError(format!("{}: {}", dir.display(), e))
        })?;
        Ok(Self { dir })
    }

    /// Directory holding the values.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, CacheError> {
        if key.is_empty() {
            return Err(CacheError::InvalidKey("empty key".to_string()));
        }
        Ok(self
            .dir
            .join(format!("{}.{}", encode_key(key), VALUE_EXTENSION)))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, CacheError> {
        let path = self.path_for(key)?;
        match fs::read(&path) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(CacheError::io(path.display().to_string(), e)),
        }
    }

    fn set(&self, key: &str, value: &[u8]) -> Result<(), CacheError> {
        let path = self.path_for(key)?;
        let tmp = path.with_extension("tmp");
        fs::write(&tmp, value).map_err(|e| CacheError::io(tmp.display().to_string(), e))?;
        fs::rename(&tmp, &path).map_err(|e| CacheError::io(path.display().to_string(), e))?;
        tracing::trace!(key, path = %path.display(), "stored value");
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<(), CacheError> {
        let path = self.path_for(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(CacheError::io(path.display().to_string(), e)),
        }
    }

    fn exists(&self, key: &str) -> Result<bool, CacheError> {
        Ok(self.path_for(key)?.is_file())
    }
}

/// Map a key onto a safe file stem.
///
/// ASCII alphanumerics, `-` and `_` pass through; every other byte is written
/// as `%XX`, so distinct keys never collide.
fn encode_key(key: &str) -> String {
    let mut out = String::with_capacity(key.len());
    for byte in key.bytes() {
        if byte.is_ascii_alphanumeric() || byte == b'-' || byte == b'_' {
            out.push(byte as char);
        } else {
            out.push_str(&format!("%{:02X}", byte));
        }
    }
    out
}
