//! Crash-safe TOML documents.
//!
//! A write either lands completely or not at all: the new document goes to a
//! uniquely named sibling temp file, is fsynced, then renamed over the
//! original. Writers are serialized through an exclusive lock on a sibling
//! `.lock` file, which is never removed.

use fs2::FileExt;
use serde::{Serialize, de::DeserializeOwned};
use std::fs::{self, File, OpenOptions};
use std::io::Write as IoWrite;
use tempfile::NamedTempFile;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

use jalmitra_core::JalmitraError;

/// Errors raised while reading or replacing a TOML document.
#[derive(Debug)]
pub enum AtomicTomlError {
    Io(std::io::Error),
    Parse(toml::de::Error),
    Encode(toml::ser::Error),
    Lock(String),
}

impl std::fmt::Display for AtomicTomlError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AtomicTomlError::Io(e) => write!(f, "I/O error: {}", e),
            AtomicTomlError::Parse(e) => write!(f, "TOML parse error: {}", e),
            AtomicTomlError::Encode(e) => write!(f, "TOML serialization error: {}", e),
            AtomicTomlError::Lock(e) => write!(f, "Lock error: {}", e),
        }
    }
}

impl std::error::Error for AtomicTomlError {}

impl From<std::io::Error> for AtomicTomlError {
    fn from(e: std::io::Error) -> Self {
        AtomicTomlError::Io(e)
    }
}

impl From<toml::de::Error> for AtomicTomlError {
    fn from(e: toml::de::Error) -> Self {
        AtomicTomlError::Parse(e)
    }
}

impl From<toml::ser::Error> for AtomicTomlError {
    fn from(e: toml::ser::Error) -> Self {
        AtomicTomlError::Encode(e)
    }
}

impl AtomicTomlError {
    /// Maps a failed read into the domain error.
    pub fn into_read_error(self) -> JalmitraError {
        match self {
            AtomicTomlError::Io(e) => e.into(),
            AtomicTomlError::Parse(e) => e.into(),
            AtomicTomlError::Encode(e) => e.into(),
            AtomicTomlError::Lock(message) => JalmitraError::io(message),
        }
    }

    /// Any failure on the write path means the value is not durable.
    pub fn into_write_error(self) -> JalmitraError {
        JalmitraError::storage_write_failed(self.to_string())
    }
}

/// Handle to one TOML document on disk holding a `T`.
#[derive(Debug, Clone)]
pub struct AtomicTomlFile<T> {
    path: PathBuf,
    _phantom: PhantomData<fn() -> T>,
}

impl<T> AtomicTomlFile<T>
where
    T: Serialize + DeserializeOwned,
{
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            _phantom: PhantomData,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the document. A missing or blank file is `Ok(None)`.
    pub fn load(&self) -> Result<Option<T>, AtomicTomlError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        if content.trim().is_empty() {
            return Ok(None);
        }

        Ok(Some(toml::from_str(&content)?))
    }

    /// Replaces the document with `data` (tmp file, fsync, rename).
    ///
    /// Each call writes its own temp file, so concurrent saves never share one.
    ///
    /// # Arguments
    ///
    /// * `data` - The complete document to write
    pub fn save(&self, data: &T) -> Result<(), AtomicTomlError> {
        let dir = self.parent_dir();
        fs::create_dir_all(&dir)?;

        let encoded = toml::to_string_pretty(data)?;

        let mut tmp_file = NamedTempFile::new_in(&dir)?;
        tmp_file.write_all(encoded.as_bytes())?;
        tmp_file.as_file().sync_all()?;
        tmp_file.persist(&self.path).map_err(|e| AtomicTomlError::Io(e.error))?;
        Ok(())
    }

    /// Read-modify-write under the exclusive lock.
    ///
    /// `default_value` seeds the document when the file does not exist yet.
    /// Nothing is written if `f` fails.
    pub fn update<F>(&self, default_value: T, f: F) -> Result<(), AtomicTomlError>
    where
        F: FnOnce(&mut T) -> Result<(), AtomicTomlError>,
    {
        let _lock = FileLock::acquire(&self.path)?;

        let mut data = self.load()?.unwrap_or(default_value);
        f(&mut data)?;
        self.save(&data)
    }

    fn parent_dir(&self) -> PathBuf {
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        }
    }
}

/// Exclusive lock held for the duration of an update; released when dropped.
///
/// The lock file stays on disk. Unlinking it would let a later writer lock a
/// fresh inode while an earlier one still holds the old.
struct FileLock {
    file: File,
}

impl FileLock {
    fn acquire(path: &Path) -> Result<Self, AtomicTomlError> {
        let lock_path = path.with_extension("lock");

        if let Some(parent) = lock_path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }

        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(false)
            .open(&lock_path)?;

        file.lock_exclusive()
            .map_err(|e| AtomicTomlError::Lock(format!("failed to lock {:?}: {}", lock_path, e)))?;

        Ok(FileLock { file })
    }
}

impl Drop for FileLock {
    fn drop(&mut self) {
        let _ = FileExt::unlock(&self.file);
    }
}
