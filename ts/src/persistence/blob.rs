//! Key-value blob stores

use std::collections::HashMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

use fs2::FileExt;
use tracing::debug;

use super::PersistError;

/// String blobs addressed by key
pub trait BlobStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, PersistError>;
    fn set(&self, key: &str, value: &str) -> Result<(), PersistError>;
}

/// One `{key}.json` file per key inside a directory
///
/// Writes go to a temp file that is renamed over the target while holding an
/// exclusive lock on `.{key}.lock`, so readers never see a half-written blob.
#[derive(Debug, Clone)]
pub struct FileBlobStore {
    dir: PathBuf,
}

impl FileBlobStore {
    /// Open a store rooted at `dir`, creating the directory if needed
    pub fn open(dir: impl AsRef<Path>) -> Result<Self, PersistError> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir)?;
        debug!(dir = %dir.display(), "Opened file blob store");
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the file holding `key`
    pub fn path_for(&self, key: &str) -> Result<PathBuf, PersistError> {
        validate_key(key)?;
        Ok(self.dir.join(format!("{}.json", key)))
    }

    fn lock_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!(".{}.lock", key))
    }

    fn with_lock<T>(&self, key: &str, f: impl FnOnce() -> Result<T, PersistError>) -> Result<T, PersistError> {
        let lock = fs::OpenOptions::new()
            .create(true)
            .truncate(false)
            .write(true)
            .open(self.lock_path(key))?;
        lock.lock_exclusive()?;
        let result = f();
        FileExt::unlock(&lock)?;
        result
    }
}

fn validate_key(key: &str) -> Result<(), PersistError> {
    let ok = !key.is_empty()
        && !key.starts_with('.')
        && key.chars().all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'));
    if ok {
        Ok(())
    } else {
        Err(PersistError::InvalidKey(key.to_string()))
    }
}

impl BlobStore for FileBlobStore {
    fn get(&self, key: &str) -> Result<Option<String>, PersistError> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), PersistError> {
        let path = self.path_for(key)?;
        let tmp = self.dir.join(format!(".{}.json.tmp", key));
        self.with_lock(key, || {
            let mut file = fs::File::create(&tmp)?;
            file.write_all(value.as_bytes())?;
            file.sync_all()?;
            fs::rename(&tmp, &path)?;
            debug!(path = %path.display(), bytes = value.len(), "Wrote blob");
            Ok(())
        })
    }
}

/// In-process blob store
///
/// Writes can be made to fail, which stands in for a full or unavailable
/// backing store.
#[derive(Debug, Default)]
pub struct MemoryBlobStore {
    blobs: Mutex<HashMap<String, String>>,
    reject_writes: AtomicBool,
}

impl MemoryBlobStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make subsequent `set` calls fail (or succeed again)
    pub fn set_reject_writes(&self, reject: bool) {
        self.reject_writes.store(reject, Ordering::SeqCst);
    }

    fn blobs(&self) -> std::sync::MutexGuard<'_, HashMap<String, String>> {
        // A panic while holding the lock can't leave the map half-updated
        self.blobs.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl BlobStore for MemoryBlobStore {
    fn get(&self, key: &str) -> Result<Option<String>, PersistError> {
        Ok(self.blobs().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), PersistError> {
        if self.reject_writes.load(Ordering::SeqCst) {
            return Err(PersistError::Io(std::io::Error::other("blob store rejected write")));
        }
        self.blobs().insert(key.to_string(), value.to_string());
        Ok(())
    }
}

impl<B: BlobStore + ?Sized> BlobStore for std::sync::Arc<B> {
    fn get(&self, key: &str) -> Result<Option<String>, PersistError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), PersistError> {
        (**self).set(key, value)
    }
}
