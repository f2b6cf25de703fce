//! Named-blob persistence.

use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use common::{Error, Result};
use tracing::debug;

/// Byte-level get/set of a named blob.
pub trait PersistenceProvider: Send + Sync {
    /// Read the blob, creating an empty one if it does not exist yet.
    fn read(&self, name: &str) -> Result<Vec<u8>>;

    /// Replace the blob's full contents.
    fn write(&self, name: &str, bytes: &[u8]) -> Result<()>;

    /// Truncate the blob to zero length.
    fn clear(&self, name: &str) -> Result<()>;
}

// ── File-backed store ─────────────────────────────────────────────────

/// Stores each blob as a file inside one directory.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, name: &str) -> Result<PathBuf> {
        if name.is_empty() || name == "." || name == ".." || name.contains(['/', '\\']) {
            return Err(Error::Persistence(format!("invalid blob name '{name}'")));
        }
        Ok(self.dir.join(name))
    }
}

fn persistence_err(action: &str, path: &Path, e: std::io::Error) -> Error {
    Error::Persistence(format!("failed to {} {}: {}", action, path.display(), e))
}

impl PersistenceProvider for FileStore {
    fn read(&self, name: &str) -> Result<Vec<u8>> {
        let path = self.path_for(name)?;
        match fs::read(&path) {
            Ok(bytes) => Ok(bytes),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("{} does not exist, creating it", path.display());
                fs::create_dir_all(&self.dir)
                    .map_err(|e| persistence_err("create", &self.dir, e))?;
                fs::write(&path, b"").map_err(|e| persistence_err("create", &path, e))?;
                Ok(Vec::new())
            }
            Err(e) => Err(persistence_err("read", &path, e)),
        }
    }

    fn write(&self, name: &str, bytes: &[u8]) -> Result<()> {
        let path = self.path_for(name)?;
        fs::create_dir_all(&self.dir).map_err(|e| persistence_err("create", &self.dir, e))?;

        // Write then rename so a failed write never leaves a truncated file.
        let tmp = self.dir.join(format!(".{name}.tmp"));
        fs::write(&tmp, bytes).map_err(|e| persistence_err("write", &tmp, e))?;
        fs::rename(&tmp, &path).map_err(|e| persistence_err("replace", &path, e))?;
        debug!("Wrote {} bytes to {}", bytes.len(), path.display());
        Ok(())
    }

    fn clear(&self, name: &str) -> Result<()> {
        let path = self.path_for(name)?;
        fs::create_dir_all(&self.dir).map_err(|e| persistence_err("create", &self.dir, e))?;
        fs::write(&path, b"").map_err(|e| persistence_err("clear", &path, e))
    }
}

// ── In-memory store ───────────────────────────────────────────────────

/// Process-local store, used for dry runs and tests. Counts writes.
#[derive(Debug, Default)]
pub struct MemoryStore {
    blobs: Mutex<HashMap<String, Vec<u8>>>,
    writes: AtomicUsize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-seeded with one blob.
    pub fn with_blob(name: &str, bytes: impl Into<Vec<u8>>) -> Self {
        let store = Self::default();
        store.lock().insert(name.to_string(), bytes.into());
        store
    }

    /// Number of successful `write` calls so far.
    pub fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    /// Current contents of a blob, if it exists.
    pub fn get(&self, name: &str) -> Option<Vec<u8>> {
        self.lock().get(name).cloned()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, Vec<u8>>> {
        // A panicked writer cannot leave a half-written Vec behind.
        self.blobs.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl PersistenceProvider for MemoryStore {
    fn read(&self, name: &str) -> Result<Vec<u8>> {
        Ok(self.lock().entry(name.to_string()).or_default().clone())
    }

    fn write(&self, name: &str, bytes: &[u8]) -> Result<()> {
        self.lock().insert(name.to_string(), bytes.to_vec());
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn clear(&self, name: &str) -> Result<()> {
        self.lock().insert(name.to_string(), Vec::new());
        Ok(())
    }
}
