use crate::error::{DropVaultError, Result};
use derivative::Derivative;
use std::collections::HashMap;
use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};

/// Where the bytes of an accepted file live.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentSource {
    File(PathBuf),
    Memory(Arc<[u8]>),
}

impl ContentSource {
    pub fn read_bytes(&self) -> Result<Vec<u8>> {
        match self {
            Self::File(path) => Ok(fs::read(path)?),
            Self::Memory(bytes) => Ok(bytes.to_vec()),
        }
    }
}

const FALLBACK_NAME: &str = "download";

#[derive(Debug)]
struct Entry {
    source: ContentSource,
    /// Scratch directory holding in-memory content written out for opening.
    spill: Option<tempfile::TempDir>,
}

#[derive(Debug, Default)]
struct Registry {
    next_key: u64,
    live: HashMap<u64, Entry>,
}

/// Registry of content handed out to catalog records. Each registration
/// yields a [`ContentHandle`] that releases its entry when dropped.
#[derive(Debug, Clone, Default)]
pub struct ContentStore {
    registry: Arc<Mutex<Registry>>,
}

impl ContentStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&self, source: ContentSource) -> ContentHandle {
        let mut registry = self.lock();
        registry.next_key += 1;
        let key = registry.next_key;
        registry.live.insert(
            key,
            Entry {
                source,
                spill: None,
            },
        );
        tracing::trace!(key, "Registered content handle");

        ContentHandle {
            key,
            store: self.clone(),
        }
    }

    pub fn resolve(&self, handle: &ContentHandle) -> Result<ContentSource> {
        self.lock()
            .live
            .get(&handle.key)
            .map(|entry| entry.source.clone())
            .ok_or(DropVaultError::Released(handle.key))
    }

    /// A filesystem path for the handle's content. In-memory bytes are
    /// written under a private temp directory, named after the last
    /// component of `name`; that directory goes away with the handle.
    pub fn local_path(&self, handle: &ContentHandle, name: &str) -> Result<PathBuf> {
        let mut registry = self.lock();
        let entry = registry
            .live
            .get_mut(&handle.key)
            .ok_or(DropVaultError::Released(handle.key))?;

        let bytes = match &entry.source {
            ContentSource::File(path) => return Ok(path.clone()),
            ContentSource::Memory(bytes) => bytes,
        };

        let dir = match entry.spill.take() {
            Some(dir) => dir,
            None => tempfile::Builder::new().prefix("dropvault").tempdir()?,
        };
        let dir = entry.spill.insert(dir);
        let path = dir.path().join(safe_file_name(name));
        if !path.exists() {
            fs::write(&path, &bytes[..])?;
            tracing::debug!(key = handle.key, path = %path.display(), "Wrote content to disk");
        }
        Ok(path)
    }

    /// Number of handles not yet released.
    pub fn live_handles(&self) -> usize {
        self.lock().live.len()
    }

    fn release(&self, key: u64) {
        if self.lock().live.remove(&key).is_some() {
            tracing::trace!(key, "Released content handle");
        }
    }

    fn lock(&self) -> MutexGuard<'_, Registry> {
        self.registry.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[derive(Derivative)]
#[derivative(Debug)]
pub struct ContentHandle {
    key: u64,
    #[derivative(Debug = "ignore")]
    store: ContentStore,
}

impl ContentHandle {
    pub fn key(&self) -> u64 {
        self.key
    }

    pub fn source(&self) -> Result<ContentSource> {
        self.store.resolve(self)
    }

    pub fn local_path(&self, name: &str) -> Result<PathBuf> {
        self.store.local_path(self, name)
    }
}

fn safe_file_name(name: &str) -> &OsStr {
    Path::new(name)
        .file_name()
        .unwrap_or_else(|| OsStr::new(FALLBACK_NAME))
}

impl Drop for ContentHandle {
    fn drop(&mut self) {
        self.store.release(self.key);
    }
}
