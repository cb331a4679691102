//! Storage backends for the note store.
//!
//! A backend only needs to create its root, list entry names, and read and
//! write UTF-8 text. [`FsBackend`] keeps notes as files in a directory;
//! [`InMemoryBackend`] keeps them in a map and is handy for tests.

use crate::error::{MemoryError, Result};
use parking_lot::RwLock;
use std::collections::BTreeMap;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{debug, warn};

/// Storage operations the note store depends on.
pub trait StorageBackend: Send + Sync {
    /// Create the store root if it does not exist yet.
    fn ensure_root(&self) -> Result<()>;

    /// Names of all entries currently in the store. Order is unspecified.
    fn list_entries(&self) -> Result<Vec<String>>;

    /// Read one entry as UTF-8 text.
    fn read_entry(&self, name: &str) -> Result<String>;

    /// Write a new entry. Fails with `AlreadyExists` instead of overwriting.
    fn write_entry(&self, name: &str, content: &str) -> Result<()>;

    /// Human-readable location, for logs and error messages.
    fn location(&self) -> String;
}

/// Reject names that could escape the store root.
pub(crate) fn validate_name(name: &str) -> Result<()> {
    if name.is_empty()
        || name == "."
        || name == ".."
        || name.contains('/')
        || name.contains('\\')
        || name.contains('\0')
    {
        return Err(MemoryError::InvalidName(name.to_string()));
    }
    Ok(())
}

// ── Filesystem ───────────────────────────────────────────────────

/// Notes as plain files in a single directory.
///
/// Only regular files with the configured extension are listed. Hidden
/// files and subdirectories are ignored.
pub struct FsBackend {
    root: PathBuf,
    extension: String,
}

impl FsBackend {
    pub fn new(root: impl Into<PathBuf>, extension: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            extension: extension.into(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn unavailable(&self, source: io::Error) -> MemoryError {
        MemoryError::StorageUnavailable {
            path: self.root.clone(),
            source,
        }
    }

    fn is_note_file(&self, path: &Path) -> bool {
        path.is_file()
            && path
                .extension()
                .map(|e| e == self.extension.as_str())
                .unwrap_or(false)
    }
}

impl StorageBackend for FsBackend {
    fn ensure_root(&self) -> Result<()> {
        fs::create_dir_all(&self.root).map_err(|e| self.unavailable(e))
    }

    fn list_entries(&self) -> Result<Vec<String>> {
        let mut names = Vec::new();

        for entry in fs::read_dir(&self.root).map_err(|e| self.unavailable(e))? {
            let entry = entry.map_err(|e| self.unavailable(e))?;
            let path = entry.path();

            let Some(name) = entry.file_name().to_str().map(str::to_string) else {
                warn!(path = %path.display(), "Skipping note with non-UTF-8 file name");
                continue;
            };
            if name.starts_with('.') || !self.is_note_file(&path) {
                continue;
            }
            names.push(name);
        }

        debug!(root = %self.root.display(), count = names.len(), "Listed note files");
        Ok(names)
    }

    fn read_entry(&self, name: &str) -> Result<String> {
        validate_name(name)?;
        let path = self.root.join(name);

        let bytes = match fs::read(&path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(MemoryError::NotFound(name.to_string()))
            }
            Err(e) => {
                return Err(MemoryError::Unreadable {
                    name: name.to_string(),
                    reason: e.to_string(),
                })
            }
        };

        String::from_utf8(bytes).map_err(|e| MemoryError::Unreadable {
            name: name.to_string(),
            reason: format!("invalid UTF-8: {e}"),
        })
    }

    fn write_entry(&self, name: &str, content: &str) -> Result<()> {
        validate_name(name)?;
        let path = self.root.join(name);

        let file = match fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
        {
            Ok(file) => file,
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
                return Err(MemoryError::AlreadyExists(name.to_string()))
            }
            Err(e) => return Err(self.unavailable(e)),
        };
        write_or_remove(file, &path, content.as_bytes()).map_err(|e| self.unavailable(e))
    }

    fn location(&self) -> String {
        self.root.display().to_string()
    }
}

/// Write `content` to a freshly created file. On failure the partial file is
/// removed so the name stays free.
fn write_or_remove(mut writer: impl Write, path: &Path, content: &[u8]) -> io::Result<()> {
    if let Err(e) = writer.write_all(content).and_then(|()| writer.flush()) {
        drop(writer);
        if let Err(remove_err) = fs::remove_file(path) {
            warn!(path = %path.display(), "Failed to remove partial note: {remove_err}");
        }
        return Err(e);
    }
    Ok(())
}

// ── In-memory ────────────────────────────────────────────────────

/// Notes held in a map. Entries are raw bytes so tests can store text that
/// does not decode as UTF-8.
pub struct InMemoryBackend {
    entries: RwLock<BTreeMap<String, Vec<u8>>>,
    available: AtomicBool,
}

impl Default for InMemoryBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryBackend {
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(BTreeMap::new()),
            available: AtomicBool::new(true),
        }
    }

    /// Build a backend pre-populated with `(name, content)` pairs.
    pub fn with_notes<'a>(notes: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        let backend = Self::new();
        for (name, content) in notes {
            backend.insert(name, content);
        }
        backend
    }

    /// Insert or replace an entry.
    pub fn insert(&self, name: &str, content: &str) {
        self.insert_bytes(name, content.as_bytes().to_vec());
    }

    pub fn insert_bytes(&self, name: &str, bytes: Vec<u8>) {
        self.entries.write().insert(name.to_string(), bytes);
    }

    pub fn remove(&self, name: &str) -> bool {
        self.entries.write().remove(name).is_some()
    }

    /// Simulate the store becoming unreachable (or reachable again).
    pub fn set_available(&self, available: bool) {
        self.available.store(available, Ordering::SeqCst);
    }

    fn check_available(&self) -> Result<()> {
        if self.available.load(Ordering::SeqCst) {
            Ok(())
        } else {
            Err(MemoryError::StorageUnavailable {
                path: PathBuf::from(self.location()),
                source: io::Error::other("in-memory backend marked unavailable"),
            })
        }
    }
}

impl StorageBackend for InMemoryBackend {
    fn ensure_root(&self) -> Result<()> {
        self.check_available()
    }

    fn list_entries(&self) -> Result<Vec<String>> {
        self.check_available()?;
        Ok(self.entries.read().keys().cloned().collect())
    }

    fn read_entry(&self, name: &str) -> Result<String> {
        self.check_available()?;
        validate_name(name)?;
        let entries = self.entries.read();
        let bytes = entries
            .get(name)
            .ok_or_else(|| MemoryError::NotFound(name.to_string()))?;
        String::from_utf8(bytes.clone()).map_err(|e| MemoryError::Unreadable {
            name: name.to_string(),
            reason: format!("invalid UTF-8: {e}"),
        })
    }

    fn write_entry(&self, name: &str, content: &str) -> Result<()> {
        self.check_available()?;
        validate_name(name)?;
        let mut entries = self.entries.write();
        if entries.contains_key(name) {
            return Err(MemoryError::AlreadyExists(name.to_string()));
        }
        entries.insert(name.to_string(), content.as_bytes().to_vec());
        Ok(())
    }

    fn location(&self) -> String {
        "<in-memory>".to_string()
    }
}
