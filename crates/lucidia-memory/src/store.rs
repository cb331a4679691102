//! NoteStore: enumeration and reads over a storage backend, plus the three
//! scan passes (audit, search, contradiction detection).
//!
//! The store holds no note data. Each call goes back to the backend, so the
//! results always reflect what is on disk at call time.

use crate::backend::{FsBackend, StorageBackend};
use crate::config::MemoryConfig;
use crate::contradiction::detect_contradictions;
use crate::error::Result;
use crate::integrity::{audit_entry, verify_note};
use crate::search::search_notes;
use crate::types::{AuditEntry, ContradictionPair, IntegrityStatus, Note, SearchHit};
use std::sync::Arc;
use tracing::{debug, warn};

/// Handle to a memory note store.
///
/// Construct one per process and share it (e.g. behind an `Arc`).
pub struct NoteStore {
    backend: Arc<dyn StorageBackend>,
    config: MemoryConfig,
}

impl NoteStore {
    /// Open a store over an arbitrary backend, creating its root if needed.
    pub fn open(backend: Arc<dyn StorageBackend>, config: MemoryConfig) -> Result<Self> {
        config.validate()?;
        backend.ensure_root()?;
        debug!(location = %backend.location(), "Opened memory store");
        Ok(Self { backend, config })
    }

    /// Open a filesystem store at `config.dir`.
    pub fn open_dir(config: MemoryConfig) -> Result<Self> {
        let backend = FsBackend::new(&config.dir, config.extension.clone());
        Self::open(Arc::new(backend), config)
    }

    pub fn config(&self) -> &MemoryConfig {
        &self.config
    }

    pub fn location(&self) -> String {
        self.backend.location()
    }

    /// Note names in enumeration order.
    ///
    /// Names are sorted so repeated calls agree, but callers should not rely
    /// on any particular order.
    pub fn list_names(&self) -> Result<Vec<String>> {
        let mut names = self.backend.list_entries()?;
        names.sort();
        Ok(names)
    }

    /// Every readable note. Notes that fail to read are logged and skipped.
    pub fn list_notes(&self) -> Result<Vec<Note>> {
        let names = self.list_names()?;
        let mut notes = Vec::with_capacity(names.len());

        for name in names {
            match self.backend.read_entry(&name) {
                Ok(content) => notes.push(Note { name, content }),
                Err(e) if e.is_per_note() => {
                    warn!(note = %name, "Skipping note: {e}");
                }
                Err(e) => return Err(e),
            }
        }

        Ok(notes)
    }

    /// Raw text of a single note.
    pub fn read(&self, name: &str) -> Result<String> {
        self.backend.read_entry(name)
    }

    pub fn get(&self, name: &str) -> Result<Note> {
        let content = self.read(name)?;
        Ok(Note::new(name, content))
    }

    pub fn count(&self) -> Result<usize> {
        Ok(self.backend.list_entries()?.len())
    }

    /// Fingerprint audit over every note.
    ///
    /// A note that cannot be read is reported `Unreadable`; the scan goes on.
    pub fn verify_all(&self) -> Result<Vec<AuditEntry>> {
        let names = self.list_names()?;
        let mut report = Vec::with_capacity(names.len());

        for name in names {
            let entry = match self.backend.read_entry(&name) {
                Ok(content) => audit_entry(&Note { name, content }, &self.config),
                Err(e) if !e.is_per_note() => return Err(e),
                Err(e) => {
                    warn!(note = %name, "Note unreadable during audit: {e}");
                    AuditEntry {
                        name,
                        status: IntegrityStatus::Unreadable,
                        detail: Some(e.to_string()),
                    }
                }
            };
            report.push(entry);
        }

        debug!(notes = report.len(), "Integrity audit complete");
        Ok(report)
    }

    /// Fingerprint check for a single note.
    pub fn verify(&self, name: &str) -> Result<AuditEntry> {
        let note = self.get(name)?;
        Ok(AuditEntry {
            status: verify_note(&note, &self.config),
            name: note.name,
            detail: None,
        })
    }

    /// Case-insensitive substring search over note content.
    pub fn search(&self, query: &str) -> Result<Vec<SearchHit>> {
        let notes = self.list_notes()?;
        let hits = search_notes(&notes, query);
        debug!(query, scanned = notes.len(), hits = hits.len(), "Search complete");
        Ok(hits)
    }

    /// Pairs of notes whose normalized texts contain one another.
    pub fn detect(&self) -> Result<Vec<ContradictionPair>> {
        let notes = self.list_notes()?;
        let pairs = detect_contradictions(&notes, self.config.contradiction_mode);
        debug!(
            scanned = notes.len(),
            pairs = pairs.len(),
            mode = ?self.config.contradiction_mode,
            "Contradiction scan complete"
        );
        Ok(pairs)
    }

    pub(crate) fn backend(&self) -> &Arc<dyn StorageBackend> {
        &self.backend
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::InMemoryBackend;
    use crate::error::MemoryError;
    use std::fs;
    use tempfile::tempdir;

    fn memory_store(notes: &[(&str, &str)]) -> (Arc<InMemoryBackend>, NoteStore) {
        let backend = Arc::new(InMemoryBackend::with_notes(notes.iter().copied()));
        let store = NoteStore::open(backend.clone(), MemoryConfig::default()).unwrap();
        (backend, store)
    }

    #[test]
    fn open_dir_creates_store_directory() {
        let dir = tempdir().unwrap();
        let root = dir.path().join("memory");
        let store = NoteStore::open_dir(MemoryConfig::with_dir(&root)).unwrap();

        assert!(root.is_dir());
        assert_eq!(store.count().unwrap(), 0);
    }

    #[test]
    fn open_rejects_invalid_config() {
        let mut config = MemoryConfig::default();
        config.delimiter = String::new();
        let backend = Arc::new(InMemoryBackend::new());
        assert!(matches!(
            NoteStore::open(backend, config),
            Err(MemoryError::InvalidConfig(_))
        ));
    }

    #[test]
    fn empty_store_yields_empty_results() {
        let (_, store) = memory_store(&[]);
        assert!(store.list_notes().unwrap().is_empty());
        assert!(store.search("anything").unwrap().is_empty());
        assert!(store.search("").unwrap().is_empty());
        assert!(store.verify_all().unwrap().is_empty());
        assert!(store.detect().unwrap().is_empty());
    }

    #[test]
    fn read_missing_note_is_not_found() {
        let (_, store) = memory_store(&[("a.txt", "alpha")]);
        assert_eq!(store.read("a.txt").unwrap(), "alpha");
        assert!(matches!(store.read("b.txt"), Err(MemoryError::NotFound(_))));
    }

    #[test]
    fn list_notes_skips_unreadable_entries() {
        let (backend, store) = memory_store(&[("a.txt", "alpha")]);
        backend.insert_bytes("b.txt", vec![0xff, 0xff]);

        assert_eq!(store.list_names().unwrap(), vec!["a.txt", "b.txt"]);
        let notes = store.list_notes().unwrap();
        assert_eq!(notes, vec![Note::new("a.txt", "alpha")]);
    }

    #[test]
    fn unavailable_storage_aborts_every_scan() {
        let (backend, store) = memory_store(&[("a.txt", "alpha")]);
        backend.set_available(false);

        assert!(matches!(
            store.list_notes(),
            Err(MemoryError::StorageUnavailable { .. })
        ));
        assert!(store.search("a").is_err());
        assert!(store.verify_all().is_err());
        assert!(store.detect().is_err());
    }

    #[test]
    fn verify_all_reports_unreadable_without_aborting() {
        let content = "The sky is blue.";
        let fingerprint = crate::integrity::content_fingerprint(content);
        let good = format!("{}_sky.txt", &fingerprint[..8]);

        let (backend, store) = memory_store(&[(good.as_str(), content)]);
        backend.insert_bytes("0000_bin.txt", vec![0xc3, 0x28]);

        let report = store.verify_all().unwrap();
        assert_eq!(report.len(), 2);
        let bin = report.iter().find(|e| e.name == "0000_bin.txt").unwrap();
        assert_eq!(bin.status, IntegrityStatus::Unreadable);
        assert!(bin.detail.is_some());
        let ok = report.iter().find(|e| e.name == good).unwrap();
        assert_eq!(ok.status, IntegrityStatus::Valid);
    }

    #[test]
    fn ellipsis_in_name_is_still_a_note() {
        let dir = tempdir().unwrap();
        let content = "Wait... the sky is blue.";
        let fingerprint = crate::integrity::content_fingerprint(content);
        let name = format!("{}_wait...sky.txt", &fingerprint[..8]);
        fs::write(dir.path().join(&name), content).unwrap();
        let store = NoteStore::open_dir(MemoryConfig::with_dir(dir.path())).unwrap();

        assert_eq!(store.list_names().unwrap(), vec![name.clone()]);
        let hits = store.search("sky").unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].name, name);

        let report = store.verify_all().unwrap();
        assert_eq!(report.len(), 1);
        assert_eq!(report[0].status, IntegrityStatus::Valid);
        assert_eq!(report[0].detail, None);
    }

    #[test]
    fn verify_single_note() {
        let (_, store) = memory_store(&[("abc_x.txt", "x")]);
        assert_eq!(
            store.verify("abc_x.txt").unwrap().status,
            IntegrityStatus::Corrupted
        );
        assert!(matches!(
            store.verify("nope.txt"),
            Err(MemoryError::NotFound(_))
        ));
    }

    #[test]
    fn repeated_scans_are_identical() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("abc_one.txt"), "The sky is blue.").unwrap();
        fs::write(dir.path().join("xyz_two.txt"), "The sky is blue and vast.").unwrap();
        fs::write(dir.path().join("def_three.txt"), "Water is wet.").unwrap();
        let store = NoteStore::open_dir(MemoryConfig::with_dir(dir.path())).unwrap();

        assert_eq!(store.search("sky").unwrap(), store.search("sky").unwrap());
        assert_eq!(store.verify_all().unwrap(), store.verify_all().unwrap());
        assert_eq!(store.detect().unwrap(), store.detect().unwrap());
    }

    #[test]
    fn scans_see_external_writes() {
        let (backend, store) = memory_store(&[("a.txt", "alpha")]);
        assert_eq!(store.search("beta").unwrap().len(), 0);

        backend.insert("b.txt", "Beta");
        assert_eq!(store.search("beta").unwrap().len(), 1);

        backend.remove("b.txt");
        assert_eq!(store.search("beta").unwrap().len(), 0);
    }
}
