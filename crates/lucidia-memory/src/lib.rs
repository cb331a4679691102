//! Memory notes for Lucidia.
//!
//! A memory note is a small UTF-8 text file in a store directory. The file
//! name doubles as the note's identity and carries an expected fingerprint:
//! everything before the first delimiter should be a prefix of the SHA-256
//! hex digest of the content. Three read-only passes run over the store:
//! fingerprint audit, case-insensitive substring search, and a pairwise
//! containment scan that flags notes restating one another.
//!
//! Every pass re-reads the store. Nothing is cached between calls.

pub mod backend;
pub mod config;
pub mod contradiction;
pub mod error;
pub mod integrity;
pub mod search;
pub mod store;
pub mod types;
pub mod writer;

pub use backend::{FsBackend, InMemoryBackend, StorageBackend};
pub use config::{ContradictionMode, MemoryConfig};
pub use contradiction::{detect_contradictions, is_contradiction};
pub use error::{MemoryError, Result};
pub use integrity::{content_fingerprint, verify_note};
pub use search::search_notes;
pub use store::NoteStore;
pub use types::{AuditEntry, ContradictionPair, IntegrityStatus, Note, SearchHit};
pub use writer::{slugify, NoteWriter};
