//! Error taxonomy for the note store.

use std::path::PathBuf;

/// Errors surfaced by store operations.
///
/// Per-note problems found during a scan (bad fingerprint, undecodable
/// bytes) are reported as [`crate::IntegrityStatus`] values instead.
#[derive(Debug, thiserror::Error)]
pub enum MemoryError {
    #[error("memory store unavailable at {}: {source}", path.display())]
    StorageUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("note not found: {0}")]
    NotFound(String),

    #[error("invalid note name: {0:?}")]
    InvalidName(String),

    #[error("note {name} is unreadable: {reason}")]
    Unreadable { name: String, reason: String },

    #[error("note already exists: {0}")]
    AlreadyExists(String),

    #[error("refusing to save an empty note")]
    EmptyNote,

    #[error("invalid memory config: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, MemoryError>;

impl MemoryError {
    /// Whether the error concerns a single note rather than the whole store.
    pub fn is_per_note(&self) -> bool {
        matches!(
            self,
            MemoryError::NotFound(_)
                | MemoryError::InvalidName(_)
                | MemoryError::Unreadable { .. }
                | MemoryError::AlreadyExists(_)
        )
    }
}
