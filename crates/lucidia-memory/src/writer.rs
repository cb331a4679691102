//! Writing new notes with a fingerprint-bearing name.
//!
//! The scan passes never write. This is the external writer: it names each
//! note `<digest prefix><delimiter><slug>.<ext>` so a fresh note audits
//! valid, and it never overwrites an existing note.

use crate::backend::StorageBackend;
use crate::config::MemoryConfig;
use crate::error::{MemoryError, Result};
use crate::integrity::content_fingerprint;
use crate::store::NoteStore;
use crate::types::Note;
use std::sync::Arc;
use tracing::info;

const SLUG_MAX_CHARS: usize = 48;
const SLUG_FALLBACK_WORDS: usize = 6;

/// Slugify a label for use in a file name
/// (e.g. "The Sky is Blue!" -> "the-sky-is-blue").
pub fn slugify(label: &str) -> String {
    let slug = label
        .to_lowercase()
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { '-' })
        .collect::<String>()
        .split('-')
        .filter(|s| !s.is_empty())
        .collect::<Vec<&str>>()
        .join("-");

    let truncated: String = slug.chars().take(SLUG_MAX_CHARS).collect();
    truncated.trim_end_matches('-').to_string()
}

/// Creates notes in a store.
pub struct NoteWriter {
    backend: Arc<dyn StorageBackend>,
    config: MemoryConfig,
}

impl NoteWriter {
    pub fn for_store(store: &NoteStore) -> Self {
        Self {
            backend: Arc::clone(store.backend()),
            config: store.config().clone(),
        }
    }

    /// File name a note with this content and label would be saved under.
    pub fn note_name(&self, content: &str, label: Option<&str>) -> String {
        let fingerprint = content_fingerprint(content);
        let prefix = &fingerprint[..self.config.fingerprint_len.min(fingerprint.len())];

        let source = match label {
            Some(label) if !label.trim().is_empty() => label.to_string(),
            _ => content
                .split_whitespace()
                .take(SLUG_FALLBACK_WORDS)
                .collect::<Vec<_>>()
                .join(" "),
        };
        let mut slug = slugify(&source);
        if slug.is_empty() {
            slug = "note".to_string();
        }

        format!(
            "{prefix}{}{slug}.{}",
            self.config.delimiter, self.config.extension
        )
    }

    /// Save a new note. Fails with `AlreadyExists` rather than overwrite.
    pub fn save(&self, content: &str, label: Option<&str>) -> Result<Note> {
        if content.trim().is_empty() {
            return Err(MemoryError::EmptyNote);
        }

        let name = self.note_name(content, label);
        self.backend.write_entry(&name, content)?;
        info!(note = %name, bytes = content.len(), "Saved memory note");

        Ok(Note::new(name, content))
    }
}
