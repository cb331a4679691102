//! Case-insensitive substring search over notes.

use crate::types::{Note, SearchHit};

/// Notes whose lowercased content contains the lowercased query, in input
/// order. An empty query matches every note. No ranking, no tokenizing.
pub fn search_notes(notes: &[Note], query: &str) -> Vec<SearchHit> {
    let needle = query.to_lowercase();
    notes
        .iter()
        .filter(|note| note.content.to_lowercase().contains(&needle))
        .map(|note| SearchHit {
            name: note.name.clone(),
            content: note.content.trim().to_string(),
        })
        .collect()
}
