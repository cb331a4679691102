//! Core types for the memory note store.

use serde::{Deserialize, Serialize};

/// A single memory note: one file in the store.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Note {
    /// File name, including extension (e.g. "3a7bd3e2_sky.txt").
    pub name: String,
    /// Raw UTF-8 text as written by the author.
    pub content: String,
}

impl Note {
    pub fn new(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            content: content.into(),
        }
    }

    /// File name with the given extension stripped, if present.
    pub fn stem<'a>(&'a self, extension: &str) -> &'a str {
        stem_of(&self.name, extension)
    }

    /// Fingerprint embedded in the name: the stem up to the first delimiter.
    ///
    /// A stem without the delimiter yields the whole stem.
    pub fn expected_fingerprint<'a>(&'a self, extension: &str, delimiter: &str) -> &'a str {
        expected_fingerprint(&self.name, extension, delimiter)
    }
}

pub(crate) fn stem_of<'a>(name: &'a str, extension: &str) -> &'a str {
    name.strip_suffix(extension)
        .and_then(|s| s.strip_suffix('.'))
        .unwrap_or(name)
}

/// Parse the expected fingerprint out of a note name.
pub fn expected_fingerprint<'a>(name: &'a str, extension: &str, delimiter: &str) -> &'a str {
    let stem = stem_of(name, extension);
    stem.split(delimiter).next().unwrap_or(stem)
}

/// Outcome of a fingerprint check for one note.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum IntegrityStatus {
    Valid,
    Corrupted,
    Unreadable,
}

impl std::fmt::Display for IntegrityStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IntegrityStatus::Valid => write!(f, "valid"),
            IntegrityStatus::Corrupted => write!(f, "corrupted"),
            IntegrityStatus::Unreadable => write!(f, "unreadable"),
        }
    }
}

/// One line of an integrity report.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AuditEntry {
    pub name: String,
    pub status: IntegrityStatus,
    /// Why the note could not be read, for `Unreadable` entries.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

/// A note matching a search query.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SearchHit {
    pub name: String,
    /// Note text with surrounding whitespace trimmed.
    pub content: String,
}

/// An unordered pair of notes whose normalized texts contain one another.
///
/// `a` always precedes `b` in store enumeration order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct ContradictionPair {
    pub a: String,
    pub b: String,
}

impl ContradictionPair {
    /// Whether this pair joins the two given notes, in either order.
    pub fn joins(&self, x: &str, y: &str) -> bool {
        (self.a == x && self.b == y) || (self.a == y && self.b == x)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fingerprint_is_text_before_first_delimiter() {
        let note = Note::new("abc_The sky_is blue.txt", "");
        assert_eq!(note.expected_fingerprint("txt", "_"), "abc");
        assert_eq!(note.stem("txt"), "abc_The sky_is blue");
    }

    #[test]
    fn fingerprint_without_delimiter_is_whole_stem() {
        let note = Note::new("loose.txt", "");
        assert_eq!(note.expected_fingerprint("txt", "_"), "loose");
    }

    #[test]
    fn stem_keeps_names_with_other_extensions() {
        assert_eq!(stem_of("abc_x.md", "txt"), "abc_x.md");
        assert_eq!(stem_of("abctxt", "txt"), "abctxt");
    }

    #[test]
    fn status_serializes_lowercase() {
        let json = serde_json::to_string(&IntegrityStatus::Corrupted).unwrap();
        assert_eq!(json, "\"corrupted\"");
        assert_eq!(IntegrityStatus::Valid.to_string(), "valid");
    }

    #[test]
    fn audit_entry_omits_empty_detail() {
        let entry = AuditEntry {
            name: "a.txt".into(),
            status: IntegrityStatus::Valid,
            detail: None,
        };
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json, serde_json::json!({"name": "a.txt", "status": "valid"}));
    }

    #[test]
    fn pair_joins_in_either_order() {
        let pair = ContradictionPair {
            a: "x".into(),
            b: "y".into(),
        };
        assert!(pair.joins("x", "y"));
        assert!(pair.joins("y", "x"));
        assert!(!pair.joins("x", "x"));
    }
}
