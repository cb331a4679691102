//! Fingerprint audit.
//!
//! A note named `<prefix>_<rest>.txt` claims that `<prefix>` is the start of
//! the SHA-256 hex digest of its content. The audit recomputes the digest and
//! reports whether the claim holds. Mismatches are reported, never repaired.

use crate::config::MemoryConfig;
use crate::types::{expected_fingerprint, AuditEntry, IntegrityStatus, Note};
use sha2::{Digest, Sha256};

/// Lowercase hex SHA-256 of the note content's UTF-8 bytes.
pub fn content_fingerprint(content: &str) -> String {
    hex::encode(Sha256::digest(content.as_bytes()))
}

/// Check one note's content against the fingerprint in its name.
///
/// The comparison is an exact, case-sensitive prefix match. A name with no
/// delimiter uses its whole stem as the fingerprint, which almost never
/// matches.
pub fn verify_note(note: &Note, config: &MemoryConfig) -> IntegrityStatus {
    let expected = expected_fingerprint(&note.name, &config.extension, &config.delimiter);
    if content_fingerprint(&note.content).starts_with(expected) {
        IntegrityStatus::Valid
    } else {
        IntegrityStatus::Corrupted
    }
}

pub(crate) fn audit_entry(note: &Note, config: &MemoryConfig) -> AuditEntry {
    AuditEntry {
        name: note.name.clone(),
        status: verify_note(note, config),
        detail: None,
    }
}
