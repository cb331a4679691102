//! Configuration for the memory note store.

use crate::error::{MemoryError, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// How the contradiction scan combines its guards.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ContradictionMode {
    /// Both texts non-empty, not equal, and one contains the other.
    #[default]
    Guarded,
    /// The unparenthesised form: the guards apply only to the first
    /// containment direction, so `b in a` alone is enough to flag a pair.
    Legacy,
}

/// Memory store configuration. Every field has a default.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MemoryConfig {
    /// Store directory.
    #[serde(default = "default_dir")]
    pub dir: PathBuf,

    /// Extension (without the dot) of files treated as notes.
    #[serde(default = "default_extension")]
    pub extension: String,

    /// Separator between the fingerprint and the rest of a note name.
    #[serde(default = "default_delimiter")]
    pub delimiter: String,

    /// Hex characters of the content hash used when naming new notes.
    #[serde(default = "default_fingerprint_len")]
    pub fingerprint_len: usize,

    #[serde(default)]
    pub contradiction_mode: ContradictionMode,
}

fn default_dir() -> PathBuf {
    PathBuf::from("memory")
}

fn default_extension() -> String {
    "txt".to_string()
}

fn default_delimiter() -> String {
    "_".to_string()
}

fn default_fingerprint_len() -> usize {
    8
}

impl Default for MemoryConfig {
    fn default() -> Self {
        Self {
            dir: default_dir(),
            extension: default_extension(),
            delimiter: default_delimiter(),
            fingerprint_len: default_fingerprint_len(),
            contradiction_mode: ContradictionMode::default(),
        }
    }
}

impl MemoryConfig {
    /// Config rooted at `dir`, defaults elsewhere.
    pub fn with_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            ..Default::default()
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.extension.is_empty() || self.extension.starts_with('.') {
            return Err(MemoryError::InvalidConfig(format!(
                "extension must be non-empty and given without a leading dot, got {:?}",
                self.extension
            )));
        }
        if self.delimiter.is_empty() {
            return Err(MemoryError::InvalidConfig(
                "delimiter must not be empty".to_string(),
            ));
        }
        // SHA-256 hex digests are 64 characters.
        if !(1..=64).contains(&self.fingerprint_len) {
            return Err(MemoryError::InvalidConfig(format!(
                "fingerprint_len must be within 1..=64, got {}",
                self.fingerprint_len
            )));
        }
        Ok(())
    }
}
