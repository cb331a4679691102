//! Pairwise containment scan.
//!
//! Two notes "contradict" when one normalized text is a strict substring of
//! the other: one note restates or subsumes the other. This is a heuristic,
//! not a logical contradiction check. Every pair is compared, so the cost is
//! quadratic in the number of notes.

use crate::config::ContradictionMode;
use crate::types::{ContradictionPair, Note};

fn normalize(text: &str) -> String {
    text.trim().to_lowercase()
}

/// Whether two normalized texts form a flagged pair under `mode`.
pub fn is_contradiction(a: &str, b: &str, mode: ContradictionMode) -> bool {
    match mode {
        ContradictionMode::Guarded => {
            !a.is_empty() && !b.is_empty() && a != b && (b.contains(a) || a.contains(b))
        }
        // `a and b and a != b and a in b or b in a` binds as
        // `(a and b and a != b and a in b) or (b in a)`.
        ContradictionMode::Legacy => {
            (!a.is_empty() && !b.is_empty() && a != b && b.contains(a)) || a.contains(b)
        }
    }
}

/// Flag every unordered pair of distinct notes whose texts contain one
/// another. Each pair appears once, with `a` earlier in `notes` than `b`.
pub fn detect_contradictions(notes: &[Note], mode: ContradictionMode) -> Vec<ContradictionPair> {
    let normalized: Vec<String> = notes.iter().map(|n| normalize(&n.content)).collect();
    let mut pairs = Vec::new();

    for (i, first) in normalized.iter().enumerate() {
        for (j, second) in normalized.iter().enumerate().skip(i + 1) {
            if is_contradiction(first, second, mode) {
                pairs.push(ContradictionPair {
                    a: notes[i].name.clone(),
                    b: notes[j].name.clone(),
                });
            }
        }
    }

    pairs
}
