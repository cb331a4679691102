#![no_main]
use libfuzzer_sys::fuzz_target;
use lucidia_memory::{detect_contradictions, ContradictionMode, Note};

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    let notes: Vec<Note> = text
        .split('\u{1e}')
        .enumerate()
        .map(|(i, content)| Note::new(format!("{i}.txt"), content))
        .collect();

    for mode in [ContradictionMode::Guarded, ContradictionMode::Legacy] {
        for pair in detect_contradictions(&notes, mode) {
            assert_ne!(pair.a, pair.b);
        }
    }
});
