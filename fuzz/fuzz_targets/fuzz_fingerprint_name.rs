#![no_main]
use libfuzzer_sys::fuzz_target;
use lucidia_memory::{verify_note, MemoryConfig, Note};

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        let (name, content) = s.split_once('\n').unwrap_or((s, ""));
        let _ = verify_note(&Note::new(name, content), &MemoryConfig::default());
    }
});
