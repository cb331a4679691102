use lucidia_memory::*;
use std::fs;
use std::sync::Arc;
use tempfile::tempdir;

#[test]
fn test_full_pipeline() {
    let dir = tempdir().unwrap();
    let root = dir.path().join("memory");
    let store = NoteStore::open_dir(MemoryConfig::with_dir(&root)).unwrap();

    // Three hand-written notes whose prefixes are not real digests
    fs::write(root.join("abc_sky.txt"), "The sky is blue").unwrap();
    fs::write(root.join("xyz_sky-vast.txt"), "The sky is blue and vast.").unwrap();
    fs::write(root.join("def_water.txt"), "Water is wet.").unwrap();

    // Search
    let hits = store.search("sky").unwrap();
    let names: Vec<_> = hits.iter().map(|h| h.name.as_str()).collect();
    assert_eq!(names.len(), 2);
    assert!(names.contains(&"abc_sky.txt"));
    assert!(names.contains(&"xyz_sky-vast.txt"));
    assert_eq!(store.search("").unwrap().len(), 3);

    // Contradictions
    let pairs = store.detect().unwrap();
    assert_eq!(pairs.len(), 1);
    assert!(pairs[0].joins("abc_sky.txt", "xyz_sky-vast.txt"));

    // Audit: none of the prefixes are real SHA-256 prefixes
    let audit = store.verify_all().unwrap();
    assert_eq!(audit.len(), 3);
    assert!(audit.iter().all(|e| e.status == IntegrityStatus::Corrupted));

    // A note saved through the writer carries a real fingerprint
    let writer = NoteWriter::for_store(&store);
    let saved = writer.save("Fire is hot.", Some("fire")).unwrap();
    let entry = store.verify(&saved.name).unwrap();
    assert_eq!(entry.status, IntegrityStatus::Valid);

    // Editing it in place (without renaming) flips the audit
    fs::write(root.join(&saved.name), "Fire is cold.").unwrap();
    let entry = store.verify(&saved.name).unwrap();
    assert_eq!(entry.status, IntegrityStatus::Corrupted);

    // Non-note files are ignored by every pass
    fs::write(root.join("notes.md"), "The sky is blue.").unwrap();
    assert_eq!(store.search("sky").unwrap().len(), 2);
    assert_eq!(store.verify_all().unwrap().len(), 4);
}

#[test]
fn test_in_memory_backend_matches_filesystem_semantics() {
    let backend = Arc::new(InMemoryBackend::with_notes([
        ("abc_sky.txt", "The sky is blue"),
        ("xyz_sky-vast.txt", "The sky is blue and vast."),
        ("def_water.txt", "Water is wet."),
    ]));
    let store = NoteStore::open(backend.clone(), MemoryConfig::default()).unwrap();

    assert_eq!(store.search("SKY").unwrap().len(), 2);
    assert_eq!(store.detect().unwrap().len(), 1);

    backend.insert_bytes("000_broken.txt", vec![0xff]);
    let audit = store.verify_all().unwrap();
    assert_eq!(audit.len(), 4);
    let broken = audit.iter().find(|e| e.name == "000_broken.txt").unwrap();
    assert_eq!(broken.status, IntegrityStatus::Unreadable);

    // Search and detection skip the unreadable note instead of failing
    assert_eq!(store.search("").unwrap().len(), 3);
    assert_eq!(store.detect().unwrap().len(), 1);
}

#[test]
fn test_legacy_mode_config() {
    let dir = tempdir().unwrap();
    let config: MemoryConfig = toml::from_str(&format!(
        "dir = {:?}\ncontradiction_mode = \"legacy\"\n",
        dir.path().display().to_string()
    ))
    .unwrap();
    let store = NoteStore::open_dir(config).unwrap();

    fs::write(dir.path().join("a_1.txt"), "Same words").unwrap();
    fs::write(dir.path().join("b_2.txt"), "same words").unwrap();

    let pairs = store.detect().unwrap();
    assert_eq!(pairs.len(), 1);
}
