//! Interactive search prompt. Each line is a query; `exit` leaves.

use anyhow::Result;
use lucidia_memory::NoteStore;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

use crate::cli::print_hits;

const PROMPT: &str = "search> ";

pub fn run(store: &NoteStore) -> Result<()> {
    println!("Searching memory notes in {}.", store.location());
    println!("Type a keyword to search, or `exit` to leave.\n");

    let mut editor = DefaultEditor::new()?;

    loop {
        match editor.readline(PROMPT) {
            Ok(line) => {
                let query = line.trim();
                if is_exit(query) {
                    break;
                }
                if !query.is_empty() {
                    let _ = editor.add_history_entry(query);
                }
                match store.search(query) {
                    Ok(hits) => print_hits(&hits),
                    Err(e) => eprintln!("Search failed: {e}"),
                }
            }
            Err(ReadlineError::Interrupted | ReadlineError::Eof) => break,
            Err(e) => return Err(e.into()),
        }
    }

    println!("Signing off.");
    Ok(())
}

fn is_exit(line: &str) -> bool {
    line.eq_ignore_ascii_case("exit") || line.eq_ignore_ascii_case("quit")
}
