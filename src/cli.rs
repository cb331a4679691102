//! CLI subcommands over the memory note store.
//!
//! Provides `lucidia list`, `show <name>`, `search <query>`, `audit`,
//! `contradictions`, `note <content>`, `shell`, and `serve`.

use anyhow::{Context, Result};
use clap::Subcommand;
use console::style;
use lucidia_memory::{AuditEntry, IntegrityStatus, NoteStore, NoteWriter, SearchHit};
use serde::Serialize;
use std::sync::Arc;

use crate::api::{ApiServer, AuditResponse, ContradictionsResponse, SearchResponse};
use crate::config::Config;
use crate::shell;

const PREVIEW_CHARS: usize = 60;

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List every note in the store
    List,
    /// Print one note's content
    Show {
        /// Note file name (e.g. 3a7bd3e2_sky.txt)
        name: String,
    },
    /// Case-insensitive substring search over note content
    Search {
        /// Text to look for (empty matches every note)
        query: String,
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Check every note's content against the fingerprint in its name
    Audit {
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
        /// Exit non-zero if any note is not valid
        #[arg(long)]
        strict: bool,
    },
    /// List pairs of notes where one restates the other
    Contradictions {
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Save a new note named after its content fingerprint
    Note {
        /// Note content
        content: String,
        /// Label used in the file name (default: first words of the content)
        #[arg(short, long)]
        label: Option<String>,
    },
    /// Interactive search prompt
    Shell,
    /// Serve the store over HTTP
    Serve {
        /// Listen address (overrides [api].bind)
        #[arg(short, long)]
        bind: Option<String>,
    },
}

pub async fn handle_command(cmd: Commands, config: &Config) -> Result<()> {
    let store = NoteStore::open_dir(config.memory.clone()).with_context(|| {
        format!(
            "Failed to open memory store at {}",
            config.memory.dir.display()
        )
    })?;

    match cmd {
        Commands::List => {
            let notes = store.list_notes()?;
            if notes.is_empty() {
                println!("No memory notes found in {}.", store.location());
                return Ok(());
            }

            println!("{} memory notes:", notes.len());
            for note in &notes {
                println!("  {}: {}", style(&note.name).bold(), preview(&note.content));
            }
        }

        Commands::Show { name } => {
            let content = store
                .read(&name)
                .with_context(|| format!("Failed to read note {name}"))?;
            println!("{}", content);
        }

        Commands::Search { query, json } => {
            let results = store.search(&query)?;
            if json {
                print_json(&SearchResponse { results })?;
            } else {
                print_hits(&results);
            }
        }

        Commands::Audit { json, strict } => {
            let audit = store.verify_all()?;
            let failing = audit
                .iter()
                .filter(|e| e.status != IntegrityStatus::Valid)
                .count();

            if json {
                print_json(&AuditResponse { audit })?;
            } else {
                print_audit(&audit);
            }

            if strict && failing > 0 {
                anyhow::bail!("{failing} note(s) failed the integrity audit");
            }
        }

        Commands::Contradictions { json } => {
            let contradictions = store.detect()?;
            if json {
                print_json(&ContradictionsResponse { contradictions })?;
            } else if contradictions.is_empty() {
                println!("{} No contradictions found.", style("✓").green());
            } else {
                println!("{} Contradictions detected:", style("⚠").yellow());
                for pair in &contradictions {
                    println!("  - {} <=> {}", pair.a, pair.b);
                }
            }
        }

        Commands::Note { content, label } => {
            let note = NoteWriter::for_store(&store).save(&content, label.as_deref())?;
            println!("{} Memory saved as {}", style("✓").green(), note.name);
        }

        Commands::Shell => shell::run(&store)?,

        Commands::Serve { bind } => {
            let bind = bind.unwrap_or_else(|| config.api.bind.clone());
            bind.parse::<std::net::SocketAddr>()
                .with_context(|| format!("Invalid bind address: {bind}"))?;
            ApiServer::new(bind).start(Arc::new(store)).await?;
        }
    }

    Ok(())
}

fn preview(content: &str) -> String {
    let flat = content.split_whitespace().collect::<Vec<_>>().join(" ");
    let head: String = flat.chars().take(PREVIEW_CHARS).collect();
    if flat.chars().count() > PREVIEW_CHARS {
        format!("{head}...")
    } else {
        head
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

pub(crate) fn print_hits(hits: &[SearchHit]) {
    if hits.is_empty() {
        println!("No memories matched.");
        return;
    }
    for hit in hits {
        println!("\n{}\n{}", style(&hit.name).bold(), hit.content);
    }
}

fn print_audit(audit: &[AuditEntry]) {
    if audit.is_empty() {
        println!("No memory notes to audit.");
        return;
    }
    for entry in audit {
        let status = match entry.status {
            IntegrityStatus::Valid => style("✓ valid").green(),
            IntegrityStatus::Corrupted => style("⚠ corrupted").yellow(),
            IntegrityStatus::Unreadable => style("✗ unreadable").red(),
        };
        match &entry.detail {
            Some(detail) => println!("{}: {} ({})", entry.name, status, detail),
            None => println!("{}: {}", entry.name, status),
        }
    }
}
