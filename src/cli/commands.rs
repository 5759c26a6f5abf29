use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};

use crate::ingest::load_archive;
use crate::models::{Conversation, Sender};
use crate::search::engine::search;
use crate::store::CollectionStore;
use crate::tui::run_interactive;

#[derive(Parser)]
#[command(name = "chat-archive-explorer")]
#[command(version = "0.1.0")]
#[command(about = "Search and browse exported chat conversation archives", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Load an export file (.json or .zip) and persist it locally
    Load {
        /// Path to conversations.json or a zip export containing it
        file: PathBuf,
    },
    /// Search the loaded collection for a keyword
    Search {
        keyword: String,
        /// Also scan content blocks and keep scanning after the first hit
        #[arg(long)]
        deep: bool,
        /// Print results as a JSON array instead of cards
        #[arg(long)]
        json: bool,
        /// Search an export file directly instead of the stored collection
        #[arg(long)]
        file: Option<PathBuf>,
    },
    /// Print a conversation transcript
    View {
        uuid: String,
        #[arg(long)]
        file: Option<PathBuf>,
    },
    /// Show statistics about the loaded collection
    Stats {
        #[arg(long)]
        file: Option<PathBuf>,
    },
    /// Remove the locally stored collection
    Clear,
    /// Browse and search the collection interactively
    Browse {
        #[arg(long)]
        file: Option<PathBuf>,
    },
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    match &cli.command {
        Some(Commands::Load { file }) => load_command(file),
        Some(Commands::Search { keyword, deep, json, file }) => {
            search_command(keyword, *deep, *json, file.as_deref())
        }
        Some(Commands::View { uuid, file }) => view_command(uuid, file.as_deref()),
        Some(Commands::Stats { file }) => stats_command(file.as_deref()),
        Some(Commands::Clear) => clear_command(),
        Some(Commands::Browse { file }) => {
            let conversations = load_collection(file.as_deref())?;
            run_interactive(conversations)
        }
        None => {
            println!("Use --help for usage information");
            Ok(())
        }
    }
}

/// Resolve the collection to operate on: an explicit export file when given,
/// otherwise the stored collection from a previous `load`.
fn load_collection(file: Option<&Path>) -> Result<Vec<Conversation>> {
    if let Some(path) = file {
        return load_archive(path)
            .with_context(|| format!("Failed to load export: {}", path.display()));
    }

    let store = CollectionStore::open().context("Failed to open collection store")?;
    match store.load().context("Failed to read stored collection")? {
        Some(conversations) => Ok(conversations),
        None => bail!(
            "No collection loaded. Run `chat-archive-explorer load <export>` first, \
             or pass --file <export>."
        ),
    }
}

fn load_command(file: &Path) -> Result<()> {
    let conversations = load_archive(file)
        .with_context(|| format!("Failed to load export: {}", file.display()))?;
    println!("Loaded {} conversations from {}", conversations.len(), file.display());

    // Persistence failure degrades to a warning: the export itself was fine
    match CollectionStore::open() {
        Ok(store) => match store.save(&conversations) {
            Ok(()) => println!("Collection saved for future sessions"),
            Err(e) => eprintln!("Warning: failed to persist collection: {}", e),
        },
        Err(e) => eprintln!("Warning: collection store unavailable: {}", e),
    }

    Ok(())
}

fn search_command(keyword: &str, deep: bool, json: bool, file: Option<&Path>) -> Result<()> {
    let conversations = load_collection(file)?;
    let results = search(&conversations, keyword, deep);

    if json {
        println!("{}", serde_json::to_string_pretty(&results)?);
        return Ok(());
    }

    if keyword.trim().is_empty() {
        println!("Enter a keyword to search {} conversations", conversations.len());
        return Ok(());
    }

    if results.is_empty() {
        println!("No conversations found. Try different keywords or --deep.");
        return Ok(());
    }

    println!("{} of {} conversations match \"{}\"\n", results.len(), conversations.len(), keyword);
    for result in &results {
        let badges: Vec<&str> = result.match_locations.iter().map(|l| l.label()).collect();
        println!(
            "{}  [{}]",
            result.name.as_deref().filter(|n| !n.is_empty()).unwrap_or("(untitled)"),
            badges.join(", ")
        );
        println!(
            "  uuid {} | {} messages | created {} | updated {}",
            result.uuid,
            result.message_count,
            result.created_at.format("%Y-%m-%d"),
            result.updated_at.format("%Y-%m-%d"),
        );
        if !result.summary.is_empty() {
            println!("  {}", result.summary);
        }
        println!();
    }

    Ok(())
}

fn view_command(uuid: &str, file: Option<&Path>) -> Result<()> {
    let conversations = load_collection(file)?;
    let conversation = conversations
        .iter()
        .find(|c| c.uuid == uuid)
        .with_context(|| format!("Conversation not found: {}", uuid))?;

    print!("{}", conversation.transcript());
    Ok(())
}

fn stats_command(file: Option<&Path>) -> Result<()> {
    let conversations = load_collection(file)?;

    let message_count: usize = conversations.iter().map(|c| c.messages.len()).sum();
    let human_count: usize = conversations
        .iter()
        .flat_map(|c| &c.messages)
        .filter(|m| m.sender == Sender::Human)
        .count();
    let assistant_count = message_count - human_count;

    println!("Chat Archive Statistics");
    println!("=======================");
    println!("Conversations: {}", conversations.len());
    println!("Messages: {}", message_count);
    println!("  From you: {}", human_count);
    println!("  From assistant: {}", assistant_count);

    if let Some(oldest) = conversations.iter().map(|c| c.created_at).min() {
        println!("Oldest conversation: {}", oldest.format("%Y-%m-%d %H:%M:%S"));
    }
    if let Some(newest) = conversations.iter().map(|c| c.updated_at).max() {
        println!("Last updated: {}", newest.format("%Y-%m-%d %H:%M:%S"));
    }

    Ok(())
}

fn clear_command() -> Result<()> {
    let store = CollectionStore::open().context("Failed to open collection store")?;
    if !store.exists() {
        println!("No stored collection to clear");
        return Ok(());
    }
    store.clear().context("Failed to clear stored collection")?;
    println!("Stored collection removed");
    Ok(())
}
