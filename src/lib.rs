//! Chat Archive Explorer - Search and browse exported chat conversation archives
//!
//! This library provides tools for loading a conversation export
//! (`conversations.json`, plain or inside a `.zip` archive), keeping the
//! collection in memory, and searching through it. It supports:
//!
//! - Parsing and validating export archives
//! - Keyword search over titles, summaries, and message bodies (shallow/deep)
//! - In-conversation match highlighting and next/previous navigation
//! - Persisting the loaded collection to a platform-local data directory
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//! use chat_archive_explorer::{load_archive, search};
//!
//! let conversations = load_archive(Path::new("export.zip"))?;
//! let results = search(&conversations, "deadlock", false);
//! println!("{} conversations match", results.len());
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod cli;
pub mod clipboard;
pub mod ingest;
pub mod models;
pub mod search;
pub mod store;
pub mod tui;
pub mod utils;

// Re-export commonly used types
pub use ingest::{FormatError, load_archive, parse_collection};
pub use models::{Conversation, MatchLocation, Message, SearchResult, Sender};
pub use search::engine::search;
pub use search::highlight::{HighlightNavigator, MatchState};
pub use store::{CollectionStore, StorageError};
