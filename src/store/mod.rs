//! Persistent collection storage
//!
//! Keeps the loaded collection between sessions so the user does not have to
//! re-ingest the export on every run. Uses a two-file approach:
//! - `collection-meta.json`: JSON metadata (schema version, save time, count)
//! - `collection.json`: the serialized conversations
//!
//! The blob is JSON rather than a binary encoding: the data model's tolerant
//! timestamp deserializer needs a self-describing format.
//!
//! Store location: `$CHAT_ARCHIVE_DATA_DIR` when set, otherwise the platform
//! data directory
//! - macOS: `~/Library/Application Support/chat-archive-explorer/`
//! - Linux: `~/.local/share/chat-archive-explorer/`
//! - Windows: `%LOCALAPPDATA%\chat-archive-explorer\`
//!
//! Storage failures are never fatal: callers log a warning and continue with
//! the in-memory collection.

pub mod metadata;
pub mod persistence;

pub use metadata::{STORE_VERSION, StoreMetadata};
pub use persistence::{CollectionStore, StorageError};
