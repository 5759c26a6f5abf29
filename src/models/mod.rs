//! Data models for exported chat conversation archives.
//!
//! This module defines the data structures used throughout the application:
//!
//! - [`Conversation`] - One conversation from the export, with its messages
//! - [`Message`] / [`ContentBlock`] - Message bodies and their sub-parts
//! - [`SearchResult`] - Read-only projection produced by the search engine
//! - [`MatchLocation`] - Which field of a conversation produced a match
//!
//! These models use serde for JSON deserialization with a custom timestamp
//! deserializer (epoch milliseconds or RFC3339 strings) in
//! `crate::ingest::deserializers`.

pub mod conversation;
pub mod search;

pub use conversation::{ContentBlock, Conversation, Message, Sender};
pub use search::{MatchLocation, SearchResult};
