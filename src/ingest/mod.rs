//! Export archive ingestion
//!
//! # Error Handling Strategy
//!
//! Ingestion is the validation gate in front of the search engine: a
//! collection that fails here is never searched. Unlike line-oriented log
//! parsing there is no graceful-degradation path - the export is one JSON
//! document, so a malformed payload is rejected as a whole with a
//! [`FormatError`] that tells the user what to fix (wrong file type, missing
//! `conversations.json` inside the zip, payload not an array, first entry
//! without a `uuid`).
//!
//! Absent optional fields (`name`, `summary`, `text`) deserialize to defaults
//! so downstream code never special-cases missing data.

pub mod archive;
pub mod deserializers;

pub use archive::{FormatError, load_archive, parse_collection};
