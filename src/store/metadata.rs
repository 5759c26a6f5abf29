//! Store metadata for schema versioning

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Store schema version for invalidation on format changes
pub const STORE_VERSION: u32 = 1;

/// Sidecar metadata written next to the collection blob
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreMetadata {
    pub version: u32,
    pub saved_at: DateTime<Utc>,
    pub conversation_count: usize,
}

impl StoreMetadata {
    /// Metadata for a collection about to be saved
    pub fn new(conversation_count: usize) -> Self {
        Self { version: STORE_VERSION, saved_at: Utc::now(), conversation_count }
    }

    /// Whether this metadata was written by the current schema
    pub fn is_current(&self) -> bool {
        self.version == STORE_VERSION
    }
}
