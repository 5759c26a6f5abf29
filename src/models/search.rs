use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Which field of a conversation produced a keyword match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchLocation {
    /// Conversation name
    Title,
    /// Conversation summary
    Summary,
    /// Message body text
    Message,
    /// Sub-message content block (deep search only)
    Content,
}

impl MatchLocation {
    /// Badge label shown next to a search result
    pub fn label(self) -> &'static str {
        match self {
            Self::Title => "Title",
            Self::Summary => "Summary",
            Self::Message => "Message",
            Self::Content => "Content",
        }
    }
}

/// Read-only projection of a matched conversation.
///
/// An independent snapshot: mutating the source collection after a search
/// does not change results already produced. `match_locations` is
/// deduplicated, keeps first-discovery order, and is never empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    pub uuid: String,
    pub name: Option<String>,
    /// Source summary, truncated to 300 characters plus `...` when longer;
    /// empty string when the conversation has no summary.
    pub summary: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub message_count: usize,
    pub match_locations: Vec<MatchLocation>,
}
