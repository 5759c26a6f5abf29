//! Keyword scan over a conversation collection.
//!
//! The engine is a direct linear scan, not an index: every search walks the
//! collection front to back and classifies where the keyword appears in each
//! conversation (title, summary, message text, content blocks). Shallow
//! search stops at the first confirming evidence per conversation to bound
//! scan cost; deep search scans everything so every match location class is
//! surfaced at once.

use rayon::prelude::*;

use crate::models::{Conversation, MatchLocation, SearchResult};

/// Result summaries carry at most this many characters of the source summary
const SUMMARY_PREVIEW_CHARS: usize = 300;

/// Search a collection for a keyword.
///
/// Matching is case-insensitive exact-substring; output order is input
/// order (no relevance ranking). An empty or whitespace-only keyword yields
/// an empty result list.
///
/// With `deep = false`, message scanning stops at the first matching message
/// and is skipped entirely when the title or summary already matched. With
/// `deep = true`, all messages and their content blocks are scanned, so a
/// result can carry every applicable match location.
///
/// Pure and synchronous: conversations are scanned independently (in
/// parallel, order-preserving) and no state survives the call.
pub fn search(conversations: &[Conversation], keyword: &str, deep: bool) -> Vec<SearchResult> {
    let keyword = keyword.trim();
    if keyword.is_empty() {
        return Vec::new();
    }
    let needle = keyword.to_lowercase();

    conversations
        .par_iter()
        .filter_map(|conversation| scan_conversation(conversation, &needle, deep))
        .collect()
}

/// Scan one conversation; `needle` must already be lowercased
fn scan_conversation(
    conversation: &Conversation,
    needle: &str,
    deep: bool,
) -> Option<SearchResult> {
    let mut locations: Vec<MatchLocation> = Vec::new();

    if contains_keyword(conversation.name.as_deref(), needle) {
        mark(&mut locations, MatchLocation::Title);
    }
    if contains_keyword(conversation.summary.as_deref(), needle) {
        mark(&mut locations, MatchLocation::Summary);
    }

    // Shallow search trusts a title/summary hit and skips the messages;
    // deep search always walks them.
    if locations.is_empty() || deep {
        for message in &conversation.messages {
            let text_matched = contains_keyword(message.text.as_deref(), needle);
            if text_matched {
                mark(&mut locations, MatchLocation::Message);
            }

            if deep {
                for block in &message.content {
                    if contains_keyword(block.text.as_deref(), needle) {
                        mark(&mut locations, MatchLocation::Content);
                        break;
                    }
                }
            }

            if text_matched && !deep {
                break;
            }
        }
    }

    if locations.is_empty() {
        return None;
    }

    Some(SearchResult {
        uuid: conversation.uuid.clone(),
        name: conversation.name.clone(),
        summary: truncate_summary(conversation.summary.as_deref().unwrap_or_default()),
        created_at: conversation.created_at,
        updated_at: conversation.updated_at,
        message_count: conversation.messages.len(),
        match_locations: locations,
    })
}

fn contains_keyword(field: Option<&str>, needle: &str) -> bool {
    field.is_some_and(|text| text.to_lowercase().contains(needle))
}

/// Record a match location once, keeping first-discovery order
fn mark(locations: &mut Vec<MatchLocation>, location: MatchLocation) {
    if !locations.contains(&location) {
        locations.push(location);
    }
}

/// Truncate a summary to [`SUMMARY_PREVIEW_CHARS`] characters with a
/// trailing ellipsis marker. Counted in chars, never splitting a code point.
fn truncate_summary(summary: &str) -> String {
    if summary.chars().count() <= SUMMARY_PREVIEW_CHARS {
        return summary.to_string();
    }
    let mut preview: String = summary.chars().take(SUMMARY_PREVIEW_CHARS).collect();
    preview.push_str("...");
    preview
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;
    use crate::models::{ContentBlock, Message, Sender};

    fn conversation(uuid: &str, name: &str, summary: &str) -> Conversation {
        Conversation {
            uuid: uuid.to_string(),
            name: Some(name.to_string()),
            summary: Some(summary.to_string()),
            created_at: Utc.timestamp_opt(1_700_000_000, 0).unwrap(),
            updated_at: Utc.timestamp_opt(1_700_000_100, 0).unwrap(),
            messages: Vec::new(),
        }
    }

    fn message(text: Option<&str>, block_texts: &[&str]) -> Message {
        Message {
            uuid: "m-1".to_string(),
            sender: Sender::Human,
            text: text.map(str::to_string),
            content: block_texts
                .iter()
                .map(|t| ContentBlock {
                    block_type: "tool_result".to_string(),
                    text: Some(t.to_string()),
                })
                .collect(),
            created_at: Utc.timestamp_opt(1_700_000_000, 0).unwrap(),
        }
    }

    #[test]
    fn test_empty_keyword_returns_nothing() {
        let collection = vec![conversation("a", "keyword", "keyword")];
        assert!(search(&collection, "", false).is_empty());
        assert!(search(&collection, "   \t", false).is_empty());
    }

    #[test]
    fn test_title_match() {
        let collection = vec![conversation("a", "Hello World", "")];
        let results = search(&collection, "world", false);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].uuid, "a");
        assert_eq!(results[0].match_locations, vec![MatchLocation::Title]);
    }

    #[test]
    fn test_summary_match_only() {
        let collection = vec![
            conversation("a", "Hello World", ""),
            conversation("b", "x", "contains keyword here"),
        ];
        let results = search(&collection, "keyword", false);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].uuid, "b");
        assert_eq!(results[0].match_locations, vec![MatchLocation::Summary]);
    }

    #[test]
    fn test_case_insensitive() {
        let collection = vec![conversation("a", "Hello World", "")];
        let upper = search(&collection, "WORLD", false);
        let lower = search(&collection, "world", false);
        assert_eq!(upper, lower);
        assert_eq!(upper.len(), 1);
    }

    #[test]
    fn test_substring_not_word_boundary() {
        let collection = vec![conversation("a", "deadlocked", "")];
        assert_eq!(search(&collection, "lock", false).len(), 1);
    }

    #[test]
    fn test_output_order_is_input_order() {
        let collection = vec![
            conversation("z", "match here", ""),
            conversation("a", "match here", ""),
            conversation("m", "match here", ""),
        ];
        let results = search(&collection, "match", false);
        let uuids: Vec<&str> = results.iter().map(|r| r.uuid.as_str()).collect();
        assert_eq!(uuids, vec!["z", "a", "m"]);
    }

    #[test]
    fn test_shallow_skips_messages_when_title_matched() {
        // Title matches, so messages are never scanned: no Message location
        // even though a message body also contains the keyword.
        let mut conv = conversation("a", "keyword in title", "");
        conv.messages.push(message(Some("keyword in body"), &[]));

        let results = search(&[conv], "keyword", false);
        assert_eq!(results[0].match_locations, vec![MatchLocation::Title]);
    }

    #[test]
    fn test_shallow_stops_at_first_matching_message() {
        let mut conv = conversation("a", "x", "y");
        conv.messages.push(message(Some("no"), &[]));
        conv.messages.push(message(Some("keyword"), &[]));
        conv.messages.push(message(Some("keyword"), &[]));

        let results = search(&[conv], "keyword", false);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].match_locations, vec![MatchLocation::Message]);
    }

    #[test]
    fn test_shallow_ignores_content_blocks() {
        let mut conv = conversation("a", "x", "y");
        conv.messages.push(message(Some("no"), &["keyword in block"]));

        assert!(search(&[conv.clone()], "keyword", false).is_empty());
        let deep = search(&[conv], "keyword", true);
        assert_eq!(deep.len(), 1);
        assert_eq!(deep[0].match_locations, vec![MatchLocation::Content]);
    }

    #[test]
    fn test_deep_collects_all_locations() {
        let mut conv = conversation("a", "keyword title", "keyword summary");
        conv.messages.push(message(Some("keyword body"), &[]));
        conv.messages.push(message(Some("no"), &["keyword block"]));

        let results = search(&[conv], "keyword", true);
        assert_eq!(
            results[0].match_locations,
            vec![
                MatchLocation::Title,
                MatchLocation::Summary,
                MatchLocation::Message,
                MatchLocation::Content
            ]
        );
    }

    #[test]
    fn test_deep_keeps_scanning_after_message_match() {
        // The matching message comes first; a later message holds the only
        // content-block match. Deep search must reach it.
        let mut conv = conversation("a", "x", "y");
        conv.messages.push(message(Some("keyword body"), &[]));
        conv.messages.push(message(Some("no"), &["keyword block"]));

        let results = search(&[conv], "keyword", true);
        assert_eq!(
            results[0].match_locations,
            vec![MatchLocation::Message, MatchLocation::Content]
        );
    }

    #[test]
    fn test_content_before_message_keeps_discovery_order() {
        let mut conv = conversation("a", "x", "y");
        conv.messages.push(message(Some("no"), &["keyword block"]));
        conv.messages.push(message(Some("keyword body"), &[]));

        let results = search(&[conv], "keyword", true);
        assert_eq!(
            results[0].match_locations,
            vec![MatchLocation::Content, MatchLocation::Message]
        );
    }

    #[test]
    fn test_locations_deduplicated() {
        let mut conv = conversation("a", "x", "y");
        conv.messages.push(message(Some("keyword"), &["keyword"]));
        conv.messages.push(message(Some("keyword"), &["keyword"]));

        let results = search(&[conv], "keyword", true);
        assert_eq!(
            results[0].match_locations,
            vec![MatchLocation::Message, MatchLocation::Content]
        );
    }

    #[test]
    fn test_missing_fields_are_not_matches() {
        let conv = Conversation {
            uuid: "a".to_string(),
            name: None,
            summary: None,
            created_at: Utc.timestamp_opt(1_700_000_000, 0).unwrap(),
            updated_at: Utc.timestamp_opt(1_700_000_000, 0).unwrap(),
            messages: vec![message(None, &[])],
        };
        assert!(search(&[conv], "anything", true).is_empty());
    }

    #[test]
    fn test_summary_truncation_long() {
        let long_summary = format!("keyword {}", "x".repeat(342));
        let collection = vec![conversation("a", "", &long_summary)];

        let results = search(&collection, "keyword", false);
        let summary = &results[0].summary;
        assert_eq!(summary.chars().count(), SUMMARY_PREVIEW_CHARS + 3);
        assert!(summary.ends_with("..."));
    }

    #[test]
    fn test_summary_short_returned_verbatim() {
        let short = "keyword and then some more words";
        let collection = vec![conversation("a", "", short)];

        let results = search(&collection, "keyword", false);
        assert_eq!(results[0].summary, short);
    }

    #[test]
    fn test_summary_exactly_300_chars_untruncated() {
        let exact = "k".repeat(300);
        assert_eq!(truncate_summary(&exact), exact);
    }

    #[test]
    fn test_summary_truncation_counts_chars_not_bytes() {
        // 350 multi-byte chars must truncate to 300 chars, not panic on a
        // byte boundary.
        let summary = "é".repeat(350);
        let truncated = truncate_summary(&summary);
        assert_eq!(truncated.chars().count(), 303);
    }

    #[test]
    fn test_missing_summary_yields_empty_string() {
        let mut conv = conversation("a", "keyword", "");
        conv.summary = None;

        let results = search(&[conv], "keyword", false);
        assert_eq!(results[0].summary, "");
    }

    #[test]
    fn test_result_is_snapshot() {
        let collection = vec![conversation("a", "keyword", "original summary")];
        let results = search(&collection, "keyword", false);

        // Mutating the source afterwards must not affect produced results
        let mut mutated = collection;
        mutated[0].summary = Some("changed".to_string());
        assert_eq!(results[0].summary, "original summary");
    }

    #[test]
    fn test_message_count_snapshot() {
        let mut conv = conversation("a", "keyword", "");
        conv.messages.push(message(Some("one"), &[]));
        conv.messages.push(message(Some("two"), &[]));

        let results = search(&[conv], "keyword", false);
        assert_eq!(results[0].message_count, 2);
    }

    #[test]
    fn test_keyword_is_trimmed_before_matching() {
        let collection = vec![conversation("a", "Hello World", "")];
        assert_eq!(search(&collection, "  world  ", false).len(), 1);
    }
}
