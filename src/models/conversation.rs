use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Who produced a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    Human,
    Assistant,
}

impl Sender {
    /// Display label used by the CLI transcript and the TUI viewer
    pub fn label(self) -> &'static str {
        match self {
            Self::Human => "You",
            Self::Assistant => "Assistant",
        }
    }
}

/// Sub-part of a message (tool output, attachment text, etc.).
/// Only the text payload is searchable; other block kinds carry no text.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentBlock {
    #[serde(rename = "type", default)]
    pub block_type: String,
    #[serde(default)]
    pub text: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub uuid: String,
    pub sender: Sender,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub content: Vec<ContentBlock>,
    #[serde(deserialize_with = "crate::ingest::deserializers::deserialize_timestamp")]
    pub created_at: DateTime<Utc>,
}

/// One conversation from the export. `uuid` is the join key between search
/// results and full documents; it is treated as opaque, not parsed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Conversation {
    pub uuid: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(deserialize_with = "crate::ingest::deserializers::deserialize_timestamp")]
    pub created_at: DateTime<Utc>,
    #[serde(deserialize_with = "crate::ingest::deserializers::deserialize_timestamp")]
    pub updated_at: DateTime<Utc>,
    #[serde(rename = "chat_messages", default)]
    pub messages: Vec<Message>,
}

impl Conversation {
    /// Display title, falling back to a placeholder for unnamed conversations
    pub fn title(&self) -> &str {
        match self.name.as_deref() {
            Some(name) if !name.is_empty() => name,
            _ => "(untitled)",
        }
    }

    /// Render the conversation as a plain-text transcript.
    ///
    /// Used by `view` on the CLI and by the clipboard copy action in the TUI.
    pub fn transcript(&self) -> String {
        let mut out = String::new();
        out.push_str(self.title());
        out.push('\n');
        out.push_str(&format!(
            "{} messages | created {} | updated {}\n",
            self.messages.len(),
            self.created_at.format("%Y-%m-%d %H:%M"),
            self.updated_at.format("%Y-%m-%d %H:%M"),
        ));

        if let Some(summary) = self.summary.as_deref()
            && !summary.is_empty()
        {
            out.push_str("\n== Summary ==\n");
            out.push_str(summary);
            out.push('\n');
        }

        for message in &self.messages {
            out.push_str(&format!(
                "\n[{}] {}\n",
                message.sender.label(),
                message.created_at.format("%Y-%m-%d %H:%M"),
            ));
            if let Some(text) = message.text.as_deref()
                && !text.is_empty()
            {
                out.push_str(text);
                out.push('\n');
            }
        }

        out
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn message(sender: Sender, text: &str) -> Message {
        Message {
            uuid: "m-1".to_string(),
            sender,
            text: Some(text.to_string()),
            content: Vec::new(),
            created_at: Utc.timestamp_opt(1_700_000_000, 0).unwrap(),
        }
    }

    fn conversation() -> Conversation {
        Conversation {
            uuid: "c-1".to_string(),
            name: Some("Borrow checker fight".to_string()),
            summary: Some("A long discussion".to_string()),
            created_at: Utc.timestamp_opt(1_700_000_000, 0).unwrap(),
            updated_at: Utc.timestamp_opt(1_700_000_100, 0).unwrap(),
            messages: vec![
                message(Sender::Human, "Why does this not compile?"),
                message(Sender::Assistant, "You are moving out of a borrow."),
            ],
        }
    }

    #[test]
    fn test_title_uses_name() {
        assert_eq!(conversation().title(), "Borrow checker fight");
    }

    #[test]
    fn test_title_placeholder_for_missing_name() {
        let mut conv = conversation();
        conv.name = None;
        assert_eq!(conv.title(), "(untitled)");

        conv.name = Some(String::new());
        assert_eq!(conv.title(), "(untitled)");
    }

    #[test]
    fn test_transcript_contains_summary_and_messages() {
        let transcript = conversation().transcript();
        assert!(transcript.contains("Borrow checker fight"));
        assert!(transcript.contains("== Summary =="));
        assert!(transcript.contains("A long discussion"));
        assert!(transcript.contains("[You]"));
        assert!(transcript.contains("Why does this not compile?"));
        assert!(transcript.contains("[Assistant]"));
    }

    #[test]
    fn test_transcript_skips_empty_summary() {
        let mut conv = conversation();
        conv.summary = Some(String::new());
        assert!(!conv.transcript().contains("== Summary =="));
    }

    #[test]
    fn test_sender_deserializes_lowercase() {
        let human: Sender = serde_json::from_str("\"human\"").unwrap();
        assert_eq!(human, Sender::Human);
        let assistant: Sender = serde_json::from_str("\"assistant\"").unwrap();
        assert_eq!(assistant, Sender::Assistant);
    }
}
