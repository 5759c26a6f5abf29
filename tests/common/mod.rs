//! Shared test utilities for integration tests
#![allow(dead_code)]

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use serde_json::{Value, json};
use zip::write::SimpleFileOptions;

/// Builder for one conversation in an export payload
pub struct ConversationBuilder {
    uuid: String,
    name: Option<String>,
    summary: Option<String>,
    created_at: String,
    updated_at: String,
    messages: Vec<MessageBuilder>,
}

impl ConversationBuilder {
    pub fn new(uuid: &str) -> Self {
        Self {
            uuid: uuid.to_string(),
            name: Some("Test conversation".to_string()),
            summary: Some(String::new()),
            created_at: "2024-01-15T10:30:00Z".to_string(),
            updated_at: "2024-01-16T08:00:00Z".to_string(),
            messages: Vec::new(),
        }
    }

    pub fn name(mut self, name: &str) -> Self {
        self.name = Some(name.to_string());
        self
    }

    pub fn no_name(mut self) -> Self {
        self.name = None;
        self
    }

    pub fn summary(mut self, summary: &str) -> Self {
        self.summary = Some(summary.to_string());
        self
    }

    pub fn no_summary(mut self) -> Self {
        self.summary = None;
        self
    }

    pub fn created_at(mut self, timestamp: &str) -> Self {
        self.created_at = timestamp.to_string();
        self
    }

    pub fn updated_at(mut self, timestamp: &str) -> Self {
        self.updated_at = timestamp.to_string();
        self
    }

    pub fn message(mut self, message: MessageBuilder) -> Self {
        self.messages.push(message);
        self
    }

    pub fn to_value(&self) -> Value {
        let mut conversation = json!({
            "uuid": self.uuid,
            "created_at": self.created_at,
            "updated_at": self.updated_at,
            "chat_messages": self.messages.iter().map(MessageBuilder::to_value).collect::<Vec<_>>(),
        });
        if let Some(name) = &self.name {
            conversation["name"] = json!(name);
        }
        if let Some(summary) = &self.summary {
            conversation["summary"] = json!(summary);
        }
        conversation
    }
}

/// Builder for one message inside a conversation
pub struct MessageBuilder {
    uuid: String,
    sender: String,
    text: Option<String>,
    content_texts: Vec<String>,
    created_at: String,
}

impl MessageBuilder {
    pub fn human(text: &str) -> Self {
        Self {
            uuid: "m-0".to_string(),
            sender: "human".to_string(),
            text: Some(text.to_string()),
            content_texts: Vec::new(),
            created_at: "2024-01-15T10:31:00Z".to_string(),
        }
    }

    pub fn assistant(text: &str) -> Self {
        Self {
            uuid: "m-1".to_string(),
            sender: "assistant".to_string(),
            text: Some(text.to_string()),
            content_texts: Vec::new(),
            created_at: "2024-01-15T10:32:00Z".to_string(),
        }
    }

    pub fn uuid(mut self, uuid: &str) -> Self {
        self.uuid = uuid.to_string();
        self
    }

    pub fn no_text(mut self) -> Self {
        self.text = None;
        self
    }

    /// Add a content block with the given text
    pub fn block(mut self, text: &str) -> Self {
        self.content_texts.push(text.to_string());
        self
    }

    pub fn to_value(&self) -> Value {
        let mut message = json!({
            "uuid": self.uuid,
            "sender": self.sender,
            "content": self.content_texts.iter().map(|t| json!({
                "type": "tool_result",
                "text": t,
            })).collect::<Vec<_>>(),
            "created_at": self.created_at,
        });
        if let Some(text) = &self.text {
            message["text"] = json!(text);
        }
        message
    }
}

/// Serialize conversations into an export payload
pub fn export_json(conversations: &[ConversationBuilder]) -> String {
    let values: Vec<Value> = conversations.iter().map(ConversationBuilder::to_value).collect();
    serde_json::to_string_pretty(&values).expect("Failed to serialize export")
}

/// Write an export as a bare conversations.json file
pub fn write_json_export(dir: &Path, conversations: &[ConversationBuilder]) -> PathBuf {
    let path = dir.join("conversations.json");
    std::fs::write(&path, export_json(conversations)).expect("Failed to write export");
    path
}

/// Write an export as a zip archive containing conversations.json
pub fn write_zip_export(dir: &Path, conversations: &[ConversationBuilder]) -> PathBuf {
    let path = dir.join("export.zip");
    let file = File::create(&path).expect("Failed to create zip");
    let mut writer = zip::ZipWriter::new(file);
    writer
        .start_file("conversations.json", SimpleFileOptions::default())
        .expect("Failed to start zip entry");
    writer
        .write_all(export_json(conversations).as_bytes())
        .expect("Failed to write zip entry");
    writer.finish().expect("Failed to finish zip");
    path
}

/// A small realistic collection used by several suites
pub fn realistic_export() -> Vec<ConversationBuilder> {
    vec![
        ConversationBuilder::new("conv-rust")
            .name("Fighting the borrow checker")
            .summary("A session about ownership and borrowing in Rust")
            .message(MessageBuilder::human("Why does this borrow fail?").uuid("m-r1"))
            .message(
                MessageBuilder::assistant("You are holding a mutable reference across an await.")
                    .uuid("m-r2")
                    .block("error[E0502]: cannot borrow `x` as mutable"),
            ),
        ConversationBuilder::new("conv-sql")
            .name("Query optimization")
            .summary("Indexes and join order")
            .message(MessageBuilder::human("My query is slow").uuid("m-s1"))
            .message(MessageBuilder::assistant("Add an index on user_id.").uuid("m-s2")),
        ConversationBuilder::new("conv-empty").name("Empty one").summary(""),
    ]
}
