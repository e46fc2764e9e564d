//! Core types shared across the orchestration and memory subsystems.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ============= Conversation Types =============

/// A single message in a conversation session.
///
/// Messages are immutable once created; ordering within a session is
/// creation order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    /// Who produced the message.
    pub role: MessageRole,
    /// The message text.
    pub content: String,
    /// Creation time.
    pub timestamp: DateTime<Utc>,
}

impl Message {
    /// Convenience constructor stamping the current time.
    pub fn new(role: MessageRole, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
            timestamp: Utc::now(),
        }
    }
}

/// The author of a [`Message`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    /// System-injected instructions.
    System,
    /// The end user.
    User,
    /// The assistant's own replies.
    Assistant,
}

impl MessageRole {
    /// Wire-format role label.
    pub fn as_str(&self) -> &'static str {
        match self {
            MessageRole::System => "system",
            MessageRole::User => "user",
            MessageRole::Assistant => "assistant",
        }
    }
}

// ============= Image Types =============

/// How an [`ImageReference`] carries its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ImageSource {
    /// `content` is a (usually signed) URL.
    Url,
    /// `content` is base64-encoded image data.
    InlineData,
}

/// A transient reference to an image supplied with the current turn.
///
/// Constructed per request from an upload or signed URL, consumed once by
/// the vision handoff, never persisted by this core.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageReference {
    /// Payload kind.
    pub source: ImageSource,
    /// URL or base64 data, depending on `source`.
    pub content: String,
}

// ============= Memory Types =============

/// Structured tags attached to a memory entry.
///
/// `kind` and `category` are mandatory and must be populated by the caller
/// (the model, via the `remember` tool schema) - the memory manager does
/// not invent them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemoryTags {
    /// Broad kind of the entry, e.g. "preference" or "reminder".
    pub kind: String,
    /// Free-form topic category, e.g. "food" or "work".
    pub category: String,
    /// Optional concrete value the entry pins down.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    /// Optional sentiment attached to the entry.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sentiment: Option<String>,
}

/// A durable, user-owned memory entry.
///
/// Never mutated after creation; owned exclusively by the identity that
/// created it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemoryEntry {
    /// Store-assigned identifier.
    pub id: String,
    /// The identity token of the owning user.
    pub owner: String,
    /// The remembered text.
    pub text: String,
    /// Structured tags.
    pub tags: MemoryTags,
    /// Creation time.
    pub created_at: DateTime<Utc>,
}

/// Fixed grouping buckets for memory summaries.
///
/// Unrecognized `tags.kind` values fall into [`MemoryKind::Other`]. The
/// enum ordering is the section ordering in rendered summaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum MemoryKind {
    /// Explicit user preferences.
    Preference,
    /// Facts about the user's life.
    PersonalFact,
    /// Tasks and reminders.
    Reminder,
    /// Assistant-inferred observations.
    Inference,
    /// Anything with an unrecognized kind tag.
    Other,
}

impl MemoryKind {
    /// Map a raw `tags.kind` string onto a grouping bucket.
    pub fn from_tag(kind: &str) -> Self {
        match kind {
            "preference" => MemoryKind::Preference,
            "personal-fact" => MemoryKind::PersonalFact,
            "reminder" => MemoryKind::Reminder,
            "inference" => MemoryKind::Inference,
            _ => MemoryKind::Other,
        }
    }

    /// Section heading used when rendering a summary.
    pub fn heading(&self) -> &'static str {
        match self {
            MemoryKind::Preference => "Preferences",
            MemoryKind::PersonalFact => "Personal Facts",
            MemoryKind::Reminder => "Reminders",
            MemoryKind::Inference => "Observations",
            MemoryKind::Other => "Other",
        }
    }
}

// ============= Tool Types =============

/// Name, description and JSON Schema of a registered tool, in the shape
/// completion providers expect.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolDefinition {
    /// Tool name as exposed to the model.
    pub name: String,
    /// Natural-language description for tool selection.
    pub description: String,
    /// JSON Schema of the arguments object.
    pub parameters: serde_json::Value,
}

/// A tool invocation requested by the completion service mid-run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolCall {
    /// Provider-assigned call id, echoed back with the result.
    pub id: String,
    /// Name of the requested tool.
    pub name: String,
    /// Raw JSON arguments, validated by the registry before dispatch.
    pub arguments: serde_json::Value,
}

// ============= Error Types =============

/// Crate-wide error type.
///
/// Only [`AppError::Completion`] crosses `handle_turn` - every other
/// failure class is absorbed at a component boundary and surfaces as a
/// degraded result or sentinel string.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// The completion/runner collaborator failed; the turn produced no
    /// answer at all.
    #[error("Completion error: {0}")]
    Completion(String),

    /// Memory store failure.
    #[error("Memory error: {0}")]
    Memory(String),

    /// Vision/image-analysis failure.
    #[error("Vision error: {0}")]
    Vision(String),

    /// Missing or invalid configuration.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Malformed input at a component boundary.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A named resource (e.g. a tool) does not exist.
    #[error("Not found: {0}")]
    NotFound(String),
}

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, AppError>;
