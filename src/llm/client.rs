//! Collaborator traits for the completion/runner and vision services.

use crate::types::{ImageReference, Result, ToolCall, ToolDefinition};
use async_trait::async_trait;

/// One message in a completion conversation, in provider wire shape.
///
/// Distinct from [`crate::types::Message`]: session messages are what the
/// caller persists; chat messages additionally carry tool-call plumbing
/// and exist only for the duration of one completion run.
#[derive(Debug, Clone)]
pub struct ChatMessage {
    /// "system", "user", "assistant" or "tool".
    pub role: String,
    /// Message text. For tool results, the tool's output string.
    pub content: String,
    /// Tool calls requested by an assistant message.
    pub tool_calls: Vec<ToolCall>,
    /// For role "tool": the id of the call this result answers.
    pub tool_call_id: Option<String>,
}

impl ChatMessage {
    /// A system-role message.
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
            tool_calls: Vec::new(),
            tool_call_id: None,
        }
    }

    /// A user-role message.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
            tool_calls: Vec::new(),
            tool_call_id: None,
        }
    }

    /// An assistant-role message echoing the tool calls the model made.
    pub fn assistant_with_calls(content: impl Into<String>, tool_calls: Vec<ToolCall>) -> Self {
        Self {
            role: "assistant".to_string(),
            content: content.into(),
            tool_calls,
            tool_call_id: None,
        }
    }

    /// A tool-role message carrying one tool's result.
    pub fn tool_result(call_id: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            role: "tool".to_string(),
            content: content.into(),
            tool_calls: Vec::new(),
            tool_call_id: Some(call_id.into()),
        }
    }
}

/// Outcome of one completion call.
#[derive(Debug, Clone)]
pub struct CompletionResponse {
    /// Text content (may be empty when the model only requested tools).
    pub content: String,
    /// Tool invocations the model requested this round.
    pub tool_calls: Vec<ToolCall>,
    /// Why generation stopped ("stop", "tool_calls", "length", ...).
    pub finish_reason: String,
}

/// The completion/runner collaborator.
///
/// Errors from this trait are total failures of the turn - the assistant
/// produced no answer - and propagate out of `handle_turn` untouched.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    /// Run one completion over `messages` with `tools` available.
    async fn chat(
        &self,
        messages: &[ChatMessage],
        tools: &[ToolDefinition],
    ) -> Result<CompletionResponse>;

    /// Model identifier, for logging.
    fn model_name(&self) -> &str;
}

/// The vision/image-analysis collaborator.
#[async_trait]
pub trait VisionClient: Send + Sync {
    /// Analyze `image` following `instruction`, returning the analysis
    /// text.
    async fn analyze(&self, image: &ImageReference, instruction: &str) -> Result<String>;
}
