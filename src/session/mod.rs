//! Session history injection.
//!
//! Formats the prior messages of the active session into a block the
//! orchestrator consults before answering, so session continuity does not
//! depend on the long-term memory tools. History is session-scoped and
//! transient; this module never calls the memory manager.

use crate::types::{Message, MessageRole};

/// Default number of recent messages injected into the working context.
pub const DEFAULT_HISTORY_WINDOW: usize = 10;

/// Marker injected when the session has no prior messages.
///
/// Rendered explicitly so the orchestrator can distinguish "no history"
/// from "history not loaded".
pub const EMPTY_HISTORY_MARKER: &str = "No prior messages in this session.";

/// Keep only the most recent `window_size` messages.
pub fn truncate_history(history: &[Message], window_size: usize) -> Vec<Message> {
    if history.len() <= window_size {
        history.to_vec()
    } else {
        history[history.len() - window_size..].to_vec()
    }
}

/// Render a bounded window of session history for prompt injection.
///
/// Preserves chronological order and role labeling; system messages are
/// not part of the visible exchange and are skipped. An empty history
/// renders [`EMPTY_HISTORY_MARKER`] rather than nothing.
pub fn render_history(history: &[Message], window_size: usize) -> String {
    let window = truncate_history(history, window_size);
    let lines: Vec<String> = window
        .iter()
        .filter_map(|m| match m.role {
            MessageRole::User => Some(format!("User: {}", m.content)),
            MessageRole::Assistant => Some(format!("Assistant: {}", m.content)),
            MessageRole::System => None,
        })
        .collect();

    if lines.is_empty() {
        return EMPTY_HISTORY_MARKER.to_string();
    }

    format!(
        "### Conversation so far in this session ###\n{}\n### End of session history ###",
        lines.join("\n")
    )
}
