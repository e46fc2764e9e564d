//! Mock collaborators shared across integration tests.

use async_trait::async_trait;
use nimbus::agents::handoff::{HandoffRequest, HandoffTarget};
use nimbus::llm::client::{ChatMessage, CompletionClient, CompletionResponse};
use nimbus::memory::MemoryStore;
use nimbus::types::{AppError, MemoryEntry, MemoryTags, Result, ToolCall, ToolDefinition};
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Completion client driven by a pre-recorded script of responses.
///
/// Records every message batch it receives so tests can assert what the
/// orchestrator actually sent.
pub struct MockCompletionClient {
    script: Mutex<VecDeque<CompletionResponse>>,
    seen: Mutex<Vec<Vec<ChatMessage>>>,
    should_fail: bool,
}

impl MockCompletionClient {
    /// A client whose every call answers with plain `response` text.
    pub fn replying(response: &str) -> Self {
        Self::with_script(vec![text_response(response)])
    }

    /// A client that plays `script` front to back.
    pub fn with_script(script: Vec<CompletionResponse>) -> Self {
        Self {
            script: Mutex::new(script.into()),
            seen: Mutex::new(Vec::new()),
            should_fail: false,
        }
    }

    /// A client whose every call fails.
    pub fn failing() -> Self {
        Self {
            script: Mutex::new(VecDeque::new()),
            seen: Mutex::new(Vec::new()),
            should_fail: true,
        }
    }

    /// Number of chat calls made so far.
    pub fn calls(&self) -> usize {
        self.seen.lock().len()
    }

    /// The message batches received, one per call.
    pub fn seen_messages(&self) -> Vec<Vec<ChatMessage>> {
        self.seen.lock().clone()
    }
}

#[async_trait]
impl CompletionClient for MockCompletionClient {
    async fn chat(
        &self,
        messages: &[ChatMessage],
        _tools: &[ToolDefinition],
    ) -> Result<CompletionResponse> {
        self.seen.lock().push(messages.to_vec());
        if self.should_fail {
            return Err(AppError::Completion("mock completion failure".to_string()));
        }
        Ok(self
            .script
            .lock()
            .pop_front()
            .unwrap_or_else(|| text_response("[script exhausted]")))
    }

    fn model_name(&self) -> &str {
        "mock"
    }
}

/// A plain text completion with no tool calls.
pub fn text_response(content: &str) -> CompletionResponse {
    CompletionResponse {
        content: content.to_string(),
        tool_calls: vec![],
        finish_reason: "stop".to_string(),
    }
}

/// A completion requesting a single tool call.
pub fn tool_call_response(id: &str, name: &str, arguments: serde_json::Value) -> CompletionResponse {
    CompletionResponse {
        content: String::new(),
        tool_calls: vec![ToolCall {
            id: id.to_string(),
            name: name.to_string(),
            arguments,
        }],
        finish_reason: "tool_calls".to_string(),
    }
}

/// Handoff target with a fixed outcome; counts invocations.
pub struct MockVisionTarget {
    response: std::result::Result<String, String>,
    invocations: AtomicUsize,
    requests: Mutex<Vec<HandoffRequest>>,
}

impl MockVisionTarget {
    /// A target whose analysis always succeeds with `text`.
    pub fn succeeding(text: &str) -> Self {
        Self {
            response: Ok(text.to_string()),
            invocations: AtomicUsize::new(0),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// A target whose analysis always fails with `message`.
    pub fn failing(message: &str) -> Self {
        Self {
            response: Err(message.to_string()),
            invocations: AtomicUsize::new(0),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Number of handoffs processed.
    pub fn invocations(&self) -> usize {
        self.invocations.load(Ordering::SeqCst)
    }

    /// The handoff requests received.
    pub fn requests(&self) -> Vec<HandoffRequest> {
        self.requests.lock().clone()
    }
}

#[async_trait]
impl HandoffTarget for MockVisionTarget {
    async fn process(&self, request: HandoffRequest) -> Result<String> {
        self.invocations.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().push(request);
        match &self.response {
            Ok(text) => Ok(text.clone()),
            Err(message) => Err(AppError::Vision(message.clone())),
        }
    }
}

/// Store double that counts backend calls and returns nothing.
///
/// Used to prove that operations without an ambient identity never reach
/// the backend.
#[derive(Default)]
pub struct CountingStore {
    calls: AtomicUsize,
}

impl CountingStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total backend calls across all operations.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl MemoryStore for CountingStore {
    async fn add(&self, _owner: &str, _scope: &str, _text: &str, _tags: &MemoryTags) -> Result<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn search(
        &self,
        _owner: &str,
        _scope: &str,
        _query: &str,
        _limit: usize,
    ) -> Result<Vec<MemoryEntry>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(vec![])
    }

    async fn get_all(&self, _owner: &str) -> Result<Vec<MemoryEntry>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(vec![])
    }
}
