//! The orchestrator: one conversational turn from message to reply.

use crate::agents::handoff::{HandoffRequest, HandoffTarget};
use crate::identity::IdentityContext;
use crate::llm::client::{ChatMessage, CompletionClient};
use crate::session::{render_history, DEFAULT_HISTORY_WINDOW};
use crate::tools::ToolRegistry;
use crate::types::{AppError, ImageReference, Message, Result};
use std::sync::Arc;

/// Upper bound on tool-calling rounds within one turn.
pub const MAX_TOOL_ITERATIONS: usize = 5;

/// Static instruction template. Per-turn context (session history,
/// degradation notes) is rendered into a fresh system message each call;
/// this template is never mutated.
const BASE_INSTRUCTIONS: &str = "\
You are Nimbus, a personal assistant with durable per-user memory.

Guidelines:
- The session history below is your first source of context; consult it \
before reaching for the recall tool.
- Use `remember` to save explicit preferences, personal facts, reminders \
and strong inferences about the user. Quality over quantity; never save \
trivial conversation flow.
- Use `recall` for specific questions that stored context might answer, \
and `summarize_memory` only when the user asks openly what you know about \
them.
- Use `get_weather` only when the user asks about the weather or the \
answer depends on it.
- If a tool reports a problem, tell the user briefly that the capability \
is temporarily unavailable and continue without it.
- Answer in the user's language, formatted with Markdown when it helps.";

/// Everything the outer layer supplies for one turn.
#[derive(Debug, Clone)]
pub struct TurnRequest {
    /// The user's message text.
    pub message: String,
    /// Identity token of the acting user. Must not be empty.
    pub user_identity: String,
    /// Optional image attached to this turn.
    pub image: Option<ImageReference>,
    /// Prior session messages, chronological.
    pub history: Vec<Message>,
}

/// Decision-making core of the assistant.
///
/// Wires the completion collaborator, the vision handoff target and the
/// tool registry together and drives the per-turn state machine:
/// history injection, optional delegation, the bounded tool phase, and
/// guaranteed identity cleanup.
pub struct Orchestrator {
    completion: Arc<dyn CompletionClient>,
    vision: Arc<dyn HandoffTarget>,
    tools: Arc<ToolRegistry>,
    max_tool_iterations: usize,
}

impl Orchestrator {
    /// Create an orchestrator over its three collaborators.
    pub fn new(
        completion: Arc<dyn CompletionClient>,
        vision: Arc<dyn HandoffTarget>,
        tools: Arc<ToolRegistry>,
    ) -> Self {
        Self {
            completion,
            vision,
            tools,
            max_tool_iterations: MAX_TOOL_ITERATIONS,
        }
    }

    /// Override the tool-iteration bound.
    pub fn with_max_tool_iterations(mut self, max_tool_iterations: usize) -> Self {
        self.max_tool_iterations = max_tool_iterations;
        self
    }

    /// Handle one turn and produce the reply text.
    ///
    /// The ambient identity is established for exactly the duration of
    /// this call and restored on every exit path, including errors and
    /// cancellation. Errors from the completion collaborator propagate -
    /// they mean no answer was produced; tool and delegation failures are
    /// absorbed into degraded answers.
    pub async fn handle_turn(&self, request: TurnRequest) -> Result<String> {
        if request.user_identity.is_empty() {
            return Err(AppError::InvalidInput(
                "user identity must not be empty".to_string(),
            ));
        }

        let identity = IdentityContext::new();
        let _guard = identity.scope(request.user_identity.clone());
        self.run_turn(&identity, &request).await
    }

    async fn run_turn(&self, identity: &IdentityContext, request: &TurnRequest) -> Result<String> {
        // Transient delegation slot for this turn only.
        let mut delegation_failure: Option<String> = None;

        if let Some(image) = &request.image {
            let handoff = HandoffRequest::from_turn(image.clone(), &request.message);
            match self.vision.process(handoff).await {
                Ok(analysis) => {
                    // A delegated turn makes no general completion call.
                    tracing::info!("turn answered by vision delegation");
                    return Ok(analysis);
                }
                Err(e) => {
                    tracing::error!(error = %e, "vision delegation failed; continuing degraded");
                    delegation_failure = Some(e.to_string());
                }
            }
        }

        let mut messages = self.build_messages(request, delegation_failure.as_deref());
        let definitions = self.tools.definitions();

        for _ in 0..self.max_tool_iterations {
            let response = self.completion.chat(&messages, &definitions).await?;

            if response.tool_calls.is_empty() {
                return Ok(response.content);
            }

            messages.push(ChatMessage::assistant_with_calls(
                response.content,
                response.tool_calls.clone(),
            ));
            for call in response.tool_calls {
                tracing::debug!(tool = %call.name, "executing requested tool call");
                let result = self
                    .tools
                    .dispatch(&call.name, call.arguments.clone(), identity)
                    .await;
                messages.push(ChatMessage::tool_result(call.id, result));
            }
        }

        // Iteration bound hit: close the turn without offering more tools.
        tracing::warn!(
            max_tool_iterations = self.max_tool_iterations,
            "tool iteration bound reached; requesting final answer"
        );
        let response = self.completion.chat(&messages, &[]).await?;
        Ok(response.content)
    }

    /// Render the working context fresh for this call.
    fn build_messages(
        &self,
        request: &TurnRequest,
        delegation_failure: Option<&str>,
    ) -> Vec<ChatMessage> {
        let history_block = render_history(&request.history, DEFAULT_HISTORY_WINDOW);
        let mut messages = vec![ChatMessage::system(format!(
            "{}\n\n{}",
            BASE_INSTRUCTIONS, history_block
        ))];

        if let Some(failure) = delegation_failure {
            messages.push(ChatMessage::system(format!(
                "An image was attached to this turn but the image analysis \
                 failed ({}). Tell the user you could not analyze the image \
                 and answer what you can without it.",
                failure
            )));
        }

        messages.push(ChatMessage::user(request.message.clone()));
        messages
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::EMPTY_HISTORY_MARKER;
    use crate::types::MessageRole;

    fn orchestrator_for_prompt_tests() -> Orchestrator {
        use crate::llm::client::{CompletionResponse, VisionClient};
        use crate::types::{ToolDefinition, ImageReference};
        use async_trait::async_trait;

        struct Unused;

        #[async_trait]
        impl CompletionClient for Unused {
            async fn chat(
                &self,
                _messages: &[ChatMessage],
                _tools: &[ToolDefinition],
            ) -> Result<CompletionResponse> {
                unreachable!("prompt tests never call the completion client")
            }
            fn model_name(&self) -> &str {
                "unused"
            }
        }

        #[async_trait]
        impl VisionClient for Unused {
            async fn analyze(&self, _image: &ImageReference, _instruction: &str) -> Result<String> {
                unreachable!()
            }
        }

        let client = Arc::new(Unused);
        Orchestrator::new(
            client.clone(),
            Arc::new(crate::agents::vision::VisionAgent::new(client)),
            Arc::new(ToolRegistry::new()),
        )
    }

    fn turn(message: &str, history: Vec<Message>) -> TurnRequest {
        TurnRequest {
            message: message.to_string(),
            user_identity: "u1".to_string(),
            image: None,
            history,
        }
    }

    #[test]
    fn test_empty_history_is_injected_explicitly() {
        let orchestrator = orchestrator_for_prompt_tests();
        let messages = orchestrator.build_messages(&turn("hello", vec![]), None);

        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].role, "system");
        assert!(messages[0].content.contains(EMPTY_HISTORY_MARKER));
        assert_eq!(messages[1].role, "user");
        assert_eq!(messages[1].content, "hello");
    }

    #[test]
    fn test_history_appears_in_system_message() {
        let orchestrator = orchestrator_for_prompt_tests();
        let history = vec![
            Message::new(MessageRole::User, "my name is Ada"),
            Message::new(MessageRole::Assistant, "Nice to meet you, Ada!"),
        ];
        let messages = orchestrator.build_messages(&turn("what's my name?", history), None);

        assert!(messages[0].content.contains("User: my name is Ada"));
        assert!(messages[0]
            .content
            .contains("Assistant: Nice to meet you, Ada!"));
        assert!(!messages[0].content.contains(EMPTY_HISTORY_MARKER));
    }

    #[test]
    fn test_delegation_failure_note_is_injected() {
        let orchestrator = orchestrator_for_prompt_tests();
        let messages =
            orchestrator.build_messages(&turn("what's in the photo?", vec![]), Some("timeout"));

        assert_eq!(messages.len(), 3);
        assert_eq!(messages[1].role, "system");
        assert!(messages[1].content.contains("image analysis"));
        assert!(messages[1].content.contains("timeout"));
    }

    #[tokio::test]
    async fn test_empty_identity_is_rejected() {
        let orchestrator = orchestrator_for_prompt_tests();
        let result = orchestrator
            .handle_turn(TurnRequest {
                message: "hi".to_string(),
                user_identity: String::new(),
                image: None,
                history: vec![],
            })
            .await;
        assert!(matches!(result, Err(AppError::InvalidInput(_))));
    }
}
