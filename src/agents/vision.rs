//! Vision sub-agent: resolves image handoffs via the vision collaborator.

use crate::agents::handoff::{HandoffRequest, HandoffTarget};
use crate::llm::client::VisionClient;
use crate::types::Result;
use async_trait::async_trait;
use std::sync::Arc;

/// Standing instructions for the vision sub-agent.
const VISION_INSTRUCTIONS: &str = "\
You are a visual analysis specialist. Interpret the attached image and \
answer the instruction that follows.

- Describe visual elements precisely: subjects, objects, text, colors, \
setting and composition.
- When asked to extract or translate text, quote the original text first.
- State uncertainty plainly when details are small or illegible.
- Do not invent details that are not visible in the image.";

/// Specialized sub-agent for image understanding.
///
/// Holds no conversation state: each handoff carries a self-contained
/// refined instruction precisely because this agent cannot see the outer
/// session history.
pub struct VisionAgent {
    client: Arc<dyn VisionClient>,
}

impl VisionAgent {
    /// Create the agent over a vision collaborator.
    pub fn new(client: Arc<dyn VisionClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl HandoffTarget for VisionAgent {
    async fn process(&self, request: HandoffRequest) -> Result<String> {
        tracing::debug!(
            analysis_kind = ?request.analysis_kind,
            source = ?request.image.source,
            "resolving vision handoff"
        );

        let instruction = format!(
            "{}\n\n{}",
            VISION_INSTRUCTIONS, request.refined_instruction
        );
        self.client.analyze(&request.image, &instruction).await
    }
}
