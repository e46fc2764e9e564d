//! Structured handoff from the orchestrator to a specialized sub-agent.

use crate::types::{ImageReference, Result};
use async_trait::async_trait;

/// Advisory classification of what the user wants from an image.
///
/// Inferred by keyword matching on the raw message and carried on the
/// handoff for logging; the refined free-text instruction is the only
/// behavioral input to the sub-agent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalysisKind {
    /// Describe the image.
    Description,
    /// Read text out of the image.
    TextExtraction,
    /// Identify objects in the image.
    ObjectDetection,
    /// Interpret meaning, context or sentiment.
    ContextualAnalysis,
    /// Extract and translate text in the image.
    TextTranslation,
}

/// Infer an [`AnalysisKind`] from the user's message.
///
/// Falls back to [`AnalysisKind::Description`] for plain questions and
/// anything unmatched.
pub fn classify_analysis_kind(message: &str) -> AnalysisKind {
    let lower = message.to_lowercase();
    let contains_any = |words: &[&str]| words.iter().any(|w| lower.contains(w));

    if contains_any(&["translate", "translation", "what does it mean", "written in"]) {
        AnalysisKind::TextTranslation
    } else if contains_any(&["object", "identify", "items"]) {
        AnalysisKind::ObjectDetection
    } else if contains_any(&["describe", "scene", "surroundings"]) {
        AnalysisKind::Description
    } else if contains_any(&["text", "read"]) {
        AnalysisKind::TextExtraction
    } else if contains_any(&["context", "sentiment", "interpret"]) {
        AnalysisKind::ContextualAnalysis
    } else {
        AnalysisKind::Description
    }
}

/// Rewrite the user's message as a direct, self-contained instruction.
///
/// The sub-agent has no access to the outer conversation history, so the
/// instruction must stand on its own.
pub fn refine_instruction(message: &str) -> String {
    format!(
        "The user sent this image and asked: '{}'. Examine the image carefully \
         and answer the question directly and concisely. If the image does not \
         contain the answer, say so.",
        message
    )
}

/// A handoff from the orchestrator to the vision sub-agent.
#[derive(Debug, Clone)]
pub struct HandoffRequest {
    /// The image to analyze. Consumed once, never persisted.
    pub image: ImageReference,
    /// Self-contained instruction derived from the user's message.
    pub refined_instruction: String,
    /// Advisory classification, for logging only.
    pub analysis_kind: AnalysisKind,
}

impl HandoffRequest {
    /// Build a handoff for the current turn's image and message.
    pub fn from_turn(image: ImageReference, message: &str) -> Self {
        let analysis_kind = classify_analysis_kind(message);
        tracing::debug!(?analysis_kind, "inferred analysis kind for image handoff");
        Self {
            image,
            refined_instruction: refine_instruction(message),
            analysis_kind,
        }
    }
}

/// The delegation seam: anything that can resolve a handoff.
///
/// The result is written into the calling turn's transient delegation
/// slot; an `Err` is absorbed by the orchestrator into a degraded answer,
/// never propagated to the caller.
#[async_trait]
pub trait HandoffTarget: Send + Sync {
    /// Resolve the handoff, returning the sub-agent's analysis text.
    async fn process(&self, request: HandoffRequest) -> Result<String>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ImageSource;

    #[test]
    fn test_classify_keyword_groups() {
        assert_eq!(
            classify_analysis_kind("Can you translate the sign in this photo?"),
            AnalysisKind::TextTranslation
        );
        assert_eq!(
            classify_analysis_kind("Identify the items on the table"),
            AnalysisKind::ObjectDetection
        );
        assert_eq!(
            classify_analysis_kind("Describe the scene for me"),
            AnalysisKind::Description
        );
        assert_eq!(
            classify_analysis_kind("Read the small print"),
            AnalysisKind::TextExtraction
        );
        assert_eq!(
            classify_analysis_kind("What's the sentiment here?"),
            AnalysisKind::ContextualAnalysis
        );
    }

    #[test]
    fn test_classify_defaults_to_description() {
        assert_eq!(
            classify_analysis_kind("What's in this photo?"),
            AnalysisKind::Description
        );
        assert_eq!(classify_analysis_kind(""), AnalysisKind::Description);
    }

    #[test]
    fn test_refined_instruction_embeds_original_message() {
        let refined = refine_instruction("What breed is this dog?");
        assert!(refined.contains("What breed is this dog?"));
        assert!(refined.contains("answer the question directly"));
    }

    #[test]
    fn test_from_turn_builds_complete_request() {
        let image = ImageReference {
            source: ImageSource::Url,
            content: "https://example.com/dog.jpg".to_string(),
        };
        let request = HandoffRequest::from_turn(image, "What breed is this dog?");
        assert_eq!(request.analysis_kind, AnalysisKind::Description);
        assert!(request.refined_instruction.contains("breed"));
        assert_eq!(request.image.content, "https://example.com/dog.jpg");
    }
}
