//! Completion and vision collaborator interfaces.
//!
//! The language-model inference itself is outside this core. These traits
//! are the narrow surfaces the orchestrator needs: a chat-with-tools call
//! whose failures abort the turn, and an image-analysis call whose
//! failures the orchestrator absorbs into a degraded answer.

/// Collaborator traits and response types.
pub mod client;
/// OpenAI-compatible HTTP implementation of both collaborators.
pub mod openai;

pub use client::{ChatMessage, CompletionClient, CompletionResponse, VisionClient};
pub use openai::OpenAIClient;
