//! # Nimbus - conversational assistant core
//!
//! The agent-orchestration and contextual-memory core of a conversational
//! assistant: per-user long-term memory, schema-validated tools, structured
//! vision delegation and session-history injection, driven by an
//! OpenAI-compatible completion endpoint.
//!
//! ## Overview
//!
//! One turn flows through [`Orchestrator::handle_turn`]: session history is
//! injected into the working context, the acting user's identity is
//! established for the duration of the call, image turns are delegated to
//! the vision sub-agent via a structured handoff, and the bounded
//! tool-calling loop produces the reply. Identity restoration is guaranteed
//! on every exit path.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use nimbus::{
//!     InMemoryStore, MemoryManager, OpenAIClient, Orchestrator, ToolRegistry,
//!     TurnRequest, VisionAgent, WeatherTool,
//! };
//! use std::sync::Arc;
//!
//! let client = Arc::new(OpenAIClient::new(
//!     api_key,
//!     "https://api.openai.com/v1",
//!     "gpt-4o-mini",
//!     "gpt-4o",
//! ));
//! let memory = Arc::new(MemoryManager::new(Arc::new(InMemoryStore::new())));
//! let tools = Arc::new(ToolRegistry::with_default_tools(
//!     memory,
//!     WeatherTool::new(weather_key),
//! ));
//! let orchestrator = Orchestrator::new(
//!     client.clone(),
//!     Arc::new(VisionAgent::new(client)),
//!     tools,
//! );
//!
//! let reply = orchestrator
//!     .handle_turn(TurnRequest {
//!         message: "Remember that I prefer dark roast coffee".into(),
//!         user_identity: user_id,
//!         image: None,
//!         history: vec![],
//!     })
//!     .await?;
//! ```
//!
//! ## Modules
//!
//! - [`agents`] - orchestrator, handoff protocol, vision sub-agent
//! - [`identity`] - ambient acting-user propagation
//! - [`memory`] - per-user long-term memory over a store collaborator
//! - [`session`] - session-history injection
//! - [`tools`] - the fixed, schema-validated tool set
//! - [`llm`] - completion and vision collaborator interfaces
//! - [`types`] - shared types and errors
//! - [`utils`] - configuration

#![warn(missing_docs)]

/// Agent orchestration and vision delegation.
pub mod agents;
/// Ambient identity propagation.
pub mod identity;
/// Completion and vision collaborator interfaces.
pub mod llm;
/// Per-user long-term memory.
pub mod memory;
/// Session history injection.
pub mod session;
/// Schema-validated tools and the dispatch registry.
pub mod tools;
/// Shared types and error handling.
pub mod types;
/// Configuration utilities.
pub mod utils;

// Re-export commonly used types
pub use agents::{HandoffRequest, HandoffTarget, Orchestrator, TurnRequest, VisionAgent};
pub use identity::IdentityContext;
pub use llm::{CompletionClient, OpenAIClient, VisionClient};
pub use memory::{InMemoryStore, MemoryManager, MemoryStore};
pub use tools::{Tool, ToolRegistry, WeatherTool};
pub use types::{AppError, Result};
pub use utils::Config;
