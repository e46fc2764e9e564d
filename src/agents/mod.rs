//! Agent orchestration: the per-turn decision loop and the vision handoff.
//!
//! [`Orchestrator`] drives one conversational turn: it injects session
//! history, establishes the ambient identity, routes image turns through
//! the structured handoff to the [`VisionAgent`], runs the bounded
//! tool-calling loop against the completion collaborator, and guarantees
//! identity restoration on every exit path.

/// Handoff request, advisory classification and the delegation seam.
pub mod handoff;
/// The turn-driving orchestrator.
pub mod orchestrator;
/// Vision sub-agent wrapping the image-analysis collaborator.
pub mod vision;

pub use handoff::{HandoffRequest, HandoffTarget};
pub use orchestrator::{Orchestrator, TurnRequest};
pub use vision::VisionAgent;
