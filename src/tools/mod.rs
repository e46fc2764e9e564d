//! Named, schema-validated tools the orchestrator can invoke mid-turn.
//!
//! # Module Structure
//!
//! - [`registry`](crate::tools::registry) - the fixed dispatch table and
//!   the [`Tool`](crate::tools::registry::Tool) trait
//! - [`memory`](crate::tools::memory) - remember / recall /
//!   summarize_memory over the [`MemoryManager`](crate::memory::MemoryManager)
//! - [`weather`](crate::tools::weather) - current conditions via
//!   OpenWeatherMap
//!
//! Every tool reads the acting user from the ambient
//! [`IdentityContext`](crate::identity::IdentityContext) passed into the
//! dispatch call; none accepts a user id argument. Tool failures never
//! escape the registry as errors - they are converted into fixed-format
//! strings the orchestrator relays conversationally.

/// Long-term memory tools.
pub mod memory;
/// Tool trait, argument validation and dispatch.
pub mod registry;
/// Weather lookup tool.
pub mod weather;

pub use registry::{Tool, ToolRegistry};
pub use weather::WeatherTool;
