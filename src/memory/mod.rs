//! Durable, per-user long-term memory.
//!
//! [`MemoryManager`] is the only component that talks to the memory store
//! collaborator. It scopes every operation with the ambient identity from
//! the request's [`IdentityContext`](crate::identity::IdentityContext) -
//! deliberately, there is no code path that accepts a caller-supplied user
//! id, so a forgotten parameter can never leak one user's entries to
//! another.
//!
//! The manager degrades gracefully when no store is configured: `add`
//! returns `false`, `search` returns an empty list, `summarize_all`
//! returns an empty grouping. Request handling never crashes because
//! memory is absent.
//!
//! Session history is a different thing entirely (session-scoped,
//! transient) and lives in [`crate::session`].

/// Memory manager over an optional store backend.
pub mod manager;
/// Store collaborator trait and the embedded in-process backend.
pub mod store;

pub use manager::{MemoryManager, DEFAULT_AGENT_SCOPE, DEFAULT_SEARCH_LIMIT};
pub use store::{InMemoryStore, MemoryStore};
