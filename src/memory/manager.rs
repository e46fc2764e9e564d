//! The memory manager: per-user-isolated add, search and summarize over an
//! optional store backend.

use crate::identity::IdentityContext;
use crate::memory::store::MemoryStore;
use crate::types::{MemoryEntry, MemoryKind, MemoryTags};
use std::collections::BTreeMap;
use std::sync::Arc;

/// Result count used when `search` is called without a usable limit.
pub const DEFAULT_SEARCH_LIMIT: usize = 3;

/// Agent scope tag attached to entries created by the core assistant.
pub const DEFAULT_AGENT_SCOPE: &str = "nimbus-core";

/// Durable per-user memory over an optional [`MemoryStore`] backend.
///
/// Constructed once at startup and shared via `Arc`; the store connection
/// is a process-wide resource reused across all requests. In the
/// unconfigured state (no backend) every operation degrades to a
/// `false`/empty result without erroring, so the orchestrator can run with
/// memory disabled.
pub struct MemoryManager {
    store: Option<Arc<dyn MemoryStore>>,
}

impl MemoryManager {
    /// Create a configured manager backed by `store`.
    pub fn new(store: Arc<dyn MemoryStore>) -> Self {
        Self { store: Some(store) }
    }

    /// Create a manager in the degraded, storage-less state.
    pub fn unconfigured() -> Self {
        Self { store: None }
    }

    /// Whether a backend is available.
    pub fn is_configured(&self) -> bool {
        self.store.is_some()
    }

    /// Resolve the ambient identity, logging loudly when absent.
    ///
    /// An absent identity means the propagation contract was violated by
    /// the caller; operating as an anonymous or shared user instead would
    /// leak entries across users, so every operation fails fast on `None`.
    fn require_identity(&self, context: &IdentityContext, operation: &str) -> Option<String> {
        match context.get() {
            Some(identity) => Some(identity),
            None => {
                tracing::error!(
                    operation,
                    "no ambient identity set; refusing to touch the memory store"
                );
                None
            }
        }
    }

    /// Store a new entry for the ambient identity.
    ///
    /// Requires `tags.kind` and `tags.category` to be populated by the
    /// caller. Returns `false` without raising on missing identity,
    /// missing required tags, unconfigured backend, or backend failure.
    pub async fn add(
        &self,
        context: &IdentityContext,
        text: &str,
        tags: &MemoryTags,
        scope: &str,
    ) -> bool {
        let Some(store) = &self.store else {
            tracing::warn!("memory backend not configured; add is a no-op");
            return false;
        };
        let Some(owner) = self.require_identity(context, "add") else {
            return false;
        };
        if tags.kind.is_empty() || tags.category.is_empty() {
            tracing::error!("memory entry rejected: tags.kind and tags.category are required");
            return false;
        }

        match store.add(&owner, scope, text, tags).await {
            Ok(()) => {
                tracing::debug!(owner = %owner, scope, kind = %tags.kind, "memory entry added");
                true
            }
            Err(e) => {
                tracing::error!(owner = %owner, error = %e, "failed to add memory entry");
                false
            }
        }
    }

    /// Search the ambient identity's entries for `query`.
    ///
    /// A `limit` of `None`, zero or a negative value defaults to
    /// [`DEFAULT_SEARCH_LIMIT`]. Returns an empty list (never an error)
    /// when nothing matches, when unconfigured, or when no identity is
    /// set.
    pub async fn search(
        &self,
        context: &IdentityContext,
        query: &str,
        limit: Option<i64>,
        scope: &str,
    ) -> Vec<MemoryEntry> {
        let Some(store) = &self.store else {
            tracing::warn!("memory backend not configured; search returns nothing");
            return Vec::new();
        };
        let Some(owner) = self.require_identity(context, "search") else {
            return Vec::new();
        };

        let limit = match limit {
            Some(n) if n > 0 => n as usize,
            _ => DEFAULT_SEARCH_LIMIT,
        };

        match store.search(&owner, scope, query, limit).await {
            Ok(entries) => {
                tracing::debug!(owner = %owner, results = entries.len(), "memory search complete");
                entries
            }
            Err(e) => {
                tracing::error!(owner = %owner, error = %e, "memory search failed");
                Vec::new()
            }
        }
    }

    /// Fetch every entry owned by the ambient identity and group by kind.
    ///
    /// Unrecognized kinds group under [`MemoryKind::Other`]; entries with
    /// empty text are skipped rather than errored. Returns an empty map
    /// when unconfigured or when no identity is set.
    pub async fn summarize_all(
        &self,
        context: &IdentityContext,
        scope: &str,
    ) -> BTreeMap<MemoryKind, Vec<MemoryEntry>> {
        let _ = scope; // get_all is owner-wide; the store does not scope it
        let Some(store) = &self.store else {
            tracing::warn!("memory backend not configured; summarize returns nothing");
            return BTreeMap::new();
        };
        let Some(owner) = self.require_identity(context, "summarize_all") else {
            return BTreeMap::new();
        };

        let entries = match store.get_all(&owner).await {
            Ok(entries) => entries,
            Err(e) => {
                tracing::error!(owner = %owner, error = %e, "memory summarize failed");
                return BTreeMap::new();
            }
        };

        let mut groups: BTreeMap<MemoryKind, Vec<MemoryEntry>> = BTreeMap::new();
        for entry in entries {
            if entry.text.is_empty() {
                tracing::warn!(id = %entry.id, "skipping memory entry with no text");
                continue;
            }
            groups
                .entry(MemoryKind::from_tag(&entry.tags.kind))
                .or_default()
                .push(entry);
        }
        groups
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::store::InMemoryStore;

    fn tags(kind: &str, category: &str) -> MemoryTags {
        MemoryTags {
            kind: kind.to_string(),
            category: category.to_string(),
            value: None,
            sentiment: None,
        }
    }

    fn configured() -> MemoryManager {
        MemoryManager::new(Arc::new(InMemoryStore::new()))
    }

    #[tokio::test]
    async fn test_add_requires_identity() {
        let manager = configured();
        let context = IdentityContext::new();
        let ok = manager
            .add(&context, "some fact", &tags("preference", "food"), DEFAULT_AGENT_SCOPE)
            .await;
        assert!(!ok);
    }

    #[tokio::test]
    async fn test_add_requires_kind_and_category() {
        let manager = configured();
        let context = IdentityContext::new();
        let _guard = context.scope("u1");

        assert!(
            !manager
                .add(&context, "fact", &tags("", "food"), DEFAULT_AGENT_SCOPE)
                .await
        );
        assert!(
            !manager
                .add(&context, "fact", &tags("preference", ""), DEFAULT_AGENT_SCOPE)
                .await
        );
        assert!(
            manager
                .add(&context, "fact", &tags("preference", "food"), DEFAULT_AGENT_SCOPE)
                .await
        );
    }

    #[tokio::test]
    async fn test_unconfigured_degrades_gracefully() {
        let manager = MemoryManager::unconfigured();
        let context = IdentityContext::new();
        let _guard = context.scope("u1");

        assert!(!manager.is_configured());
        assert!(
            !manager
                .add(&context, "fact", &tags("preference", "food"), DEFAULT_AGENT_SCOPE)
                .await
        );
        assert!(manager
            .search(&context, "fact", None, DEFAULT_AGENT_SCOPE)
            .await
            .is_empty());
        assert!(manager
            .summarize_all(&context, DEFAULT_AGENT_SCOPE)
            .await
            .is_empty());
    }

    #[tokio::test]
    async fn test_summarize_groups_unknown_kind_under_other() {
        let manager = configured();
        let context = IdentityContext::new();
        let _guard = context.scope("u1");

        manager
            .add(&context, "water the plants", &tags("reminder", "home"), DEFAULT_AGENT_SCOPE)
            .await;
        manager
            .add(&context, "strange entry", &tags("unknown-tag", "misc"), DEFAULT_AGENT_SCOPE)
            .await;

        let groups = manager.summarize_all(&context, DEFAULT_AGENT_SCOPE).await;
        assert_eq!(groups.get(&MemoryKind::Reminder).map(Vec::len), Some(1));
        assert_eq!(groups.get(&MemoryKind::Other).map(Vec::len), Some(1));
    }
}
