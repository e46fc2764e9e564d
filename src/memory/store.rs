//! Memory store collaborator interface.
//!
//! The vector/similarity search itself is outside this core; the trait
//! below is the narrow surface the [`MemoryManager`](super::MemoryManager)
//! needs from it. [`InMemoryStore`] is an embedded reference backend so the
//! binary and tests run without external services.

use crate::types::{MemoryEntry, MemoryTags, Result};
use async_trait::async_trait;
use chrono::Utc;
use parking_lot::Mutex;
use uuid::Uuid;

/// External memory/vector store collaborator.
///
/// Implementations must be safe to call concurrently from multiple
/// in-flight requests; isolation is enforced by the `owner` parameter on
/// every call, not by locking in the caller.
#[async_trait]
pub trait MemoryStore: Send + Sync {
    /// Persist a new entry owned by `owner` under the given agent scope.
    async fn add(&self, owner: &str, scope: &str, text: &str, tags: &MemoryTags) -> Result<()>;

    /// Return up to `limit` entries owned by `owner` ranked by relevance
    /// to `query`. An empty result is not an error.
    async fn search(
        &self,
        owner: &str,
        scope: &str,
        query: &str,
        limit: usize,
    ) -> Result<Vec<MemoryEntry>>;

    /// Return every entry owned by `owner`, across scopes.
    async fn get_all(&self, owner: &str) -> Result<Vec<MemoryEntry>>;
}

/// Embedded in-process store with naive token-overlap ranking.
///
/// Entries live for the process lifetime only. Ranking counts shared
/// lowercase tokens between query and entry text; ties break toward newer
/// entries. Good enough to exercise the orchestration core end-to-end -
/// real deployments put a remote similarity store behind [`MemoryStore`]
/// instead.
#[derive(Default)]
pub struct InMemoryStore {
    entries: Mutex<Vec<ScopedEntry>>,
}

struct ScopedEntry {
    scope: String,
    entry: MemoryEntry,
}

impl InMemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn tokenize(text: &str) -> Vec<String> {
        text.to_lowercase()
            .split(|c: char| !c.is_alphanumeric())
            .filter(|t| !t.is_empty())
            .map(str::to_string)
            .collect()
    }

    fn overlap(query_tokens: &[String], text: &str) -> usize {
        let entry_tokens = Self::tokenize(text);
        query_tokens
            .iter()
            .filter(|t| entry_tokens.contains(t))
            .count()
    }
}

#[async_trait]
impl MemoryStore for InMemoryStore {
    async fn add(&self, owner: &str, scope: &str, text: &str, tags: &MemoryTags) -> Result<()> {
        let entry = MemoryEntry {
            id: Uuid::new_v4().to_string(),
            owner: owner.to_string(),
            text: text.to_string(),
            tags: tags.clone(),
            created_at: Utc::now(),
        };
        self.entries.lock().push(ScopedEntry {
            scope: scope.to_string(),
            entry,
        });
        Ok(())
    }

    async fn search(
        &self,
        owner: &str,
        scope: &str,
        query: &str,
        limit: usize,
    ) -> Result<Vec<MemoryEntry>> {
        let query_tokens = Self::tokenize(query);
        let entries = self.entries.lock();

        let mut scored: Vec<(usize, &ScopedEntry)> = entries
            .iter()
            .filter(|s| s.entry.owner == owner && s.scope == scope)
            .map(|s| (Self::overlap(&query_tokens, &s.entry.text), s))
            .filter(|(score, _)| *score > 0)
            .collect();

        scored.sort_by(|a, b| {
            b.0.cmp(&a.0)
                .then(b.1.entry.created_at.cmp(&a.1.entry.created_at))
        });

        Ok(scored
            .into_iter()
            .take(limit)
            .map(|(_, s)| s.entry.clone())
            .collect())
    }

    async fn get_all(&self, owner: &str) -> Result<Vec<MemoryEntry>> {
        Ok(self
            .entries
            .lock()
            .iter()
            .filter(|s| s.entry.owner == owner)
            .map(|s| s.entry.clone())
            .collect())
    }
}
