//! Long-term memory tools: remember, recall and summarize_memory.
//!
//! All three scope their operation with the ambient identity; the user id
//! never appears in a tool schema. Failure modes surface as conversational
//! sentinel strings, never as errors.

use crate::identity::IdentityContext;
use crate::memory::{MemoryManager, DEFAULT_AGENT_SCOPE};
use crate::tools::registry::Tool;
use crate::types::{MemoryTags, Result};
use async_trait::async_trait;
use serde_json::{json, Value};
use std::sync::Arc;

/// Saves a fact, preference, reminder or inference about the acting user.
pub struct RememberTool {
    memory: Arc<MemoryManager>,
}

impl RememberTool {
    /// Create the tool over a shared memory manager.
    pub fn new(memory: Arc<MemoryManager>) -> Self {
        Self { memory }
    }
}

#[async_trait]
impl Tool for RememberTool {
    fn name(&self) -> &str {
        "remember"
    }

    fn description(&self) -> &str {
        "Save an important fact, preference, reminder or inference about the \
         current user for future conversations. Provide concise information \
         text plus tags with a kind (preference, personal-fact, reminder or \
         inference) and a topic category. Avoid saving trivial conversation \
         details."
    }

    fn parameters_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "information": {
                    "type": "string",
                    "description": "The concise information to remember"
                },
                "tags": {
                    "type": "object",
                    "properties": {
                        "kind": {
                            "type": "string",
                            "description": "One of: preference, personal-fact, reminder, inference"
                        },
                        "category": {
                            "type": "string",
                            "description": "Topic category, e.g. food, work, pets"
                        },
                        "value": {
                            "type": "string",
                            "description": "Optional concrete value"
                        },
                        "sentiment": {
                            "type": "string",
                            "description": "Optional sentiment"
                        }
                    },
                    "required": ["kind", "category"]
                }
            },
            "required": ["information", "tags"]
        })
    }

    async fn execute(&self, args: Value, identity: &IdentityContext) -> Result<String> {
        let information = args["information"].as_str().unwrap_or_default();
        let tags: MemoryTags = serde_json::from_value(args["tags"].clone())
            .unwrap_or_else(|_| MemoryTags {
                kind: String::new(),
                category: String::new(),
                value: None,
                sentiment: None,
            });

        if !self.memory.is_configured() {
            tracing::warn!("remember called while memory is unconfigured");
            return Ok(
                "Sorry, I cannot save memories right now because memory is not configured."
                    .to_string(),
            );
        }

        let category = tags.category.clone();
        if self
            .memory
            .add(identity, information, &tags, DEFAULT_AGENT_SCOPE)
            .await
        {
            Ok(format!("Okay, I will remember that about '{}'.", category))
        } else {
            Ok("Sorry, something went wrong and I could not save that information.".to_string())
        }
    }
}

/// Semantic search over the acting user's stored memories.
pub struct RecallTool {
    memory: Arc<MemoryManager>,
}

impl RecallTool {
    /// Create the tool over a shared memory manager.
    pub fn new(memory: Arc<MemoryManager>) -> Self {
        Self { memory }
    }
}

#[async_trait]
impl Tool for RecallTool {
    fn name(&self) -> &str {
        "recall"
    }

    fn description(&self) -> &str {
        "Search the current user's long-term memory for information relevant \
         to a query. Use before answering when stored context about the topic \
         may exist."
    }

    fn parameters_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "query": {
                    "type": "string",
                    "description": "The topic or question to search memory for"
                },
                "limit": {
                    "type": "integer",
                    "description": "Maximum number of results (default: 3)"
                }
            },
            "required": ["query"]
        })
    }

    async fn execute(&self, args: Value, identity: &IdentityContext) -> Result<String> {
        let query = args["query"].as_str().unwrap_or_default();
        let limit = args.get("limit").and_then(Value::as_i64);

        if !self.memory.is_configured() {
            tracing::warn!("recall called while memory is unconfigured");
            return Ok(
                "Sorry, I cannot search memory right now because memory is not configured."
                    .to_string(),
            );
        }

        let results = self
            .memory
            .search(identity, query, limit, DEFAULT_AGENT_SCOPE)
            .await;

        if results.is_empty() {
            return Ok(format!(
                "I could not find anything in memory about '{}'.",
                query
            ));
        }

        let formatted: Vec<String> = results
            .iter()
            .enumerate()
            .map(|(i, entry)| format!("{}. {}", i + 1, entry.text))
            .collect();

        Ok(format!(
            "Here is what I found in memory:\n{}",
            formatted.join("\n")
        ))
    }
}

/// Grouped summary of everything remembered about the acting user.
pub struct SummarizeMemoryTool {
    memory: Arc<MemoryManager>,
}

impl SummarizeMemoryTool {
    /// Create the tool over a shared memory manager.
    pub fn new(memory: Arc<MemoryManager>) -> Self {
        Self { memory }
    }
}

#[async_trait]
impl Tool for SummarizeMemoryTool {
    fn name(&self) -> &str {
        "summarize_memory"
    }

    fn description(&self) -> &str {
        "Summarize everything remembered about the current user, grouped by \
         kind. Use only when the user asks an open question about what you \
         know or remember about them."
    }

    fn parameters_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {}
        })
    }

    async fn execute(&self, _args: Value, identity: &IdentityContext) -> Result<String> {
        if !self.memory.is_configured() {
            tracing::warn!("summarize_memory called while memory is unconfigured");
            return Ok(
                "Sorry, I cannot access memory right now because memory is not configured."
                    .to_string(),
            );
        }

        let groups = self
            .memory
            .summarize_all(identity, DEFAULT_AGENT_SCOPE)
            .await;

        if groups.is_empty() {
            return Ok("I do not have any memories recorded for you yet.".to_string());
        }

        let mut lines = vec!["Here is a summary of what I remember about you:".to_string()];
        for (kind, entries) in &groups {
            lines.push(format!("\n**{}:**", kind.heading()));
            lines.extend(entries.iter().map(|entry| format!("- {}", entry.text)));
        }

        Ok(lines.join("\n"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::InMemoryStore;

    fn configured_manager() -> Arc<MemoryManager> {
        Arc::new(MemoryManager::new(Arc::new(InMemoryStore::new())))
    }

    #[tokio::test]
    async fn test_remember_then_recall_round_trip() {
        let memory = configured_manager();
        let remember = RememberTool::new(memory.clone());
        let recall = RecallTool::new(memory);
        let identity = IdentityContext::new();
        let _guard = identity.scope("u1");

        let saved = remember
            .execute(
                json!({
                    "information": "prefers dark roast coffee",
                    "tags": {"kind": "preference", "category": "food"}
                }),
                &identity,
            )
            .await
            .unwrap();
        assert!(saved.contains("remember"));
        assert!(saved.contains("food"));

        let found = recall
            .execute(json!({"query": "coffee preference"}), &identity)
            .await
            .unwrap();
        assert!(found.contains("dark roast"));
    }

    #[tokio::test]
    async fn test_recall_nothing_found() {
        let memory = configured_manager();
        let recall = RecallTool::new(memory);
        let identity = IdentityContext::new();
        let _guard = identity.scope("u1");

        let result = recall
            .execute(json!({"query": "sailing"}), &identity)
            .await
            .unwrap();
        assert!(result.contains("could not find anything"));
        assert!(result.contains("sailing"));
    }

    #[tokio::test]
    async fn test_unconfigured_memory_sentinels() {
        let memory = Arc::new(MemoryManager::unconfigured());
        let identity = IdentityContext::new();
        let _guard = identity.scope("u1");

        let remember = RememberTool::new(memory.clone())
            .execute(
                json!({"information": "x", "tags": {"kind": "reminder", "category": "y"}}),
                &identity,
            )
            .await
            .unwrap();
        assert!(remember.contains("not configured"));

        let recall = RecallTool::new(memory.clone())
            .execute(json!({"query": "x"}), &identity)
            .await
            .unwrap();
        assert!(recall.contains("not configured"));

        let summary = SummarizeMemoryTool::new(memory)
            .execute(json!({}), &identity)
            .await
            .unwrap();
        assert!(summary.contains("not configured"));
    }

    #[tokio::test]
    async fn test_summarize_groups_by_kind() {
        let memory = configured_manager();
        let identity = IdentityContext::new();
        let _guard = identity.scope("u1");

        memory
            .add(
                &identity,
                "water the plants on Friday",
                &MemoryTags {
                    kind: "reminder".to_string(),
                    category: "home".to_string(),
                    value: None,
                    sentiment: None,
                },
                DEFAULT_AGENT_SCOPE,
            )
            .await;
        memory
            .add(
                &identity,
                "collects vinyl records",
                &MemoryTags {
                    kind: "unknown-tag".to_string(),
                    category: "hobbies".to_string(),
                    value: None,
                    sentiment: None,
                },
                DEFAULT_AGENT_SCOPE,
            )
            .await;

        let summary = SummarizeMemoryTool::new(memory)
            .execute(json!({}), &identity)
            .await
            .unwrap();
        assert!(summary.contains("**Reminders:**"));
        assert!(summary.contains("water the plants"));
        assert!(summary.contains("**Other:**"));
        assert!(summary.contains("vinyl records"));
    }
}
