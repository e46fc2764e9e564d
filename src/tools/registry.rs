//! Tool trait, registration and validated dispatch.

use crate::identity::IdentityContext;
use crate::memory::MemoryManager;
use crate::tools::weather::WeatherTool;
use crate::types::{Result, ToolDefinition};
use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;

/// A named, schema-validated operation the orchestrator may invoke.
#[async_trait]
pub trait Tool: Send + Sync {
    /// Tool name as exposed to the completion service.
    fn name(&self) -> &str;
    /// Natural-language description used for tool selection.
    fn description(&self) -> &str;
    /// JSON Schema of the arguments object.
    fn parameters_schema(&self) -> Value;
    /// Run the tool. `identity` is the ambient acting-user context; tools
    /// that touch user-scoped state read it from there, never from `args`.
    async fn execute(&self, args: Value, identity: &IdentityContext) -> Result<String>;
}

/// Fixed dispatch table mapping tool name to handler.
///
/// Registration is explicit and happens once at startup; arguments are
/// validated against each tool's schema before the handler runs; handler
/// errors are converted into the fixed failure-string contract so nothing
/// raises past the tool boundary.
pub struct ToolRegistry {
    tools: HashMap<String, Arc<dyn Tool>>,
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ToolRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            tools: HashMap::new(),
        }
    }

    /// Create a registry with the assistant's standard tool set:
    /// remember, recall, summarize_memory and get_weather.
    pub fn with_default_tools(memory: Arc<MemoryManager>, weather: WeatherTool) -> Self {
        let mut registry = Self::new();
        registry.register(Arc::new(super::memory::RememberTool::new(memory.clone())));
        registry.register(Arc::new(super::memory::RecallTool::new(memory.clone())));
        registry.register(Arc::new(super::memory::SummarizeMemoryTool::new(memory)));
        registry.register(Arc::new(weather));
        registry
    }

    /// Register a tool under its own name.
    pub fn register(&mut self, tool: Arc<dyn Tool>) {
        self.tools.insert(tool.name().to_string(), tool);
    }

    /// Definitions of every registered tool, for the completion request.
    pub fn definitions(&self) -> Vec<ToolDefinition> {
        self.tools
            .values()
            .map(|tool| ToolDefinition {
                name: tool.name().to_string(),
                description: tool.description().to_string(),
                parameters: tool.parameters_schema(),
            })
            .collect()
    }

    /// Names of all registered tools.
    pub fn tool_names(&self) -> Vec<String> {
        self.tools.keys().cloned().collect()
    }

    /// Whether a tool is registered.
    pub fn has_tool(&self, name: &str) -> bool {
        self.tools.contains_key(name)
    }

    /// Validate and run a tool, converting every failure into a
    /// fixed-format result string.
    pub async fn dispatch(&self, name: &str, args: Value, identity: &IdentityContext) -> String {
        let Some(tool) = self.tools.get(name) else {
            tracing::warn!(tool = name, "unknown tool requested");
            return format!("The tool '{}' is not available.", name);
        };

        if let Err(reason) = validate_arguments(&tool.parameters_schema(), &args) {
            tracing::warn!(tool = name, reason = %reason, "tool arguments rejected");
            return format!("The tool '{}' could not run: {}.", name, reason);
        }

        match tool.execute(args, identity).await {
            Ok(result) => result,
            Err(e) => {
                tracing::error!(tool = name, error = %e, "tool execution failed");
                format!(
                    "The tool '{}' ran into a problem and produced no result.",
                    name
                )
            }
        }
    }
}

/// Check `args` against a JSON Schema object: required properties must be
/// present and declared types must match. Object-typed properties are
/// checked recursively.
fn validate_arguments(schema: &Value, args: &Value) -> std::result::Result<(), String> {
    let Some(args_object) = args.as_object() else {
        return Err("arguments must be a JSON object".to_string());
    };

    if let Some(required) = schema.get("required").and_then(Value::as_array) {
        for name in required.iter().filter_map(Value::as_str) {
            if !args_object.contains_key(name) {
                return Err(format!("missing required argument '{}'", name));
            }
        }
    }

    let Some(properties) = schema.get("properties").and_then(Value::as_object) else {
        return Ok(());
    };

    for (name, property) in properties {
        let Some(value) = args_object.get(name) else {
            continue;
        };
        if value.is_null() {
            continue;
        }
        let Some(expected) = property.get("type").and_then(Value::as_str) else {
            continue;
        };
        let matches = match expected {
            "string" => value.is_string(),
            "integer" => value.is_i64() || value.is_u64(),
            "number" => value.is_number(),
            "boolean" => value.is_boolean(),
            "array" => value.is_array(),
            "object" => value.is_object(),
            _ => true,
        };
        if !matches {
            return Err(format!("argument '{}' must be of type {}", name, expected));
        }
        if expected == "object" {
            validate_arguments(property, value)?;
        }
    }

    Ok(())
}
