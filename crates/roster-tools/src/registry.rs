//! Capability-scoped tool registry and executor

use std::collections::HashMap;
use std::sync::Arc;

use serde_json::{json, Value};

use roster_protocol::ToolSpec;

use crate::{Tool, ToolContext};

/// Result of one dispatch. Never an `Err`: missing tools and handler
/// failures are converted to structured error payloads the model sees
/// as ordinary tool results.
#[derive(Debug, Clone)]
pub struct ToolExecution {
    pub content: String,
    pub is_error: bool,
}

impl ToolExecution {
    fn ok(content: String) -> Self {
        Self {
            content,
            is_error: false,
        }
    }

    fn error(payload: Value) -> Self {
        Self {
            content: payload.to_string(),
            is_error: true,
        }
    }
}

/// Static mapping of tool name to (declaration, handler). Constructed
/// once at startup and injected; not a process-global.
#[derive(Default, Clone)]
pub struct ToolRegistry {
    tools: HashMap<String, Arc<dyn Tool>>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, tool: impl Tool + 'static) {
        let name = tool.name().to_string();
        self.tools.insert(name, Arc::new(tool));
    }

    pub fn has(&self, name: &str) -> bool {
        self.tools.contains_key(name)
    }

    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.tools.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// Filter the catalog down to an agent's allowlist. Unknown names
    /// are configuration drift: logged and dropped, never an error.
    pub fn declarations(&self, allowed: &[String]) -> Vec<ToolSpec> {
        allowed
            .iter()
            .filter_map(|name| match self.tools.get(name) {
                Some(tool) => Some(ToolSpec::new(tool.name(), tool.description(), tool.schema())),
                None => {
                    tracing::warn!(tool = %name, "configured tool not in catalog, dropping");
                    None
                }
            })
            .collect()
    }

    /// Dispatch one tool call. Catch-all boundary: the result string is
    /// always safe to feed back to the model.
    pub async fn execute(&self, name: &str, input: Value, ctx: &ToolContext) -> ToolExecution {
        let Some(tool) = self.tools.get(name) else {
            tracing::warn!(tool = name, agent = %ctx.agent_name, "requested tool not found");
            let err = crate::ToolError::NotFound {
                name: name.to_string(),
            };
            return ToolExecution::error(json!({
                "error": err.to_string(),
                "tool": name,
            }));
        };

        tracing::debug!(tool = name, agent = %ctx.agent_name, tenant = %ctx.tenant_id, "dispatching tool");

        match tool.execute(input, ctx).await {
            Ok(output) => ToolExecution::ok(output.into_string()),
            Err(err) => {
                tracing::warn!(tool = name, error = %err, "tool execution failed");
                ToolExecution::error(json!({
                    "error": err.to_string(),
                    "tool": name,
                }))
            }
        }
    }
}
