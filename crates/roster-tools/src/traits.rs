//! Tool trait and execution context

use async_trait::async_trait;
use serde_json::Value;

use roster_protocol::JsonSchema;
use roster_store::StoreError;

/// Context passed by reference to every handler in one invocation.
/// Built once per invocation, never persisted.
#[derive(Debug, Clone)]
pub struct ToolContext {
    /// Acting agent
    pub agent_name: String,
    /// Tenant the conversation belongs to; scopes every store access
    pub tenant_id: String,
}

impl ToolContext {
    pub fn new(agent_name: impl Into<String>, tenant_id: impl Into<String>) -> Self {
        Self {
            agent_name: agent_name.into(),
            tenant_id: tenant_id.into(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ToolError {
    #[error("tool not found: {name}")]
    NotFound { name: String },

    #[error("invalid input: {message}")]
    InvalidInput { message: String },

    #[error("execution failed: {message}")]
    ExecutionFailed { message: String },

    #[error("store error: {0}")]
    Store(#[from] StoreError),
}

impl ToolError {
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self::ExecutionFailed {
            message: message.into(),
        }
    }
}

/// JSON-serializable result of a successful tool run
#[derive(Debug, Clone)]
pub struct ToolOutput {
    content: String,
}

impl ToolOutput {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            content: text.into(),
        }
    }

    pub fn json(value: &Value) -> Self {
        Self {
            content: value.to_string(),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.content
    }

    pub fn into_string(self) -> String {
        self.content
    }
}

/// A named, schema-declared capability. Handlers interpret their own
/// arguments loosely (the schema is advisory to the model, not enforced
/// server-side) and perform a small number of tenant-scoped store
/// reads/writes.
///
/// Invariant: no handler performs an irreversible external action.
/// Anything outward-facing is enqueued for human approval instead.
#[async_trait]
pub trait Tool: Send + Sync {
    fn name(&self) -> &str;

    fn description(&self) -> &str;

    fn schema(&self) -> JsonSchema;

    async fn execute(&self, input: Value, ctx: &ToolContext) -> Result<ToolOutput, ToolError>;
}

/// Loose argument helpers shared by the builtin handlers.
pub(crate) fn required_str<'a>(input: &'a Value, key: &str) -> Result<&'a str, ToolError> {
    input
        .get(key)
        .and_then(Value::as_str)
        .filter(|s| !s.trim().is_empty())
        .ok_or_else(|| ToolError::invalid_input(format!("missing required field: {key}")))
}

pub(crate) fn optional_str<'a>(input: &'a Value, key: &str) -> Option<&'a str> {
    input.get(key).and_then(Value::as_str)
}

pub(crate) fn optional_usize(input: &Value, key: &str) -> Option<usize> {
    input.get(key).and_then(Value::as_u64).map(|v| v as usize)
}
