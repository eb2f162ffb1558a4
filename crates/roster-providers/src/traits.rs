//! Model client trait

use async_trait::async_trait;
use roster_protocol::{Message, ModelResponse, ToolSpec};

use crate::ProviderError;

/// Result type for model operations
pub type ModelResult<T> = Result<T, ProviderError>;

/// Trait for model clients
#[async_trait]
pub trait ModelClient: Send + Sync {
    /// Send a transcript and tool declarations, get a complete response
    async fn chat(&self, messages: &[Message], tools: &[ToolSpec]) -> ModelResult<ModelResponse>;

    /// Get the model identifier
    fn model(&self) -> &str;

    /// Get the provider name
    fn provider(&self) -> &str;
}
