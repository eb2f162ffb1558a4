//! Wire types shared between the agent runtime and the model backend.
//!
//! The model's response is a tagged union of content blocks; the
//! execution loop matches on it exhaustively rather than filtering
//! arrays by shape.

mod messages;
mod tools;
mod types;

pub use messages::{ContentBlock, Message, MessageContent, ModelResponse, Role, ToolCall};
pub use tools::{JsonSchema, ToolSpec};
pub use types::{StopReason, TokenUsage};
