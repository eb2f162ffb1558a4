//! Tools: named, schema-declared capabilities the model may request.
//!
//! The registry is an explicit object constructed once and injected into
//! the runtime; there is no process-global tool table. Execution never
//! throws past the registry boundary; failures become structured error
//! payloads the model can see and recover from.

pub mod builtins;
mod registry;
mod traits;

pub use registry::{ToolExecution, ToolRegistry};
pub use traits::{Tool, ToolContext, ToolError, ToolOutput};
