//! Runtime: the bounded execution loop, the message router, and the
//! orchestrator that ties them to the agent roster and the store.
//!
//! Failure policy: tool errors and routing errors degrade inside the
//! runtime; only unknown agents, transport failures, and store failures
//! reach callers.

mod engine;
mod error;
mod orchestrator;
mod router;

pub use engine::{ExecutionLoop, LoopConfig, LoopOutcome, MAX_ROUNDS};
pub use error::RuntimeError;
pub use orchestrator::{AgentSummary, Orchestrator, RunResult};
pub use router::{RouteDecision, Router, FALLBACK_REASONING};
