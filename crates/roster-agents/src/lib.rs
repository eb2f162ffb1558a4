//! Agent roster: registry over the config store, built-in agent
//! definitions, and instruction-block composition.

mod composer;
mod definitions;
mod prompts;
mod registry;

pub use composer::{compose_instructions, COMPLIANCE_REMINDER};
pub use definitions::{builtin_agents, DEFAULT_AGENT, RELATIONSHIP_AGENT};
pub use registry::{AgentRegistry, RegistryError};
