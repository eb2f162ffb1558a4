//! Runtime error types

use thiserror::Error;

use roster_agents::RegistryError;
use roster_providers::ProviderError;
use roster_store::StoreError;

/// Errors that reach callers of the runtime. Tool failures and routing
/// failures never show up here; they degrade inside the loop.
#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("agent not found: {name}")]
    AgentNotFound { name: String },

    #[error("provider error: {0}")]
    Provider(#[from] ProviderError),

    #[error("store error: {0}")]
    Store(#[from] StoreError),
}

impl From<RegistryError> for RuntimeError {
    fn from(err: RegistryError) -> Self {
        match err {
            RegistryError::NotFound { name } => Self::AgentNotFound { name },
            RegistryError::Store(e) => Self::Store(e),
        }
    }
}
