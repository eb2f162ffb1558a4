//! Agent registry over the configuration store

use std::sync::Arc;

use roster_store::{AgentConfig, DataStore, StoreError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RegistryError {
    /// Unknown or inactive agent name. A 404-equivalent for callers,
    /// never silently substituted.
    #[error("agent not found: {name}")]
    NotFound { name: String },

    #[error("store error: {0}")]
    Store(#[from] StoreError),
}

/// Loads agent configurations by name. Only active configurations are
/// ever returned.
#[derive(Clone)]
pub struct AgentRegistry {
    store: Arc<dyn DataStore>,
}

impl AgentRegistry {
    pub fn new(store: Arc<dyn DataStore>) -> Self {
        Self { store }
    }

    pub async fn load(&self, name: &str) -> Result<AgentConfig, RegistryError> {
        match self.store.agent_config(name).await? {
            Some(config) if config.active => Ok(config),
            Some(_) => {
                tracing::debug!(agent = name, "agent is inactive");
                Err(RegistryError::NotFound {
                    name: name.to_string(),
                })
            }
            None => Err(RegistryError::NotFound {
                name: name.to_string(),
            }),
        }
    }

    pub async fn list(&self) -> Result<Vec<AgentConfig>, RegistryError> {
        let mut configs = self.store.list_agent_configs().await?;
        configs.retain(|c| c.active);
        Ok(configs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use roster_store::InMemoryStore;

    fn config(name: &str, active: bool) -> AgentConfig {
        AgentConfig {
            name: name.to_string(),
            display_name: name.to_string(),
            role: "specialist".to_string(),
            instructions: String::new(),
            tools: vec![],
            model: "claude-sonnet-4-20250514".to_string(),
            temperature: 0.5,
            active,
        }
    }

    #[tokio::test]
    async fn load_returns_active_config() {
        let store = Arc::new(InMemoryStore::new());
        store.put_agent_config(config("sales", true)).await;

        let registry = AgentRegistry::new(store);
        let loaded = registry.load("sales").await.unwrap();
        assert!(loaded.active);
    }

    #[tokio::test]
    async fn absent_and_inactive_are_not_found() {
        let store = Arc::new(InMemoryStore::new());
        store.put_agent_config(config("retired", false)).await;

        let registry = AgentRegistry::new(store);
        assert!(matches!(
            registry.load("missing").await,
            Err(RegistryError::NotFound { .. })
        ));
        assert!(matches!(
            registry.load("retired").await,
            Err(RegistryError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn list_filters_inactive() {
        let store = Arc::new(InMemoryStore::new());
        store.put_agent_config(config("sales", true)).await;
        store.put_agent_config(config("retired", false)).await;

        let registry = AgentRegistry::new(store);
        let listed = registry.list().await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].name, "sales");
    }
}
