//! In-memory store used by tests and local experiments

use std::collections::{BTreeMap, HashMap};

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::RwLock;

use crate::{
    ActivityRecord, AgentConfig, DataStore, MemoryItem, StoreError, TenantProfile,
};

#[derive(Default)]
struct Inner {
    agents: HashMap<String, AgentConfig>,
    tenants: HashMap<String, TenantProfile>,
    memories: Vec<MemoryItem>,
    activities: Vec<ActivityRecord>,
    // (tenant, collection) -> id -> document
    records: HashMap<(String, String), BTreeMap<String, Value>>,
}

/// `RwLock`-backed [`DataStore`] implementation. Last write wins on
/// record collections, matching the contract of the real store.
#[derive(Default)]
pub struct InMemoryStore {
    inner: RwLock<Inner>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed or replace an agent configuration (administrative path).
    pub async fn put_agent_config(&self, config: AgentConfig) {
        let mut inner = self.inner.write().await;
        inner.agents.insert(config.name.clone(), config);
    }

    /// Seed or replace a tenant profile (administrative path).
    pub async fn put_tenant(&self, tenant: TenantProfile) {
        let mut inner = self.inner.write().await;
        inner.tenants.insert(tenant.id.clone(), tenant);
    }
}

#[async_trait]
impl DataStore for InMemoryStore {
    async fn agent_config(&self, name: &str) -> Result<Option<AgentConfig>, StoreError> {
        let inner = self.inner.read().await;
        Ok(inner.agents.get(name).cloned())
    }

    async fn list_agent_configs(&self) -> Result<Vec<AgentConfig>, StoreError> {
        let inner = self.inner.read().await;
        let mut configs: Vec<_> = inner.agents.values().cloned().collect();
        configs.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(configs)
    }

    async fn memories(
        &self,
        agent_name: &str,
        tenant_id: &str,
    ) -> Result<Vec<MemoryItem>, StoreError> {
        let inner = self.inner.read().await;
        Ok(inner
            .memories
            .iter()
            .filter(|m| m.agent_name == agent_name && m.tenant_id == tenant_id)
            .cloned()
            .collect())
    }

    async fn put_memory(&self, item: MemoryItem) -> Result<(), StoreError> {
        let mut inner = self.inner.write().await;
        let duplicate = inner.memories.iter().any(|m| {
            m.agent_name == item.agent_name
                && m.tenant_id == item.tenant_id
                && m.content == item.content
        });
        if duplicate {
            tracing::debug!(agent = %item.agent_name, "duplicate memory write ignored");
            return Ok(());
        }
        inner.memories.push(item);
        Ok(())
    }

    async fn append_activity(&self, record: ActivityRecord) -> Result<String, StoreError> {
        let mut inner = self.inner.write().await;
        let id = record.id.clone();
        inner.activities.push(record);
        Ok(id)
    }

    async fn activities(&self, tenant_id: &str) -> Result<Vec<ActivityRecord>, StoreError> {
        let inner = self.inner.read().await;
        let mut out: Vec<_> = inner
            .activities
            .iter()
            .filter(|a| a.tenant_id == tenant_id)
            .cloned()
            .collect();
        out.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(out)
    }

    async fn tenant(&self, tenant_id: &str) -> Result<Option<TenantProfile>, StoreError> {
        let inner = self.inner.read().await;
        Ok(inner.tenants.get(tenant_id).cloned())
    }

    async fn records(&self, tenant_id: &str, collection: &str) -> Result<Vec<Value>, StoreError> {
        let inner = self.inner.read().await;
        Ok(inner
            .records
            .get(&(tenant_id.to_string(), collection.to_string()))
            .map(|docs| docs.values().cloned().collect())
            .unwrap_or_default())
    }

    async fn record(
        &self,
        tenant_id: &str,
        collection: &str,
        id: &str,
    ) -> Result<Option<Value>, StoreError> {
        let inner = self.inner.read().await;
        Ok(inner
            .records
            .get(&(tenant_id.to_string(), collection.to_string()))
            .and_then(|docs| docs.get(id).cloned()))
    }

    async fn put_record(
        &self,
        tenant_id: &str,
        collection: &str,
        id: &str,
        document: Value,
    ) -> Result<(), StoreError> {
        let mut inner = self.inner.write().await;
        inner
            .records
            .entry((tenant_id.to_string(), collection.to_string()))
            .or_default()
            .insert(id.to_string(), document);
        Ok(())
    }
}
