//! Data-store trait

use async_trait::async_trait;
use serde_json::Value;

use crate::{ActivityRecord, AgentConfig, MemoryItem, StoreError, TenantProfile};

/// Keyed record store backing the runtime. Implementations are expected
/// to be shared behind an `Arc`; the runtime holds no locks of its own.
#[async_trait]
pub trait DataStore: Send + Sync {
    /// Fetch one agent configuration by name, active or not.
    async fn agent_config(&self, name: &str) -> Result<Option<AgentConfig>, StoreError>;

    /// All stored agent configurations.
    async fn list_agent_configs(&self) -> Result<Vec<AgentConfig>, StoreError>;

    /// Unfiltered memories for one (agent, tenant) pair.
    async fn memories(
        &self,
        agent_name: &str,
        tenant_id: &str,
    ) -> Result<Vec<MemoryItem>, StoreError>;

    /// Store a memory item. Idempotent on (agent, tenant, content):
    /// a duplicate write is a no-op, not an error.
    async fn put_memory(&self, item: MemoryItem) -> Result<(), StoreError>;

    /// Append one audit entry, returning its id.
    async fn append_activity(&self, record: ActivityRecord) -> Result<String, StoreError>;

    /// Audit entries for a tenant, newest first.
    async fn activities(&self, tenant_id: &str) -> Result<Vec<ActivityRecord>, StoreError>;

    /// Tenant profile lookup.
    async fn tenant(&self, tenant_id: &str) -> Result<Option<TenantProfile>, StoreError>;

    /// Tenant-scoped JSON documents in a named collection. Each tool
    /// owns its own document schema.
    async fn records(&self, tenant_id: &str, collection: &str) -> Result<Vec<Value>, StoreError>;

    /// Fetch one document by id.
    async fn record(
        &self,
        tenant_id: &str,
        collection: &str,
        id: &str,
    ) -> Result<Option<Value>, StoreError>;

    /// Insert or replace one document. Last write wins.
    async fn put_record(
        &self,
        tenant_id: &str,
        collection: &str,
        id: &str,
        document: Value,
    ) -> Result<(), StoreError>;
}
