//! Memory read path: what an agent is allowed to remember at
//! context-composition time.

use chrono::{DateTime, Utc};

use crate::{DataStore, MemoryItem, StoreError};

/// Items below this confidence are never injected into a prompt.
pub const CONFIDENCE_FLOOR: f64 = 0.3;

/// Cap on recalled items, to bound prompt size.
pub const MAX_RECALLED_MEMORIES: usize = 50;

#[derive(Debug, Clone)]
pub struct RecallOptions {
    pub confidence_floor: f64,
    pub limit: usize,
}

impl Default for RecallOptions {
    fn default() -> Self {
        Self {
            confidence_floor: CONFIDENCE_FLOOR,
            limit: MAX_RECALLED_MEMORIES,
        }
    }
}

/// Load the memories worth injecting for one (agent, tenant) pair:
/// confidence at or above the floor, not expired, newest first, capped.
pub async fn recall(
    store: &dyn DataStore,
    agent_name: &str,
    tenant_id: &str,
    now: DateTime<Utc>,
    options: &RecallOptions,
) -> Result<Vec<MemoryItem>, StoreError> {
    let mut items = store.memories(agent_name, tenant_id).await?;

    items.retain(|m| m.confidence >= options.confidence_floor && !m.is_expired(now));
    items.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    items.truncate(options.limit);

    tracing::debug!(
        agent = agent_name,
        tenant = tenant_id,
        recalled = items.len(),
        "memory recall"
    );

    Ok(items)
}
