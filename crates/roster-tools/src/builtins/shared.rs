//! Cross-cutting tools usable by any agent

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{Duration, Utc};
use serde_json::{json, Value};

use roster_protocol::JsonSchema;
use roster_store::{DataStore, MemoryItem, MemoryKind};

use crate::traits::{optional_str, optional_usize, required_str};
use crate::{Tool, ToolContext, ToolError, ToolOutput};

/// Fetch the tenant profile and brand facts.
pub struct GetCompanyProfile {
    store: Arc<dyn DataStore>,
}

impl GetCompanyProfile {
    pub fn new(store: Arc<dyn DataStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl Tool for GetCompanyProfile {
    fn name(&self) -> &str {
        "get_company_profile"
    }

    fn description(&self) -> &str {
        "Fetch the business profile: name, category, and brand facts."
    }

    fn schema(&self) -> JsonSchema {
        JsonSchema::object()
    }

    async fn execute(&self, _input: Value, ctx: &ToolContext) -> Result<ToolOutput, ToolError> {
        let tenant = self
            .store
            .tenant(&ctx.tenant_id)
            .await?
            .ok_or_else(|| ToolError::failed(format!("unknown tenant: {}", ctx.tenant_id)))?;

        Ok(ToolOutput::json(&json!({
            "name": tenant.name,
            "category": tenant.category,
            "brand_facts": tenant.brand_facts,
            "regulated": tenant.is_regulated(),
        })))
    }
}

/// Persist a long-term memory for the acting agent.
pub struct SaveMemory {
    store: Arc<dyn DataStore>,
}

impl SaveMemory {
    pub fn new(store: Arc<dyn DataStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl Tool for SaveMemory {
    fn name(&self) -> &str {
        "save_memory"
    }

    fn description(&self) -> &str {
        "Remember a durable fact about this business for future conversations. \
         Kinds: preference, fact, feedback, style, relationship, instruction."
    }

    fn schema(&self) -> JsonSchema {
        JsonSchema::object()
            .property(
                "content",
                JsonSchema::string().description("The fact to remember"),
            )
            .property(
                "kind",
                JsonSchema::string().description("Memory kind, defaults to fact"),
            )
            .property(
                "confidence",
                JsonSchema::number().description("0.0-1.0, defaults to 0.8"),
            )
            .property(
                "expires_in_days",
                JsonSchema::number().description("Optional expiry horizon"),
            )
            .required(&["content"])
    }

    async fn execute(&self, input: Value, ctx: &ToolContext) -> Result<ToolOutput, ToolError> {
        let content = required_str(&input, "content")?;
        let kind = optional_str(&input, "kind")
            .map(MemoryKind::from_str_lossy)
            .unwrap_or(MemoryKind::Fact);

        let mut item = MemoryItem::new(&ctx.agent_name, &ctx.tenant_id, kind, content);
        if let Some(confidence) = input.get("confidence").and_then(Value::as_f64) {
            item = item.with_confidence(confidence);
        }
        if let Some(days) = input.get("expires_in_days").and_then(Value::as_i64) {
            item = item.with_expiry(Utc::now() + Duration::days(days));
        }

        self.store.put_memory(item).await?;

        Ok(ToolOutput::json(&json!({
            "saved": true,
            "kind": kind.as_str(),
        })))
    }
}

/// Queue a question or decision for the human operator. The escalation
/// sits in a pending queue; nothing is sent.
pub struct EscalateToOwner {
    store: Arc<dyn DataStore>,
}

impl EscalateToOwner {
    pub fn new(store: Arc<dyn DataStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl Tool for EscalateToOwner {
    fn name(&self) -> &str {
        "escalate_to_owner"
    }

    fn description(&self) -> &str {
        "Escalate a question or decision to the business owner. \
         Use when a request needs human judgment or approval."
    }

    fn schema(&self) -> JsonSchema {
        JsonSchema::object()
            .property(
                "reason",
                JsonSchema::string().description("What needs the owner's attention"),
            )
            .property(
                "urgency",
                JsonSchema::string().description("normal or high, defaults to normal"),
            )
            .required(&["reason"])
    }

    async fn execute(&self, input: Value, ctx: &ToolContext) -> Result<ToolOutput, ToolError> {
        let reason = required_str(&input, "reason")?;
        let urgency = optional_str(&input, "urgency").unwrap_or("normal");

        let id = uuid::Uuid::new_v4().to_string();
        self.store
            .put_record(
                &ctx.tenant_id,
                "escalations",
                &id,
                json!({
                    "id": id,
                    "agent": ctx.agent_name,
                    "reason": reason,
                    "urgency": urgency,
                    "status": "pending_approval",
                    "created_at": Utc::now().to_rfc3339(),
                }),
            )
            .await?;

        Ok(ToolOutput::json(&json!({
            "escalation_id": id,
            "status": "pending_approval",
        })))
    }
}

/// Search prior activity records for this tenant.
pub struct SearchActivity {
    store: Arc<dyn DataStore>,
}

impl SearchActivity {
    pub fn new(store: Arc<dyn DataStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl Tool for SearchActivity {
    fn name(&self) -> &str {
        "search_activity"
    }

    fn description(&self) -> &str {
        "Search prior work the roster has done for this business."
    }

    fn schema(&self) -> JsonSchema {
        JsonSchema::object()
            .property(
                "query",
                JsonSchema::string().description("Keyword filter, optional"),
            )
            .property(
                "limit",
                JsonSchema::number().description("Max results, defaults to 10"),
            )
    }

    async fn execute(&self, input: Value, ctx: &ToolContext) -> Result<ToolOutput, ToolError> {
        let query = optional_str(&input, "query").map(str::to_lowercase);
        let limit = optional_usize(&input, "limit").unwrap_or(10);

        let activities = self.store.activities(&ctx.tenant_id).await?;
        let matches: Vec<Value> = activities
            .iter()
            .filter(|a| match &query {
                Some(q) => a.description.to_lowercase().contains(q),
                None => true,
            })
            .take(limit)
            .map(|a| {
                json!({
                    "agent": a.agent_name,
                    "kind": a.kind.to_string(),
                    "description": a.description,
                    "at": a.created_at.to_rfc3339(),
                })
            })
            .collect();

        Ok(ToolOutput::json(&json!({
            "count": matches.len(),
            "activities": matches,
        })))
    }
}
