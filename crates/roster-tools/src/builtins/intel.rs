//! Competitive intelligence tools (intel agent)

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use serde_json::{json, Value};

use roster_protocol::JsonSchema;
use roster_store::DataStore;

use crate::traits::{optional_str, required_str};
use crate::{Tool, ToolContext, ToolError, ToolOutput};

const COMPETITORS: &str = "competitors";
const MOVES: &str = "competitor_moves";

/// List tracked competitors.
pub struct ListCompetitors {
    store: Arc<dyn DataStore>,
}

impl ListCompetitors {
    pub fn new(store: Arc<dyn DataStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl Tool for ListCompetitors {
    fn name(&self) -> &str {
        "list_competitors"
    }

    fn description(&self) -> &str {
        "List the competitors tracked for this business."
    }

    fn schema(&self) -> JsonSchema {
        JsonSchema::object()
    }

    async fn execute(&self, _input: Value, ctx: &ToolContext) -> Result<ToolOutput, ToolError> {
        let competitors = self.store.records(&ctx.tenant_id, COMPETITORS).await?;

        Ok(ToolOutput::json(&json!({
            "count": competitors.len(),
            "competitors": competitors,
        })))
    }
}

/// Log an observed competitor move.
pub struct LogCompetitorMove {
    store: Arc<dyn DataStore>,
}

impl LogCompetitorMove {
    pub fn new(store: Arc<dyn DataStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl Tool for LogCompetitorMove {
    fn name(&self) -> &str {
        "log_competitor_move"
    }

    fn description(&self) -> &str {
        "Record an observed competitor move: a price change, promotion, or launch."
    }

    fn schema(&self) -> JsonSchema {
        JsonSchema::object()
            .property(
                "competitor",
                JsonSchema::string().description("Competitor name"),
            )
            .property(
                "observation",
                JsonSchema::string().description("What they did"),
            )
            .property(
                "kind",
                JsonSchema::string().description("price_change, promotion, launch, or other"),
            )
            .required(&["competitor", "observation"])
    }

    async fn execute(&self, input: Value, ctx: &ToolContext) -> Result<ToolOutput, ToolError> {
        let competitor = required_str(&input, "competitor")?;
        let observation = required_str(&input, "observation")?;
        let kind = optional_str(&input, "kind").unwrap_or("other");

        let id = uuid::Uuid::new_v4().to_string();
        self.store
            .put_record(
                &ctx.tenant_id,
                MOVES,
                &id,
                json!({
                    "id": id,
                    "competitor": competitor,
                    "observation": observation,
                    "kind": kind,
                    "logged_by": ctx.agent_name,
                    "created_at": Utc::now().to_rfc3339(),
                }),
            )
            .await?;

        Ok(ToolOutput::json(&json!({
            "move_id": id,
            "competitor": competitor,
        })))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use roster_store::InMemoryStore;

    fn ctx() -> ToolContext {
        ToolContext::new("intel", "t1")
    }

    #[tokio::test]
    async fn competitors_are_tenant_scoped() {
        let store = Arc::new(InMemoryStore::new());
        store
            .put_record("t1", COMPETITORS, "c1", json!({"name": "Shine Dental"}))
            .await
            .unwrap();
        store
            .put_record("t2", COMPETITORS, "c2", json!({"name": "Other Town Dental"}))
            .await
            .unwrap();

        let tool = ListCompetitors::new(store);
        let out = tool.execute(json!({}), &ctx()).await.unwrap();
        let payload: Value = serde_json::from_str(out.as_str()).unwrap();

        assert_eq!(payload["count"], 1);
        assert_eq!(payload["competitors"][0]["name"], "Shine Dental");
    }

    #[tokio::test]
    async fn logged_move_lands_in_the_journal() {
        let store = Arc::new(InMemoryStore::new());
        let tool = LogCompetitorMove::new(store.clone());

        tool.execute(
            json!({"competitor": "Shine Dental", "observation": "20% off whitening", "kind": "promotion"}),
            &ctx(),
        )
        .await
        .unwrap();

        let moves = store.records("t1", MOVES).await.unwrap();
        assert_eq!(moves.len(), 1);
        assert_eq!(moves[0]["kind"], "promotion");
        assert_eq!(moves[0]["logged_by"], "intel");
    }

    #[tokio::test]
    async fn move_requires_competitor_and_observation() {
        let tool = LogCompetitorMove::new(Arc::new(InMemoryStore::new()));
        let err = tool
            .execute(json!({"competitor": "Shine Dental"}), &ctx())
            .await
            .unwrap_err();
        assert!(matches!(err, ToolError::InvalidInput { .. }));
    }
}
