//! Search visibility tools (seo agent)

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{json, Value};

use roster_protocol::JsonSchema;
use roster_store::DataStore;

use crate::traits::{optional_str, optional_usize};
use crate::{Tool, ToolContext, ToolError, ToolOutput};

const RANKINGS: &str = "seo_rankings";
const ANALYTICS: &str = "analytics";

/// Report tracked keyword positions.
pub struct GetKeywordRankings {
    store: Arc<dyn DataStore>,
}

impl GetKeywordRankings {
    pub fn new(store: Arc<dyn DataStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl Tool for GetKeywordRankings {
    fn name(&self) -> &str {
        "get_keyword_rankings"
    }

    fn description(&self) -> &str {
        "Report tracked keyword positions, optionally filtered by keyword substring."
    }

    fn schema(&self) -> JsonSchema {
        JsonSchema::object()
            .property(
                "keyword",
                JsonSchema::string().description("Substring filter, optional"),
            )
            .property(
                "limit",
                JsonSchema::number().description("Max keywords, defaults to 20"),
            )
    }

    async fn execute(&self, input: Value, ctx: &ToolContext) -> Result<ToolOutput, ToolError> {
        let keyword = optional_str(&input, "keyword").map(str::to_lowercase);
        let limit = optional_usize(&input, "limit").unwrap_or(20);

        let mut rankings: Vec<Value> = self
            .store
            .records(&ctx.tenant_id, RANKINGS)
            .await?
            .into_iter()
            .filter(|r| match &keyword {
                Some(k) => r
                    .get("keyword")
                    .and_then(Value::as_str)
                    .map(|kw| kw.to_lowercase().contains(k))
                    .unwrap_or(false),
                None => true,
            })
            .collect();
        rankings.sort_by_key(|r| r.get("position").and_then(Value::as_i64).unwrap_or(i64::MAX));
        rankings.truncate(limit);

        Ok(ToolOutput::json(&json!({
            "count": rankings.len(),
            "rankings": rankings,
        })))
    }
}

/// Summarize site traffic from the stored analytics snapshot.
pub struct GetTrafficSummary {
    store: Arc<dyn DataStore>,
}

impl GetTrafficSummary {
    pub fn new(store: Arc<dyn DataStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl Tool for GetTrafficSummary {
    fn name(&self) -> &str {
        "get_traffic_summary"
    }

    fn description(&self) -> &str {
        "Summarize recent site traffic from the stored analytics snapshot."
    }

    fn schema(&self) -> JsonSchema {
        JsonSchema::object()
    }

    async fn execute(&self, _input: Value, ctx: &ToolContext) -> Result<ToolOutput, ToolError> {
        let summary = self
            .store
            .record(&ctx.tenant_id, ANALYTICS, "traffic_summary")
            .await?
            .ok_or_else(|| ToolError::failed("no traffic snapshot for this business"))?;

        Ok(ToolOutput::json(&summary))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use roster_store::InMemoryStore;

    fn ctx() -> ToolContext {
        ToolContext::new("seo", "t1")
    }

    #[tokio::test]
    async fn rankings_filtered_and_sorted_by_position() {
        let store = Arc::new(InMemoryStore::new());
        store
            .put_record(
                "t1",
                RANKINGS,
                "k1",
                json!({"keyword": "dentist near me", "position": 7}),
            )
            .await
            .unwrap();
        store
            .put_record(
                "t1",
                RANKINGS,
                "k2",
                json!({"keyword": "teeth whitening dentist", "position": 3}),
            )
            .await
            .unwrap();
        store
            .put_record(
                "t1",
                RANKINGS,
                "k3",
                json!({"keyword": "invisalign cost", "position": 12}),
            )
            .await
            .unwrap();

        let tool = GetKeywordRankings::new(store);
        let out = tool
            .execute(json!({"keyword": "dentist"}), &ctx())
            .await
            .unwrap();
        let payload: Value = serde_json::from_str(out.as_str()).unwrap();

        assert_eq!(payload["count"], 2);
        assert_eq!(payload["rankings"][0]["position"], 3);
    }

    #[tokio::test]
    async fn traffic_summary_roundtrip() {
        let store = Arc::new(InMemoryStore::new());
        store
            .put_record(
                "t1",
                ANALYTICS,
                "traffic_summary",
                json!({"visits": 1250, "top_page": "/services"}),
            )
            .await
            .unwrap();

        let tool = GetTrafficSummary::new(store);
        let out = tool.execute(json!({}), &ctx()).await.unwrap();
        let payload: Value = serde_json::from_str(out.as_str()).unwrap();
        assert_eq!(payload["visits"], 1250);
    }

    #[tokio::test]
    async fn missing_snapshot_fails() {
        let tool = GetTrafficSummary::new(Arc::new(InMemoryStore::new()));
        let err = tool.execute(json!({}), &ctx()).await.unwrap_err();
        assert!(matches!(err, ToolError::ExecutionFailed { .. }));
    }
}
