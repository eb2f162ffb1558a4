//! Content calendar tools (content agent)

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use serde_json::{json, Value};

use roster_protocol::JsonSchema;
use roster_store::DataStore;

use crate::traits::{optional_str, optional_usize, required_str};
use crate::{Tool, ToolContext, ToolError, ToolOutput};

const CALENDAR: &str = "content_calendar";
const DRAFTS: &str = "content_drafts";

/// Show the scheduled content calendar.
pub struct GetContentCalendar {
    store: Arc<dyn DataStore>,
}

impl GetContentCalendar {
    pub fn new(store: Arc<dyn DataStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl Tool for GetContentCalendar {
    fn name(&self) -> &str {
        "get_content_calendar"
    }

    fn description(&self) -> &str {
        "List scheduled content calendar entries."
    }

    fn schema(&self) -> JsonSchema {
        JsonSchema::object()
            .property(
                "channel",
                JsonSchema::string().description("Filter by channel, optional"),
            )
            .property(
                "limit",
                JsonSchema::number().description("Max entries, defaults to 20"),
            )
    }

    async fn execute(&self, input: Value, ctx: &ToolContext) -> Result<ToolOutput, ToolError> {
        let channel = optional_str(&input, "channel");
        let limit = optional_usize(&input, "limit").unwrap_or(20);

        let mut entries: Vec<Value> = self
            .store
            .records(&ctx.tenant_id, CALENDAR)
            .await?
            .into_iter()
            .filter(|e| match channel {
                Some(c) => e.get("channel").and_then(Value::as_str) == Some(c),
                None => true,
            })
            .collect();
        entries.sort_by(|a, b| {
            let a_date = a.get("scheduled_for").and_then(Value::as_str).unwrap_or("");
            let b_date = b.get("scheduled_for").and_then(Value::as_str).unwrap_or("");
            a_date.cmp(b_date)
        });
        entries.truncate(limit);

        Ok(ToolOutput::json(&json!({
            "count": entries.len(),
            "entries": entries,
        })))
    }
}

/// Draft a post into the approval queue. Nothing is published directly.
pub struct DraftContentPost {
    store: Arc<dyn DataStore>,
}

impl DraftContentPost {
    pub fn new(store: Arc<dyn DataStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl Tool for DraftContentPost {
    fn name(&self) -> &str {
        "draft_content_post"
    }

    fn description(&self) -> &str {
        "Draft a post for a channel. The draft is queued for the owner's \
         approval; it is never published directly."
    }

    fn schema(&self) -> JsonSchema {
        JsonSchema::object()
            .property(
                "channel",
                JsonSchema::string().description("Target channel, e.g. instagram, blog"),
            )
            .property("topic", JsonSchema::string().description("What the post is about"))
            .property("body", JsonSchema::string().description("Full post text"))
            .property(
                "scheduled_for",
                JsonSchema::string().description("Proposed date, optional"),
            )
            .required(&["channel", "topic", "body"])
    }

    async fn execute(&self, input: Value, ctx: &ToolContext) -> Result<ToolOutput, ToolError> {
        let channel = required_str(&input, "channel")?;
        let topic = required_str(&input, "topic")?;
        let body = required_str(&input, "body")?;

        let id = uuid::Uuid::new_v4().to_string();
        self.store
            .put_record(
                &ctx.tenant_id,
                DRAFTS,
                &id,
                json!({
                    "id": id,
                    "channel": channel,
                    "topic": topic,
                    "body": body,
                    "scheduled_for": optional_str(&input, "scheduled_for"),
                    "drafted_by": ctx.agent_name,
                    "status": "pending_approval",
                    "created_at": Utc::now().to_rfc3339(),
                }),
            )
            .await?;

        Ok(ToolOutput::json(&json!({
            "draft_id": id,
            "status": "pending_approval",
        })))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use roster_store::InMemoryStore;

    fn ctx() -> ToolContext {
        ToolContext::new("content", "t1")
    }

    #[tokio::test]
    async fn calendar_sorted_by_date_and_filtered() {
        let store = Arc::new(InMemoryStore::new());
        store
            .put_record(
                "t1",
                CALENDAR,
                "c1",
                json!({"channel": "blog", "scheduled_for": "2026-09-10"}),
            )
            .await
            .unwrap();
        store
            .put_record(
                "t1",
                CALENDAR,
                "c2",
                json!({"channel": "blog", "scheduled_for": "2026-09-01"}),
            )
            .await
            .unwrap();
        store
            .put_record(
                "t1",
                CALENDAR,
                "c3",
                json!({"channel": "instagram", "scheduled_for": "2026-09-05"}),
            )
            .await
            .unwrap();

        let tool = GetContentCalendar::new(store);
        let out = tool
            .execute(json!({"channel": "blog"}), &ctx())
            .await
            .unwrap();
        let payload: Value = serde_json::from_str(out.as_str()).unwrap();

        assert_eq!(payload["count"], 2);
        assert_eq!(payload["entries"][0]["scheduled_for"], "2026-09-01");
    }

    #[tokio::test]
    async fn drafts_are_queued_for_approval_never_published() {
        let store = Arc::new(InMemoryStore::new());
        let tool = DraftContentPost::new(store.clone());

        let out = tool
            .execute(
                json!({"channel": "instagram", "topic": "new menu", "body": "Try it!"}),
                &ctx(),
            )
            .await
            .unwrap();
        let payload: Value = serde_json::from_str(out.as_str()).unwrap();
        assert_eq!(payload["status"], "pending_approval");

        let drafts = store.records("t1", DRAFTS).await.unwrap();
        assert_eq!(drafts.len(), 1);
        assert_eq!(drafts[0]["status"], "pending_approval");
        assert_eq!(drafts[0]["drafted_by"], "content");
    }
}
