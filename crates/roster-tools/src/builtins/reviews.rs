//! Review monitoring tools (reviews agent)

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use serde_json::{json, Value};

use roster_protocol::JsonSchema;
use roster_store::DataStore;

use crate::traits::{optional_str, optional_usize, required_str};
use crate::{Tool, ToolContext, ToolError, ToolOutput};

const REVIEWS: &str = "reviews";
const REPLIES: &str = "review_replies";

/// List recent customer reviews, optionally filtered by rating ceiling.
pub struct ListRecentReviews {
    store: Arc<dyn DataStore>,
}

impl ListRecentReviews {
    pub fn new(store: Arc<dyn DataStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl Tool for ListRecentReviews {
    fn name(&self) -> &str {
        "list_recent_reviews"
    }

    fn description(&self) -> &str {
        "List recent customer reviews, optionally only those at or below a rating."
    }

    fn schema(&self) -> JsonSchema {
        JsonSchema::object()
            .property(
                "max_rating",
                JsonSchema::number().description("Only reviews at or below this rating, optional"),
            )
            .property(
                "limit",
                JsonSchema::number().description("Max reviews, defaults to 10"),
            )
    }

    async fn execute(&self, input: Value, ctx: &ToolContext) -> Result<ToolOutput, ToolError> {
        let max_rating = input.get("max_rating").and_then(Value::as_f64);
        let limit = optional_usize(&input, "limit").unwrap_or(10);

        let mut reviews: Vec<Value> = self
            .store
            .records(&ctx.tenant_id, REVIEWS)
            .await?
            .into_iter()
            .filter(|r| match max_rating {
                Some(max) => r
                    .get("rating")
                    .and_then(Value::as_f64)
                    .map(|rating| rating <= max)
                    .unwrap_or(false),
                None => true,
            })
            .collect();
        reviews.sort_by(|a, b| {
            let a_date = a.get("posted_at").and_then(Value::as_str).unwrap_or("");
            let b_date = b.get("posted_at").and_then(Value::as_str).unwrap_or("");
            b_date.cmp(a_date)
        });
        reviews.truncate(limit);

        Ok(ToolOutput::json(&json!({
            "count": reviews.len(),
            "reviews": reviews,
        })))
    }
}

/// Draft a reply to a review into the approval queue. Replies are never
/// posted directly.
pub struct DraftReviewReply {
    store: Arc<dyn DataStore>,
}

impl DraftReviewReply {
    pub fn new(store: Arc<dyn DataStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl Tool for DraftReviewReply {
    fn name(&self) -> &str {
        "draft_review_reply"
    }

    fn description(&self) -> &str {
        "Draft a reply to a customer review. The reply is queued for the \
         owner's approval; it is never posted directly."
    }

    fn schema(&self) -> JsonSchema {
        JsonSchema::object()
            .property("review_id", JsonSchema::string().description("Review id"))
            .property("body", JsonSchema::string().description("Reply text"))
            .required(&["review_id", "body"])
    }

    async fn execute(&self, input: Value, ctx: &ToolContext) -> Result<ToolOutput, ToolError> {
        let review_id = required_str(&input, "review_id")?;
        let body = required_str(&input, "body")?;

        if self
            .store
            .record(&ctx.tenant_id, REVIEWS, review_id)
            .await?
            .is_none()
        {
            return Err(ToolError::failed(format!("review not found: {review_id}")));
        }

        let id = uuid::Uuid::new_v4().to_string();
        self.store
            .put_record(
                &ctx.tenant_id,
                REPLIES,
                &id,
                json!({
                    "id": id,
                    "review_id": review_id,
                    "body": body,
                    "drafted_by": ctx.agent_name,
                    "status": "pending_approval",
                    "created_at": Utc::now().to_rfc3339(),
                }),
            )
            .await?;

        Ok(ToolOutput::json(&json!({
            "reply_id": id,
            "review_id": review_id,
            "status": "pending_approval",
        })))
    }
}
