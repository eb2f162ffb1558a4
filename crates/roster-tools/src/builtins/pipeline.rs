//! Lead pipeline tools (sales agent)

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{json, Value};

use roster_protocol::JsonSchema;
use roster_store::DataStore;

use crate::traits::{optional_str, required_str};
use crate::{Tool, ToolContext, ToolError, ToolOutput};

const LEADS: &str = "leads";

/// Pipeline stages a lead may be in, in funnel order.
pub const LEAD_STAGES: &[&str] = &["new", "contacted", "qualified", "proposal", "won", "lost"];

/// List leads, optionally filtered by stage.
pub struct ListLeads {
    store: Arc<dyn DataStore>,
}

impl ListLeads {
    pub fn new(store: Arc<dyn DataStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl Tool for ListLeads {
    fn name(&self) -> &str {
        "list_leads"
    }

    fn description(&self) -> &str {
        "List leads in the pipeline, optionally filtered by stage."
    }

    fn schema(&self) -> JsonSchema {
        JsonSchema::object().property(
            "stage",
            JsonSchema::string().description("Filter: new, contacted, qualified, proposal, won, lost"),
        )
    }

    async fn execute(&self, input: Value, ctx: &ToolContext) -> Result<ToolOutput, ToolError> {
        let stage = optional_str(&input, "stage");
        let leads: Vec<Value> = self
            .store
            .records(&ctx.tenant_id, LEADS)
            .await?
            .into_iter()
            .filter(|lead| match stage {
                Some(s) => lead.get("stage").and_then(Value::as_str) == Some(s),
                None => true,
            })
            .collect();

        Ok(ToolOutput::json(&json!({
            "count": leads.len(),
            "leads": leads,
        })))
    }
}

/// Score one lead from its recorded attributes and write the score back.
pub struct ScoreLead {
    store: Arc<dyn DataStore>,
}

impl ScoreLead {
    pub fn new(store: Arc<dyn DataStore>) -> Self {
        Self { store }
    }

    fn score(lead: &Value) -> (i64, Vec<&'static str>) {
        let mut score = 50;
        let mut factors = Vec::new();

        if lead.get("budget").and_then(Value::as_f64).unwrap_or(0.0) >= 1000.0 {
            score += 20;
            factors.push("budget at or above 1000");
        }
        if matches!(
            lead.get("timeline").and_then(Value::as_str),
            Some("immediate") | Some("this_month")
        ) {
            score += 20;
            factors.push("near-term timeline");
        }
        if lead.get("source").and_then(Value::as_str) == Some("referral") {
            score += 10;
            factors.push("referral source");
        }

        (score.min(100), factors)
    }
}

#[async_trait]
impl Tool for ScoreLead {
    fn name(&self) -> &str {
        "score_lead"
    }

    fn description(&self) -> &str {
        "Score a lead (0-100) from budget, timeline, and source; stores the score on the lead."
    }

    fn schema(&self) -> JsonSchema {
        JsonSchema::object()
            .property("lead_id", JsonSchema::string().description("Lead id"))
            .required(&["lead_id"])
    }

    async fn execute(&self, input: Value, ctx: &ToolContext) -> Result<ToolOutput, ToolError> {
        let lead_id = required_str(&input, "lead_id")?;
        let mut lead = self
            .store
            .record(&ctx.tenant_id, LEADS, lead_id)
            .await?
            .ok_or_else(|| ToolError::failed(format!("lead not found: {lead_id}")))?;

        let (score, factors) = Self::score(&lead);
        if let Some(obj) = lead.as_object_mut() {
            obj.insert("score".to_string(), json!(score));
        }
        self.store
            .put_record(&ctx.tenant_id, LEADS, lead_id, lead)
            .await?;

        Ok(ToolOutput::json(&json!({
            "lead_id": lead_id,
            "score": score,
            "factors": factors,
        })))
    }
}

/// Move a lead to another pipeline stage.
pub struct UpdateLeadStage {
    store: Arc<dyn DataStore>,
}

impl UpdateLeadStage {
    pub fn new(store: Arc<dyn DataStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl Tool for UpdateLeadStage {
    fn name(&self) -> &str {
        "update_lead_stage"
    }

    fn description(&self) -> &str {
        "Move a lead to a new pipeline stage."
    }

    fn schema(&self) -> JsonSchema {
        JsonSchema::object()
            .property("lead_id", JsonSchema::string().description("Lead id"))
            .property(
                "stage",
                JsonSchema::string().description("new, contacted, qualified, proposal, won, lost"),
            )
            .required(&["lead_id", "stage"])
    }

    async fn execute(&self, input: Value, ctx: &ToolContext) -> Result<ToolOutput, ToolError> {
        let lead_id = required_str(&input, "lead_id")?;
        let stage = required_str(&input, "stage")?;

        if !LEAD_STAGES.contains(&stage) {
            return Err(ToolError::invalid_input(format!(
                "unknown stage: {stage} (expected one of {})",
                LEAD_STAGES.join(", ")
            )));
        }

        let mut lead = self
            .store
            .record(&ctx.tenant_id, LEADS, lead_id)
            .await?
            .ok_or_else(|| ToolError::failed(format!("lead not found: {lead_id}")))?;

        let previous = lead
            .get("stage")
            .and_then(Value::as_str)
            .unwrap_or("new")
            .to_string();
        if let Some(obj) = lead.as_object_mut() {
            obj.insert("stage".to_string(), json!(stage));
        }
        self.store
            .put_record(&ctx.tenant_id, LEADS, lead_id, lead)
            .await?;

        Ok(ToolOutput::json(&json!({
            "lead_id": lead_id,
            "previous_stage": previous,
            "stage": stage,
        })))
    }
}
