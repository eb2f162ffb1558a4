//! Orchestrator: registry + router + execution loop.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde_json::{json, Value};

use roster_agents::{compose_instructions, AgentRegistry};
use roster_protocol::Message;
use roster_providers::ModelClient;
use roster_store::{
    recall, ActivityKind, ActivityRecord, DataStore, RecallOptions, TenantProfile,
};
use roster_tools::ToolRegistry;

use crate::{ExecutionLoop, RouteDecision, Router, RuntimeError};

/// One completed run, whether routed or direct.
#[derive(Debug, Clone)]
pub struct RunResult {
    pub response: String,
    pub agent_name: String,
    pub tools_used: Vec<String>,
    pub activity_id: String,
    pub rounds: usize,
    pub routing: Option<RouteDecision>,
}

/// Active agent plus usage stats for operator-facing listings.
#[derive(Debug, Clone)]
pub struct AgentSummary {
    pub name: String,
    pub display_name: String,
    pub role: String,
    pub runs: usize,
    pub last_active: Option<DateTime<Utc>>,
}

/// Entry point for inbound messages. Owns no state beyond handles to
/// the registry, router, loop, and store.
pub struct Orchestrator {
    registry: AgentRegistry,
    router: Router,
    engine: ExecutionLoop,
    store: Arc<dyn DataStore>,
}

impl Orchestrator {
    pub fn new(
        client: Arc<dyn ModelClient>,
        tools: Arc<ToolRegistry>,
        store: Arc<dyn DataStore>,
    ) -> Self {
        Self {
            registry: AgentRegistry::new(store.clone()),
            router: Router::new(client.clone()),
            engine: ExecutionLoop::new(client, tools, store.clone()),
            store,
        }
    }

    /// Route an inbound message, audit the decision, and run the target
    /// agent. The routing record is written before the agent runs.
    pub async fn handle_message(
        &self,
        message: &str,
        tenant_id: &str,
        history: &[Message],
    ) -> Result<RunResult, RuntimeError> {
        let decision = self.route(message, tenant_id).await?;

        let routing_record = ActivityRecord::new(
            &decision.target_agent,
            tenant_id,
            ActivityKind::Routing,
            format!("Routed an inbound message to {}", decision.target_agent),
        )
        .with_metadata(json!({
            "confidence": decision.confidence,
            "reasoning": decision.reasoning,
        }));
        self.store.append_activity(routing_record).await?;

        let mut result = self
            .run(
                &decision.target_agent,
                message,
                tenant_id,
                history,
                json!({"routed": true}),
            )
            .await?;
        result.routing = Some(decision);
        Ok(result)
    }

    /// Run a named agent directly, bypassing the router.
    pub async fn run_agent(
        &self,
        agent_name: &str,
        message: &str,
        tenant_id: &str,
        history: &[Message],
    ) -> Result<RunResult, RuntimeError> {
        self.run(agent_name, message, tenant_id, history, Value::Null)
            .await
    }

    /// Routing decision only, without running anything.
    pub async fn route(
        &self,
        message: &str,
        _tenant_id: &str,
    ) -> Result<RouteDecision, RuntimeError> {
        let agents = self.registry.list().await?;
        self.router.route(message, &agents).await
    }

    /// Active agents with usage stats derived from the tenant's
    /// activity records.
    pub async fn list_agents(&self, tenant_id: &str) -> Result<Vec<AgentSummary>, RuntimeError> {
        let configs = self.registry.list().await?;
        let activities = self.store.activities(tenant_id).await?;

        Ok(configs
            .into_iter()
            .map(|config| {
                let mine = activities.iter().filter(|a| a.agent_name == config.name);
                let runs = mine.clone().count();
                // Activities come back newest first.
                let last_active = mine.clone().map(|a| a.created_at).next();
                AgentSummary {
                    name: config.name,
                    display_name: config.display_name,
                    role: config.role,
                    runs,
                    last_active,
                }
            })
            .collect())
    }

    async fn run(
        &self,
        agent_name: &str,
        message: &str,
        tenant_id: &str,
        history: &[Message],
        metadata: Value,
    ) -> Result<RunResult, RuntimeError> {
        let config = self.registry.load(agent_name).await?;

        // A tenant without a stored profile still gets service, just
        // without brand context.
        let tenant = self
            .store
            .tenant(tenant_id)
            .await?
            .unwrap_or_else(|| TenantProfile::new(tenant_id, tenant_id, ""));

        let now = Utc::now();
        let memories = recall(
            self.store.as_ref(),
            &config.name,
            tenant_id,
            now,
            &RecallOptions::default(),
        )
        .await?;
        let instructions = compose_instructions(&config, &tenant, &memories, now.date_naive());

        let outcome = self
            .engine
            .run(&config, &instructions, message, tenant_id, history, metadata)
            .await?;

        Ok(RunResult {
            response: outcome.response,
            agent_name: config.name,
            tools_used: outcome.tools_used,
            activity_id: outcome.activity_id,
            rounds: outcome.rounds,
            routing: None,
        })
    }
}
