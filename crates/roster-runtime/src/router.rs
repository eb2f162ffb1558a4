//! Message router: one non-tool model call picks the target agent.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use roster_agents::DEFAULT_AGENT;
use roster_protocol::Message;
use roster_providers::ModelClient;
use roster_store::AgentConfig;

use crate::RuntimeError;

/// Reasoning attached when the router output could not be used.
pub const FALLBACK_REASONING: &str =
    "Routing output was unusable; defaulting to the coordinator.";

const FALLBACK_CONFIDENCE: f64 = 0.5;

const ROUTER_POLICY: &str = "\
You route inbound business messages to the right agent on the roster.

Policy:
1. A message squarely in one specialist's domain goes to that specialist.
2. A message spanning several domains goes to the agent owning its primary domain.
3. A vague or ambiguous request goes to the coordinator.
4. Greetings and relationship messages go to the concierge.

Respond with JSON only, no prose:
{\"target_agent\": \"<name>\", \"reasoning\": \"<one sentence>\", \"confidence\": <0.0-1.0>}";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RouteDecision {
    pub target_agent: String,
    pub reasoning: String,
    pub confidence: f64,
}

#[derive(Deserialize)]
struct RouteWire {
    target_agent: String,
    reasoning: String,
    confidence: f64,
}

/// Picks the target agent for an inbound message. Parse failures and
/// unknown target names are absorbed into a coordinator fallback; only
/// transport failures surface.
pub struct Router {
    client: Arc<dyn ModelClient>,
}

impl Router {
    pub fn new(client: Arc<dyn ModelClient>) -> Self {
        Self { client }
    }

    pub async fn route(
        &self,
        message: &str,
        agents: &[AgentConfig],
    ) -> Result<RouteDecision, RuntimeError> {
        let mut system = String::from(ROUTER_POLICY);
        system.push_str("\n\nAvailable agents:\n");
        for agent in agents {
            system.push_str(&format!(
                "- {}: {} ({})\n",
                agent.name, agent.role, agent.display_name
            ));
        }

        let transcript = [Message::system(system), Message::user(message)];
        let response = self.client.chat(&transcript, &[]).await?;

        let decision = match parse_decision(&response.text(), agents) {
            Some(decision) => decision,
            None => {
                tracing::warn!("unusable routing output, falling back to coordinator");
                fallback()
            }
        };

        tracing::debug!(
            target = %decision.target_agent,
            confidence = decision.confidence,
            "routed message"
        );
        Ok(decision)
    }
}

fn fallback() -> RouteDecision {
    RouteDecision {
        target_agent: DEFAULT_AGENT.to_string(),
        reasoning: FALLBACK_REASONING.to_string(),
        confidence: FALLBACK_CONFIDENCE,
    }
}

fn parse_decision(text: &str, agents: &[AgentConfig]) -> Option<RouteDecision> {
    let wire: RouteWire = serde_json::from_str(strip_code_fences(text)).ok()?;

    if !agents.iter().any(|a| a.name == wire.target_agent) {
        tracing::warn!(target = %wire.target_agent, "router chose an unknown agent");
        return None;
    }

    Some(RouteDecision {
        target_agent: wire.target_agent,
        reasoning: wire.reasoning,
        confidence: wire.confidence.clamp(0.0, 1.0),
    })
}

fn strip_code_fences(text: &str) -> &str {
    let text = text.trim();
    let text = text
        .strip_prefix("```json")
        .or_else(|| text.strip_prefix("```"))
        .unwrap_or(text);
    text.strip_suffix("```").unwrap_or(text).trim()
}
