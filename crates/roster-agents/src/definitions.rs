//! Built-in agent roster

use roster_store::AgentConfig;

use crate::prompts;

/// Default coordinating agent; also the routing fallback target.
pub const DEFAULT_AGENT: &str = "coordinator";

/// Relationship agent for greetings and casual messages.
pub const RELATIONSHIP_AGENT: &str = "concierge";

const DEFAULT_MODEL: &str = "claude-sonnet-4-20250514";

/// Cross-cutting tools every agent may use.
fn shared_tools() -> Vec<String> {
    [
        "get_company_profile",
        "save_memory",
        "escalate_to_owner",
        "search_activity",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

fn agent(
    name: &str,
    display_name: &str,
    role: &str,
    instructions: &str,
    specialist_tools: &[&str],
    temperature: f32,
) -> AgentConfig {
    let mut tools = shared_tools();
    tools.extend(specialist_tools.iter().map(|t| t.to_string()));

    AgentConfig {
        name: name.to_string(),
        display_name: display_name.to_string(),
        role: role.to_string(),
        instructions: instructions.to_string(),
        tools,
        model: DEFAULT_MODEL.to_string(),
        temperature,
        active: true,
    }
}

/// The full built-in roster, used to seed a fresh store.
pub fn builtin_agents() -> Vec<AgentConfig> {
    vec![
        agent(
            DEFAULT_AGENT,
            "Coordinator",
            "coordinator",
            prompts::COORDINATOR_PROMPT,
            &[],
            0.5,
        ),
        agent(
            RELATIONSHIP_AGENT,
            "Concierge",
            "relationship",
            prompts::CONCIERGE_PROMPT,
            &[],
            0.8,
        ),
        agent(
            "sales",
            "Sales Agent",
            "pipeline",
            prompts::SALES_PROMPT,
            &["list_leads", "score_lead", "update_lead_stage"],
            0.4,
        ),
        agent(
            "content",
            "Content Agent",
            "content",
            prompts::CONTENT_PROMPT,
            &["get_content_calendar", "draft_content_post"],
            0.7,
        ),
        agent(
            "reviews",
            "Reviews Agent",
            "reputation",
            prompts::REVIEWS_PROMPT,
            &["list_recent_reviews", "draft_review_reply"],
            0.6,
        ),
        agent(
            "seo",
            "SEO Agent",
            "analytics",
            prompts::SEO_PROMPT,
            &["get_keyword_rankings", "get_traffic_summary"],
            0.3,
        ),
        agent(
            "intel",
            "Competitive Intel Agent",
            "intelligence",
            prompts::INTEL_PROMPT,
            &["list_competitors", "log_competitor_move"],
            0.4,
        ),
        agent(
            "projects",
            "Projects Agent",
            "operations",
            prompts::PROJECTS_PROMPT,
            &["create_task", "update_task_status", "list_project_tasks"],
            0.4,
        ),
    ]
}
