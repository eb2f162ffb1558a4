//! Builtin tool catalog.
//!
//! Cross-cutting tools are usable by any agent; the rest are specialist
//! sets scoped through each agent's tool allowlist. Every handler keeps
//! the approval gate: outward-facing effects are enqueued for the owner
//! to release, never performed directly.

mod content;
mod intel;
mod pipeline;
mod projects;
mod reviews;
mod seo;
mod shared;

pub use content::{DraftContentPost, GetContentCalendar};
pub use intel::{ListCompetitors, LogCompetitorMove};
pub use pipeline::{ListLeads, ScoreLead, UpdateLeadStage, LEAD_STAGES};
pub use projects::{CreateTask, ListProjectTasks, UpdateTaskStatus, TASK_STATUSES};
pub use reviews::{DraftReviewReply, ListRecentReviews};
pub use seo::{GetKeywordRankings, GetTrafficSummary};
pub use shared::{EscalateToOwner, GetCompanyProfile, SaveMemory, SearchActivity};

use std::sync::Arc;

use roster_store::DataStore;

use crate::ToolRegistry;

/// Register the full builtin catalog against one store handle.
pub fn register_builtins(registry: &mut ToolRegistry, store: Arc<dyn DataStore>) {
    registry.register(GetCompanyProfile::new(store.clone()));
    registry.register(SaveMemory::new(store.clone()));
    registry.register(EscalateToOwner::new(store.clone()));
    registry.register(SearchActivity::new(store.clone()));

    registry.register(ListLeads::new(store.clone()));
    registry.register(ScoreLead::new(store.clone()));
    registry.register(UpdateLeadStage::new(store.clone()));

    registry.register(GetContentCalendar::new(store.clone()));
    registry.register(DraftContentPost::new(store.clone()));

    registry.register(ListRecentReviews::new(store.clone()));
    registry.register(DraftReviewReply::new(store.clone()));

    registry.register(GetKeywordRankings::new(store.clone()));
    registry.register(GetTrafficSummary::new(store.clone()));

    registry.register(ListCompetitors::new(store.clone()));
    registry.register(LogCompetitorMove::new(store.clone()));

    registry.register(CreateTask::new(store.clone()));
    registry.register(UpdateTaskStatus::new(store.clone()));
    registry.register(ListProjectTasks::new(store));
}

#[cfg(test)]
mod tests {
    use super::*;
    use roster_store::InMemoryStore;

    #[test]
    fn full_catalog_registers() {
        let mut registry = ToolRegistry::new();
        register_builtins(&mut registry, Arc::new(InMemoryStore::new()));

        assert_eq!(registry.len(), 18);
        for name in [
            "get_company_profile",
            "save_memory",
            "escalate_to_owner",
            "search_activity",
            "list_leads",
            "score_lead",
            "update_lead_stage",
            "get_content_calendar",
            "draft_content_post",
            "list_recent_reviews",
            "draft_review_reply",
            "get_keyword_rankings",
            "get_traffic_summary",
            "list_competitors",
            "log_competitor_move",
            "create_task",
            "update_task_status",
            "list_project_tasks",
        ] {
            assert!(registry.has(name), "missing {name}");
        }
    }
}
