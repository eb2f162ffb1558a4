//! Domain record types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Static configuration for one named agent. Immutable during a single
/// invocation; created and updated only by the administrative path.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentConfig {
    pub name: String,
    pub display_name: String,
    pub role: String,
    pub instructions: String,
    pub tools: Vec<String>,
    pub model: String,
    pub temperature: f32,
    pub active: bool,
}

/// Closed set of long-term memory types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MemoryKind {
    Preference,
    Fact,
    Feedback,
    Style,
    Relationship,
    Instruction,
}

impl MemoryKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Preference => "preference",
            Self::Fact => "fact",
            Self::Feedback => "feedback",
            Self::Style => "style",
            Self::Relationship => "relationship",
            Self::Instruction => "instruction",
        }
    }

    pub fn from_str_lossy(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "preference" => Self::Preference,
            "feedback" => Self::Feedback,
            "style" => Self::Style,
            "relationship" => Self::Relationship,
            "instruction" => Self::Instruction,
            _ => Self::Fact,
        }
    }

    pub fn all() -> [Self; 6] {
        [
            Self::Preference,
            Self::Fact,
            Self::Feedback,
            Self::Style,
            Self::Relationship,
            Self::Instruction,
        ]
    }
}

impl std::fmt::Display for MemoryKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One long-term fact an agent holds about a tenant. Content is unique
/// per (agent, tenant); duplicate writes are idempotent no-ops.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemoryItem {
    pub id: String,
    pub agent_name: String,
    pub tenant_id: String,
    pub kind: MemoryKind,
    pub content: String,
    pub confidence: f64,
    pub expires_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl MemoryItem {
    pub fn new(
        agent_name: impl Into<String>,
        tenant_id: impl Into<String>,
        kind: MemoryKind,
        content: impl Into<String>,
    ) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            agent_name: agent_name.into(),
            tenant_id: tenant_id.into(),
            kind,
            content: content.into(),
            confidence: 0.8,
            expires_at: None,
            created_at: Utc::now(),
        }
    }

    pub fn with_confidence(mut self, confidence: f64) -> Self {
        self.confidence = confidence.clamp(0.0, 1.0);
        self
    }

    pub fn with_expiry(mut self, expires_at: DateTime<Utc>) -> Self {
        self.expires_at = Some(expires_at);
        self
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_some_and(|at| at <= now)
    }
}

/// Tenant categories that trigger the mandatory compliance reminder.
pub const REGULATED_CATEGORIES: &[&str] = &[
    "healthcare",
    "medical",
    "dental",
    "legal",
    "finance",
    "insurance",
];

/// The business a conversation belongs to
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TenantProfile {
    pub id: String,
    pub name: String,
    pub category: String,
    #[serde(default)]
    pub brand_facts: Vec<String>,
}

impl TenantProfile {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        category: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            category: category.into(),
            brand_facts: Vec::new(),
        }
    }

    pub fn with_brand_fact(mut self, fact: impl Into<String>) -> Self {
        self.brand_facts.push(fact.into());
        self
    }

    pub fn is_regulated(&self) -> bool {
        let category = self.category.to_lowercase();
        REGULATED_CATEGORIES.iter().any(|c| category.contains(c))
    }
}

/// Action-type tag on an audit entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivityKind {
    Routing,
    Reply,
    Escalation,
}

impl std::fmt::Display for ActivityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Routing => f.write_str("routing"),
            Self::Reply => f.write_str("reply"),
            Self::Escalation => f.write_str("escalation"),
        }
    }
}

/// Append-only audit entry; never updated or deleted by the runtime.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivityRecord {
    pub id: String,
    pub agent_name: String,
    pub tenant_id: String,
    pub kind: ActivityKind,
    pub description: String,
    pub metadata: Value,
    pub project_id: Option<String>,
    pub conversation_id: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl ActivityRecord {
    pub fn new(
        agent_name: impl Into<String>,
        tenant_id: impl Into<String>,
        kind: ActivityKind,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            agent_name: agent_name.into(),
            tenant_id: tenant_id.into(),
            kind,
            description: description.into(),
            metadata: Value::Null,
            project_id: None,
            conversation_id: None,
            created_at: Utc::now(),
        }
    }

    pub fn with_metadata(mut self, metadata: Value) -> Self {
        self.metadata = metadata;
        self
    }

    pub fn with_conversation(mut self, conversation_id: impl Into<String>) -> Self {
        self.conversation_id = Some(conversation_id.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn memory_kind_roundtrip() {
        for kind in MemoryKind::all() {
            assert_eq!(MemoryKind::from_str_lossy(kind.as_str()), kind);
        }
        assert_eq!(MemoryKind::from_str_lossy("unknown"), MemoryKind::Fact);
    }

    #[test]
    fn memory_confidence_clamped() {
        let item = MemoryItem::new("sales", "t1", MemoryKind::Fact, "x").with_confidence(1.7);
        assert_eq!(item.confidence, 1.0);
    }

    #[test]
    fn memory_expiry() {
        let now = Utc::now();
        let item = MemoryItem::new("sales", "t1", MemoryKind::Fact, "x")
            .with_expiry(now - Duration::hours(1));
        assert!(item.is_expired(now));

        let open_ended = MemoryItem::new("sales", "t1", MemoryKind::Fact, "y");
        assert!(!open_ended.is_expired(now));
    }

    #[test]
    fn regulated_category_detection() {
        assert!(TenantProfile::new("t1", "Bright Smile", "dental clinic").is_regulated());
        assert!(TenantProfile::new("t2", "Acme Legal", "Legal").is_regulated());
        assert!(!TenantProfile::new("t3", "Crusty Buns", "bakery").is_regulated());
    }
}
