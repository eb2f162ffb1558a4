//! Instruction-block composition

use chrono::NaiveDate;

use roster_store::{AgentConfig, MemoryItem, MemoryKind, TenantProfile};

/// Appended verbatim, and last, for every regulated-tenant invocation so
/// truncation of earlier sections can never displace it.
pub const COMPLIANCE_REMINDER: &str = "COMPLIANCE REMINDER: This business operates in a \
regulated industry. Do not give medical, legal, or financial advice. Do not promise \
outcomes or results. Do not reveal client, patient, or case details. When unsure, \
escalate to the business owner instead of answering.";

fn kind_label(kind: MemoryKind) -> &'static str {
    match kind {
        MemoryKind::Preference => "Preferences",
        MemoryKind::Fact => "Facts",
        MemoryKind::Feedback => "Feedback",
        MemoryKind::Style => "Style notes",
        MemoryKind::Relationship => "Relationships",
        MemoryKind::Instruction => "Standing instructions",
    }
}

/// Deterministically assemble the instruction block for one invocation:
/// base instructions, current context, grouped memories (omitted
/// entirely when empty), then the compliance reminder for regulated
/// tenants.
pub fn compose_instructions(
    config: &AgentConfig,
    tenant: &TenantProfile,
    memories: &[MemoryItem],
    today: NaiveDate,
) -> String {
    let mut block = String::from(config.instructions.trim_end());

    block.push_str("\n\n## Current context\n");
    block.push_str(&format!("- Business: {}\n", tenant.name));
    block.push_str(&format!("- Category: {}\n", tenant.category));
    block.push_str(&format!("- Date: {}\n", today));
    for fact in &tenant.brand_facts {
        block.push_str(&format!("- {}\n", fact));
    }

    if !memories.is_empty() {
        block.push_str("\n## What you remember about this business\n");
        for kind in MemoryKind::all() {
            let group: Vec<_> = memories.iter().filter(|m| m.kind == kind).collect();
            if group.is_empty() {
                continue;
            }
            block.push_str(&format!("\n### {}\n", kind_label(kind)));
            for item in group {
                block.push_str(&format!("- {}\n", item.content));
            }
        }
    }

    if tenant.is_regulated() {
        block.push_str("\n\n");
        block.push_str(COMPLIANCE_REMINDER);
    }

    block
}
