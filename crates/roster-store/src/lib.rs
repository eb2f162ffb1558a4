//! Domain records and the data-store abstraction.
//!
//! The persistent store itself is an external collaborator; the runtime
//! only sees the [`DataStore`] trait. [`InMemoryStore`] backs tests and
//! local experiments.

mod error;
mod memory;
mod memstore;
mod traits;
mod types;

pub use error::StoreError;
pub use memory::{recall, RecallOptions, CONFIDENCE_FLOOR, MAX_RECALLED_MEMORIES};
pub use memstore::InMemoryStore;
pub use traits::DataStore;
pub use types::{
    ActivityKind, ActivityRecord, AgentConfig, MemoryItem, MemoryKind, TenantProfile,
    REGULATED_CATEGORIES,
};
