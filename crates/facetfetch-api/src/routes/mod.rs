//! Route modules organized by bounded context.

use facetfetch_core::repository::StoredEvent;
use facetfetch_core::response::LedgerResponse;
use serde::Serialize;
use uuid::Uuid;

pub mod access;
pub mod health;
pub mod quests;

/// Response body returned after a command is successfully handled.
#[derive(Debug, Serialize)]
pub struct CommandResponse {
    /// Ledger receipt, e.g. `(ok true)`.
    pub result: LedgerResponse,
    /// IDs of the domain events produced and persisted.
    pub event_ids: Vec<Uuid>,
    /// The quest allocated by create-quest.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quest_id: Option<u64>,
}

impl CommandResponse {
    /// An `(ok true)` response for the given persisted events.
    #[must_use]
    pub fn ok_true(stored_events: &[StoredEvent]) -> Self {
        Self {
            result: LedgerResponse::ok_true(),
            event_ids: stored_events.iter().map(|e| e.event_id).collect(),
            quest_id: None,
        }
    }
}
