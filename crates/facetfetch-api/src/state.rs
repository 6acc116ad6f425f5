//! Shared application state.

use std::sync::Arc;

use facetfetch_access::application::role_gate::RoleRegistryGate;
use facetfetch_access::domain::aggregates::RoleRegistry;
use facetfetch_core::clock::Clock;
use facetfetch_core::repository::EventRepository;
use facetfetch_quest::domain::aggregates::QuestBoard;
use tokio::sync::{Mutex, MutexGuard};
use uuid::Uuid;

/// Application state shared across all request handlers.
#[derive(Clone)]
pub struct AppState {
    /// Source of ledger timestamps.
    pub clock: Arc<dyn Clock>,
    /// Event store backing both registries.
    pub event_repository: Arc<dyn EventRepository>,
    /// Stream holding the ledger's role registry.
    pub registry_id: Uuid,
    /// Stream holding the ledger's quest board.
    pub board_id: Uuid,
    /// Serializes mutating requests into one ledger order.
    write_gate: Arc<Mutex<()>>,
}

impl AppState {
    /// Create new application state for the ledger named `ledger_name`.
    #[must_use]
    pub fn new(
        ledger_name: &str,
        clock: Arc<dyn Clock>,
        event_repository: Arc<dyn EventRepository>,
    ) -> Self {
        Self {
            clock,
            event_repository,
            registry_id: RoleRegistry::stream_id(ledger_name),
            board_id: QuestBoard::stream_id(ledger_name),
            write_gate: Arc::new(Mutex::new(())),
        }
    }

    /// Returns a role gate reading this ledger's registry.
    #[must_use]
    pub fn role_gate(&self) -> RoleRegistryGate {
        RoleRegistryGate::new(self.registry_id, Arc::clone(&self.event_repository))
    }

    /// Waits for exclusive write access to the ledger.
    pub async fn begin_write(&self) -> MutexGuard<'_, ()> {
        self.write_gate.lock().await
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("registry_id", &self.registry_id)
            .field("board_id", &self.board_id)
            .finish_non_exhaustive()
    }
}
