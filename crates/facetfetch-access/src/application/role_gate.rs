//! `RoleGate` backed by a ledger's role registry stream.

use std::sync::Arc;

use async_trait::async_trait;
use facetfetch_core::error::DomainError;
use facetfetch_core::principal::Principal;
use facetfetch_core::repository::EventRepository;
use facetfetch_core::role_gate::RoleGate;
use uuid::Uuid;

use crate::application::query_handlers;

/// Answers authorization checks by reading the role registry.
#[derive(Clone)]
pub struct RoleRegistryGate {
    registry_id: Uuid,
    repo: Arc<dyn EventRepository>,
}

impl RoleRegistryGate {
    /// Creates a gate over the registry stored under `registry_id`.
    #[must_use]
    pub fn new(registry_id: Uuid, repo: Arc<dyn EventRepository>) -> Self {
        Self { registry_id, repo }
    }
}

impl std::fmt::Debug for RoleRegistryGate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RoleRegistryGate")
            .field("registry_id", &self.registry_id)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl RoleGate for RoleRegistryGate {
    async fn has_role(&self, role: &str, principal: &Principal) -> Result<bool, DomainError> {
        query_handlers::has_role(self.registry_id, role, principal, self.repo.as_ref()).await
    }
}
