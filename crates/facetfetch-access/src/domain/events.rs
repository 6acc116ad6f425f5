//! Domain events for the Role Registry context.

use facetfetch_core::event::{DomainEvent, EventMetadata};
use facetfetch_core::principal::Principal;
use serde::{Deserialize, Serialize};

use super::role_name::RoleName;

/// Event type for `LedgerDeployed`.
pub const LEDGER_DEPLOYED_EVENT_TYPE: &str = "access.ledger_deployed";
/// Event type for `RoleGranted`.
pub const ROLE_GRANTED_EVENT_TYPE: &str = "access.role_granted";

/// Emitted once, when the ledger is deployed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerDeployed {
    /// The deploying principal.
    pub deployer: Principal,
}

/// Emitted when a principal is granted a role. This is the audit record of
/// who granted what to whom.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleGranted {
    /// The role granted.
    pub role: RoleName,
    /// The principal that issued the grant.
    pub grantor: Principal,
    /// The principal receiving the role.
    pub grantee: Principal,
}

/// Event payload variants for the Role Registry context.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum AccessEventKind {
    /// The ledger has been deployed.
    LedgerDeployed(LedgerDeployed),
    /// A role has been granted.
    RoleGranted(RoleGranted),
}

/// Domain event envelope for the Role Registry context.
#[derive(Debug, Clone)]
pub struct AccessEvent {
    /// Event metadata.
    pub metadata: EventMetadata,
    /// Event-specific payload.
    pub kind: AccessEventKind,
}

impl DomainEvent for AccessEvent {
    fn event_type(&self) -> &'static str {
        match &self.kind {
            AccessEventKind::LedgerDeployed(_) => LEDGER_DEPLOYED_EVENT_TYPE,
            AccessEventKind::RoleGranted(_) => ROLE_GRANTED_EVENT_TYPE,
        }
    }

    fn to_payload(&self) -> serde_json::Value {
        // Serialization of derived Serialize types to Value is infallible.
        serde_json::to_value(&self.kind).expect("AccessEventKind serialization is infallible")
    }

    fn metadata(&self) -> &EventMetadata {
        &self.metadata
    }
}
