//! Aggregate roots for the Role Registry context.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use facetfetch_core::aggregate::AggregateRoot;
use facetfetch_core::clock::Clock;
use facetfetch_core::error::DomainError;
use facetfetch_core::event::EventMetadata;
use facetfetch_core::principal::Principal;
use facetfetch_core::role_gate::PLATFORM_ADMIN_ROLE;
use facetfetch_core::stream::ledger_stream_id;
use uuid::Uuid;

use super::events::{
    AccessEvent, AccessEventKind, LEDGER_DEPLOYED_EVENT_TYPE, LedgerDeployed,
    ROLE_GRANTED_EVENT_TYPE, RoleGranted,
};
use super::role_name::RoleName;

/// Registry name used to derive the role registry stream of a ledger.
pub const ROLE_REGISTRY_STREAM: &str = "role-registry";

/// A recorded role grant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleGrant {
    /// The principal that issued the grant.
    pub grantor: Principal,
    /// When the grant was recorded.
    pub granted_at: DateTime<Utc>,
}

/// Outcome of a `grant_role` call that passed authorization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GrantOutcome {
    /// A new grant was recorded.
    Granted,
    /// The grantee already held the role; nothing was recorded.
    AlreadyGranted,
}

/// The aggregate root for a ledger's role registry.
#[derive(Debug)]
pub struct RoleRegistry {
    /// Aggregate identifier.
    pub id: Uuid,
    /// Current version (event count).
    pub(crate) version: i64,
    /// The deploying principal, once deployed.
    pub(crate) deployer: Option<Principal>,
    /// Active grants keyed by role then grantee.
    pub(crate) grants: BTreeMap<(RoleName, Principal), RoleGrant>,
    /// Uncommitted events pending persistence.
    uncommitted_events: Vec<AccessEvent>,
}

impl RoleRegistry {
    /// Creates an empty, undeployed registry.
    #[must_use]
    pub fn new(id: Uuid) -> Self {
        Self {
            id,
            version: 0,
            deployer: None,
            grants: BTreeMap::new(),
            uncommitted_events: Vec::new(),
        }
    }

    /// Returns the role registry stream id for `ledger`.
    #[must_use]
    pub fn stream_id(ledger: &str) -> Uuid {
        ledger_stream_id(ledger, ROLE_REGISTRY_STREAM)
    }

    /// Returns the deploying principal, if the ledger has been deployed.
    #[must_use]
    pub fn deployer(&self) -> Option<&Principal> {
        self.deployer.as_ref()
    }

    /// Returns whether `principal` holds `role`.
    #[must_use]
    pub fn has_role(&self, role: &RoleName, principal: &Principal) -> bool {
        self.grants.contains_key(&(role.clone(), principal.clone()))
    }

    fn record(
        &mut self,
        event_type: &str,
        kind: AccessEventKind,
        correlation_id: Uuid,
        clock: &dyn Clock,
    ) {
        let event = AccessEvent {
            metadata: EventMetadata::for_command(
                event_type,
                self.id,
                self.next_sequence_number(),
                correlation_id,
                clock.now(),
            ),
            kind,
        };
        self.uncommitted_events.push(event);
    }

    /// Deploys the ledger, producing `LedgerDeployed` followed by a
    /// `RoleGranted` that makes the deployer the first platform admin.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::AlreadyDeployed` if the registry has history.
    pub fn deploy(
        &mut self,
        deployer: Principal,
        correlation_id: Uuid,
        clock: &dyn Clock,
    ) -> Result<(), DomainError> {
        if self.version > 0 || !self.uncommitted_events.is_empty() {
            return Err(DomainError::AlreadyDeployed(self.id));
        }
        let admin_role = RoleName::parse(PLATFORM_ADMIN_ROLE)?;

        self.record(
            LEDGER_DEPLOYED_EVENT_TYPE,
            AccessEventKind::LedgerDeployed(LedgerDeployed {
                deployer: deployer.clone(),
            }),
            correlation_id,
            clock,
        );
        self.record(
            ROLE_GRANTED_EVENT_TYPE,
            AccessEventKind::RoleGranted(RoleGranted {
                role: admin_role,
                grantor: deployer.clone(),
                grantee: deployer,
            }),
            correlation_id,
            clock,
        );
        Ok(())
    }

    /// Grants `role` to `grantee` on behalf of `grantor`.
    ///
    /// Only platform admins may grant. Re-granting a held role succeeds
    /// without recording anything.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Unauthorized` if `grantor` is not a platform
    /// admin. No event is recorded in that case.
    pub fn grant_role(
        &mut self,
        role: RoleName,
        grantee: Principal,
        grantor: &Principal,
        correlation_id: Uuid,
        clock: &dyn Clock,
    ) -> Result<GrantOutcome, DomainError> {
        let admin_role = RoleName::parse(PLATFORM_ADMIN_ROLE)?;
        if !self.has_role(&admin_role, grantor) {
            return Err(DomainError::Unauthorized {
                principal: grantor.clone(),
                required_role: PLATFORM_ADMIN_ROLE.to_owned(),
            });
        }
        if self.has_role(&role, &grantee) {
            return Ok(GrantOutcome::AlreadyGranted);
        }

        self.record(
            ROLE_GRANTED_EVENT_TYPE,
            AccessEventKind::RoleGranted(RoleGranted {
                role,
                grantor: grantor.clone(),
                grantee,
            }),
            correlation_id,
            clock,
        );
        Ok(GrantOutcome::Granted)
    }
}

impl AggregateRoot for RoleRegistry {
    type Event = AccessEvent;

    fn aggregate_id(&self) -> Uuid {
        self.id
    }

    fn version(&self) -> i64 {
        self.version
    }

    fn apply(&mut self, event: &Self::Event) {
        match &event.kind {
            AccessEventKind::LedgerDeployed(payload) => {
                self.deployer = Some(payload.deployer.clone());
            }
            AccessEventKind::RoleGranted(payload) => {
                self.grants
                    .entry((payload.role.clone(), payload.grantee.clone()))
                    .or_insert_with(|| RoleGrant {
                        grantor: payload.grantor.clone(),
                        granted_at: event.metadata.occurred_at,
                    });
            }
        }
        self.version += 1;
    }

    fn uncommitted_events(&self) -> &[Self::Event] {
        &self.uncommitted_events
    }

    fn clear_uncommitted_events(&mut self) {
        self.uncommitted_events.clear();
    }
}
