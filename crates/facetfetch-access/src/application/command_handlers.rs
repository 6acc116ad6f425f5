//! Command handlers for the Role Registry context.
//!
//! This module contains application-level command handler functions that
//! orchestrate domain logic: load aggregate, execute command, persist events.

use facetfetch_core::aggregate::AggregateRoot;
use facetfetch_core::clock::Clock;
use facetfetch_core::error::DomainError;
use facetfetch_core::principal::Principal;
use facetfetch_core::repository::{EventRepository, StoredEvent};
use tracing::{debug, info};
use uuid::Uuid;

use crate::domain::aggregates::{GrantOutcome, RoleRegistry};
use crate::domain::commands::{DeployLedger, GrantRole};
use crate::domain::events::{AccessEvent, AccessEventKind};
use crate::domain::role_name::RoleName;

/// Result of a successfully handled command.
#[derive(Debug)]
pub struct AccessCommandResult {
    /// The registry stream affected by the command.
    pub aggregate_id: Uuid,
    /// The stored events produced and persisted. Empty for a no-op grant.
    pub stored_events: Vec<StoredEvent>,
}

/// Reconstitutes a `RoleRegistry` from stored events.
///
/// An empty history yields an undeployed registry.
///
/// # Errors
///
/// Returns `DomainError::Infrastructure` if event deserialization fails.
pub(crate) fn reconstitute(
    registry_id: Uuid,
    existing_events: &[StoredEvent],
) -> Result<RoleRegistry, DomainError> {
    let mut registry = RoleRegistry::new(registry_id);
    for stored in existing_events {
        let kind: AccessEventKind = stored.decode_payload()?;
        registry.apply(&AccessEvent {
            metadata: stored.metadata(),
            kind,
        });
    }
    Ok(registry)
}

/// Loads and reconstitutes the registry stored under `registry_id`.
///
/// # Errors
///
/// Returns `DomainError` if loading or deserialization fails.
pub(crate) async fn load_registry(
    registry_id: Uuid,
    repo: &dyn EventRepository,
) -> Result<RoleRegistry, DomainError> {
    let existing_events = repo.load_events(registry_id).await?;
    reconstitute(registry_id, &existing_events)
}

async fn persist(
    registry: &RoleRegistry,
    repo: &dyn EventRepository,
) -> Result<Vec<StoredEvent>, DomainError> {
    let stored_events: Vec<StoredEvent> = registry
        .uncommitted_events()
        .iter()
        .map(StoredEvent::from_event)
        .collect();

    if !stored_events.is_empty() {
        repo.append_events(registry.id, registry.version(), &stored_events)
            .await?;
    }
    Ok(stored_events)
}

/// Handles the `DeployLedger` command: records the deployer and grants it
/// the platform admin role.
///
/// # Errors
///
/// Returns `DomainError::AlreadyDeployed` if the registry has history, or
/// `DomainError` if event loading or appending fails.
pub async fn handle_deploy_ledger(
    command: &DeployLedger,
    clock: &dyn Clock,
    repo: &dyn EventRepository,
) -> Result<AccessCommandResult, DomainError> {
    let mut registry = load_registry(command.registry_id, repo).await?;

    registry.deploy(command.deployer.clone(), command.correlation_id, clock)?;

    let stored_events = persist(&registry, repo).await?;
    info!(
        registry_id = %command.registry_id,
        deployer = %command.deployer,
        "ledger deployed"
    );

    Ok(AccessCommandResult {
        aggregate_id: command.registry_id,
        stored_events,
    })
}

/// Handles the `GrantRole` command.
///
/// Validates the role name and the grantee, then checks that the caller is
/// a platform admin, then records the grant. Re-granting a held role returns
/// an empty event list and appends nothing.
///
/// # Errors
///
/// Returns `DomainError::InvalidRoleName`, `DomainError::InvalidPrincipal`
/// or `DomainError::Unauthorized` on rejection, or `DomainError` if event
/// loading or appending fails. Nothing is persisted on any error.
pub async fn handle_grant_role(
    command: &GrantRole,
    clock: &dyn Clock,
    repo: &dyn EventRepository,
) -> Result<AccessCommandResult, DomainError> {
    let role = RoleName::parse(&command.role)?;
    let grantee = Principal::parse(&command.grantee)?;

    let mut registry = load_registry(command.registry_id, repo).await?;
    let outcome = registry.grant_role(
        role,
        grantee,
        &command.caller,
        command.correlation_id,
        clock,
    )?;

    if outcome == GrantOutcome::AlreadyGranted {
        debug!(
            role = %command.role,
            grantee = %command.grantee,
            "role already held; grant is a no-op"
        );
    }

    let stored_events = persist(&registry, repo).await?;

    Ok(AccessCommandResult {
        aggregate_id: command.registry_id,
        stored_events,
    })
}

#[cfg(test)]
mod tests {
    use facetfetch_core::clock::Clock;
    use facetfetch_core::error::DomainError;
    use facetfetch_core::event::EventMetadata;
    use facetfetch_core::principal::Principal;
    use facetfetch_core::repository::StoredEvent;
    use facetfetch_core::role_gate::PLATFORM_ADMIN_ROLE;
    use facetfetch_test_support::{
        EmptyEventRepository, FailingEventRepository, FixedClock, RecordingEventRepository,
        fixed_now, principal,
    };
    use uuid::Uuid;

    use crate::application::command_handlers::{handle_deploy_ledger, handle_grant_role};
    use crate::domain::commands::{DeployLedger, GrantRole};
    use crate::domain::events::{
        AccessEvent, AccessEventKind, LEDGER_DEPLOYED_EVENT_TYPE, LedgerDeployed,
        ROLE_GRANTED_EVENT_TYPE, RoleGranted,
    };
    use crate::domain::role_name::RoleName;

    fn stored(registry_id: Uuid, sequence_number: i64, kind: AccessEventKind) -> StoredEvent {
        let event_type = match &kind {
            AccessEventKind::LedgerDeployed(_) => LEDGER_DEPLOYED_EVENT_TYPE,
            AccessEventKind::RoleGranted(_) => ROLE_GRANTED_EVENT_TYPE,
        };
        StoredEvent::from_event(&AccessEvent {
            metadata: EventMetadata::for_command(
                event_type,
                registry_id,
                sequence_number,
                Uuid::new_v4(),
                fixed_now(),
            ),
            kind,
        })
    }

    /// History of a registry deployed by `deployer`.
    fn deployed_history(registry_id: Uuid, deployer: &Principal) -> Vec<StoredEvent> {
        vec![
            stored(
                registry_id,
                1,
                AccessEventKind::LedgerDeployed(LedgerDeployed {
                    deployer: deployer.clone(),
                }),
            ),
            stored(
                registry_id,
                2,
                AccessEventKind::RoleGranted(RoleGranted {
                    role: RoleName::parse(PLATFORM_ADMIN_ROLE).unwrap(),
                    grantor: deployer.clone(),
                    grantee: deployer.clone(),
                }),
            ),
        ]
    }

    fn grant(registry_id: Uuid, caller: &Principal, role: &str, grantee: &str) -> GrantRole {
        GrantRole {
            correlation_id: Uuid::new_v4(),
            registry_id,
            caller: caller.clone(),
            role: role.to_owned(),
            grantee: grantee.to_owned(),
        }
    }

    #[tokio::test]
    async fn test_handle_deploy_ledger_persists_two_events() {
        // Arrange
        let registry_id = Uuid::new_v4();
        let deployer = principal("deployer");
        let clock = FixedClock(fixed_now());
        let repo = RecordingEventRepository::new(Vec::new());
        let command = DeployLedger {
            correlation_id: Uuid::new_v4(),
            registry_id,
            deployer: deployer.clone(),
        };

        // Act
        let result = handle_deploy_ledger(&command, &clock, &repo).await.unwrap();

        // Assert
        assert_eq!(result.aggregate_id, registry_id);
        assert_eq!(result.stored_events.len(), 2);

        let appended = repo.appended_events();
        assert_eq!(appended.len(), 1);
        let (agg_id, expected_version, events) = &appended[0];
        assert_eq!(*agg_id, registry_id);
        assert_eq!(*expected_version, 0);
        assert_eq!(events[0].event_type, LEDGER_DEPLOYED_EVENT_TYPE);
        assert_eq!(events[1].event_type, ROLE_GRANTED_EVENT_TYPE);
        assert_eq!(events[1].sequence_number, 2);
    }

    #[tokio::test]
    async fn test_handle_deploy_ledger_rejects_redeploy() {
        let registry_id = Uuid::new_v4();
        let deployer = principal("deployer");
        let clock = FixedClock(fixed_now());
        let repo = RecordingEventRepository::new(deployed_history(registry_id, &deployer));
        let command = DeployLedger {
            correlation_id: Uuid::new_v4(),
            registry_id,
            deployer,
        };

        let result = handle_deploy_ledger(&command, &clock, &repo).await;

        assert!(matches!(result, Err(DomainError::AlreadyDeployed(id)) if id == registry_id));
        assert!(repo.appended_events().is_empty());
    }

    #[tokio::test]
    async fn test_handle_grant_role_by_deployer_persists_role_granted_event() {
        // Arrange
        let registry_id = Uuid::new_v4();
        let deployer = principal("deployer");
        let clock: &dyn Clock = &FixedClock(fixed_now());
        let repo = RecordingEventRepository::new(deployed_history(registry_id, &deployer));
        let command = grant(registry_id, &deployer, PLATFORM_ADMIN_ROLE, "wallet_1");

        // Act
        let result = handle_grant_role(&command, clock, &repo).await.unwrap();

        // Assert
        assert_eq!(result.stored_events.len(), 1);
        let appended = repo.appended_events();
        assert_eq!(appended.len(), 1);

        let (agg_id, expected_version, events) = &appended[0];
        assert_eq!(*agg_id, registry_id);
        assert_eq!(*expected_version, 2);

        let stored = &events[0];
        assert_eq!(stored.event_type, ROLE_GRANTED_EVENT_TYPE);
        assert_eq!(stored.sequence_number, 3);
        assert_eq!(stored.correlation_id, command.correlation_id);
        assert_eq!(stored.occurred_at, fixed_now());

        let payload: AccessEventKind = serde_json::from_value(stored.payload.clone()).unwrap();
        match payload {
            AccessEventKind::RoleGranted(granted) => {
                assert_eq!(granted.role.as_str(), PLATFORM_ADMIN_ROLE);
                assert_eq!(granted.grantor, deployer);
                assert_eq!(granted.grantee, principal("wallet_1"));
            }
            other => panic!("expected RoleGranted payload, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_handle_grant_role_for_held_role_appends_nothing() {
        let registry_id = Uuid::new_v4();
        let deployer = principal("deployer");
        let clock = FixedClock(fixed_now());
        let repo = RecordingEventRepository::new(deployed_history(registry_id, &deployer));
        let command = grant(registry_id, &deployer, PLATFORM_ADMIN_ROLE, "deployer");

        let result = handle_grant_role(&command, &clock, &repo).await.unwrap();

        assert!(result.stored_events.is_empty());
        assert!(repo.appended_events().is_empty());
    }

    #[tokio::test]
    async fn test_handle_grant_role_by_non_admin_returns_unauthorized() {
        // Arrange: wallet_1 tries to make itself an admin.
        let registry_id = Uuid::new_v4();
        let deployer = principal("deployer");
        let wallet_1 = principal("wallet_1");
        let clock = FixedClock(fixed_now());
        let repo = RecordingEventRepository::new(deployed_history(registry_id, &deployer));
        let command = grant(registry_id, &wallet_1, PLATFORM_ADMIN_ROLE, "wallet_1");

        // Act
        let result = handle_grant_role(&command, &clock, &repo).await;

        // Assert
        match result.unwrap_err() {
            DomainError::Unauthorized { principal, .. } => assert_eq!(principal, wallet_1),
            other => panic!("expected Unauthorized, got {other:?}"),
        }
        assert!(repo.appended_events().is_empty());
    }

    #[tokio::test]
    async fn test_handle_grant_role_validates_role_name_before_authorization() {
        // An unauthorized caller with a bad role name sees the shape error.
        let registry_id = Uuid::new_v4();
        let clock = FixedClock(fixed_now());
        let command = grant(registry_id, &principal("wallet_2"), "", "wallet_1");

        let result = handle_grant_role(&command, &clock, &EmptyEventRepository).await;

        assert!(matches!(result, Err(DomainError::InvalidRoleName(_))));
    }

    #[tokio::test]
    async fn test_handle_grant_role_rejects_malformed_grantee() {
        let registry_id = Uuid::new_v4();
        let deployer = principal("deployer");
        let clock = FixedClock(fixed_now());
        let repo = RecordingEventRepository::new(deployed_history(registry_id, &deployer));
        let command = grant(registry_id, &deployer, PLATFORM_ADMIN_ROLE, "wallet 1");

        let result = handle_grant_role(&command, &clock, &repo).await;

        assert!(matches!(result, Err(DomainError::InvalidPrincipal(_))));
        assert!(repo.appended_events().is_empty());
    }

    #[tokio::test]
    async fn test_handle_grant_role_propagates_repository_failure() {
        let clock = FixedClock(fixed_now());
        let command = grant(
            Uuid::new_v4(),
            &principal("deployer"),
            PLATFORM_ADMIN_ROLE,
            "wallet_1",
        );

        let result = handle_grant_role(&command, &clock, &FailingEventRepository).await;

        assert!(matches!(result, Err(DomainError::Infrastructure(_))));
    }
}
