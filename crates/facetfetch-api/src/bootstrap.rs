//! Ledger deployment at server start-up.

use facetfetch_access::application::{command_handlers as access_commands, query_handlers};
use facetfetch_access::domain::commands::DeployLedger;
use facetfetch_core::error::DomainError;
use facetfetch_core::principal::Principal;
use facetfetch_quest::application::command_handlers as quest_commands;
use facetfetch_quest::application::query_handlers as quest_queries;
use facetfetch_quest::domain::commands::CreateQuest;
use facetfetch_quest::domain::quest::QuestDefinition;
use tracing::{info, warn};
use uuid::Uuid;

use crate::state::AppState;

/// Deploys the ledger unless its role registry already has a deployer,
/// then creates whichever of `genesis_quests` the board does not hold yet.
///
/// A fresh deployment makes `deployer` the first platform admin. Genesis
/// quest `i` receives id `i + 1`; quests are created as the recorded
/// deployer, so a start that failed midway is completed by the next one.
/// Every title is validated before anything is recorded. Returns whether a
/// deployment happened.
///
/// # Errors
///
/// Returns `DomainError::InvalidQuest` for a malformed genesis title, or
/// `DomainError` if any deployment or seeding step fails.
pub async fn deploy_if_needed(
    state: &AppState,
    deployer: &Principal,
    genesis_quests: &[String],
) -> Result<bool, DomainError> {
    for title in genesis_quests {
        QuestDefinition::new(title, None, None)?;
    }

    let _write = state.begin_write().await;
    let repo = state.event_repository.as_ref();

    let registry = query_handlers::get_role_registry(state.registry_id, repo).await?;
    let (deployed, seeder) = match registry.deployer {
        Some(existing) => {
            if existing != deployer.as_str() {
                warn!(
                    deployer = %existing,
                    configured = %deployer,
                    "ledger was deployed by a different principal; keeping existing deployment"
                );
            }
            info!(version = registry.version, "ledger already deployed");
            (false, Principal::parse(&existing)?)
        }
        None => {
            access_commands::handle_deploy_ledger(
                &DeployLedger {
                    correlation_id: Uuid::new_v4(),
                    registry_id: state.registry_id,
                    deployer: deployer.clone(),
                },
                state.clock.as_ref(),
                repo,
            )
            .await?;
            info!(deployer = %deployer, "ledger deployed");
            (true, deployer.clone())
        }
    };

    // Quest ids are dense from 1, so the first `seeded` genesis quests exist.
    let seeded = quest_queries::list_quests(state.board_id, repo)
        .await?
        .quests
        .len();
    let roles = state.role_gate();
    let correlation_id = Uuid::new_v4();
    for title in genesis_quests.iter().skip(seeded) {
        let command = CreateQuest {
            correlation_id,
            board_id: state.board_id,
            caller: seeder.clone(),
            title: title.clone(),
            target: None,
            duration_days: None,
        };
        let result =
            quest_commands::handle_create_quest(&command, state.clock.as_ref(), &roles, repo)
                .await?;
        info!(quest_id = %result.quest_id, title = %title, "genesis quest created");
    }

    Ok(deployed)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use facetfetch_access::application::query_handlers::{get_role_registry, has_role};
    use facetfetch_core::role_gate::PLATFORM_ADMIN_ROLE;
    use facetfetch_event_store::memory_event_repository::InMemoryEventRepository;
    use facetfetch_quest::application::query_handlers::list_quests;
    use facetfetch_test_support::{FixedClock, fixed_now, principal};

    use super::*;

    fn memory_state() -> AppState {
        AppState::new(
            "bootstrap-test",
            Arc::new(FixedClock(fixed_now())),
            Arc::new(InMemoryEventRepository::new()),
        )
    }

    #[tokio::test]
    async fn test_deploy_grants_admin_and_seeds_quests_in_order() {
        // Arrange
        let state = memory_state();
        let deployer = principal("deployer");
        let titles = vec!["Genesis Quest".to_owned(), "Hydration Week".to_owned()];

        // Act
        let deployed = deploy_if_needed(&state, &deployer, &titles).await.unwrap();

        // Assert
        assert!(deployed);
        let repo = state.event_repository.as_ref();
        assert!(
            has_role(state.registry_id, PLATFORM_ADMIN_ROLE, &deployer, repo)
                .await
                .unwrap()
        );
        let board = list_quests(state.board_id, repo).await.unwrap();
        let seeded: Vec<(u64, &str)> = board
            .quests
            .iter()
            .map(|q| (q.quest_id, q.title.as_str()))
            .collect();
        assert_eq!(seeded, vec![(1, "Genesis Quest"), (2, "Hydration Week")]);
    }

    #[tokio::test]
    async fn test_second_deploy_is_skipped() {
        let state = memory_state();
        let deployer = principal("deployer");
        let titles = vec!["Genesis Quest".to_owned()];
        deploy_if_needed(&state, &deployer, &titles).await.unwrap();

        let deployed = deploy_if_needed(&state, &principal("someone-else"), &titles)
            .await
            .unwrap();

        assert!(!deployed);
        let board = list_quests(state.board_id, state.event_repository.as_ref())
            .await
            .unwrap();
        assert_eq!(board.quests.len(), 1);
    }

    #[tokio::test]
    async fn test_invalid_genesis_title_records_nothing() {
        // Arrange
        let state = memory_state();
        let deployer = principal("deployer");
        let titles = vec!["Genesis Quest".to_owned(), "x".repeat(65)];

        // Act
        let result = deploy_if_needed(&state, &deployer, &titles).await;

        // Assert
        assert!(matches!(result, Err(DomainError::InvalidQuest(_))));
        let registry = get_role_registry(state.registry_id, state.event_repository.as_ref())
            .await
            .unwrap();
        assert!(registry.deployer.is_none());
        assert_eq!(registry.version, 0);
    }

    #[tokio::test]
    async fn test_restart_after_invalid_title_deploys_and_seeds() {
        let state = memory_state();
        let deployer = principal("deployer");
        let _ = deploy_if_needed(&state, &deployer, &["x".repeat(65)]).await;

        let deployed = deploy_if_needed(&state, &deployer, &["Genesis Quest".to_owned()])
            .await
            .unwrap();

        assert!(deployed);
        let board = list_quests(state.board_id, state.event_repository.as_ref())
            .await
            .unwrap();
        assert_eq!(board.quests[0].quest_id, 1);
        assert_eq!(board.quests[0].title, "Genesis Quest");
    }

    #[tokio::test]
    async fn test_restart_seeds_genesis_quests_missing_from_deployed_ledger() {
        // Arrange: deployed, but seeding never ran.
        let state = memory_state();
        let deployer = principal("deployer");
        deploy_if_needed(&state, &deployer, &[]).await.unwrap();
        let titles = vec!["Genesis Quest".to_owned(), "Hydration Week".to_owned()];

        // Act
        let deployed = deploy_if_needed(&state, &deployer, &titles).await.unwrap();

        // Assert
        assert!(!deployed);
        let board = list_quests(state.board_id, state.event_repository.as_ref())
            .await
            .unwrap();
        let seeded: Vec<(u64, &str)> = board
            .quests
            .iter()
            .map(|q| (q.quest_id, q.title.as_str()))
            .collect();
        assert_eq!(seeded, vec![(1, "Genesis Quest"), (2, "Hydration Week")]);
    }

    #[tokio::test]
    async fn test_restart_with_other_configured_deployer_seeds_as_recorded_deployer() {
        let state = memory_state();
        deploy_if_needed(&state, &principal("deployer"), &[]).await.unwrap();

        deploy_if_needed(&state, &principal("someone-else"), &["Genesis Quest".to_owned()])
            .await
            .unwrap();

        let board = list_quests(state.board_id, state.event_repository.as_ref())
            .await
            .unwrap();
        assert_eq!(board.quests[0].created_by, "deployer");
    }
}
