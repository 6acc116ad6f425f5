//! Command handlers for the Quest Enrollment context.
//!
//! This module contains application-level command handler functions that
//! orchestrate domain logic: load aggregate, execute command, persist events.

use facetfetch_core::aggregate::AggregateRoot;
use facetfetch_core::clock::Clock;
use facetfetch_core::error::DomainError;
use facetfetch_core::repository::{EventRepository, StoredEvent};
use facetfetch_core::role_gate::{PLATFORM_ADMIN_ROLE, RoleGate};
use tracing::info;
use uuid::Uuid;

use crate::domain::aggregates::QuestBoard;
use crate::domain::commands::{CloseQuest, CreateQuest, EnrollInQuest};
use crate::domain::events::{QuestEvent, QuestEventKind};
use crate::domain::quest::{QuestDefinition, QuestId};

/// Result of a successfully handled command.
#[derive(Debug)]
pub struct QuestCommandResult {
    /// The quest board stream affected by the command.
    pub aggregate_id: Uuid,
    /// The quest the command acted on.
    pub quest_id: QuestId,
    /// The stored events produced and persisted.
    pub stored_events: Vec<StoredEvent>,
}

/// Reconstitutes a `QuestBoard` from stored events.
///
/// # Errors
///
/// Returns `DomainError::Infrastructure` if event deserialization fails.
pub(crate) fn reconstitute(
    board_id: Uuid,
    existing_events: &[StoredEvent],
) -> Result<QuestBoard, DomainError> {
    let mut board = QuestBoard::new(board_id);
    for stored in existing_events {
        let kind: QuestEventKind = stored.decode_payload()?;
        board.apply(&QuestEvent {
            metadata: stored.metadata(),
            kind,
        });
    }
    Ok(board)
}

/// Loads and reconstitutes the board stored under `board_id`.
///
/// # Errors
///
/// Returns `DomainError` if loading or deserialization fails.
pub(crate) async fn load_board(
    board_id: Uuid,
    repo: &dyn EventRepository,
) -> Result<QuestBoard, DomainError> {
    let existing_events = repo.load_events(board_id).await?;
    reconstitute(board_id, &existing_events)
}

async fn persist(
    board: &QuestBoard,
    repo: &dyn EventRepository,
) -> Result<Vec<StoredEvent>, DomainError> {
    let stored_events: Vec<StoredEvent> = board
        .uncommitted_events()
        .iter()
        .map(StoredEvent::from_event)
        .collect();

    repo.append_events(board.id, board.version(), &stored_events)
        .await?;
    Ok(stored_events)
}

/// Handles the `CreateQuest` command.
///
/// Validates the definition, then checks that the caller is a platform
/// admin, then allocates the next quest id.
///
/// # Errors
///
/// Returns `DomainError::InvalidQuest` or `DomainError::Unauthorized` on
/// rejection, or `DomainError` if role lookup, event loading or appending
/// fails.
pub async fn handle_create_quest(
    command: &CreateQuest,
    clock: &dyn Clock,
    roles: &dyn RoleGate,
    repo: &dyn EventRepository,
) -> Result<QuestCommandResult, DomainError> {
    let definition =
        QuestDefinition::new(&command.title, command.target, command.duration_days)?;
    roles
        .require_role(PLATFORM_ADMIN_ROLE, &command.caller)
        .await?;

    let mut board = load_board(command.board_id, repo).await?;
    let quest_id = board.create_quest(definition, &command.caller, command.correlation_id, clock);

    let stored_events = persist(&board, repo).await?;
    info!(
        quest_id = %quest_id,
        created_by = %command.caller,
        "quest created"
    );

    Ok(QuestCommandResult {
        aggregate_id: command.board_id,
        quest_id,
        stored_events,
    })
}

/// Handles the `CloseQuest` command.
///
/// A missing quest is reported before authorization is checked.
///
/// # Errors
///
/// Returns `DomainError::QuestNotFound`, `DomainError::Unauthorized` or
/// `DomainError::QuestClosed` on rejection, or `DomainError` if role lookup,
/// event loading or appending fails.
pub async fn handle_close_quest(
    command: &CloseQuest,
    clock: &dyn Clock,
    roles: &dyn RoleGate,
    repo: &dyn EventRepository,
) -> Result<QuestCommandResult, DomainError> {
    let quest_id = QuestId(command.quest_id);
    let mut board = load_board(command.board_id, repo).await?;
    if board.quest(quest_id).is_none() {
        return Err(DomainError::QuestNotFound(command.quest_id));
    }
    roles
        .require_role(PLATFORM_ADMIN_ROLE, &command.caller)
        .await?;

    board.close_quest(quest_id, &command.caller, command.correlation_id, clock)?;

    let stored_events = persist(&board, repo).await?;
    info!(quest_id = %quest_id, closed_by = %command.caller, "quest closed");

    Ok(QuestCommandResult {
        aggregate_id: command.board_id,
        quest_id,
        stored_events,
    })
}

/// Handles the `EnrollInQuest` command. Open to any principal.
///
/// # Errors
///
/// Returns `DomainError::QuestNotFound`, `DomainError::QuestClosed` or
/// `DomainError::AlreadyEnrolled` on rejection, or `DomainError` if event
/// loading or appending fails. Nothing is persisted on any error.
pub async fn handle_enroll_in_quest(
    command: &EnrollInQuest,
    clock: &dyn Clock,
    repo: &dyn EventRepository,
) -> Result<QuestCommandResult, DomainError> {
    let quest_id = QuestId(command.quest_id);
    let mut board = load_board(command.board_id, repo).await?;

    board.enroll(quest_id, &command.caller, command.correlation_id, clock)?;

    let stored_events = persist(&board, repo).await?;
    info!(quest_id = %quest_id, participant = %command.caller, "participant enrolled");

    Ok(QuestCommandResult {
        aggregate_id: command.board_id,
        quest_id,
        stored_events,
    })
}
