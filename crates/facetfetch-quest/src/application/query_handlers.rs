//! Query handlers for the Quest Enrollment context.
//!
//! This module contains query handlers that reconstitute the quest board
//! from stored events and return read-only view DTOs.

use chrono::{DateTime, Utc};
use facetfetch_core::error::DomainError;
use facetfetch_core::principal::Principal;
use facetfetch_core::repository::EventRepository;
use serde::Serialize;
use uuid::Uuid;

use crate::application::command_handlers;
use crate::domain::aggregates::Quest;
use crate::domain::quest::{QuestId, QuestStatus};

/// Read-only view of a single enrollment.
#[derive(Debug, Serialize)]
pub struct EnrollmentView {
    /// The quest enrolled in.
    pub quest_id: u64,
    /// The enrolled participant.
    pub participant: String,
    /// When the enrollment was recorded.
    pub enrolled_at: DateTime<Utc>,
}

/// Read-only view of a quest.
#[derive(Debug, Serialize)]
pub struct QuestView {
    /// The quest identifier.
    pub quest_id: u64,
    /// Display title.
    pub title: String,
    /// Optional goal.
    pub target: Option<u64>,
    /// Optional length in days.
    pub duration_days: Option<u32>,
    /// Whether the quest accepts enrollment.
    pub status: QuestStatus,
    /// The admin that created the quest.
    pub created_by: String,
    /// When the quest was created.
    pub created_at: DateTime<Utc>,
    /// Enrolled participants, in principal order.
    pub participants: Vec<String>,
}

/// Read-only view of the whole quest board.
#[derive(Debug, Serialize)]
pub struct QuestBoardView {
    /// The board stream identifier.
    pub board_id: Uuid,
    /// Quests in id order.
    pub quests: Vec<QuestView>,
    /// Current version (event count).
    pub version: i64,
}

fn quest_view(quest_id: QuestId, quest: &Quest) -> QuestView {
    QuestView {
        quest_id: quest_id.0,
        title: quest.definition.title.clone(),
        target: quest.definition.target,
        duration_days: quest.definition.duration_days,
        status: quest.status,
        created_by: quest.created_by.to_string(),
        created_at: quest.created_at,
        participants: quest.enrollments.keys().map(ToString::to_string).collect(),
    }
}

/// Retrieves a single quest.
///
/// # Errors
///
/// Returns `DomainError::QuestNotFound` if the quest does not exist, or
/// `DomainError` if loading or deserialization fails.
pub async fn get_quest(
    board_id: Uuid,
    quest_id: u64,
    repo: &dyn EventRepository,
) -> Result<QuestView, DomainError> {
    let board = command_handlers::load_board(board_id, repo).await?;
    board
        .quest(QuestId(quest_id))
        .map(|quest| quest_view(QuestId(quest_id), quest))
        .ok_or(DomainError::QuestNotFound(quest_id))
}

/// Lists every quest on the board.
///
/// # Errors
///
/// Returns `DomainError` if loading or deserialization fails.
pub async fn list_quests(
    board_id: Uuid,
    repo: &dyn EventRepository,
) -> Result<QuestBoardView, DomainError> {
    let board = command_handlers::load_board(board_id, repo).await?;
    let quests = board
        .quests
        .iter()
        .map(|(quest_id, quest)| quest_view(*quest_id, quest))
        .collect();
    Ok(QuestBoardView {
        board_id,
        quests,
        version: board.version,
    })
}

/// Retrieves the enrollment of `participant` in a quest.
///
/// # Errors
///
/// Returns `DomainError::QuestNotFound` if the quest does not exist,
/// `DomainError::NotEnrolled` if the participant has no enrollment, or
/// `DomainError` if loading or deserialization fails.
pub async fn get_enrollment(
    board_id: Uuid,
    quest_id: u64,
    participant: &Principal,
    repo: &dyn EventRepository,
) -> Result<EnrollmentView, DomainError> {
    let board = command_handlers::load_board(board_id, repo).await?;
    let quest = board
        .quest(QuestId(quest_id))
        .ok_or(DomainError::QuestNotFound(quest_id))?;
    let enrolled_at = quest
        .enrollments
        .get(participant)
        .ok_or_else(|| DomainError::NotEnrolled {
            quest_id,
            participant: participant.clone(),
        })?;
    Ok(EnrollmentView {
        quest_id,
        participant: participant.to_string(),
        enrolled_at: *enrolled_at,
    })
}

#[cfg(test)]
mod tests {
    use facetfetch_core::error::DomainError;
    use facetfetch_core::event::EventMetadata;
    use facetfetch_core::repository::StoredEvent;
    use facetfetch_test_support::{
        EmptyEventRepository, FailingEventRepository, RecordingEventRepository, fixed_now,
        principal,
    };
    use uuid::Uuid;

    use crate::application::query_handlers::{get_enrollment, get_quest, list_quests};
    use crate::domain::events::{
        PARTICIPANT_ENROLLED_EVENT_TYPE, ParticipantEnrolled, QUEST_CREATED_EVENT_TYPE,
        QuestCreated, QuestEvent, QuestEventKind,
    };
    use crate::domain::quest::{QuestDefinition, QuestId, QuestStatus};

    fn history(board_id: Uuid) -> Vec<StoredEvent> {
        let created = |quest_id, title| {
            (
                QUEST_CREATED_EVENT_TYPE,
                QuestEventKind::QuestCreated(QuestCreated {
                    quest_id: QuestId(quest_id),
                    created_by: principal("deployer"),
                    definition: QuestDefinition::new(title, Some(10_000), None).unwrap(),
                }),
            )
        };
        let enrolled = |participant| {
            (
                PARTICIPANT_ENROLLED_EVENT_TYPE,
                QuestEventKind::ParticipantEnrolled(ParticipantEnrolled {
                    quest_id: QuestId(1),
                    participant: principal(participant),
                }),
            )
        };
        let events = [
            created(1, "Genesis Quest"),
            created(2, "Hydration Week"),
            enrolled("wallet_2"),
            enrolled("wallet_1"),
        ];
        events
            .into_iter()
            .zip(1..)
            .map(|((event_type, kind), sequence_number)| {
                StoredEvent::from_event(&QuestEvent {
                    metadata: EventMetadata::for_command(
                        event_type,
                        board_id,
                        sequence_number,
                        Uuid::new_v4(),
                        fixed_now(),
                    ),
                    kind,
                })
            })
            .collect()
    }

    #[tokio::test]
    async fn test_get_quest_returns_sorted_participants() {
        // Arrange
        let board_id = Uuid::new_v4();
        let repo = RecordingEventRepository::new(history(board_id));

        // Act
        let view = get_quest(board_id, 1, &repo).await.unwrap();

        // Assert
        assert_eq!(view.quest_id, 1);
        assert_eq!(view.title, "Genesis Quest");
        assert_eq!(view.target, Some(10_000));
        assert_eq!(view.status, QuestStatus::Open);
        assert_eq!(view.created_by, "deployer");
        assert_eq!(view.participants, vec!["wallet_1", "wallet_2"]);
    }

    #[tokio::test]
    async fn test_get_quest_for_unknown_id_returns_quest_not_found() {
        let board_id = Uuid::new_v4();
        let repo = RecordingEventRepository::new(history(board_id));

        let result = get_quest(board_id, 3, &repo).await;

        assert!(matches!(result, Err(DomainError::QuestNotFound(3))));
    }

    #[tokio::test]
    async fn test_list_quests_returns_quests_in_id_order() {
        let board_id = Uuid::new_v4();
        let repo = RecordingEventRepository::new(history(board_id));

        let view = list_quests(board_id, &repo).await.unwrap();

        assert_eq!(view.board_id, board_id);
        assert_eq!(view.version, 4);
        let titles: Vec<&str> = view.quests.iter().map(|q| q.title.as_str()).collect();
        assert_eq!(titles, vec!["Genesis Quest", "Hydration Week"]);
        assert!(view.quests[1].participants.is_empty());
    }

    #[tokio::test]
    async fn test_list_quests_on_empty_board_is_empty() {
        let view = list_quests(Uuid::new_v4(), &EmptyEventRepository)
            .await
            .unwrap();

        assert!(view.quests.is_empty());
        assert_eq!(view.version, 0);
    }

    #[tokio::test]
    async fn test_get_enrollment_returns_enrollment_time() {
        let board_id = Uuid::new_v4();
        let repo = RecordingEventRepository::new(history(board_id));

        let view = get_enrollment(board_id, 1, &principal("wallet_1"), &repo)
            .await
            .unwrap();

        assert_eq!(view.quest_id, 1);
        assert_eq!(view.participant, "wallet_1");
        assert_eq!(view.enrolled_at, fixed_now());
    }

    #[tokio::test]
    async fn test_get_enrollment_for_unenrolled_participant_returns_not_enrolled() {
        let board_id = Uuid::new_v4();
        let repo = RecordingEventRepository::new(history(board_id));

        let result = get_enrollment(board_id, 2, &principal("wallet_1"), &repo).await;

        match result.unwrap_err() {
            DomainError::NotEnrolled {
                quest_id,
                participant,
            } => {
                assert_eq!(quest_id, 2);
                assert_eq!(participant, principal("wallet_1"));
            }
            other => panic!("expected NotEnrolled, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_list_quests_propagates_repository_failure() {
        let result = list_quests(Uuid::new_v4(), &FailingEventRepository).await;

        assert!(matches!(result, Err(DomainError::Infrastructure(_))));
    }
}
