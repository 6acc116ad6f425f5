//! Aggregate roots for the Quest Enrollment context.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use facetfetch_core::aggregate::AggregateRoot;
use facetfetch_core::clock::Clock;
use facetfetch_core::error::DomainError;
use facetfetch_core::event::EventMetadata;
use facetfetch_core::principal::Principal;
use facetfetch_core::stream::ledger_stream_id;
use uuid::Uuid;

use super::events::{
    PARTICIPANT_ENROLLED_EVENT_TYPE, ParticipantEnrolled, QUEST_CLOSED_EVENT_TYPE,
    QUEST_CREATED_EVENT_TYPE, QuestClosed, QuestCreated, QuestEvent, QuestEventKind,
};
use super::quest::{QuestDefinition, QuestId, QuestStatus};

/// Registry name used to derive the quest board stream of a ledger.
pub const QUEST_BOARD_STREAM: &str = "quest-board";

/// A quest on the board together with its enrollments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Quest {
    /// The quest content.
    pub definition: QuestDefinition,
    /// Whether the quest accepts enrollment.
    pub status: QuestStatus,
    /// The admin that created the quest.
    pub created_by: Principal,
    /// When the quest was created.
    pub created_at: DateTime<Utc>,
    /// Enrollment time per participant.
    pub enrollments: BTreeMap<Principal, DateTime<Utc>>,
}

impl Quest {
    /// Returns whether `participant` is enrolled.
    #[must_use]
    pub fn is_enrolled(&self, participant: &Principal) -> bool {
        self.enrollments.contains_key(participant)
    }
}

/// The aggregate root for a ledger's quest board.
#[derive(Debug)]
pub struct QuestBoard {
    /// Aggregate identifier.
    pub id: Uuid,
    /// Current version (event count).
    pub(crate) version: i64,
    /// Quests keyed by id.
    pub(crate) quests: BTreeMap<QuestId, Quest>,
    /// Uncommitted events pending persistence.
    uncommitted_events: Vec<QuestEvent>,
}

impl QuestBoard {
    /// Creates an empty board.
    #[must_use]
    pub fn new(id: Uuid) -> Self {
        Self {
            id,
            version: 0,
            quests: BTreeMap::new(),
            uncommitted_events: Vec::new(),
        }
    }

    /// Returns the quest board stream id for `ledger`.
    #[must_use]
    pub fn stream_id(ledger: &str) -> Uuid {
        ledger_stream_id(ledger, QUEST_BOARD_STREAM)
    }

    /// Returns the quest with `quest_id`, if it exists.
    #[must_use]
    pub fn quest(&self, quest_id: QuestId) -> Option<&Quest> {
        self.quests.get(&quest_id)
    }

    /// Returns the id the next created quest will receive.
    #[must_use]
    pub fn next_quest_id(&self) -> QuestId {
        self.quests
            .last_key_value()
            .map_or(QuestId::FIRST, |(id, _)| id.next())
    }

    fn record(
        &mut self,
        event_type: &str,
        kind: QuestEventKind,
        correlation_id: Uuid,
        clock: &dyn Clock,
    ) {
        let event = QuestEvent {
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

    fn existing(&self, quest_id: QuestId) -> Result<&Quest, DomainError> {
        self.quests
            .get(&quest_id)
            .ok_or(DomainError::QuestNotFound(quest_id.0))
    }

    /// Adds a quest to the board and returns its id.
    ///
    /// Authorization is the caller's responsibility.
    pub fn create_quest(
        &mut self,
        definition: QuestDefinition,
        creator: &Principal,
        correlation_id: Uuid,
        clock: &dyn Clock,
    ) -> QuestId {
        let quest_id = self.next_quest_id();
        self.record(
            QUEST_CREATED_EVENT_TYPE,
            QuestEventKind::QuestCreated(QuestCreated {
                quest_id,
                created_by: creator.clone(),
                definition,
            }),
            correlation_id,
            clock,
        );
        quest_id
    }

    /// Stops a quest from accepting enrollment.
    ///
    /// Authorization is the caller's responsibility.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::QuestNotFound` if the quest does not exist, or
    /// `DomainError::QuestClosed` if it is already closed.
    pub fn close_quest(
        &mut self,
        quest_id: QuestId,
        closer: &Principal,
        correlation_id: Uuid,
        clock: &dyn Clock,
    ) -> Result<(), DomainError> {
        if self.existing(quest_id)?.status == QuestStatus::Closed {
            return Err(DomainError::QuestClosed(quest_id.0));
        }

        self.record(
            QUEST_CLOSED_EVENT_TYPE,
            QuestEventKind::QuestClosed(QuestClosed {
                quest_id,
                closed_by: closer.clone(),
            }),
            correlation_id,
            clock,
        );
        Ok(())
    }

    /// Enrolls `participant` in a quest.
    ///
    /// # Errors
    ///
    /// Returns, checked in this order, `DomainError::QuestNotFound`,
    /// `DomainError::QuestClosed` or `DomainError::AlreadyEnrolled`. No
    /// event is recorded on error.
    pub fn enroll(
        &mut self,
        quest_id: QuestId,
        participant: &Principal,
        correlation_id: Uuid,
        clock: &dyn Clock,
    ) -> Result<(), DomainError> {
        let quest = self.existing(quest_id)?;
        if quest.status == QuestStatus::Closed {
            return Err(DomainError::QuestClosed(quest_id.0));
        }
        if quest.is_enrolled(participant) {
            return Err(DomainError::AlreadyEnrolled {
                quest_id: quest_id.0,
                participant: participant.clone(),
            });
        }

        self.record(
            PARTICIPANT_ENROLLED_EVENT_TYPE,
            QuestEventKind::ParticipantEnrolled(ParticipantEnrolled {
                quest_id,
                participant: participant.clone(),
            }),
            correlation_id,
            clock,
        );
        Ok(())
    }
}

impl AggregateRoot for QuestBoard {
    type Event = QuestEvent;

    fn aggregate_id(&self) -> Uuid {
        self.id
    }

    fn version(&self) -> i64 {
        self.version
    }

    fn apply(&mut self, event: &Self::Event) {
        match &event.kind {
            QuestEventKind::QuestCreated(payload) => {
                self.quests.entry(payload.quest_id).or_insert_with(|| Quest {
                    definition: payload.definition.clone(),
                    status: QuestStatus::Open,
                    created_by: payload.created_by.clone(),
                    created_at: event.metadata.occurred_at,
                    enrollments: BTreeMap::new(),
                });
            }
            QuestEventKind::QuestClosed(payload) => {
                if let Some(quest) = self.quests.get_mut(&payload.quest_id) {
                    quest.status = QuestStatus::Closed;
                }
            }
            QuestEventKind::ParticipantEnrolled(payload) => {
                if let Some(quest) = self.quests.get_mut(&payload.quest_id) {
                    quest
                        .enrollments
                        .entry(payload.participant.clone())
                        .or_insert(event.metadata.occurred_at);
                }
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
