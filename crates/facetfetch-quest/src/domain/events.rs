//! Domain events for the Quest Enrollment context.

use facetfetch_core::event::{DomainEvent, EventMetadata};
use facetfetch_core::principal::Principal;
use serde::{Deserialize, Serialize};

use super::quest::{QuestDefinition, QuestId};

/// Event type for `QuestCreated`.
pub const QUEST_CREATED_EVENT_TYPE: &str = "quest.created";
/// Event type for `QuestClosed`.
pub const QUEST_CLOSED_EVENT_TYPE: &str = "quest.closed";
/// Event type for `ParticipantEnrolled`.
pub const PARTICIPANT_ENROLLED_EVENT_TYPE: &str = "quest.participant_enrolled";

/// Emitted when a quest is added to the board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestCreated {
    /// The allocated quest identifier.
    pub quest_id: QuestId,
    /// The admin that created the quest.
    pub created_by: Principal,
    /// The quest content.
    pub definition: QuestDefinition,
}

/// Emitted when a quest stops accepting enrollment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestClosed {
    /// The closed quest.
    pub quest_id: QuestId,
    /// The admin that closed the quest.
    pub closed_by: Principal,
}

/// Emitted when a participant enrolls in a quest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParticipantEnrolled {
    /// The quest enrolled in.
    pub quest_id: QuestId,
    /// The enrolling participant.
    pub participant: Principal,
}

/// Event payload variants for the Quest Enrollment context.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum QuestEventKind {
    /// A quest has been created.
    QuestCreated(QuestCreated),
    /// A quest has been closed.
    QuestClosed(QuestClosed),
    /// A participant has enrolled.
    ParticipantEnrolled(ParticipantEnrolled),
}

/// Domain event envelope for the Quest Enrollment context.
#[derive(Debug, Clone)]
pub struct QuestEvent {
    /// Event metadata.
    pub metadata: EventMetadata,
    /// Event-specific payload.
    pub kind: QuestEventKind,
}

impl DomainEvent for QuestEvent {
    fn event_type(&self) -> &'static str {
        match &self.kind {
            QuestEventKind::QuestCreated(_) => QUEST_CREATED_EVENT_TYPE,
            QuestEventKind::QuestClosed(_) => QUEST_CLOSED_EVENT_TYPE,
            QuestEventKind::ParticipantEnrolled(_) => PARTICIPANT_ENROLLED_EVENT_TYPE,
        }
    }

    fn to_payload(&self) -> serde_json::Value {
        // Serialization of derived Serialize types to Value is infallible.
        serde_json::to_value(&self.kind).expect("QuestEventKind serialization is infallible")
    }

    fn metadata(&self) -> &EventMetadata {
        &self.metadata
    }
}
