//! Commands for the Quest Enrollment context.

use facetfetch_core::command::Command;
use facetfetch_core::principal::Principal;
use uuid::Uuid;

/// Command to add a quest to the board. Requires the platform admin role.
#[derive(Debug, Clone)]
pub struct CreateQuest {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The quest board stream.
    pub board_id: Uuid,
    /// The principal creating the quest.
    pub caller: Principal,
    /// Display title (validated by the handler).
    pub title: String,
    /// Optional goal, such as a step count.
    pub target: Option<u64>,
    /// Optional length of the quest in days.
    pub duration_days: Option<u32>,
}

/// Command to stop a quest from accepting enrollment. Requires the platform
/// admin role.
#[derive(Debug, Clone)]
pub struct CloseQuest {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The quest board stream.
    pub board_id: Uuid,
    /// The principal closing the quest.
    pub caller: Principal,
    /// The quest to close.
    pub quest_id: u64,
}

/// Command to enroll the caller in a quest.
#[derive(Debug, Clone)]
pub struct EnrollInQuest {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The quest board stream.
    pub board_id: Uuid,
    /// The enrolling principal.
    pub caller: Principal,
    /// The quest to enroll in.
    pub quest_id: u64,
}

impl Command for CreateQuest {
    fn command_type(&self) -> &'static str {
        "quest.create_quest"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }

    fn caller(&self) -> &Principal {
        &self.caller
    }
}

impl Command for CloseQuest {
    fn command_type(&self) -> &'static str {
        "quest.close_quest"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }

    fn caller(&self) -> &Principal {
        &self.caller
    }
}

impl Command for EnrollInQuest {
    fn command_type(&self) -> &'static str {
        "quest.enroll_in_quest"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }

    fn caller(&self) -> &Principal {
        &self.caller
    }
}
