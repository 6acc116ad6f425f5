//! Domain error types.

use thiserror::Error;
use uuid::Uuid;

use crate::principal::Principal;

/// Top-level ledger error type.
///
/// Every variant is an ordinary, recoverable outcome that surfaces to the
/// caller as the `err` branch of a [`LedgerResponse`](crate::response::LedgerResponse).
#[derive(Debug, Error)]
pub enum DomainError {
    /// The caller lacks the role required for a privileged operation.
    #[error("principal {principal} is not authorized: requires role {required_role}")]
    Unauthorized {
        /// The caller that was rejected.
        principal: Principal,
        /// The role the operation requires.
        required_role: String,
    },

    /// A role name was empty, too long, or contained invalid characters.
    #[error("invalid role name: {0}")]
    InvalidRoleName(String),

    /// A principal identity was malformed.
    #[error("invalid principal: {0}")]
    InvalidPrincipal(String),

    /// The ledger has already been deployed.
    #[error("ledger already deployed: registry {0} has history")]
    AlreadyDeployed(Uuid),

    /// The referenced quest has no backing record.
    #[error("quest not found: {0}")]
    QuestNotFound(u64),

    /// The quest exists but is not accepting enrollment.
    #[error("quest {0} is closed")]
    QuestClosed(u64),

    /// The participant already holds an enrollment for the quest.
    #[error("principal {participant} is already enrolled in quest {quest_id}")]
    AlreadyEnrolled {
        /// The quest enrolled in.
        quest_id: u64,
        /// The enrolled participant.
        participant: Principal,
    },

    /// A quest definition failed validation.
    #[error("invalid quest definition: {0}")]
    InvalidQuest(String),

    /// No enrollment exists for the participant in the quest.
    #[error("principal {participant} is not enrolled in quest {quest_id}")]
    NotEnrolled {
        /// The quest looked up.
        quest_id: u64,
        /// The participant looked up.
        participant: Principal,
    },

    /// Optimistic concurrency conflict.
    #[error("concurrency conflict on aggregate {aggregate_id}: expected version {expected}, found {actual}")]
    ConcurrencyConflict {
        /// The aggregate that had the conflict.
        aggregate_id: Uuid,
        /// The expected version.
        expected: i64,
        /// The actual version found.
        actual: i64,
    },

    /// An infrastructure/persistence error.
    #[error("infrastructure error: {0}")]
    Infrastructure(String),
}

impl DomainError {
    /// Numeric failure code carried in the `(err u<code>)` response.
    #[must_use]
    pub fn code(&self) -> u32 {
        match self {
            Self::Unauthorized { .. } => 100,
            Self::InvalidRoleName(_) => 101,
            Self::InvalidPrincipal(_) => 102,
            Self::AlreadyDeployed(_) => 103,
            Self::QuestNotFound(_) => 200,
            Self::QuestClosed(_) => 201,
            Self::AlreadyEnrolled { .. } => 202,
            Self::InvalidQuest(_) => 203,
            Self::NotEnrolled { .. } => 204,
            Self::ConcurrencyConflict { .. } => 900,
            Self::Infrastructure(_) => 999,
        }
    }
}
