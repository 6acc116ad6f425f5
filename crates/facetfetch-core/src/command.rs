//! Command abstractions.

use uuid::Uuid;

use crate::principal::Principal;

/// Trait that all ledger commands implement.
pub trait Command: Send + Sync + std::fmt::Debug {
    /// The operation name for this command (for logging/routing).
    fn command_type(&self) -> &'static str;

    /// Correlation ID to trace this command through the system.
    fn correlation_id(&self) -> Uuid;

    /// The principal on whose behalf the command executes.
    fn caller(&self) -> &Principal;
}
