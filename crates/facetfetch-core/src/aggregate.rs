//! Aggregate root abstraction.

use uuid::Uuid;

use crate::event::DomainEvent;

/// Trait for ledger aggregates that reconstitute from their event stream.
pub trait AggregateRoot: Send + Sync {
    /// The event type this aggregate produces and consumes.
    type Event: DomainEvent;

    /// Returns the stream identifier the aggregate is persisted under.
    fn aggregate_id(&self) -> Uuid;

    /// Returns the current version (number of committed events applied).
    fn version(&self) -> i64;

    /// Apply an event to mutate internal state.
    fn apply(&mut self, event: &Self::Event);

    /// Returns uncommitted events produced by command handling.
    fn uncommitted_events(&self) -> &[Self::Event];

    /// Clears uncommitted events after persistence.
    fn clear_uncommitted_events(&mut self);

    /// Sequence number the next recorded event will carry.
    #[allow(clippy::cast_possible_wrap)]
    fn next_sequence_number(&self) -> i64 {
        self.version() + self.uncommitted_events().len() as i64 + 1
    }
}
