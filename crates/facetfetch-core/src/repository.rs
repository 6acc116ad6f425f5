//! Event repository abstraction.

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::DomainError;
use crate::event::{DomainEvent, EventMetadata};

/// Stored representation of a domain event.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredEvent {
    /// Unique event identifier.
    pub event_id: Uuid,
    /// Aggregate this event belongs to.
    pub aggregate_id: Uuid,
    /// Event type name for deserialization routing.
    pub event_type: String,
    /// Serialized event payload.
    pub payload: serde_json::Value,
    /// Sequence number within the aggregate stream.
    pub sequence_number: i64,
    /// Correlation ID for tracing.
    pub correlation_id: Uuid,
    /// Causation ID linking to the causing event/command.
    pub causation_id: Uuid,
    /// Timestamp of event creation.
    pub occurred_at: chrono::DateTime<chrono::Utc>,
}

impl StoredEvent {
    /// Flattens a domain event into its stored form.
    pub fn from_event<E: DomainEvent>(event: &E) -> Self {
        let meta = event.metadata();
        Self {
            event_id: meta.event_id,
            aggregate_id: meta.aggregate_id,
            event_type: event.event_type().to_owned(),
            payload: event.to_payload(),
            sequence_number: meta.sequence_number,
            correlation_id: meta.correlation_id,
            causation_id: meta.causation_id,
            occurred_at: meta.occurred_at,
        }
    }

    /// Rebuilds the metadata envelope for reconstitution.
    #[must_use]
    pub fn metadata(&self) -> EventMetadata {
        EventMetadata {
            event_id: self.event_id,
            event_type: self.event_type.clone(),
            aggregate_id: self.aggregate_id,
            sequence_number: self.sequence_number,
            correlation_id: self.correlation_id,
            causation_id: self.causation_id,
            occurred_at: self.occurred_at,
        }
    }

    /// Deserializes the payload into a context's event kind.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Infrastructure` if the payload does not match.
    pub fn decode_payload<K: serde::de::DeserializeOwned>(&self) -> Result<K, DomainError> {
        serde_json::from_value(self.payload.clone()).map_err(|e| {
            DomainError::Infrastructure(format!(
                "event deserialization failed for {}: {e}",
                self.event_id
            ))
        })
    }
}

/// Repository trait for loading and appending domain events.
#[async_trait]
pub trait EventRepository: Send + Sync {
    /// Load all events for a given aggregate, ordered by sequence number.
    async fn load_events(&self, aggregate_id: Uuid) -> Result<Vec<StoredEvent>, DomainError>;

    /// Append new events to an aggregate stream with optimistic concurrency.
    /// `expected_version` is the last known sequence number.
    async fn append_events(
        &self,
        aggregate_id: Uuid,
        expected_version: i64,
        events: &[StoredEvent],
    ) -> Result<(), DomainError>;
}
