//! In-memory implementation of the `EventRepository` trait.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use tracing::debug;
use uuid::Uuid;

use facetfetch_core::error::DomainError;
use facetfetch_core::repository::{EventRepository, StoredEvent};

/// Event repository that keeps every stream in process memory.
///
/// Applies the same optimistic concurrency rule as the PostgreSQL store: an
/// append succeeds only if `expected_version` equals the stream's last
/// sequence number.
#[derive(Debug, Default)]
pub struct InMemoryEventRepository {
    streams: Mutex<HashMap<Uuid, Vec<StoredEvent>>>,
}

impl InMemoryEventRepository {
    /// Creates an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(
        &self,
    ) -> Result<std::sync::MutexGuard<'_, HashMap<Uuid, Vec<StoredEvent>>>, DomainError> {
        self.streams
            .lock()
            .map_err(|_| DomainError::Infrastructure("in-memory event store poisoned".into()))
    }
}

#[async_trait]
impl EventRepository for InMemoryEventRepository {
    async fn load_events(&self, aggregate_id: Uuid) -> Result<Vec<StoredEvent>, DomainError> {
        Ok(self.lock()?.get(&aggregate_id).cloned().unwrap_or_default())
    }

    async fn append_events(
        &self,
        aggregate_id: Uuid,
        expected_version: i64,
        events: &[StoredEvent],
    ) -> Result<(), DomainError> {
        let mut streams = self.lock()?;
        let stream = streams.entry(aggregate_id).or_default();
        let actual = stream.last().map_or(0, |e| e.sequence_number);
        if actual != expected_version {
            return Err(DomainError::ConcurrencyConflict {
                aggregate_id,
                expected: expected_version,
                actual,
            });
        }
        stream.extend_from_slice(events);

        debug!(%aggregate_id, count = events.len(), "appended events");
        Ok(())
    }
}
