//! Event stores for the Facet-Fetch quest ledger.
//!
//! `PgEventRepository` is the durable store. `InMemoryEventRepository` backs
//! database-less runs and isolated test ledgers.

pub mod memory_event_repository;
pub mod pg_event_repository;
