//! Shared test mocks and utilities for the Facet-Fetch quest ledger.

mod clock;
mod principal;
mod repository;
mod role_gate;

pub use clock::{FixedClock, fixed_now};
pub use principal::principal;
pub use repository::{EmptyEventRepository, FailingEventRepository, RecordingEventRepository};
pub use role_gate::{FailingRoleGate, StaticRoleGate};
