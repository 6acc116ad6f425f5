//! Stream identifiers for ledger-wide aggregates.

use uuid::Uuid;

/// Namespace under which ledger stream ids are derived.
const LEDGER_NAMESPACE: Uuid = Uuid::from_u128(0x6d1f_3c0e_8b5a_4f7e_9a21_54c3_d0e8_a7b2);

/// Derives the stream id of a named registry within a ledger.
///
/// The same `(ledger, registry)` pair always maps to the same stream, and
/// distinct ledger names never share state.
#[must_use]
pub fn ledger_stream_id(ledger: &str, registry: &str) -> Uuid {
    Uuid::new_v5(&LEDGER_NAMESPACE, format!("{ledger}/{registry}").as_bytes())
}
