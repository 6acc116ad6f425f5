//! Two-variant ledger response.
//!
//! Every public operation reports its outcome in the form an on-chain
//! receipt would: `(ok true)`, `(ok u1)` or `(err u202)`.

use std::fmt;

use serde::{Serialize, Serializer};

use crate::error::DomainError;

/// Success payload of a ledger operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LedgerValue {
    /// A boolean payload, rendered `true`/`false`.
    Bool(bool),
    /// An unsigned integer payload, rendered `u<n>`.
    Uint(u64),
}

impl fmt::Display for LedgerValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(value) => write!(f, "{value}"),
            Self::Uint(value) => write!(f, "u{value}"),
        }
    }
}

/// Outcome of a ledger operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LedgerResponse {
    /// The operation committed.
    Ok(LedgerValue),
    /// The operation was rejected with a failure code.
    Err(u32),
}

impl LedgerResponse {
    /// The `(ok true)` response.
    #[must_use]
    pub fn ok_true() -> Self {
        Self::Ok(LedgerValue::Bool(true))
    }

    /// An `(ok u<n>)` response.
    #[must_use]
    pub fn ok_uint(value: u64) -> Self {
        Self::Ok(LedgerValue::Uint(value))
    }

    /// Returns true if the operation committed.
    #[must_use]
    pub fn is_ok(&self) -> bool {
        matches!(self, Self::Ok(_))
    }
}

impl From<&DomainError> for LedgerResponse {
    fn from(err: &DomainError) -> Self {
        Self::Err(err.code())
    }
}

impl fmt::Display for LedgerResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ok(value) => write!(f, "(ok {value})"),
            Self::Err(code) => write!(f, "(err u{code})"),
        }
    }
}

impl Serialize for LedgerResponse {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
