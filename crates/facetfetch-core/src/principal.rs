//! Principal identity.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Longest accepted principal identity, in characters.
pub const MAX_PRINCIPAL_LEN: usize = 128;

/// An opaque actor identity.
///
/// Principals are compared and hashed but never interpreted: a Stacks
/// address, a wallet alias and an account handle are all equally valid.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Principal(String);

impl Principal {
    /// Parses a principal identity.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidPrincipal` if `raw` is empty, longer than
    /// [`MAX_PRINCIPAL_LEN`] characters, or contains whitespace or control
    /// characters.
    pub fn parse(raw: &str) -> Result<Self, DomainError> {
        if raw.is_empty() {
            return Err(DomainError::InvalidPrincipal(
                "principal must not be empty".to_owned(),
            ));
        }
        if raw.chars().count() > MAX_PRINCIPAL_LEN {
            return Err(DomainError::InvalidPrincipal(format!(
                "principal exceeds {MAX_PRINCIPAL_LEN} characters"
            )));
        }
        if raw.chars().any(|c| c.is_whitespace() || c.is_control()) {
            return Err(DomainError::InvalidPrincipal(format!(
                "principal {raw:?} contains whitespace or control characters"
            )));
        }
        Ok(Self(raw.to_owned()))
    }

    /// Returns the identity as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Principal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for Principal {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Principal> for String {
    fn from(value: Principal) -> Self {
        value.0
    }
}
