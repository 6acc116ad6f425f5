//! Role names.

use std::fmt;

use facetfetch_core::error::DomainError;
use serde::{Deserialize, Serialize};

/// Longest accepted role name, in bytes.
pub const MAX_ROLE_NAME_LEN: usize = 32;

/// A validated role name: 1 to 32 printable ASCII characters.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RoleName(String);

impl RoleName {
    /// Parses a role name.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidRoleName` if `raw` is empty, longer than
    /// [`MAX_ROLE_NAME_LEN`], or contains anything but printable ASCII.
    pub fn parse(raw: &str) -> Result<Self, DomainError> {
        if raw.is_empty() {
            return Err(DomainError::InvalidRoleName(
                "role name must not be empty".to_owned(),
            ));
        }
        if raw.len() > MAX_ROLE_NAME_LEN {
            return Err(DomainError::InvalidRoleName(format!(
                "role name exceeds {MAX_ROLE_NAME_LEN} characters"
            )));
        }
        if !raw.bytes().all(|b| b.is_ascii_graphic()) {
            return Err(DomainError::InvalidRoleName(format!(
                "role name {raw:?} must be printable ASCII without spaces"
            )));
        }
        Ok(Self(raw.to_owned()))
    }

    /// Returns the name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RoleName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for RoleName {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<RoleName> for String {
    fn from(value: RoleName) -> Self {
        value.0
    }
}
