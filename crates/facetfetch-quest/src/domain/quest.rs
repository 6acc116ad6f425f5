//! Quest value types.

use std::fmt;

use facetfetch_core::error::DomainError;
use serde::{Deserialize, Serialize};

/// Longest accepted quest title, in characters.
pub const MAX_TITLE_LEN: usize = 64;

/// A quest identifier. Allocated from 1 in creation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QuestId(pub u64);

impl QuestId {
    /// The first id a quest board allocates.
    pub const FIRST: QuestId = QuestId(1);

    /// Returns the id following this one.
    #[must_use]
    pub fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl fmt::Display for QuestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Whether a quest accepts enrollment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuestStatus {
    /// Accepting enrollment.
    Open,
    /// No longer accepting enrollment.
    Closed,
}

/// The authored content of a quest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestDefinition {
    /// Display title.
    pub title: String,
    /// Goal to reach, such as a step count.
    pub target: Option<u64>,
    /// How many days the quest runs.
    pub duration_days: Option<u32>,
}

impl QuestDefinition {
    /// Validates and builds a quest definition. The title is trimmed.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidQuest` if the title is blank or longer
    /// than [`MAX_TITLE_LEN`] characters, or if `target` or `duration_days`
    /// is zero.
    pub fn new(
        title: &str,
        target: Option<u64>,
        duration_days: Option<u32>,
    ) -> Result<Self, DomainError> {
        let title = title.trim();
        if title.is_empty() {
            return Err(DomainError::InvalidQuest("title must not be blank".to_owned()));
        }
        if title.chars().count() > MAX_TITLE_LEN {
            return Err(DomainError::InvalidQuest(format!(
                "title exceeds {MAX_TITLE_LEN} characters"
            )));
        }
        if target == Some(0) {
            return Err(DomainError::InvalidQuest("target must be positive".to_owned()));
        }
        if duration_days == Some(0) {
            return Err(DomainError::InvalidQuest(
                "duration_days must be positive".to_owned(),
            ));
        }
        Ok(Self {
            title: title.to_owned(),
            target,
            duration_days,
        })
    }
}
