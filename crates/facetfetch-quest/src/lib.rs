//! Facet-Fetch quest ledger — Quest Enrollment bounded context.
//!
//! Responsible for the quest board: quest creation and closing by platform
//! admins, and open self-enrollment of participants.

pub mod application;
pub mod domain;
