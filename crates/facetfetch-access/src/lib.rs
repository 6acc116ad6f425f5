//! Facet-Fetch quest ledger — Role Registry bounded context.
//!
//! Responsible for ledger deployment, role grants, and answering
//! authorization checks for privileged operations elsewhere in the ledger.

pub mod application;
pub mod domain;
