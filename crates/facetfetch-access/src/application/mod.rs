//! Application services for the Role Registry context.

pub mod command_handlers;
pub mod query_handlers;
pub mod role_gate;
