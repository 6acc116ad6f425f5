//! Application services for the Quest Enrollment context.

pub mod command_handlers;
pub mod query_handlers;
