//! Domain model for the Role Registry context.

pub mod aggregates;
pub mod commands;
pub mod events;
pub mod role_name;
