//! Domain model for the Quest Enrollment context.

pub mod aggregates;
pub mod commands;
pub mod events;
pub mod quest;
