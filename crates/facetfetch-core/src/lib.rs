//! Facet-Fetch Core — shared ledger abstractions.
//!
//! This crate defines the traits and value types that both the role registry
//! and the quest enrollment registry depend on. It contains no
//! infrastructure code.

pub mod aggregate;
pub mod clock;
pub mod command;
pub mod error;
pub mod event;
pub mod principal;
pub mod repository;
pub mod response;
pub mod role_gate;
pub mod stream;
