//! Shared types, adapter traits, and core utilities for the Amona admin service.
//!
//! The adapter traits live here so that storage backends can be built without
//! pulling in the HTTP layer of the server crate.

pub mod auth_adapter;
pub mod error;
pub mod options_adapter;
pub mod prelude;
pub mod roles;
pub mod types;

// vim: ts=4
