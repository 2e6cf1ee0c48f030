//! Admin back end of the Amona theme.
//!
//! # Features
//!
//! - Admin settings store with per-key type coercion
//! - Version-gated addon notices with per-user dismissal tracking
//! - Recommended plugin activation and deactivation
//! - Anti-forgery tokens bound to user, action and time

#![forbid(unsafe_code)]

pub mod core;
pub mod error;
pub mod notice;
pub mod plugin;
pub mod prelude;
pub mod routes;
pub mod settings;
pub mod types;
pub mod utils;

pub use crate::core::app::{App, AppBuilder, AppState};

// vim: ts=4
