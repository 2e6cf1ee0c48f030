//! Core subsystem. Application state, authentication and request checks.

pub mod app;
pub mod extract;
pub mod guard;
pub mod handler;
pub mod middleware;
pub mod nonce;

pub use crate::core::extract::Auth;
pub use crate::core::guard::{FormFields, NONCE_FIELD, form_fields};

// vim: ts=4
