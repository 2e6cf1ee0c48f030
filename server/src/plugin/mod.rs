//! Plugin activation and listing

pub mod handler;
pub mod service;

pub use service::{PluginInfo, PluginManager};

// vim: ts=4
