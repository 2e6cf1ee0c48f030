//! Error types, shared with the adapters through `amona-types`

pub use amona_types::error::{ClResult, Error};

// vim: ts=4
