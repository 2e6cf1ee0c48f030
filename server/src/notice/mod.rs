//! Version-gated warning notices
//!
//! `version` orders version strings, `compat` maps addon releases to the
//! oldest compatible release, `addon` builds the notices and `tracker`
//! remembers per-user dismissals.

pub mod addon;
pub mod compat;
pub mod handler;
pub mod tracker;
pub mod version;

pub use addon::{AddonInfo, Notice};
pub use tracker::{NoticeDismissalRecord, NoticeState, NoticeTracker};

// vim: ts=4
