pub use crate::core::app::App;
pub use amona_types::error::{ClResult, Error};
pub use amona_types::types::{Timestamp, UserId};

pub use tracing::{debug, error, info, warn};

// vim: ts=4
