//! Query Layer - derived views over a collection snapshot
//!
//! Pure functions; nothing here touches storage.

pub mod search;
pub mod stats;

pub use search::search;
pub use stats::{MarksBand, RosterStats, parse_marks, stats};
