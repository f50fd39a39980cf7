//! Utility functions module
//!
//! Contains helpers for option labels, key-to-option mapping and
//! room code normalisation.

pub mod format;

// Re-export commonly used functions
pub use format::{
    count_label, normalize_room_code, option_from_char, option_label, progress_percent,
};
