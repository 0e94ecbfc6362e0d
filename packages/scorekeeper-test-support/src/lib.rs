//! Scorekeeper test support utilities
//!
//! Shared by unit and integration tests: one-time logging initialization and
//! helpers for generating unique test data.

pub mod logging;
pub mod unique;

pub use unique::{unique_player_id, unique_str};
