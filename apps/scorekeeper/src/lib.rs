#![deny(clippy::wildcard_imports)]
#![cfg_attr(test, allow(clippy::wildcard_imports))]

//! Round and score engine for bid-based trick-taking card games.
//!
//! The presentation layer feeds validated per-player bids, tricks taken and
//! optional bonuses into a [`ScoreEngine`]; the engine scores each round,
//! gates progression between rounds, and derives ranked standings.

pub mod config;
pub mod domain;
pub mod errors;

// Re-exports for public API
pub use config::EngineConfig;
pub use domain::{
    Advance, EngineSnapshot, Phase, Player, PlayerEntry, PlayerId, PlayerStanding, RoundRecord,
    RoundResult, RoundView, ScoreEngine,
};
pub use errors::{DomainError, NotFoundKind, ValidationKind};

// Auto-initialize logging for unit tests
#[cfg(test)]
#[ctor::ctor]
fn init_test_logging() {
    scorekeeper_test_support::logging::init();
}
