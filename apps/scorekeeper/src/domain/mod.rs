//! Domain layer: pure scoring, progression and standings logic.

pub mod bonus;
pub mod engine;
pub mod player;
pub mod progression;
pub mod round;
pub mod rules;
pub mod scoring;
pub mod standings;

#[cfg(test)]
mod tests_engine;
#[cfg(test)]
mod tests_scoring;

// Re-exports for ergonomics
pub use bonus::apply_bonus;
pub use engine::{EngineSnapshot, ScoreEngine};
pub use player::{Player, PlayerId};
pub use progression::{Advance, Phase, RoundProgression, RoundView};
pub use round::{PlayerEntry, RoundRecord, RoundResult, RoundState};
pub use rules::cards_dealt_for_round;
pub use scoring::compute_base_score;
pub use standings::{compute_standings, PlayerStanding};
