use std::env;
use std::str::FromStr;

use crate::domain::rules::{DEFAULT_TOTAL_ROUNDS, MAX_PLAYERS, MAX_TOTAL_ROUNDS, MIN_PLAYERS};
use crate::errors::domain::DomainError;

pub const TOTAL_ROUNDS_VAR: &str = "SCOREKEEPER_TOTAL_ROUNDS";
pub const MIN_PLAYERS_VAR: &str = "SCOREKEEPER_MIN_PLAYERS";
pub const MAX_PLAYERS_VAR: &str = "SCOREKEEPER_MAX_PLAYERS";

/// Game-level settings enforced when a game is initialized.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineConfig {
    /// Number of rounds; round N deals N cards.
    pub total_rounds: u32,
    pub min_players: usize,
    pub max_players: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            total_rounds: DEFAULT_TOTAL_ROUNDS,
            min_players: MIN_PLAYERS,
            max_players: MAX_PLAYERS,
        }
    }
}

impl EngineConfig {
    pub fn with_total_rounds(mut self, total_rounds: u32) -> Self {
        self.total_rounds = total_rounds;
        self
    }

    pub fn with_player_bounds(mut self, min_players: usize, max_players: usize) -> Self {
        self.min_players = min_players;
        self.max_players = max_players;
        self
    }

    /// Build from environment variables, falling back to defaults for unset ones.
    pub fn from_env() -> Result<Self, DomainError> {
        let defaults = Self::default();
        let config = Self {
            total_rounds: optional_var(TOTAL_ROUNDS_VAR)?.unwrap_or(defaults.total_rounds),
            min_players: optional_var(MIN_PLAYERS_VAR)?.unwrap_or(defaults.min_players),
            max_players: optional_var(MAX_PLAYERS_VAR)?.unwrap_or(defaults.max_players),
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        if self.total_rounds == 0 || self.total_rounds > MAX_TOTAL_ROUNDS {
            return Err(DomainError::config(format!(
                "total_rounds must be in 1..={MAX_TOTAL_ROUNDS}, got {}",
                self.total_rounds
            )));
        }
        if self.min_players == 0 || self.min_players > self.max_players {
            return Err(DomainError::config(format!(
                "player bounds must satisfy 1 <= min <= max, got {}..={}",
                self.min_players, self.max_players
            )));
        }
        Ok(())
    }
}

/// Read and parse an environment variable if it is set.
fn optional_var<T: FromStr>(name: &str) -> Result<Option<T>, DomainError> {
    match env::var(name) {
        Ok(raw) => raw.trim().parse::<T>().map(Some).map_err(|_| {
            DomainError::config(format!(
                "Environment variable '{name}' has an invalid value: '{raw}'"
            ))
        }),
        Err(_) => Ok(None),
    }
}
