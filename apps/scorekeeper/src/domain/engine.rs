//! Score engine façade.
//!
//! Owns the player list, the open round's input collection, and the round
//! progression. Every operation validates fully before touching state, so a
//! rejected call leaves the engine exactly as it was.
//!
//! The engine does no locking. A host serving several games keeps one
//! engine per game and serializes access to it.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use tracing::{debug, info};

use crate::config::EngineConfig;
use crate::domain::player::{Player, PlayerId};
use crate::domain::progression::{Advance, Phase, RoundProgression, RoundView};
use crate::domain::round::{PlayerEntry, RoundRecord, RoundResult, RoundState};
use crate::domain::standings::{compute_standings, leaders, PlayerStanding};
use crate::errors::domain::{DomainError, NotFoundKind, ValidationKind};

/// Read model handed to the presentation layer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineSnapshot {
    pub phase: Phase,
    pub current_round: u32,
    pub total_rounds: u32,
    pub game_ended: bool,
    pub standings: Vec<PlayerStanding>,
    pub round_history: Vec<RoundRecord>,
}

#[derive(Debug, Clone)]
pub struct ScoreEngine {
    config: EngineConfig,
    players: Vec<Player>,
    progression: RoundProgression,
    round: RoundState,
}

impl ScoreEngine {
    /// Start a game with the default player bounds.
    pub fn new(players: Vec<Player>, total_rounds: u32) -> Result<Self, DomainError> {
        Self::with_config(players, EngineConfig::default().with_total_rounds(total_rounds))
    }

    pub fn with_config(players: Vec<Player>, config: EngineConfig) -> Result<Self, DomainError> {
        config.validate()?;
        validate_roster(&players, &config)?;
        let progression = RoundProgression::new(config.total_rounds)?;
        let round = RoundState::new(1, players.len())?;

        info!(
            players = players.len(),
            total_rounds = config.total_rounds,
            "Game initialized"
        );
        Ok(Self {
            config,
            players,
            progression,
            round,
        })
    }

    /// Reset all state for a new game, keeping this engine's player bounds.
    pub fn initialize(
        &mut self,
        players: Vec<Player>,
        total_rounds: u32,
    ) -> Result<(), DomainError> {
        let config = self.config.with_total_rounds(total_rounds);
        *self = Self::with_config(players, config)?;
        Ok(())
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn phase(&self) -> Phase {
        self.progression.phase()
    }

    pub fn current_round(&self) -> u32 {
        self.progression.current_round()
    }

    pub fn total_rounds(&self) -> u32 {
        self.progression.total_rounds()
    }

    /// Cards dealt in the open round (equals the round number).
    pub fn cards_dealt(&self) -> u32 {
        self.round.cards_dealt()
    }

    pub fn is_game_ended(&self) -> bool {
        self.progression.is_game_complete()
    }

    /// True once the current round's results are recorded.
    pub fn can_advance(&self) -> bool {
        self.progression.can_advance()
    }

    pub fn hands_required(&self) -> usize {
        self.round.hands_required()
    }

    pub fn hands_completed(&self) -> usize {
        self.round.hands_completed()
    }

    pub fn staged_entry(&self, player_id: &PlayerId) -> Option<&PlayerEntry> {
        self.round.entry(player_id)
    }

    /// Round currently shown by `go_to_round`, if any.
    pub fn reviewing(&self) -> Option<u32> {
        self.progression.reviewing()
    }

    /// Seat a late joiner. Only allowed while the open round is still
    /// collecting results; the newcomer scores 0 for earlier rounds.
    pub fn add_player(&mut self, player: Player) -> Result<(), DomainError> {
        self.progression.require_open_round()?;
        if self.players.iter().any(|p| p.id == player.id) {
            return Err(DomainError::validation(
                ValidationKind::DuplicatePlayer,
                format!("player {} is already seated", player.id),
            ));
        }
        if self.players.len() >= self.config.max_players {
            return Err(DomainError::validation(
                ValidationKind::PlayerCount,
                format!("table is full ({} players)", self.config.max_players),
            ));
        }

        info!(player_id = %player.id, round = self.round.round_no(), "Player joined");
        self.players.push(player);
        self.round.set_hands_required(self.players.len());
        Ok(())
    }

    /// Record one player's numbers for the open round. Staging the same
    /// player again replaces the earlier entry.
    pub fn stage_entry(
        &mut self,
        player_id: PlayerId,
        entry: PlayerEntry,
    ) -> Result<(), DomainError> {
        self.progression.require_open_round()?;
        self.require_player(&player_id)?;
        self.round.stage(player_id.clone(), entry)?;
        debug!(
            %player_id,
            round = self.round.round_no(),
            completed = self.round.hands_completed(),
            required = self.round.hands_required(),
            "Entry staged"
        );
        Ok(())
    }

    /// Drop one player's draft entry. Returns the entry that was staged.
    pub fn unstage_entry(
        &mut self,
        player_id: &PlayerId,
    ) -> Result<Option<PlayerEntry>, DomainError> {
        self.progression.require_open_round()?;
        self.require_player(player_id)?;
        Ok(self.round.unstage(player_id))
    }

    pub fn clear_staged(&mut self) {
        self.round.clear();
    }

    /// Submit the entries collected with `stage_entry`.
    pub fn submit_staged(&mut self) -> Result<Vec<PlayerStanding>, DomainError> {
        self.progression.require_open_round()?;
        if !self.round.is_complete() {
            let missing: Vec<String> = self
                .players
                .iter()
                .filter(|p| self.round.entry(&p.id).is_none())
                .map(|p| p.id.to_string())
                .collect();
            return Err(DomainError::validation(
                ValidationKind::MissingPlayer,
                format!("missing entries for: {}", missing.join(", ")),
            ));
        }
        let entries: Vec<(PlayerId, PlayerEntry)> = self
            .round
            .entries()
            .iter()
            .map(|(id, entry)| (id.clone(), *entry))
            .collect();
        self.submit_round(entries)
    }

    /// Score and record the open round from one entry per seated player.
    ///
    /// Returns the standings after the round is recorded.
    pub fn submit_round<I>(&mut self, entries: I) -> Result<Vec<PlayerStanding>, DomainError>
    where
        I: IntoIterator<Item = (PlayerId, PlayerEntry)>,
    {
        let round_no = self.progression.require_open_round()?;
        let cards_dealt = self.round.cards_dealt();
        let entries: Vec<(PlayerId, PlayerEntry)> = entries.into_iter().collect();

        let mut seen = BTreeSet::new();
        for (player_id, entry) in &entries {
            self.require_player(player_id)?;
            if !seen.insert(player_id) {
                return Err(DomainError::validation(
                    ValidationKind::DuplicatePlayer,
                    format!("player {player_id} appears twice in round {round_no}"),
                ));
            }
            entry.validate(cards_dealt)?;
        }

        // Seating order, so every record lists players the same way.
        let mut results = Vec::with_capacity(self.players.len());
        for player in &self.players {
            let entry = entries
                .iter()
                .find(|(id, _)| id == &player.id)
                .map(|(_, entry)| entry)
                .ok_or_else(|| {
                    DomainError::validation(
                        ValidationKind::MissingPlayer,
                        format!("round {round_no} has no entry for player {}", player.id),
                    )
                })?;
            results.push(RoundResult::score(player.id.clone(), entry, cards_dealt)?);
        }

        let record = RoundRecord {
            round_no,
            cards_dealt,
            results,
            timestamp: OffsetDateTime::now_utc(),
        };
        let ids: Vec<PlayerId> = self.players.iter().map(|p| p.id.clone()).collect();
        self.progression.submit_round(record, &ids)?;
        self.round.clear();

        info!(round = round_no, cards_dealt, "Round recorded");
        Ok(self.standings())
    }

    /// Move past a recorded round. Advancing past the last round ends the game.
    pub fn advance_round(&mut self) -> Result<Advance, DomainError> {
        let next_round = match self.progression.phase() {
            Phase::RoundComplete { round } if round < self.progression.total_rounds() => {
                Some(RoundState::new(round + 1, self.players.len())?)
            }
            _ => None,
        };

        let outcome = self.progression.advance()?;
        if let Some(round) = next_round {
            info!(round = round.round_no(), "Advanced to next round");
            self.round = round;
        }
        Ok(outcome)
    }

    /// Show a recorded round (or the open one) without reopening it.
    pub fn go_to_round(&mut self, target: u32) -> Result<RoundView, DomainError> {
        self.progression.go_to_round(target)
    }

    /// End the game now. Idempotent.
    pub fn end_game(&mut self) {
        self.progression.end_game();
        self.round.clear();
    }

    pub fn standings(&self) -> Vec<PlayerStanding> {
        compute_standings(self.progression.history(), &self.players)
    }

    /// Players sharing first place.
    pub fn leaders(&self) -> Vec<PlayerStanding> {
        leaders(&self.standings()).into_iter().cloned().collect()
    }

    /// Copy of the recorded rounds, oldest first.
    pub fn round_history(&self) -> Vec<RoundRecord> {
        self.progression.history().to_vec()
    }

    pub fn round_record(&self, round_no: u32) -> Result<&RoundRecord, DomainError> {
        self.progression
            .history()
            .iter()
            .find(|r| r.round_no == round_no)
            .ok_or_else(|| {
                DomainError::not_found(
                    NotFoundKind::Round,
                    format!("round {round_no} has no record"),
                )
            })
    }

    /// Every recorded result for one player, oldest first.
    pub fn player_history(&self, player_id: &PlayerId) -> Result<Vec<RoundResult>, DomainError> {
        self.require_player(player_id)?;
        Ok(self
            .progression
            .history()
            .iter()
            .filter_map(|r| r.result_for(player_id).cloned())
            .collect())
    }

    pub fn snapshot(&self) -> EngineSnapshot {
        EngineSnapshot {
            phase: self.phase(),
            current_round: self.current_round(),
            total_rounds: self.total_rounds(),
            game_ended: self.is_game_ended(),
            standings: self.standings(),
            round_history: self.round_history(),
        }
    }

    fn require_player(&self, player_id: &PlayerId) -> Result<(), DomainError> {
        if self.players.iter().any(|p| &p.id == player_id) {
            Ok(())
        } else {
            Err(DomainError::not_found(
                NotFoundKind::Player,
                format!("unknown player {player_id}"),
            ))
        }
    }
}

fn validate_roster(players: &[Player], config: &EngineConfig) -> Result<(), DomainError> {
    let count = players.len();
    if count < 1 || count < config.min_players || count > config.max_players {
        return Err(DomainError::validation(
            ValidationKind::PlayerCount,
            format!(
                "need {}..={} players, got {count}",
                config.min_players.max(1),
                config.max_players
            ),
        ));
    }
    let mut ids = BTreeSet::new();
    for player in players {
        if !ids.insert(&player.id) {
            return Err(DomainError::validation(
                ValidationKind::DuplicatePlayer,
                format!("player id {} is used twice", player.id),
            ));
        }
    }
    Ok(())
}
