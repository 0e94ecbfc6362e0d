//! Round progression state machine.
//!
//! `AwaitingSubmissions(1) -> RoundComplete(1) -> AwaitingSubmissions(2) -> ...
//! -> RoundComplete(total_rounds) -> GameComplete`.
//!
//! Every transition validates before mutating; a rejected call leaves the
//! machine exactly as it was.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::domain::player::PlayerId;
use crate::domain::round::RoundRecord;
use crate::domain::rules::MAX_TOTAL_ROUNDS;
use crate::errors::domain::{DomainError, NotFoundKind, ValidationKind};

/// Overall progression phases.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
#[serde(tag = "phase", content = "data")]
pub enum Phase {
    /// Collecting results for `round`.
    AwaitingSubmissions { round: u32 },
    /// Results for `round` are recorded; waiting for `advance`.
    RoundComplete { round: u32 },
    /// Frozen. No further submissions, advances or reviews.
    GameComplete,
}

impl Phase {
    fn name(&self) -> &'static str {
        match self {
            Phase::AwaitingSubmissions { .. } => "AwaitingSubmissions",
            Phase::RoundComplete { .. } => "RoundComplete",
            Phase::GameComplete => "GameComplete",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::AwaitingSubmissions { round } | Phase::RoundComplete { round } => {
                write!(f, "{}({round})", self.name())
            }
            Phase::GameComplete => f.write_str(self.name()),
        }
    }
}

/// Outcome of a successful `advance`.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
pub enum Advance {
    NextRound(u32),
    GameComplete,
}

/// What `go_to_round` shows for the requested round.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "data")]
pub enum RoundView {
    /// A completed round from history.
    Recorded(RoundRecord),
    /// The current round, still collecting results.
    Open { round: u32 },
}

#[derive(Debug, Clone)]
pub struct RoundProgression {
    phase: Phase,
    current: u32,
    total_rounds: u32,
    history: Vec<RoundRecord>,
    reviewing: Option<u32>,
}

impl RoundProgression {
    pub fn new(total_rounds: u32) -> Result<Self, DomainError> {
        if total_rounds == 0 || total_rounds > MAX_TOTAL_ROUNDS {
            return Err(DomainError::validation(
                ValidationKind::TotalRounds,
                format!("total rounds must be in 1..={MAX_TOTAL_ROUNDS}, got {total_rounds}"),
            ));
        }
        Ok(Self {
            phase: Phase::AwaitingSubmissions { round: 1 },
            current: 1,
            total_rounds,
            history: Vec::new(),
            reviewing: None,
        })
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn total_rounds(&self) -> u32 {
        self.total_rounds
    }

    /// Current round; keeps the round the game stopped in once complete.
    pub fn current_round(&self) -> u32 {
        self.current
    }

    pub fn is_game_complete(&self) -> bool {
        self.phase == Phase::GameComplete
    }

    pub fn can_advance(&self) -> bool {
        matches!(self.phase, Phase::RoundComplete { .. })
    }

    pub fn history(&self) -> &[RoundRecord] {
        &self.history
    }

    pub fn reviewing(&self) -> Option<u32> {
        self.reviewing
    }

    /// Round number accepting submissions, or a `StateError` naming the phase.
    pub fn require_open_round(&self) -> Result<u32, DomainError> {
        match self.phase {
            Phase::AwaitingSubmissions { round } => Ok(round),
            actual => Err(DomainError::state("AwaitingSubmissions", actual)),
        }
    }

    /// Record a round. `players` is the active player set the record must
    /// cover exactly.
    pub fn submit_round(
        &mut self,
        record: RoundRecord,
        players: &[PlayerId],
    ) -> Result<(), DomainError> {
        let round = self.require_open_round().inspect_err(|_| {
            warn!(phase = %self.phase, "Rejected round submission");
        })?;
        if record.round_no != round {
            return Err(DomainError::validation(
                ValidationKind::RoundOutOfRange,
                format!("submission is for round {}, open round is {round}", record.round_no),
            ));
        }
        require_exact_cover(&record, players)?;

        self.history.push(record);
        self.phase = Phase::RoundComplete { round };
        self.reviewing = None;
        debug!(round, "Transition: AwaitingSubmissions -> RoundComplete");
        Ok(())
    }

    pub fn advance(&mut self) -> Result<Advance, DomainError> {
        let round = match self.phase {
            Phase::RoundComplete { round } => round,
            actual => {
                warn!(phase = %actual, "Rejected advance");
                return Err(DomainError::state("RoundComplete", actual));
            }
        };
        self.reviewing = None;

        if round < self.total_rounds {
            let next = round + 1;
            self.phase = Phase::AwaitingSubmissions { round: next };
            self.current = next;
            debug!(round = next, "Transition: RoundComplete -> AwaitingSubmissions");
            Ok(Advance::NextRound(next))
        } else {
            self.phase = Phase::GameComplete;
            info!(rounds_played = round, "Game completed");
            debug!("Transition: RoundComplete -> GameComplete");
            Ok(Advance::GameComplete)
        }
    }

    /// Review a round at or before the current one. Read-only: a recorded
    /// round is never reopened for editing.
    pub fn go_to_round(&mut self, target: u32) -> Result<RoundView, DomainError> {
        if self.phase == Phase::GameComplete {
            return Err(DomainError::state(
                "AwaitingSubmissions or RoundComplete",
                self.phase,
            ));
        }
        let current = self.current_round();
        if target == 0 || target > current {
            return Err(DomainError::validation(
                ValidationKind::RoundOutOfRange,
                format!("can only review rounds 1..={current}, got {target}"),
            ));
        }

        let view = match self.history.iter().find(|r| r.round_no == target) {
            Some(record) => RoundView::Recorded(record.clone()),
            None if target == current => RoundView::Open { round: current },
            None => {
                return Err(DomainError::not_found(
                    NotFoundKind::Round,
                    format!("round {target} has no record"),
                ))
            }
        };
        self.reviewing = match view {
            RoundView::Recorded(_) => Some(target),
            RoundView::Open { .. } => None,
        };
        Ok(view)
    }

    /// Terminal transition. Idempotent once the game is complete.
    pub fn end_game(&mut self) {
        if self.phase == Phase::GameComplete {
            return;
        }
        debug!(from = %self.phase, "Transition: -> GameComplete");
        self.phase = Phase::GameComplete;
        self.reviewing = None;
        info!(rounds_played = self.history.len(), "Game ended");
    }
}

fn require_exact_cover(record: &RoundRecord, players: &[PlayerId]) -> Result<(), DomainError> {
    if record.results.len() != players.len() {
        return Err(DomainError::validation(
            ValidationKind::MissingPlayer,
            format!(
                "round {} has {} results for {} players",
                record.round_no,
                record.results.len(),
                players.len()
            ),
        ));
    }
    for id in players {
        let count = record.results.iter().filter(|r| &r.player_id == id).count();
        match count {
            1 => {}
            0 => {
                return Err(DomainError::validation(
                    ValidationKind::MissingPlayer,
                    format!("round {} has no result for player {id}", record.round_no),
                ))
            }
            _ => {
                return Err(DomainError::validation(
                    ValidationKind::DuplicatePlayer,
                    format!("round {} has {count} results for player {id}", record.round_no),
                ))
            }
        }
    }
    Ok(())
}
