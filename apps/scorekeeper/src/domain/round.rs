//! Per-round data: the open round's input collection and the immutable
//! history records produced when a round is submitted.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::domain::bonus::{apply_bonus, bid_met};
use crate::domain::player::PlayerId;
use crate::domain::rules::cards_dealt_for_round;
use crate::domain::scoring::compute_base_score;
use crate::errors::domain::{DomainError, ValidationKind};

/// One player's raw numbers for a round, as collected by the UI.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerEntry {
    pub bid: i32,
    pub tricks_taken: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bonus_declared: Option<i32>,
}

impl PlayerEntry {
    pub const fn new(bid: i32, tricks_taken: i32) -> Self {
        Self {
            bid,
            tricks_taken,
            bonus_declared: None,
        }
    }

    pub const fn with_bonus(mut self, bonus: i32) -> Self {
        self.bonus_declared = Some(bonus);
        self
    }

    /// Range-check against the cards dealt in the round, including that the
    /// paid bonus still fits in the round's delta.
    pub fn validate(&self, cards_dealt: u32) -> Result<(), DomainError> {
        self.priced(cards_dealt).map(|_| ())
    }

    /// `(declared bonus, base score, bonus applied, total delta)`.
    fn priced(&self, cards_dealt: u32) -> Result<(i32, i32, i32, i32), DomainError> {
        let bonus_declared = self.bonus_declared.unwrap_or(0);
        let base_score = compute_base_score(self.bid, self.tricks_taken, cards_dealt)?;
        let bonus_applied = apply_bonus(self.bid, self.tricks_taken, bonus_declared)?;
        let total_delta = base_score.checked_add(bonus_applied).ok_or_else(|| {
            DomainError::validation(
                ValidationKind::InvalidBonus,
                format!("bonus {bonus_applied} on top of {base_score} overflows the round score"),
            )
        })?;
        Ok((bonus_declared, base_score, bonus_applied, total_delta))
    }
}

/// Scored outcome for one player in one round.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundResult {
    pub player_id: PlayerId,
    pub bid: i32,
    pub tricks_taken: i32,
    pub bonus_declared: i32,
    pub base_score: i32,
    pub bonus_applied: i32,
    pub total_delta: i32,
}

impl RoundResult {
    /// Apply the scoring table and bonus policy to a single entry.
    pub fn score(
        player_id: PlayerId,
        entry: &PlayerEntry,
        cards_dealt: u32,
    ) -> Result<Self, DomainError> {
        let (bonus_declared, base_score, bonus_applied, total_delta) = entry.priced(cards_dealt)?;
        Ok(Self {
            player_id,
            bid: entry.bid,
            tricks_taken: entry.tricks_taken,
            bonus_declared,
            base_score,
            bonus_applied,
            total_delta,
        })
    }

    pub fn bid_met(&self) -> bool {
        bid_met(self.bid, self.tricks_taken)
    }
}

/// A completed round. Append-only history; never edited after creation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundRecord {
    pub round_no: u32,
    pub cards_dealt: u32,
    pub results: Vec<RoundResult>,
    #[serde(with = "time::serde::rfc3339")]
    pub timestamp: OffsetDateTime,
}

impl RoundRecord {
    pub fn result_for(&self, player_id: &PlayerId) -> Option<&RoundResult> {
        self.results.iter().find(|r| &r.player_id == player_id)
    }

    /// Score contributed by `player_id`; 0 when the player was not seated.
    pub fn delta_for(&self, player_id: &PlayerId) -> i32 {
        self.result_for(player_id).map_or(0, |r| r.total_delta)
    }
}

/// The open round: which round it is and the entries collected so far.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RoundState {
    round_no: u32,
    cards_dealt: u32,
    hands_required: usize,
    entries: BTreeMap<PlayerId, PlayerEntry>,
}

impl RoundState {
    pub fn new(round_no: u32, hands_required: usize) -> Result<Self, DomainError> {
        let cards_dealt = cards_dealt_for_round(round_no).ok_or_else(|| {
            DomainError::validation(
                ValidationKind::RoundOutOfRange,
                format!("round {round_no} is outside the schedule"),
            )
        })?;
        Ok(Self {
            round_no,
            cards_dealt,
            hands_required,
            entries: BTreeMap::new(),
        })
    }

    pub fn round_no(&self) -> u32 {
        self.round_no
    }

    pub fn cards_dealt(&self) -> u32 {
        self.cards_dealt
    }

    /// Record (or overwrite) one player's entry after range-checking it.
    pub fn stage(&mut self, player_id: PlayerId, entry: PlayerEntry) -> Result<(), DomainError> {
        entry.validate(self.cards_dealt)?;
        self.entries.insert(player_id, entry);
        Ok(())
    }

    pub fn unstage(&mut self, player_id: &PlayerId) -> Option<PlayerEntry> {
        self.entries.remove(player_id)
    }

    pub fn entry(&self, player_id: &PlayerId) -> Option<&PlayerEntry> {
        self.entries.get(player_id)
    }

    pub fn entries(&self) -> &BTreeMap<PlayerId, PlayerEntry> {
        &self.entries
    }

    /// One entry per seated player.
    pub fn hands_required(&self) -> usize {
        self.hands_required
    }

    pub fn set_hands_required(&mut self, hands_required: usize) {
        self.hands_required = hands_required;
    }

    pub fn hands_completed(&self) -> usize {
        self.entries.len()
    }

    pub fn is_complete(&self) -> bool {
        self.hands_required > 0 && self.entries.len() == self.hands_required
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
