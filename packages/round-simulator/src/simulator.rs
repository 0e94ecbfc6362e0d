//! In-memory game simulator.
//!
//! Plays whole games through the public `ScoreEngine` API with randomly
//! generated bids and trick outcomes, so scoring and standings can be
//! exercised at volume.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use scorekeeper::{
    Advance, DomainError, Player, PlayerEntry, PlayerId, PlayerStanding, RoundRecord, ScoreEngine,
};
use tracing::debug;

use crate::types::BidStyle;

/// Chance that a player declares a side bet in a round.
const BONUS_DECLARE_PROBABILITY: f64 = 0.2;

/// Result of simulating a complete game.
#[derive(Debug, Clone)]
pub struct GameResult {
    /// Final standings, best first
    pub standings: Vec<PlayerStanding>,
    /// Every recorded round, oldest first
    pub history: Vec<RoundRecord>,
    pub rounds_played: u32,
}

pub struct Simulator {
    rng: ChaCha8Rng,
    players: Vec<Player>,
    total_rounds: u32,
    style: BidStyle,
}

impl Simulator {
    pub fn new(seed: u64, player_count: usize, total_rounds: u32, style: BidStyle) -> Self {
        let players = (0..player_count)
            .map(|seat| Player::new(format!("seat{seat}"), format!("Seat {seat}")))
            .collect();
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            players,
            total_rounds,
            style,
        }
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    /// Play every round to completion.
    pub fn simulate_game(&mut self) -> Result<GameResult, DomainError> {
        let mut engine = ScoreEngine::new(self.players.clone(), self.total_rounds)?;
        let ids: Vec<PlayerId> = self.players.iter().map(|p| p.id.clone()).collect();

        loop {
            let cards = engine.cards_dealt();
            let tricks = self.deal_tricks(cards);

            for (seat, player_id) in ids.iter().enumerate() {
                let bid = self.pick_bid(cards);
                let mut entry = PlayerEntry::new(bid, tricks[seat]);
                if self.rng.random_bool(BONUS_DECLARE_PROBABILITY) {
                    entry = entry.with_bonus(10 * self.rng.random_range(1..=5));
                }
                engine.stage_entry(player_id.clone(), entry)?;
            }
            engine.submit_staged()?;
            debug!(round = engine.current_round(), "Simulated round recorded");

            if engine.advance_round()? == Advance::GameComplete {
                break;
            }
        }

        Ok(GameResult {
            standings: engine.standings(),
            history: engine.round_history(),
            rounds_played: engine.current_round(),
        })
    }

    /// Hand each trick of the round to a random seat. Totals equal `cards`.
    fn deal_tricks(&mut self, cards: u32) -> Vec<i32> {
        let mut tricks = vec![0i32; self.players.len()];
        for _ in 0..cards {
            let winner = self.rng.random_range(0..self.players.len());
            tricks[winner] += 1;
        }
        tricks
    }

    fn pick_bid(&mut self, cards: u32) -> i32 {
        let cards = cards as i32;
        match self.style {
            BidStyle::Cautious => cards / self.players.len() as i32,
            BidStyle::Greedy => self.rng.random_range((cards + 1) / 2..=cards),
            BidStyle::Random => self.rng.random_range(0..=cards),
        }
    }
}
