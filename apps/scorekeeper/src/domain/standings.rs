//! Standings: per-player totals and ranks derived from round history.
//!
//! Standings are never stored. They are recomputed from the ordered
//! `RoundRecord` sequence whenever asked for.

use serde::{Deserialize, Serialize};

use crate::domain::player::{Player, PlayerId};
use crate::domain::round::RoundRecord;

/// Derived view of one player's position in the game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerStanding {
    pub player_id: PlayerId,
    pub name: String,
    /// Sum of `round_scores`, held as `i64` so it never overflows.
    pub total_score: i64,
    pub rank: u32,
    /// One entry per recorded round, 0 for rounds the player sat out.
    pub round_scores: Vec<i32>,
    pub is_leader: bool,
}

/// Sum every player's deltas and rank them.
///
/// Sorted by total descending. Equal totals keep player order and share a
/// rank; the next lower total's rank skips past the whole tie group, so
/// totals `[30, 30, 10]` rank `[1, 1, 3]`.
pub fn compute_standings(rounds: &[RoundRecord], players: &[Player]) -> Vec<PlayerStanding> {
    let mut standings: Vec<PlayerStanding> = players
        .iter()
        .map(|player| {
            let round_scores: Vec<i32> = rounds.iter().map(|r| r.delta_for(&player.id)).collect();
            PlayerStanding {
                player_id: player.id.clone(),
                name: player.name.clone(),
                total_score: round_scores.iter().copied().map(i64::from).sum(),
                rank: 0,
                round_scores,
                is_leader: false,
            }
        })
        .collect();

    // Stable sort: ties stay in seating order.
    standings.sort_by(|a, b| b.total_score.cmp(&a.total_score));
    assign_ranks(&mut standings);
    standings
}

fn assign_ranks(sorted: &mut [PlayerStanding]) {
    let mut rank = 1u32;
    let mut seen_at_rank = 0u32;
    let mut previous: Option<i64> = None;

    for standing in sorted.iter_mut() {
        if let Some(prev) = previous {
            if standing.total_score < prev {
                rank += seen_at_rank;
                seen_at_rank = 0;
            }
        }
        standing.rank = rank;
        standing.is_leader = rank == 1;
        seen_at_rank += 1;
        previous = Some(standing.total_score);
    }
}

/// Players currently sharing first place.
pub fn leaders(standings: &[PlayerStanding]) -> Vec<&PlayerStanding> {
    standings.iter().filter(|s| s.rank == 1).collect()
}

/// True when more than one player holds `rank`.
pub fn is_tied(standings: &[PlayerStanding], rank: u32) -> bool {
    standings.iter().filter(|s| s.rank == rank).count() > 1
}
