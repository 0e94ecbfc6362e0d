//! Metrics collection for simulation results.

use scorekeeper::{PlayerStanding, RoundRecord};
use serde::Serialize;

use crate::simulator::GameResult;
use crate::types::{BidStyle, MetricsLevel};

/// Complete game metrics for output.
#[derive(Debug, Clone, Serialize)]
pub struct GameMetrics {
    pub game_id: u32,
    pub seed: u64,
    pub timestamp: String,
    pub config: GameConfig,
    pub result: GameResultMetrics,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub rounds: Vec<RoundMetrics>,
    pub player_metrics: Vec<PlayerMetrics>,
}

#[derive(Debug, Clone, Serialize)]
pub struct GameConfig {
    pub players: usize,
    pub total_rounds: u32,
    pub bid_style: BidStyle,
    pub total_games: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct GameResultMetrics {
    pub final_standings: Vec<PlayerStanding>,
    pub leaders: Vec<String>,
    pub tied_for_first: bool,
    pub duration_ms: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct RoundMetrics {
    pub round_no: u32,
    pub cards_dealt: u32,
    pub bid_accuracy: Vec<BidAccuracy>,
}

#[derive(Debug, Clone, Serialize)]
pub struct BidAccuracy {
    pub player_id: String,
    pub bid: i32,
    pub tricks: i32,
    pub exact: bool,
    pub delta: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub underbid: Option<i32>, // Amount by which tricks exceeded bid (tricks > bid)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub overbid: Option<i32>, // Amount by which bid exceeded tricks (tricks < bid)
}

#[derive(Debug, Clone, Serialize)]
pub struct PlayerMetrics {
    pub player_id: String,
    pub total_score: i64,
    pub rank: u32,
    pub rounds_won: u32,
    pub bid_accuracy: BidAccuracyStats,
    pub zero_bids: u32,
    pub zero_bids_made: u32,
    pub bonus_declared: i32,
    pub bonus_paid: i32,
    pub avg_tricks_per_round: f64,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct BidAccuracyStats {
    pub exact: u32,
    pub underbid: u32, // tricks > bid
    pub overbid: u32,  // tricks < bid
    pub exact_pct: f64,
}

/// Build metrics from a simulated game.
pub fn build_game_metrics(
    game_id: u32,
    seed: u64,
    config: GameConfig,
    level: &MetricsLevel,
    result: &GameResult,
    duration_ms: f64,
) -> GameMetrics {
    let timestamp = time::OffsetDateTime::now_utc()
        .format(&time::format_description::well_known::Rfc3339)
        .unwrap_or_else(|_| String::from("unknown"));

    let rounds = match level {
        MetricsLevel::Detailed => result.history.iter().map(build_round_metrics).collect(),
        MetricsLevel::Basic => Vec::new(),
    };

    let player_metrics = result
        .standings
        .iter()
        .map(|standing| build_player_metrics(standing, &result.history))
        .collect();

    let leaders: Vec<String> = result
        .standings
        .iter()
        .filter(|s| s.is_leader)
        .map(|s| s.player_id.to_string())
        .collect();

    GameMetrics {
        game_id,
        seed,
        timestamp,
        config,
        result: GameResultMetrics {
            final_standings: result.standings.clone(),
            tied_for_first: leaders.len() > 1,
            leaders,
            duration_ms,
        },
        rounds,
        player_metrics,
    }
}

fn build_round_metrics(record: &RoundRecord) -> RoundMetrics {
    let bid_accuracy = record
        .results
        .iter()
        .map(|r| BidAccuracy {
            player_id: r.player_id.to_string(),
            bid: r.bid,
            tricks: r.tricks_taken,
            exact: r.bid_met(),
            delta: r.total_delta,
            underbid: (r.tricks_taken > r.bid).then(|| r.tricks_taken - r.bid),
            overbid: (r.tricks_taken < r.bid).then(|| r.bid - r.tricks_taken),
        })
        .collect();

    RoundMetrics {
        round_no: record.round_no,
        cards_dealt: record.cards_dealt,
        bid_accuracy,
    }
}

fn build_player_metrics(standing: &PlayerStanding, history: &[RoundRecord]) -> PlayerMetrics {
    let mut stats = BidAccuracyStats::default();
    let mut zero_bids = 0;
    let mut zero_bids_made = 0;
    let mut bonus_declared = 0;
    let mut bonus_paid = 0;
    let mut total_tricks = 0i64;
    let mut rounds_won = 0;

    for record in history {
        let Some(result) = record.result_for(&standing.player_id) else {
            continue;
        };
        if result.bid_met() {
            stats.exact += 1;
        } else if result.tricks_taken > result.bid {
            stats.underbid += 1;
        } else {
            stats.overbid += 1;
        }
        if result.bid == 0 {
            zero_bids += 1;
            if result.tricks_taken == 0 {
                zero_bids_made += 1;
            }
        }
        bonus_declared += result.bonus_declared;
        bonus_paid += result.bonus_applied;
        total_tricks += i64::from(result.tricks_taken);

        // Round winner: best delta in that round (ties all count).
        let best = record.results.iter().map(|r| r.total_delta).max().unwrap_or(0);
        if result.total_delta == best {
            rounds_won += 1;
        }
    }

    let total_bids = stats.exact + stats.underbid + stats.overbid;
    if total_bids > 0 {
        stats.exact_pct = (stats.exact as f64 / total_bids as f64) * 100.0;
    }
    let avg_tricks_per_round = if total_bids > 0 {
        total_tricks as f64 / total_bids as f64
    } else {
        0.0
    };

    PlayerMetrics {
        player_id: standing.player_id.to_string(),
        total_score: standing.total_score,
        rank: standing.rank,
        rounds_won,
        bid_accuracy: stats,
        zero_bids,
        zero_bids_made,
        bonus_declared,
        bonus_paid,
        avg_tricks_per_round,
    }
}

/// CSV summary row for quick analysis.
#[derive(Debug, Serialize)]
pub struct CsvSummaryRow {
    pub game_id: u32,
    pub seed: u64,
    pub players: usize,
    pub rounds: u32,
    pub bid_style: BidStyle,
    pub leaders: String,
    pub top_score: i64,
    pub bottom_score: i64,
    pub tied_for_first: bool,
}

impl From<&GameMetrics> for CsvSummaryRow {
    fn from(metrics: &GameMetrics) -> Self {
        let scores = metrics
            .result
            .final_standings
            .iter()
            .map(|s| s.total_score);
        CsvSummaryRow {
            game_id: metrics.game_id,
            seed: metrics.seed,
            players: metrics.config.players,
            rounds: metrics.config.total_rounds,
            bid_style: metrics.config.bid_style,
            leaders: metrics.result.leaders.join(";"),
            top_score: scores.clone().max().unwrap_or(0),
            bottom_score: scores.min().unwrap_or(0),
            tied_for_first: metrics.result.tied_for_first,
        }
    }
}
