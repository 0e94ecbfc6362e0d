//! Shared types for the simulator.

use clap::ValueEnum;
use serde::Serialize;

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Per-game metrics as JSON lines plus the CSV summary
    Jsonl,
    /// CSV summary only
    Csv,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum MetricsLevel {
    Basic,
    Detailed,
}

/// How simulated players pick their bids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BidStyle {
    /// Bid roughly a fair share of the cards dealt
    Cautious,
    /// Bid at least half the cards dealt
    Greedy,
    /// Any legal bid
    Random,
}
