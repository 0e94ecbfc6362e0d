use std::ops::RangeInclusive;

pub const DEFAULT_TOTAL_ROUNDS: u32 = 10;
/// Upper bound on the schedule; also bounds cards dealt in any round.
pub const MAX_TOTAL_ROUNDS: u32 = 100;
pub const MIN_PLAYERS: usize = 2;
pub const MAX_PLAYERS: usize = 8;

/// Points per trick for an exact, non-zero bid.
pub const EXACT_BID_POINTS_PER_TRICK: i32 = 20;
/// Points per card dealt for a zero bid (won or lost).
pub const ZERO_BID_POINTS_PER_CARD: i32 = 10;
/// Penalty per trick of difference for a missed non-zero bid.
pub const MISSED_BID_PENALTY_PER_TRICK: i32 = 10;

// Round N deals N cards.
pub fn cards_dealt_for_round(round_no: u32) -> Option<u32> {
    if round_no == 0 || round_no > MAX_TOTAL_ROUNDS {
        return None;
    }
    Some(round_no)
}

pub fn valid_bid_range(cards_dealt: u32) -> RangeInclusive<u32> {
    0..=cards_dealt
}
