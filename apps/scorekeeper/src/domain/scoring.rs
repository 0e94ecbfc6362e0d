//! Base score for a single player's round.
//!
//! Scoring table:
//! - Zero bid made (no tricks): `+10 * cards_dealt`
//! - Zero bid broken (any trick): `-10 * cards_dealt`
//! - Exact non-zero bid: `+20 * tricks_taken`
//! - Missed non-zero bid: `-10 * |bid - tricks_taken|`

use crate::domain::rules::{
    valid_bid_range, EXACT_BID_POINTS_PER_TRICK, MISSED_BID_PENALTY_PER_TRICK,
    ZERO_BID_POINTS_PER_CARD,
};
use crate::errors::domain::{DomainError, ValidationKind};

/// Compute the base score for a bid against tricks actually taken.
///
/// Fails fast on any out-of-domain input; values are never clamped.
pub fn compute_base_score(
    bid: i32,
    tricks_taken: i32,
    cards_dealt: u32,
) -> Result<i32, DomainError> {
    let cards = require_cards_dealt(cards_dealt)?;
    let bid = require_within(bid, cards_dealt, ValidationKind::InvalidBid, "bid")?;
    let tricks = require_within(
        tricks_taken,
        cards_dealt,
        ValidationKind::InvalidTricks,
        "tricks taken",
    )?;

    let score = if bid == 0 {
        if tricks == 0 {
            ZERO_BID_POINTS_PER_CARD * cards
        } else {
            -ZERO_BID_POINTS_PER_CARD * cards
        }
    } else if bid == tricks {
        EXACT_BID_POINTS_PER_TRICK * tricks
    } else {
        -MISSED_BID_PENALTY_PER_TRICK * (bid - tricks).abs()
    };
    Ok(score)
}

/// Largest deal the scoring table can price without leaving `i32`.
pub const MAX_SCORABLE_CARDS: u32 = (i32::MAX / EXACT_BID_POINTS_PER_TRICK) as u32;

fn require_cards_dealt(cards_dealt: u32) -> Result<i32, DomainError> {
    if cards_dealt == 0 || cards_dealt > MAX_SCORABLE_CARDS {
        return Err(DomainError::validation(
            ValidationKind::InvalidCardsDealt,
            format!("cards dealt must be in 1..={MAX_SCORABLE_CARDS}, got {cards_dealt}"),
        ));
    }
    // Bounded above, so the conversion cannot truncate.
    Ok(cards_dealt as i32)
}

/// Check that `value` lies in `0..=cards_dealt`.
fn require_within(
    value: i32,
    cards_dealt: u32,
    kind: ValidationKind,
    label: &str,
) -> Result<i32, DomainError> {
    let in_range = u32::try_from(value)
        .map(|v| valid_bid_range(cards_dealt).contains(&v))
        .unwrap_or(false);
    if !in_range {
        return Err(DomainError::validation(
            kind,
            format!("{label} must be in 0..={cards_dealt}, got {value}"),
        ));
    }
    Ok(value)
}
