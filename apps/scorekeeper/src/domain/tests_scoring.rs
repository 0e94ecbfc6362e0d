use crate::domain::scoring::{compute_base_score, MAX_SCORABLE_CARDS};
use crate::errors::domain::{DomainError, ValidationKind};

#[test]
fn zero_bid_made_scores_ten_per_card() {
    assert_eq!(compute_base_score(0, 0, 1), Ok(10));
    assert_eq!(compute_base_score(0, 0, 7), Ok(70));
}

#[test]
fn zero_bid_broken_loses_ten_per_card() {
    // Penalty depends on cards dealt, not on how many tricks were taken.
    assert_eq!(compute_base_score(0, 1, 1), Ok(-10));
    assert_eq!(compute_base_score(0, 1, 5), Ok(-50));
    assert_eq!(compute_base_score(0, 5, 5), Ok(-50));
}

#[test]
fn exact_bid_scores_twenty_per_trick() {
    assert_eq!(compute_base_score(1, 1, 1), Ok(20));
    assert_eq!(compute_base_score(2, 2, 2), Ok(40));
    assert_eq!(compute_base_score(3, 3, 10), Ok(60));
}

#[test]
fn missed_bid_loses_ten_per_trick_of_difference() {
    // Under
    assert_eq!(compute_base_score(4, 1, 6), Ok(-30));
    // Over
    assert_eq!(compute_base_score(1, 4, 6), Ok(-30));
    // Bid made but took nothing
    assert_eq!(compute_base_score(1, 0, 2), Ok(-10));
}

#[test]
fn negative_values_are_rejected_not_clamped() {
    assert!(matches!(
        compute_base_score(-1, 0, 3),
        Err(DomainError::Validation(ValidationKind::InvalidBid, _))
    ));
    assert!(matches!(
        compute_base_score(0, -1, 3),
        Err(DomainError::Validation(ValidationKind::InvalidTricks, _))
    ));
}

#[test]
fn values_above_cards_dealt_are_rejected() {
    assert!(matches!(
        compute_base_score(4, 0, 3),
        Err(DomainError::Validation(ValidationKind::InvalidBid, _))
    ));
    assert!(matches!(
        compute_base_score(0, 4, 3),
        Err(DomainError::Validation(ValidationKind::InvalidTricks, _))
    ));
}

#[test]
fn zero_cards_dealt_is_rejected() {
    assert!(matches!(
        compute_base_score(0, 0, 0),
        Err(DomainError::Validation(ValidationKind::InvalidCardsDealt, _))
    ));
}

#[test]
fn deals_past_the_round_schedule_still_score() {
    assert_eq!(compute_base_score(0, 0, 101), Ok(1010));
    assert_eq!(compute_base_score(150, 150, 150), Ok(3000));
}

#[test]
fn largest_scorable_deal_stays_in_range() {
    let cards = MAX_SCORABLE_CARDS;
    let tricks = cards as i32;
    assert_eq!(compute_base_score(tricks, tricks, cards), Ok(20 * tricks));
    assert_eq!(compute_base_score(0, 1, cards), Ok(-10 * tricks));
    assert!(matches!(
        compute_base_score(0, 0, cards + 1),
        Err(DomainError::Validation(ValidationKind::InvalidCardsDealt, _))
    ));
}
