use crate::config::EngineConfig;
use crate::domain::engine::ScoreEngine;
use crate::domain::player::{Player, PlayerId};
use crate::domain::progression::{Advance, Phase};
use crate::domain::round::PlayerEntry;
use crate::domain::test_prelude::players;
use crate::errors::domain::{DomainError, NotFoundKind, ValidationKind};

fn entry(id: &str, bid: i32, tricks: i32) -> (PlayerId, PlayerEntry) {
    (PlayerId::from(id), PlayerEntry::new(bid, tricks))
}

fn engine(count: usize, total_rounds: u32) -> ScoreEngine {
    ScoreEngine::new(players(count), total_rounds).expect("valid setup")
}

#[test]
fn initialize_enforces_player_bounds() {
    assert!(matches!(
        ScoreEngine::new(Vec::new(), 3),
        Err(DomainError::Validation(ValidationKind::PlayerCount, _))
    ));
    assert!(matches!(
        ScoreEngine::new(players(1), 3),
        Err(DomainError::Validation(ValidationKind::PlayerCount, _))
    ));
    assert!(matches!(
        ScoreEngine::new(players(9), 3),
        Err(DomainError::Validation(ValidationKind::PlayerCount, _))
    ));

    // A solo game is fine when the host lowers the minimum.
    let solo = EngineConfig::default().with_player_bounds(1, 8);
    assert!(ScoreEngine::with_config(players(1), solo).is_ok());
}

#[test]
fn initialize_rejects_duplicate_ids() {
    let roster = vec![Player::new("a", "Ann"), Player::new("a", "Andy")];
    assert!(matches!(
        ScoreEngine::new(roster, 3),
        Err(DomainError::Validation(ValidationKind::DuplicatePlayer, _))
    ));
}

#[test]
fn initialize_resets_all_state() {
    let mut e = engine(2, 2);
    e.submit_round([entry("p0", 1, 1), entry("p1", 0, 0)])
        .expect("round 1");
    e.advance_round().expect("advance");

    e.initialize(players(3), 4).expect("reset");
    assert_eq!(e.phase(), Phase::AwaitingSubmissions { round: 1 });
    assert_eq!(e.total_rounds(), 4);
    assert_eq!(e.players().len(), 3);
    assert!(e.round_history().is_empty());
}

#[test]
fn failed_initialize_leaves_engine_untouched() {
    let mut e = engine(2, 2);
    e.submit_round([entry("p0", 1, 1), entry("p1", 0, 0)])
        .expect("round 1");
    assert!(e.initialize(Vec::new(), 2).is_err());
    assert_eq!(e.round_history().len(), 1);
}

#[test]
fn submit_round_rejects_unknown_player_without_mutation() {
    let mut e = engine(2, 2);
    let err = e
        .submit_round([entry("p0", 0, 0), entry("ghost", 0, 0)])
        .expect_err("unknown player");
    assert!(matches!(err, DomainError::NotFound(NotFoundKind::Player, _)));
    assert_eq!(e.phase(), Phase::AwaitingSubmissions { round: 1 });
    assert!(e.round_history().is_empty());
}

#[test]
fn submit_round_rejects_missing_and_duplicate_entries() {
    let mut e = engine(3, 2);
    assert!(matches!(
        e.submit_round([entry("p0", 0, 0), entry("p1", 0, 0)]),
        Err(DomainError::Validation(ValidationKind::MissingPlayer, _))
    ));
    assert!(matches!(
        e.submit_round([entry("p0", 0, 0), entry("p0", 1, 1), entry("p1", 0, 0)]),
        Err(DomainError::Validation(ValidationKind::DuplicatePlayer, _))
    ));
    assert!(e.round_history().is_empty());
}

#[test]
fn submit_round_rejects_out_of_range_numbers() {
    let mut e = engine(2, 3);
    // Round 1 deals a single card.
    assert!(matches!(
        e.submit_round([entry("p0", 2, 0), entry("p1", 0, 0)]),
        Err(DomainError::Validation(ValidationKind::InvalidBid, _))
    ));
    assert!(matches!(
        e.submit_round([entry("p0", 0, -1), entry("p1", 0, 0)]),
        Err(DomainError::Validation(ValidationKind::InvalidTricks, _))
    ));
    let negative_bonus = (PlayerId::from("p1"), PlayerEntry::new(0, 0).with_bonus(-1));
    assert!(matches!(
        e.submit_round([entry("p0", 0, 0), negative_bonus]),
        Err(DomainError::Validation(ValidationKind::InvalidBonus, _))
    ));
    assert!(e.round_history().is_empty());
}

#[test]
fn overflowing_bonus_is_rejected_before_recording() {
    let mut e = engine(2, 3);
    let huge = (PlayerId::from("p0"), PlayerEntry::new(1, 1).with_bonus(i32::MAX));
    assert!(matches!(
        e.submit_round([huge, entry("p1", 0, 0)]),
        Err(DomainError::Validation(ValidationKind::InvalidBonus, _))
    ));
    assert!(matches!(
        e.stage_entry(PlayerId::from("p0"), PlayerEntry::new(1, 1).with_bonus(i32::MAX)),
        Err(DomainError::Validation(ValidationKind::InvalidBonus, _))
    ));
    assert!(e.round_history().is_empty());
    assert_eq!(e.phase(), Phase::AwaitingSubmissions { round: 1 });
    assert_eq!(e.hands_completed(), 0);
}

#[test]
fn running_totals_grow_past_a_single_round_delta() {
    let mut e = engine(2, 3);
    let r1 = (PlayerId::from("p0"), PlayerEntry::new(1, 1).with_bonus(i32::MAX - 20));
    e.submit_round([r1, entry("p1", 0, 0)]).expect("round 1");
    e.advance_round().expect("advance");

    let r2 = (PlayerId::from("p0"), PlayerEntry::new(2, 2).with_bonus(i32::MAX - 40));
    let standings = e.submit_round([r2, entry("p1", 0, 0)]).expect("round 2");
    assert_eq!(e.round_history().len(), 2);
    assert_eq!(standings[0].player_id, PlayerId::from("p0"));
    assert_eq!(standings[0].total_score, 2 * i64::from(i32::MAX));
    assert_eq!(standings[0].round_scores, vec![i32::MAX, i32::MAX]);
    assert_eq!(standings[1].total_score, 30);
}

#[test]
fn results_are_recorded_in_seating_order() {
    let mut e = engine(3, 2);
    e.submit_round([entry("p2", 0, 0), entry("p0", 1, 1), entry("p1", 0, 1)])
        .expect("round 1");
    let record = e.round_record(1).expect("recorded");
    let order: Vec<&str> = record.results.iter().map(|r| r.player_id.as_str()).collect();
    assert_eq!(order, vec!["p0", "p1", "p2"]);
    assert_eq!(record.cards_dealt, 1);
}

#[test]
fn advance_before_submission_is_state_error() {
    let mut e = engine(2, 2);
    assert!(!e.can_advance());
    assert!(matches!(
        e.advance_round(),
        Err(DomainError::State { actual: Phase::AwaitingSubmissions { round: 1 }, .. })
    ));
}

#[test]
fn staged_entries_gate_submission() {
    let mut e = engine(3, 2);
    assert_eq!(e.hands_required(), 3);

    e.stage_entry(PlayerId::from("p0"), PlayerEntry::new(1, 1))
        .expect("stage p0");
    e.stage_entry(PlayerId::from("p1"), PlayerEntry::new(0, 0))
        .expect("stage p1");
    assert_eq!(e.hands_completed(), 2);

    let err = e.submit_staged().expect_err("p2 missing");
    match err {
        DomainError::Validation(ValidationKind::MissingPlayer, detail) => {
            assert!(detail.contains("p2"), "detail names the missing player: {detail}");
        }
        other => panic!("unexpected error {other:?}"),
    }

    // Re-staging overwrites the draft.
    e.stage_entry(PlayerId::from("p1"), PlayerEntry::new(1, 0))
        .expect("restage p1");
    assert_eq!(e.staged_entry(&PlayerId::from("p1")), Some(&PlayerEntry::new(1, 0)));
    assert_eq!(e.hands_completed(), 2);

    e.stage_entry(PlayerId::from("p2"), PlayerEntry::new(0, 0))
        .expect("stage p2");
    let standings = e.submit_staged().expect("complete");
    assert_eq!(standings.len(), 3);
    assert!(e.can_advance());
    assert_eq!(e.hands_completed(), 0);
}

#[test]
fn drafts_can_be_withdrawn_or_cleared() {
    let mut e = engine(3, 2);
    e.stage_entry(PlayerId::from("p0"), PlayerEntry::new(1, 1))
        .expect("stage p0");
    e.stage_entry(PlayerId::from("p1"), PlayerEntry::new(0, 0))
        .expect("stage p1");

    assert_eq!(
        e.unstage_entry(&PlayerId::from("p1")),
        Ok(Some(PlayerEntry::new(0, 0)))
    );
    assert_eq!(e.unstage_entry(&PlayerId::from("p1")), Ok(None));
    assert_eq!(e.hands_completed(), 1);

    e.clear_staged();
    assert_eq!(e.hands_completed(), 0);
    assert_eq!(e.phase(), Phase::AwaitingSubmissions { round: 1 });
}

#[test]
fn staging_rejects_bad_input_immediately() {
    let mut e = engine(2, 2);
    assert!(matches!(
        e.stage_entry(PlayerId::from("nobody"), PlayerEntry::new(0, 0)),
        Err(DomainError::NotFound(NotFoundKind::Player, _))
    ));
    assert!(matches!(
        e.stage_entry(PlayerId::from("p0"), PlayerEntry::new(5, 0)),
        Err(DomainError::Validation(ValidationKind::InvalidBid, _))
    ));
    assert_eq!(e.hands_completed(), 0);
}

#[test]
fn advancing_resets_the_input_collection() {
    let mut e = engine(2, 3);
    e.stage_entry(PlayerId::from("p0"), PlayerEntry::new(1, 1))
        .expect("stage");
    e.stage_entry(PlayerId::from("p1"), PlayerEntry::new(0, 0))
        .expect("stage");
    e.submit_staged().expect("submit");
    assert_eq!(e.advance_round(), Ok(Advance::NextRound(2)));
    assert_eq!(e.hands_completed(), 0);
    assert_eq!(e.cards_dealt(), 2);
    assert!(e.staged_entry(&PlayerId::from("p0")).is_none());
}

#[test]
fn late_joiner_scores_zero_for_earlier_rounds() {
    let mut e = engine(2, 3);
    e.submit_round([entry("p0", 1, 1), entry("p1", 0, 1)])
        .expect("round 1");
    e.advance_round().expect("advance");

    e.add_player(Player::new("late", "Late")).expect("join");
    assert_eq!(e.hands_required(), 3);
    assert!(matches!(
        e.submit_round([entry("p0", 0, 0), entry("p1", 0, 0)]),
        Err(DomainError::Validation(ValidationKind::MissingPlayer, _))
    ));

    e.submit_round([entry("p0", 2, 2), entry("p1", 0, 0), entry("late", 0, 0)])
        .expect("round 2");
    let history = e
        .player_history(&PlayerId::from("late"))
        .expect("known player");
    assert_eq!(history.len(), 1);

    let late = e
        .standings()
        .into_iter()
        .find(|s| s.player_id == PlayerId::from("late"))
        .expect("ranked");
    assert_eq!(late.round_scores, vec![0, 20]);
}

#[test]
fn add_player_rules() {
    let mut e = engine(2, 2);
    assert!(matches!(
        e.add_player(Player::new("p0", "Again")),
        Err(DomainError::Validation(ValidationKind::DuplicatePlayer, _))
    ));

    e.submit_round([entry("p0", 0, 0), entry("p1", 0, 0)])
        .expect("round 1");
    assert!(matches!(
        e.add_player(Player::new("late", "Late")),
        Err(DomainError::State { actual: Phase::RoundComplete { round: 1 }, .. })
    ));

    let mut full = engine(8, 2);
    assert!(matches!(
        full.add_player(Player::new("p8", "Ninth")),
        Err(DomainError::Validation(ValidationKind::PlayerCount, _))
    ));
}

#[test]
fn end_game_freezes_engine_and_is_idempotent() {
    let mut e = engine(2, 5);
    e.submit_round([entry("p0", 1, 1), entry("p1", 0, 0)])
        .expect("round 1");
    e.end_game();
    e.end_game();
    assert!(e.is_game_ended());
    assert!(matches!(e.advance_round(), Err(DomainError::State { .. })));
    assert!(matches!(
        e.submit_round([entry("p0", 0, 0), entry("p1", 0, 0)]),
        Err(DomainError::State { actual: Phase::GameComplete, .. })
    ));
    assert!(matches!(e.go_to_round(1), Err(DomainError::State { .. })));
    assert_eq!(e.round_history().len(), 1);
}

#[test]
fn round_history_is_a_copy() {
    let mut e = engine(2, 2);
    e.submit_round([entry("p0", 1, 1), entry("p1", 0, 0)])
        .expect("round 1");
    let mut copy = e.round_history();
    copy.clear();
    assert_eq!(e.round_history().len(), 1);
}

#[test]
fn lookups_for_unknown_ids_are_not_found() {
    let e = engine(2, 2);
    assert!(matches!(
        e.player_history(&PlayerId::from("ghost")),
        Err(DomainError::NotFound(NotFoundKind::Player, _))
    ));
    assert!(matches!(
        e.round_record(1),
        Err(DomainError::NotFound(NotFoundKind::Round, _))
    ));
}
