use super::confirmation::{
    all_active_confirmed, counter_delta, declaration_results, toggle_disqualified,
    validate_results, validate_roster, validate_turn_order, ParticipantState,
};
use crate::entities::pod_players::PlayerResult;
use crate::errors::domain::{DomainError, ValidationKind};

fn state(player_id: i64, confirmed: bool, result: Option<PlayerResult>) -> ParticipantState {
    ParticipantState {
        player_id,
        confirmed,
        result,
    }
}

#[test]
fn roster_accepts_one_to_four_unique_players() {
    assert!(validate_roster(&[1]).is_ok());
    assert!(validate_roster(&[1, 2, 3, 4]).is_ok());
}

#[test]
fn roster_rejects_empty_and_oversized() {
    assert!(matches!(
        validate_roster(&[]),
        Err(DomainError::Validation(ValidationKind::RosterSize, _))
    ));
    assert!(matches!(
        validate_roster(&[1, 2, 3, 4, 5]),
        Err(DomainError::Validation(ValidationKind::RosterSize, _))
    ));
}

#[test]
fn roster_rejects_duplicates() {
    assert!(matches!(
        validate_roster(&[1, 2, 2]),
        Err(DomainError::Validation(ValidationKind::DuplicatePlayers, _))
    ));
}

#[test]
fn declaration_marks_winner_and_losers() {
    let results = declaration_results(&[1, 2, 3], Some(2)).unwrap();
    assert_eq!(
        results,
        vec![
            (1, PlayerResult::Loss),
            (2, PlayerResult::Win),
            (3, PlayerResult::Loss),
        ]
    );
}

#[test]
fn declaration_without_winner_is_all_draw() {
    let results = declaration_results(&[1, 2], None).unwrap();
    assert!(results.iter().all(|(_, r)| *r == PlayerResult::Draw));
}

#[test]
fn declaration_rejects_outside_winner() {
    assert!(matches!(
        declaration_results(&[1, 2], Some(9)),
        Err(DomainError::Validation(ValidationKind::WinnerNotInPod, _))
    ));
}

#[test]
fn turn_order_must_be_permutation() {
    assert!(validate_turn_order(&[1, 2, 3], &[3, 1, 2]).is_ok());
    assert!(validate_turn_order(&[1, 2, 3], &[1, 2]).is_err());
    assert!(validate_turn_order(&[1, 2, 3], &[1, 2, 4]).is_err());
    assert!(validate_turn_order(&[1, 2, 3], &[1, 1, 2]).is_err());
}

#[test]
fn results_reject_multiple_winners() {
    assert!(validate_results(&[Some(PlayerResult::Win), Some(PlayerResult::Loss)]).is_ok());
    assert!(matches!(
        validate_results(&[Some(PlayerResult::Win), Some(PlayerResult::Win)]),
        Err(DomainError::Validation(ValidationKind::MultipleWinners, _))
    ));
}

#[test]
fn consensus_requires_every_active_participant() {
    let partial = [
        state(1, true, Some(PlayerResult::Loss)),
        state(2, false, Some(PlayerResult::Win)),
    ];
    assert!(!all_active_confirmed(&partial));

    let full = [
        state(1, true, Some(PlayerResult::Loss)),
        state(2, true, Some(PlayerResult::Win)),
    ];
    assert!(all_active_confirmed(&full));
}

#[test]
fn consensus_skips_disqualified_participants() {
    let states = [
        state(1, true, Some(PlayerResult::Win)),
        state(2, true, Some(PlayerResult::Loss)),
        state(3, false, Some(PlayerResult::Disqualified)),
    ];
    assert!(all_active_confirmed(&states));
}

#[test]
fn consensus_is_false_with_no_active_participants() {
    let states = [state(1, false, Some(PlayerResult::Disqualified))];
    assert!(!all_active_confirmed(&states));
    assert!(!all_active_confirmed(&[]));
}

#[test]
fn counter_deltas_match_results() {
    assert_eq!(counter_delta(PlayerResult::Win).wins, 1);
    assert_eq!(counter_delta(PlayerResult::Loss).losses, 1);
    assert_eq!(counter_delta(PlayerResult::Draw).draws, 1);
    // A disqualification counts against the player
    assert_eq!(counter_delta(PlayerResult::Disqualified).losses, 1);
}

#[test]
fn dq_toggle_round_trips_prior_result() {
    let (result, prior) = toggle_disqualified(Some(PlayerResult::Loss), None);
    assert_eq!(result, Some(PlayerResult::Disqualified));
    assert_eq!(prior, Some(PlayerResult::Loss));

    let (restored, cleared) = toggle_disqualified(result, prior);
    assert_eq!(restored, Some(PlayerResult::Loss));
    assert_eq!(cleared, None);
}

#[test]
fn dq_toggle_from_no_result() {
    let (result, prior) = toggle_disqualified(None, None);
    assert_eq!(result, Some(PlayerResult::Disqualified));
    assert_eq!(prior, None);

    let (restored, _) = toggle_disqualified(result, prior);
    assert_eq!(restored, None);
}
