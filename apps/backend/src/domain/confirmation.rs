//! Rules of the pod confirmation state machine.

use std::collections::HashSet;

use crate::entities::pod_players::PlayerResult;
use crate::errors::domain::{DomainError, ValidationKind};

/// A pod holds at most this many participants.
pub const MAX_POD_PLAYERS: usize = 4;

/// The slice of participant state the consensus check needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParticipantState {
    pub player_id: i64,
    pub confirmed: bool,
    pub result: Option<PlayerResult>,
}

impl ParticipantState {
    /// Disqualified participants do not take part in consensus.
    pub fn is_active(&self) -> bool {
        self.result != Some(PlayerResult::Disqualified)
    }
}

/// Validate a creation roster: 1 to 4 unique players.
pub fn validate_roster(player_ids: &[i64]) -> Result<(), DomainError> {
    if player_ids.is_empty() || player_ids.len() > MAX_POD_PLAYERS {
        return Err(DomainError::validation(
            ValidationKind::RosterSize,
            format!(
                "A pod holds 1 to {MAX_POD_PLAYERS} players, got {}",
                player_ids.len()
            ),
        ));
    }
    let unique: HashSet<_> = player_ids.iter().collect();
    if unique.len() != player_ids.len() {
        return Err(DomainError::validation(
            ValidationKind::DuplicatePlayers,
            "Roster contains the same player twice",
        ));
    }
    Ok(())
}

/// Compute each participant's result for a declaration.
///
/// A declared winner takes WIN and everyone else LOSS; a null winner means
/// the game was a draw and every participant takes DRAW.
pub fn declaration_results(
    players: &[i64],
    winner_id: Option<i64>,
) -> Result<Vec<(i64, PlayerResult)>, DomainError> {
    match winner_id {
        Some(winner) => {
            if !players.contains(&winner) {
                return Err(DomainError::validation(
                    ValidationKind::WinnerNotInPod,
                    format!("Declared winner {winner} is not a participant"),
                ));
            }
            Ok(players
                .iter()
                .map(|&p| {
                    let result = if p == winner {
                        PlayerResult::Win
                    } else {
                        PlayerResult::Loss
                    };
                    (p, result)
                })
                .collect())
        }
        None => Ok(players.iter().map(|&p| (p, PlayerResult::Draw)).collect()),
    }
}

/// A supplied turn order must be a permutation of the pod's players.
pub fn validate_turn_order(players: &[i64], order: &[i64]) -> Result<(), DomainError> {
    let expected: HashSet<_> = players.iter().collect();
    let supplied: HashSet<_> = order.iter().collect();
    if order.len() != players.len() || expected != supplied {
        return Err(DomainError::validation(
            ValidationKind::TurnOrderMismatch,
            "Turn order must list each pod player exactly once",
        ));
    }
    Ok(())
}

/// At most one participant may hold a WIN result.
pub fn validate_results(results: &[Option<PlayerResult>]) -> Result<(), DomainError> {
    let winners = results
        .iter()
        .filter(|r| **r == Some(PlayerResult::Win))
        .count();
    if winners > 1 {
        return Err(DomainError::validation(
            ValidationKind::MultipleWinners,
            format!("{winners} participants hold a win result"),
        ));
    }
    Ok(())
}

/// The consensus check: every active (non-disqualified) participant has
/// confirmed, and there is at least one active participant.
pub fn all_active_confirmed(states: &[ParticipantState]) -> bool {
    let mut any_active = false;
    for state in states {
        if state.is_active() {
            any_active = true;
            if !state.confirmed {
                return false;
            }
        }
    }
    any_active
}

/// Standings delta applied for one participant when a pod finalizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CounterDelta {
    pub wins: i32,
    pub losses: i32,
    pub draws: i32,
}

/// Disqualification counts against the player as a loss.
pub fn counter_delta(result: PlayerResult) -> CounterDelta {
    match result {
        PlayerResult::Win => CounterDelta {
            wins: 1,
            ..CounterDelta::default()
        },
        PlayerResult::Loss | PlayerResult::Disqualified => CounterDelta {
            losses: 1,
            ..CounterDelta::default()
        },
        PlayerResult::Draw => CounterDelta {
            draws: 1,
            ..CounterDelta::default()
        },
    }
}

/// Flip a participant in or out of DISQUALIFIED.
///
/// Returns the new `(result, prior_result)` pair: disqualifying stashes the
/// current result, toggling back restores it.
pub fn toggle_disqualified(
    result: Option<PlayerResult>,
    prior_result: Option<PlayerResult>,
) -> (Option<PlayerResult>, Option<PlayerResult>) {
    if result == Some(PlayerResult::Disqualified) {
        (prior_result, None)
    } else {
        (Some(PlayerResult::Disqualified), result)
    }
}
