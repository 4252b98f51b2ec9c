use proptest::prelude::*;

use super::confirmation::{
    all_active_confirmed, counter_delta, declaration_results, toggle_disqualified,
    ParticipantState,
};
use crate::entities::pod_players::PlayerResult;

fn arb_result() -> impl Strategy<Value = Option<PlayerResult>> {
    prop_oneof![
        Just(None),
        Just(Some(PlayerResult::Win)),
        Just(Some(PlayerResult::Loss)),
        Just(Some(PlayerResult::Draw)),
        Just(Some(PlayerResult::Disqualified)),
    ]
}

fn arb_players() -> impl Strategy<Value = Vec<i64>> {
    // Unique player ids, pod-sized
    proptest::collection::hash_set(1i64..100, 1..=4).prop_map(|s| s.into_iter().collect())
}

proptest! {
    #[test]
    fn declaration_yields_exactly_one_winner_or_all_draw(
        players in arb_players(),
        pick in 0usize..4,
        declare_draw in proptest::bool::ANY,
    ) {
        let winner = if declare_draw {
            None
        } else {
            players.get(pick % players.len()).copied()
        };
        let results = declaration_results(&players, winner).unwrap();

        prop_assert_eq!(results.len(), players.len());
        let wins = results.iter().filter(|(_, r)| *r == PlayerResult::Win).count();
        let draws = results.iter().filter(|(_, r)| *r == PlayerResult::Draw).count();
        match winner {
            Some(_) => {
                prop_assert_eq!(wins, 1);
                prop_assert_eq!(draws, 0);
            }
            None => {
                prop_assert_eq!(wins, 0);
                prop_assert_eq!(draws, results.len());
            }
        }
    }

    #[test]
    fn counter_delta_is_exactly_one_increment(result in arb_result()) {
        if let Some(result) = result {
            let delta = counter_delta(result);
            prop_assert_eq!(delta.wins + delta.losses + delta.draws, 1);
        }
    }

    #[test]
    fn dq_toggle_twice_is_identity(result in arb_result()) {
        // Starting from a non-DQ state, two toggles restore the original result.
        prop_assume!(result != Some(PlayerResult::Disqualified));
        let (dq, prior) = toggle_disqualified(result, None);
        prop_assert_eq!(dq, Some(PlayerResult::Disqualified));
        let (restored, cleared) = toggle_disqualified(dq, prior);
        prop_assert_eq!(restored, result);
        prop_assert_eq!(cleared, None);
    }

    #[test]
    fn consensus_flips_with_last_active_confirmation(
        players in arb_players(),
        unconfirmed_pick in 0usize..4,
    ) {
        let unconfirmed = players[unconfirmed_pick % players.len()];
        let states: Vec<ParticipantState> = players
            .iter()
            .map(|&p| ParticipantState {
                player_id: p,
                confirmed: p != unconfirmed,
                result: Some(PlayerResult::Loss),
            })
            .collect();

        prop_assert!(!all_active_confirmed(&states));

        let all: Vec<ParticipantState> = states
            .iter()
            .map(|s| ParticipantState { confirmed: true, ..*s })
            .collect();
        prop_assert!(all_active_confirmed(&all));
    }
}
