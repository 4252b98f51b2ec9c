//! Integration tests for result declaration, confirmation and finalization.

mod support;

use backend::config::db::DbProfile;
use backend::db::txn::with_txn;
use backend::entities::pod_players::PlayerResult;
use backend::entities::pods::{ConfirmStatus, PodOutcome, PodStatus};
use backend::error::AppError;
use backend::errors::ErrorCode;
use backend::infra::state::build_state;
use backend::repos::{league_members, pod_players, pods};
use backend::services::pod_flow::PodFlowService;
use support::factory;

#[tokio::test]
async fn declared_win_flows_to_completion_and_standings() -> Result<(), AppError> {
    let state = build_state()
        .with_db(DbProfile::Test)
        .build()
        .await
        .expect("build test state with DB");

    with_txn(None, &state, |txn| {
        Box::pin(async move {
            let setup = factory::league_with_members(txn, 2).await?;
            let (a, b) = (setup.players[0].id, setup.players[1].id);
            let win_condition = factory::combat_damage(txn).await?;

            let service = PodFlowService::new();
            let pod = service.create_pod(txn, setup.league.id, a, &[a, b]).await?;

            // A (creator) declares B the winner
            let pod = service
                .declare_result(txn, pod.id, a, Some(b), Some(win_condition.id), None)
                .await?;
            assert_eq!(pod.status, PodStatus::Pending);
            assert_eq!(pod.confirm_status, ConfirmStatus::Pending);
            assert_eq!(pod.outcome, Some(PodOutcome::Win));
            assert_eq!(pod.win_condition_id, Some(win_condition.id));

            let winner = pod_players::require_participant(txn, pod.id, b).await?;
            let loser = pod_players::require_participant(txn, pod.id, a).await?;
            assert_eq!(winner.result, Some(PlayerResult::Win));
            assert_eq!(loser.result, Some(PlayerResult::Loss));
            // The declarer's own confirmation survives; the other resets
            assert!(loser.confirmed);
            assert!(!winner.confirmed);

            // B confirms - consensus reached, pod finalizes
            let pod = service.confirm(txn, pod.id, b).await?;
            assert_eq!(pod.status, PodStatus::Completed);
            assert_eq!(pod.confirm_status, ConfirmStatus::Complete);

            let b_standing = league_members::find_membership(txn, setup.league.id, b)
                .await?
                .expect("membership");
            let a_standing = league_members::find_membership(txn, setup.league.id, a)
                .await?
                .expect("membership");
            assert_eq!((b_standing.wins, b_standing.losses, b_standing.draws), (1, 0, 0));
            assert_eq!((a_standing.wins, a_standing.losses, a_standing.draws), (0, 1, 0));

            Ok::<_, AppError>(())
        })
    })
    .await
}

#[tokio::test]
async fn draw_declaration_marks_everyone_and_counts_draws() -> Result<(), AppError> {
    let state = build_state()
        .with_db(DbProfile::Test)
        .build()
        .await
        .expect("build test state with DB");

    with_txn(None, &state, |txn| {
        Box::pin(async move {
            let setup = factory::league_with_members(txn, 3).await?;
            let players = setup.player_ids();
            let creator = players[0];

            let service = PodFlowService::new();
            let pod = service
                .create_pod(txn, setup.league.id, creator, &players)
                .await?;

            // Draw: no winner, win condition optional
            let pod = service
                .declare_result(txn, pod.id, creator, None, None, None)
                .await?;
            assert_eq!(pod.outcome, Some(PodOutcome::Draw));

            let participants = pod_players::find_all_by_pod(txn, pod.id).await?;
            assert!(participants
                .iter()
                .all(|p| p.result == Some(PlayerResult::Draw)));

            // Everyone confirms (the creator's row is already confirmed)
            for &player in &players[1..] {
                service.confirm(txn, pod.id, player).await?;
            }

            let pod = pods::require_pod(txn, pod.id).await?;
            assert_eq!(pod.confirm_status, ConfirmStatus::Complete);

            for &player in &players {
                let standing = league_members::find_membership(txn, setup.league.id, player)
                    .await?
                    .expect("membership");
                assert_eq!((standing.wins, standing.losses, standing.draws), (0, 0, 1));
            }

            Ok::<_, AppError>(())
        })
    })
    .await
}

#[tokio::test]
async fn declaration_validations() -> Result<(), AppError> {
    let state = build_state()
        .with_db(DbProfile::Test)
        .build()
        .await
        .expect("build test state with DB");

    with_txn(None, &state, |txn| {
        Box::pin(async move {
            let setup = factory::league_with_members(txn, 3).await?;
            let players = setup.player_ids();
            let creator = players[0];
            let win_condition = factory::combat_damage(txn).await?;

            let service = PodFlowService::new();
            let pod = service
                .create_pod(txn, setup.league.id, creator, &players)
                .await?;

            // A win needs a win condition
            let err = service
                .declare_result(txn, pod.id, creator, Some(players[1]), None, None)
                .await
                .unwrap_err();
            assert_eq!(err.code(), ErrorCode::WinConditionRequired);

            // Winner must be in the pod
            let stranger = factory::enrolled_user(txn, setup.league.id, "stranger").await?;
            let err = service
                .declare_result(txn, pod.id, creator, Some(stranger.id), Some(win_condition.id), None)
                .await
                .unwrap_err();
            assert_eq!(err.code(), ErrorCode::WinnerNotInPod);

            // Only the creator (or an admin) declares
            let err = service
                .declare_result(txn, pod.id, players[1], Some(players[1]), Some(win_condition.id), None)
                .await
                .unwrap_err();
            assert_eq!(err.code(), ErrorCode::Forbidden);

            // Turn order must be a permutation of the roster
            let err = service
                .declare_result(
                    txn,
                    pod.id,
                    creator,
                    Some(players[1]),
                    Some(win_condition.id),
                    Some(&[players[0], players[1], players[1]]),
                )
                .await
                .unwrap_err();
            assert_eq!(err.code(), ErrorCode::TurnOrderMismatch);

            // And a valid one is persisted as seats
            service
                .declare_result(
                    txn,
                    pod.id,
                    creator,
                    Some(players[1]),
                    Some(win_condition.id),
                    Some(&[players[2], players[0], players[1]]),
                )
                .await?;
            let seated = pod_players::require_participant(txn, pod.id, players[2]).await?;
            assert_eq!(seated.turn_order, Some(0));

            Ok::<_, AppError>(())
        })
    })
    .await
}

#[tokio::test]
async fn redeclaration_resets_consensus() -> Result<(), AppError> {
    let state = build_state()
        .with_db(DbProfile::Test)
        .build()
        .await
        .expect("build test state with DB");

    with_txn(None, &state, |txn| {
        Box::pin(async move {
            let setup = factory::league_with_members(txn, 3).await?;
            let players = setup.player_ids();
            let creator = players[0];
            let win_condition = factory::combat_damage(txn).await?;

            let service = PodFlowService::new();
            let pod = service
                .create_pod(txn, setup.league.id, creator, &players)
                .await?;

            service
                .declare_result(txn, pod.id, creator, Some(players[1]), Some(win_condition.id), None)
                .await?;
            service.confirm(txn, pod.id, players[1]).await?;

            // Two of three confirmed; the creator re-declares a different winner
            let pod = service
                .declare_result(txn, pod.id, creator, Some(players[2]), Some(win_condition.id), None)
                .await?;
            assert_eq!(pod.confirm_status, ConfirmStatus::Pending);

            let participants = pod_players::find_all_by_pod(txn, pod.id).await?;
            for p in &participants {
                if p.player_id == creator {
                    assert!(p.confirmed, "declarer keeps their confirmation");
                } else {
                    assert!(!p.confirmed, "consensus resets for everyone else");
                }
            }
            let new_winner = pod_players::require_participant(txn, pod.id, players[2]).await?;
            assert_eq!(new_winner.result, Some(PlayerResult::Win));
            let old_winner = pod_players::require_participant(txn, pod.id, players[1]).await?;
            assert_eq!(old_winner.result, Some(PlayerResult::Loss));

            Ok::<_, AppError>(())
        })
    })
    .await
}

#[tokio::test]
async fn confirm_state_rules() -> Result<(), AppError> {
    let state = build_state()
        .with_db(DbProfile::Test)
        .build()
        .await
        .expect("build test state with DB");

    with_txn(None, &state, |txn| {
        Box::pin(async move {
            let setup = factory::league_with_members(txn, 2).await?;
            let (a, b) = (setup.players[0].id, setup.players[1].id);
            let win_condition = factory::combat_damage(txn).await?;

            let service = PodFlowService::new();
            let pod = service.create_pod(txn, setup.league.id, a, &[a, b]).await?;

            // No declaration yet: confirming an OPEN pod is rejected
            let err = service.confirm(txn, pod.id, a).await.unwrap_err();
            assert_eq!(err.code(), ErrorCode::InvalidState);

            // A non-participant gets a 404
            let bystander = factory::enrolled_user(txn, setup.league.id, "bystander").await?;
            service
                .declare_result(txn, pod.id, a, Some(b), Some(win_condition.id), None)
                .await?;
            let err = service.confirm(txn, pod.id, bystander.id).await.unwrap_err();
            assert_eq!(err.code(), ErrorCode::ParticipantNotFound);

            // Finalize, then confirm again: idempotent, counters untouched
            service.confirm(txn, pod.id, b).await?;
            let standing_before = league_members::find_membership(txn, setup.league.id, b)
                .await?
                .expect("membership");

            let pod_after = service.confirm(txn, pod.id, b).await?;
            assert_eq!(pod_after.confirm_status, ConfirmStatus::Complete);

            let standing_after = league_members::find_membership(txn, setup.league.id, b)
                .await?
                .expect("membership");
            assert_eq!(standing_before.wins, standing_after.wins);

            Ok::<_, AppError>(())
        })
    })
    .await
}

#[tokio::test]
async fn completed_pod_is_immutable_to_declaration_and_deletion() -> Result<(), AppError> {
    let state = build_state()
        .with_db(DbProfile::Test)
        .build()
        .await
        .expect("build test state with DB");

    with_txn(None, &state, |txn| {
        Box::pin(async move {
            let setup = factory::league_with_members(txn, 2).await?;
            let (a, b) = (setup.players[0].id, setup.players[1].id);
            let win_condition = factory::combat_damage(txn).await?;

            let service = PodFlowService::new();
            let pod = service.create_pod(txn, setup.league.id, a, &[a, b]).await?;
            service
                .declare_result(txn, pod.id, a, Some(b), Some(win_condition.id), None)
                .await?;
            service.confirm(txn, pod.id, b).await?;

            let err = service
                .declare_result(txn, pod.id, a, Some(a), Some(win_condition.id), None)
                .await
                .unwrap_err();
            assert_eq!(err.code(), ErrorCode::InvalidState);

            let err = service.delete_pod(txn, pod.id, a).await.unwrap_err();
            assert_eq!(err.code(), ErrorCode::InvalidState);

            Ok::<_, AppError>(())
        })
    })
    .await
}
