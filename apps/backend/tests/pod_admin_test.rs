//! Integration tests for admin overrides and the activity log.

mod support;

use backend::config::db::DbProfile;
use backend::db::txn::with_txn;
use backend::entities::pod_players::PlayerResult;
use backend::entities::pods::ConfirmStatus;
use backend::error::AppError;
use backend::errors::ErrorCode;
use backend::infra::state::build_state;
use backend::repos::{activity, league_members, pod_players, pods};
use backend::services::pod_flow::{AdminParticipant, AdminPodUpdate, PodFlowService};
use support::factory;

#[tokio::test]
async fn admin_calls_require_the_permission() -> Result<(), AppError> {
    let state = build_state()
        .with_db(DbProfile::Test)
        .build()
        .await
        .expect("build test state with DB");

    with_txn(None, &state, |txn| {
        Box::pin(async move {
            let setup = factory::league_with_members(txn, 2).await?;
            let players = setup.player_ids();
            let service = PodFlowService::new();
            let pod = service
                .create_pod(txn, setup.league.id, players[0], &players)
                .await?;

            // The creator is not an admin
            let err = service
                .admin_update_pod(
                    txn,
                    players[0],
                    pod.id,
                    AdminPodUpdate {
                        confirm_status: Some(ConfirmStatus::Complete),
                        participants: None,
                    },
                )
                .await
                .unwrap_err();
            assert_eq!(err.code(), ErrorCode::Forbidden);

            Ok::<_, AppError>(())
        })
    })
    .await
}

#[tokio::test]
async fn admin_can_force_completion_with_counters() -> Result<(), AppError> {
    let state = build_state()
        .with_db(DbProfile::Test)
        .build()
        .await
        .expect("build test state with DB");

    with_txn(None, &state, |txn| {
        Box::pin(async move {
            let setup = factory::league_with_members(txn, 2).await?;
            let (a, b) = (setup.players[0].id, setup.players[1].id);
            let admin = factory::user(txn, "admin").await?;
            factory::grant_pod_admin(txn, admin.id).await?;
            let win_condition = factory::combat_damage(txn).await?;

            let service = PodFlowService::new();
            let pod = service.create_pod(txn, setup.league.id, a, &[a, b]).await?;
            service
                .declare_result(txn, pod.id, a, Some(b), Some(win_condition.id), None)
                .await?;

            // Nobody confirmed; the admin forces completion
            let pod = service
                .admin_update_pod(
                    txn,
                    admin.id,
                    pod.id,
                    AdminPodUpdate {
                        confirm_status: Some(ConfirmStatus::Complete),
                        participants: None,
                    },
                )
                .await?;
            assert_eq!(pod.confirm_status, ConfirmStatus::Complete);

            let standing = league_members::find_membership(txn, setup.league.id, b)
                .await?
                .expect("membership");
            assert_eq!(standing.wins, 1);

            // Forcing anything on a finalized pod is rejected
            let err = service
                .admin_update_pod(
                    txn,
                    admin.id,
                    pod.id,
                    AdminPodUpdate {
                        confirm_status: Some(ConfirmStatus::Open),
                        participants: None,
                    },
                )
                .await
                .unwrap_err();
            assert_eq!(err.code(), ErrorCode::InvalidState);

            Ok::<_, AppError>(())
        })
    })
    .await
}

#[tokio::test]
async fn admin_replaces_roster_in_one_call() -> Result<(), AppError> {
    let state = build_state()
        .with_db(DbProfile::Test)
        .build()
        .await
        .expect("build test state with DB");

    with_txn(None, &state, |txn| {
        Box::pin(async move {
            let setup = factory::league_with_members(txn, 4).await?;
            let players = setup.player_ids();
            let admin = factory::user(txn, "admin").await?;
            factory::grant_pod_admin(txn, admin.id).await?;

            let service = PodFlowService::new();
            let pod = service
                .create_pod(txn, setup.league.id, players[0], &[players[0], players[1]])
                .await?;

            let pod = service
                .admin_update_pod(
                    txn,
                    admin.id,
                    pod.id,
                    AdminPodUpdate {
                        confirm_status: Some(ConfirmStatus::Pending),
                        participants: Some(vec![
                            AdminParticipant {
                                player_id: players[2],
                                result: Some(PlayerResult::Win),
                                confirmed: true,
                                turn_order: Some(0),
                            },
                            AdminParticipant {
                                player_id: players[3],
                                result: Some(PlayerResult::Loss),
                                confirmed: false,
                                turn_order: Some(1),
                            },
                        ]),
                    },
                )
                .await?;
            assert_eq!(pod.confirm_status, ConfirmStatus::Pending);

            let participants = pod_players::find_all_by_pod(txn, pod.id).await?;
            assert_eq!(participants.len(), 2);
            assert!(participants.iter().any(|p| p.player_id == players[2]
                && p.result == Some(PlayerResult::Win)
                && p.confirmed));

            // Two winners in a replacement roster are rejected
            let err = service
                .admin_update_pod(
                    txn,
                    admin.id,
                    pod.id,
                    AdminPodUpdate {
                        confirm_status: None,
                        participants: Some(vec![
                            AdminParticipant {
                                player_id: players[0],
                                result: Some(PlayerResult::Win),
                                confirmed: false,
                                turn_order: None,
                            },
                            AdminParticipant {
                                player_id: players[1],
                                result: Some(PlayerResult::Win),
                                confirmed: false,
                                turn_order: None,
                            },
                        ]),
                    },
                )
                .await
                .unwrap_err();
            assert_eq!(err.code(), ErrorCode::MultipleWinners);

            Ok::<_, AppError>(())
        })
    })
    .await
}

#[tokio::test]
async fn admin_participant_management() -> Result<(), AppError> {
    let state = build_state()
        .with_db(DbProfile::Test)
        .build()
        .await
        .expect("build test state with DB");

    with_txn(None, &state, |txn| {
        Box::pin(async move {
            let setup = factory::league_with_members(txn, 3).await?;
            let players = setup.player_ids();
            let admin = factory::user(txn, "admin").await?;
            factory::grant_pod_admin(txn, admin.id).await?;
            let win_condition = factory::combat_damage(txn).await?;

            let service = PodFlowService::new();
            let pod = service
                .create_pod(txn, setup.league.id, players[0], &[players[0], players[1]])
                .await?;

            // Add a third participant
            service
                .admin_add_participant(txn, admin.id, pod.id, players[2])
                .await?;
            assert_eq!(pod_players::count_by_pod(txn, pod.id).await?, 3);

            // Update one participant's result directly
            service
                .admin_update_participant(txn, admin.id, pod.id, players[2], Some(PlayerResult::Loss))
                .await?;
            let updated = pod_players::require_participant(txn, pod.id, players[2]).await?;
            assert_eq!(updated.result, Some(PlayerResult::Loss));

            // Finalize the pod through the normal path
            service
                .declare_result(txn, pod.id, players[0], Some(players[1]), Some(win_condition.id), None)
                .await?;
            service.confirm(txn, pod.id, players[1]).await?;
            service.confirm(txn, pod.id, players[2]).await?;
            let pod_now = pods::require_pod(txn, pod.id).await?;
            assert_eq!(pod_now.confirm_status, ConfirmStatus::Complete);

            // Adding to a finalized pod is rejected...
            let extra = factory::enrolled_user(txn, setup.league.id, "extra").await?;
            let err = service
                .admin_add_participant(txn, admin.id, pod.id, extra.id)
                .await
                .unwrap_err();
            assert_eq!(err.code(), ErrorCode::InvalidState);

            // ...but corrective removal still works
            service
                .admin_remove_participant(txn, admin.id, pod.id, players[2])
                .await?;
            assert_eq!(pod_players::count_by_pod(txn, pod.id).await?, 2);

            Ok::<_, AppError>(())
        })
    })
    .await
}

#[tokio::test]
async fn dq_toggle_round_trips_and_counts_as_loss() -> Result<(), AppError> {
    let state = build_state()
        .with_db(DbProfile::Test)
        .build()
        .await
        .expect("build test state with DB");

    with_txn(None, &state, |txn| {
        Box::pin(async move {
            let setup = factory::league_with_members(txn, 3).await?;
            let players = setup.player_ids();
            let admin = factory::user(txn, "admin").await?;
            factory::grant_pod_admin(txn, admin.id).await?;
            let win_condition = factory::combat_damage(txn).await?;

            let service = PodFlowService::new();
            let pod = service
                .create_pod(txn, setup.league.id, players[0], &players)
                .await?;
            service
                .declare_result(txn, pod.id, players[0], Some(players[1]), Some(win_condition.id), None)
                .await?;

            // DQ the third player (currently a LOSS)
            let dq = service
                .admin_toggle_disqualified(txn, admin.id, pod.id, players[2])
                .await?;
            assert_eq!(dq.result, Some(PlayerResult::Disqualified));
            assert_eq!(dq.prior_result, Some(PlayerResult::Loss));

            // Toggling again restores the prior result
            let restored = service
                .admin_toggle_disqualified(txn, admin.id, pod.id, players[2])
                .await?;
            assert_eq!(restored.result, Some(PlayerResult::Loss));
            assert_eq!(restored.prior_result, None);

            // DQ again and finalize: the DQ'd player is not needed for
            // consensus and the DQ counts as a loss
            service
                .admin_toggle_disqualified(txn, admin.id, pod.id, players[2])
                .await?;
            service.confirm(txn, pod.id, players[1]).await?;

            let pod_now = pods::require_pod(txn, pod.id).await?;
            assert_eq!(pod_now.confirm_status, ConfirmStatus::Complete);

            let standing = league_members::find_membership(txn, setup.league.id, players[2])
                .await?
                .expect("membership");
            assert_eq!(standing.losses, 1);

            Ok::<_, AppError>(())
        })
    })
    .await
}

#[tokio::test]
async fn admin_writes_are_activity_logged() -> Result<(), AppError> {
    let state = build_state()
        .with_db(DbProfile::Test)
        .build()
        .await
        .expect("build test state with DB");

    with_txn(None, &state, |txn| {
        Box::pin(async move {
            let setup = factory::league_with_members(txn, 3).await?;
            let players = setup.player_ids();
            let admin = factory::user(txn, "admin").await?;
            factory::grant_pod_admin(txn, admin.id).await?;

            let service = PodFlowService::new();
            let pod = service
                .create_pod(txn, setup.league.id, players[0], &[players[0], players[1]])
                .await?;

            service
                .admin_add_participant(txn, admin.id, pod.id, players[2])
                .await?;
            service
                .admin_remove_participant(txn, admin.id, pod.id, players[2])
                .await?;
            service
                .admin_toggle_disqualified(txn, admin.id, pod.id, players[1])
                .await?;

            let entries = activity::find_all_by_target(txn, "pod", pod.id).await?;
            let actions: Vec<&str> = entries.iter().map(|e| e.action.as_str()).collect();
            assert_eq!(
                actions,
                vec![
                    "admin.pod.participant.add",
                    "admin.pod.participant.remove",
                    "admin.pod.participant.dq_toggle",
                ]
            );
            assert!(entries.iter().all(|e| e.actor_id == Some(admin.id)));

            Ok::<_, AppError>(())
        })
    })
    .await
}
