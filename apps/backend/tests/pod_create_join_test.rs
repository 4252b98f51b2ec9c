//! Integration tests for pod creation, joining and deletion.

mod support;

use backend::config::db::DbProfile;
use backend::db::txn::with_txn;
use backend::entities::pods::{ConfirmStatus, PodStatus};
use backend::error::AppError;
use backend::errors::ErrorCode;
use backend::infra::state::build_state;
use backend::repos::{pod_players, pods};
use backend::services::pod_flow::PodFlowService;
use support::factory;

#[tokio::test]
async fn create_pod_starts_open_with_unconfirmed_roster() -> Result<(), AppError> {
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

            assert_eq!(pod.status, PodStatus::Active);
            assert_eq!(pod.confirm_status, ConfirmStatus::Open);
            assert_eq!(pod.created_by, Some(players[0]));

            let participants = pod_players::find_all_by_pod(txn, pod.id).await?;
            assert_eq!(participants.len(), 2);
            assert!(participants.iter().all(|p| !p.confirmed && p.result.is_none()));

            Ok::<_, AppError>(())
        })
    })
    .await
}

#[tokio::test]
async fn create_pod_rejects_bad_rosters() -> Result<(), AppError> {
    let state = build_state()
        .with_db(DbProfile::Test)
        .build()
        .await
        .expect("build test state with DB");

    with_txn(None, &state, |txn| {
        Box::pin(async move {
            let setup = factory::league_with_members(txn, 5).await?;
            let players = setup.player_ids();
            let service = PodFlowService::new();

            // Five players is one too many
            let err = service
                .create_pod(txn, setup.league.id, players[0], &players)
                .await
                .unwrap_err();
            assert_eq!(err.code(), ErrorCode::RosterSize);

            // Duplicate players
            let err = service
                .create_pod(txn, setup.league.id, players[0], &[players[0], players[0]])
                .await
                .unwrap_err();
            assert_eq!(err.code(), ErrorCode::DuplicatePlayers);

            // Player not enrolled in the league
            let outsider = factory::user(txn, "outsider").await?;
            let err = service
                .create_pod(txn, setup.league.id, players[0], &[players[0], outsider.id])
                .await
                .unwrap_err();
            assert_eq!(err.code(), ErrorCode::ValidationError);

            // Creator neither plays nor holds the admin permission
            let err = service
                .create_pod(txn, setup.league.id, players[4], &[players[0], players[1]])
                .await
                .unwrap_err();
            assert_eq!(err.code(), ErrorCode::Forbidden);

            Ok::<_, AppError>(())
        })
    })
    .await
}

#[tokio::test]
async fn create_pod_rejects_closed_league() -> Result<(), AppError> {
    let state = build_state()
        .with_db(DbProfile::Test)
        .build()
        .await
        .expect("build test state with DB");

    with_txn(None, &state, |txn| {
        Box::pin(async move {
            use backend::entities::leagues::LeagueStatus;
            use backend::repos::{league_members, leagues};

            let league = leagues::create_league(txn, "Closed league", LeagueStatus::Closed).await?;
            let player = factory::user(txn, "latecomer").await?;
            league_members::create_membership(txn, league.id, player.id).await?;

            let service = PodFlowService::new();
            let err = service
                .create_pod(txn, league.id, player.id, &[player.id])
                .await
                .unwrap_err();
            assert_eq!(err.code(), ErrorCode::LeagueNotActive);

            Ok::<_, AppError>(())
        })
    })
    .await
}

#[tokio::test]
async fn admin_may_create_pod_without_playing() -> Result<(), AppError> {
    let state = build_state()
        .with_db(DbProfile::Test)
        .build()
        .await
        .expect("build test state with DB");

    with_txn(None, &state, |txn| {
        Box::pin(async move {
            let setup = factory::league_with_members(txn, 2).await?;
            let players = setup.player_ids();
            let admin = factory::user(txn, "admin").await?;
            factory::grant_pod_admin(txn, admin.id).await?;

            let service = PodFlowService::new();
            let pod = service
                .create_pod(txn, setup.league.id, admin.id, &players)
                .await?;
            assert_eq!(pod.created_by, Some(admin.id));

            Ok::<_, AppError>(())
        })
    })
    .await
}

#[tokio::test]
async fn join_fills_pod_up_to_capacity() -> Result<(), AppError> {
    let state = build_state()
        .with_db(DbProfile::Test)
        .build()
        .await
        .expect("build test state with DB");

    with_txn(None, &state, |txn| {
        Box::pin(async move {
            let setup = factory::league_with_members(txn, 1).await?;
            let creator = setup.players[0].id;
            let service = PodFlowService::new();
            let pod = service
                .create_pod(txn, setup.league.id, creator, &[creator])
                .await?;

            // Three more members join, reaching the cap of four
            for i in 0..3 {
                let joiner =
                    factory::enrolled_user(txn, setup.league.id, &format!("joiner{i}")).await?;
                service.join_pod(txn, pod.id, joiner.id).await?;
            }
            assert_eq!(pod_players::count_by_pod(txn, pod.id).await?, 4);

            // A fifth member is turned away and the count is unchanged
            let fifth = factory::enrolled_user(txn, setup.league.id, "fifth").await?;
            let err = service.join_pod(txn, pod.id, fifth.id).await.unwrap_err();
            assert_eq!(err.code(), ErrorCode::PodFull);
            assert_eq!(pod_players::count_by_pod(txn, pod.id).await?, 4);

            Ok::<_, AppError>(())
        })
    })
    .await
}

#[tokio::test]
async fn join_rejects_duplicates_outsiders_and_double_booking() -> Result<(), AppError> {
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
                .create_pod(txn, setup.league.id, players[0], &[players[0]])
                .await?;

            // Already in this pod
            let err = service.join_pod(txn, pod.id, players[0]).await.unwrap_err();
            assert_eq!(err.code(), ErrorCode::AlreadyJoined);

            // Not enrolled in the league
            let outsider = factory::user(txn, "outsider").await?;
            let err = service.join_pod(txn, pod.id, outsider.id).await.unwrap_err();
            assert_eq!(err.code(), ErrorCode::Forbidden);

            // Second open pod in the same league: a player already seated
            // in an open pod cannot join another
            let second_pod = service
                .create_pod(txn, setup.league.id, players[1], &[players[1]])
                .await?;
            let err = service
                .join_pod(txn, second_pod.id, players[0])
                .await
                .unwrap_err();
            assert_eq!(err.code(), ErrorCode::AlreadyInOpenPod);

            // Unknown pod id
            let err = service.join_pod(txn, 999_999_999, players[1]).await.unwrap_err();
            assert_eq!(err.code(), ErrorCode::PodNotFound);

            // Once a result is declared the pod stops accepting joins
            let win_condition = factory::combat_damage(txn).await?;
            service
                .declare_result(txn, pod.id, players[0], Some(players[0]), Some(win_condition.id), None)
                .await?;
            let late = factory::enrolled_user(txn, setup.league.id, "late").await?;
            let err = service.join_pod(txn, pod.id, late.id).await.unwrap_err();
            assert_eq!(err.code(), ErrorCode::InvalidState);

            Ok::<_, AppError>(())
        })
    })
    .await
}

#[tokio::test]
async fn delete_pod_is_soft_and_guarded() -> Result<(), AppError> {
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

            // A non-creator without the permission may not delete
            let err = service.delete_pod(txn, pod.id, players[1]).await.unwrap_err();
            assert_eq!(err.code(), ErrorCode::Forbidden);

            // The creator may
            service.delete_pod(txn, pod.id, players[0]).await?;

            // The pod is gone from active queries but its id still resolves nothing
            assert!(pods::find_by_id(txn, pod.id).await?.is_none());
            let listed = pods::find_all_by_league(txn, setup.league.id, None).await?;
            assert!(listed.iter().all(|p| p.id != pod.id));

            Ok::<_, AppError>(())
        })
    })
    .await
}
