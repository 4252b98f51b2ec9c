//! Integration tests for league pod listings and the status filter.

mod support;

use backend::config::db::DbProfile;
use backend::db::txn::with_txn;
use backend::entities::pods::PodStatus;
use backend::error::AppError;
use backend::infra::state::build_state;
use backend::repos::pods;
use backend::services::pod_flow::PodFlowService;
use support::factory;

#[tokio::test]
async fn league_listing_filters_by_status_and_hides_deleted() -> Result<(), AppError> {
    let state = build_state()
        .with_db(DbProfile::Test)
        .build()
        .await
        .expect("build test state with DB");

    with_txn(None, &state, |txn| {
        Box::pin(async move {
            let setup = factory::league_with_members(txn, 4).await?;
            let players = setup.player_ids();
            let win_condition = factory::combat_damage(txn).await?;
            let service = PodFlowService::new();

            // One open pod, one completed pod, one deleted pod
            let open_pod = service
                .create_pod(txn, setup.league.id, players[0], &[players[0]])
                .await?;

            let done_pod = service
                .create_pod(txn, setup.league.id, players[1], &[players[1], players[2]])
                .await?;
            service
                .declare_result(txn, done_pod.id, players[1], Some(players[2]), Some(win_condition.id), None)
                .await?;
            service.confirm(txn, done_pod.id, players[2]).await?;

            let dead_pod = service
                .create_pod(txn, setup.league.id, players[3], &[players[3]])
                .await?;
            service.delete_pod(txn, dead_pod.id, players[3]).await?;

            let all = pods::find_all_by_league(txn, setup.league.id, None).await?;
            let ids: Vec<i64> = all.iter().map(|p| p.id).collect();
            assert!(ids.contains(&open_pod.id));
            assert!(ids.contains(&done_pod.id));
            assert!(!ids.contains(&dead_pod.id));

            let active =
                pods::find_all_by_league(txn, setup.league.id, Some(PodStatus::Active)).await?;
            assert!(active.iter().any(|p| p.id == open_pod.id));
            assert!(active.iter().all(|p| p.id != done_pod.id));

            let completed =
                pods::find_all_by_league(txn, setup.league.id, Some(PodStatus::Completed)).await?;
            assert!(completed.iter().any(|p| p.id == done_pod.id));

            Ok::<_, AppError>(())
        })
    })
    .await
}
