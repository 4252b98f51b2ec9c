//! Integration tests for role inheritance resolution and cycle rejection.

mod support;

use backend::config::db::DbProfile;
use backend::db::txn::with_txn;
use backend::error::AppError;
use backend::errors::ErrorCode;
use backend::infra::state::build_state;
use backend::permissions::{self, POD_ADMIN};
use backend::repos::roles;
use support::factory;
use uuid::Uuid;

#[tokio::test]
async fn permissions_flow_through_inheritance() -> Result<(), AppError> {
    let state = build_state()
        .with_db(DbProfile::Test)
        .build()
        .await
        .expect("build test state with DB");

    with_txn(None, &state, |txn| {
        Box::pin(async move {
            let user = factory::user(txn, "organizer").await?;

            // league_admin inherits pod_admin, which carries the grant
            let pod_admin = roles::create_role(txn, &format!("pod-admin-{}", Uuid::new_v4())).await?;
            let league_admin =
                roles::create_role(txn, &format!("league-admin-{}", Uuid::new_v4())).await?;
            roles::create_grant(txn, pod_admin.id, POD_ADMIN).await?;
            permissions::add_inheritance(txn, league_admin.id, pod_admin.id).await?;

            assert!(!permissions::has_permission(txn, user.id, POD_ADMIN).await?);

            roles::assign_role(txn, user.id, league_admin.id).await?;
            assert!(permissions::has_permission(txn, user.id, POD_ADMIN).await?);

            // The grant itself was never attached to league_admin directly
            let direct = roles::find_grants_by_roles(txn, &[league_admin.id]).await?;
            assert!(direct.is_empty());

            Ok::<_, AppError>(())
        })
    })
    .await
}

#[tokio::test]
async fn inheritance_cycles_are_rejected_before_write() -> Result<(), AppError> {
    let state = build_state()
        .with_db(DbProfile::Test)
        .build()
        .await
        .expect("build test state with DB");

    with_txn(None, &state, |txn| {
        Box::pin(async move {
            let a = roles::create_role(txn, &format!("role-a-{}", Uuid::new_v4())).await?;
            let b = roles::create_role(txn, &format!("role-b-{}", Uuid::new_v4())).await?;
            let c = roles::create_role(txn, &format!("role-c-{}", Uuid::new_v4())).await?;

            permissions::add_inheritance(txn, a.id, b.id).await?;
            permissions::add_inheritance(txn, b.id, c.id).await?;

            // Closing the loop is rejected, and no edge is written
            let err: AppError = permissions::add_inheritance(txn, c.id, a.id)
                .await
                .unwrap_err()
                .into();
            assert_eq!(err.code(), ErrorCode::RoleCycle);

            let edges = roles::find_all_edges(txn).await?;
            assert!(!edges
                .iter()
                .any(|e| e.role_id == c.id && e.parent_role_id == a.id));

            // Self-inheritance is a cycle too
            let err: AppError = permissions::add_inheritance(txn, a.id, a.id)
                .await
                .unwrap_err()
                .into();
            assert_eq!(err.code(), ErrorCode::RoleCycle);

            Ok::<_, AppError>(())
        })
    })
    .await
}
