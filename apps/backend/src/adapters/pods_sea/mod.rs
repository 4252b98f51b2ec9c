//! SeaORM adapter for the pod repository - generic over ConnectionTrait.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, NotSet, QueryFilter, QueryOrder,
    QuerySelect, Set,
};

use crate::entities::pods;

pub mod dto;

pub use dto::{PodCreate, PodDeclaration};

// Adapter functions return DbErr; repos layer maps to DomainError via From<DbErr>.
// All reads exclude soft-deleted pods.

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    pod_id: i64,
) -> Result<Option<pods::Model>, sea_orm::DbErr> {
    pods::Entity::find()
        .filter(pods::Column::Id.eq(pod_id))
        .filter(pods::Column::DeletedAt.is_null())
        .one(conn)
        .await
}

/// Find pod by ID or return RecordNotFound error.
pub async fn require_pod<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    pod_id: i64,
) -> Result<pods::Model, sea_orm::DbErr> {
    find_by_id(conn, pod_id)
        .await?
        .ok_or_else(|| sea_orm::DbErr::RecordNotFound("Pod not found".to_string()))
}

/// Load a pod under `SELECT ... FOR UPDATE`.
///
/// Every state-machine mutation goes through this so that concurrent
/// confirmations on the same pod serialize at the row lock and the
/// all-confirmed check runs against committed flags.
pub async fn require_pod_for_update<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    pod_id: i64,
) -> Result<pods::Model, sea_orm::DbErr> {
    pods::Entity::find()
        .filter(pods::Column::Id.eq(pod_id))
        .filter(pods::Column::DeletedAt.is_null())
        .lock_exclusive()
        .one(conn)
        .await?
        .ok_or_else(|| sea_orm::DbErr::RecordNotFound("Pod not found".to_string()))
}

pub async fn create_pod<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: PodCreate,
) -> Result<pods::Model, sea_orm::DbErr> {
    let now = time::OffsetDateTime::now_utc();
    let pod_active = pods::ActiveModel {
        id: NotSet,
        league_id: Set(dto.league_id),
        created_by: Set(dto.created_by),
        status: Set(pods::PodStatus::Active),
        confirm_status: Set(pods::ConfirmStatus::Open),
        outcome: NotSet,
        win_condition_id: NotSet,
        deleted_at: NotSet,
        created_at: Set(now),
        updated_at: Set(now),
    };

    pod_active.insert(conn).await
}

/// Record a declaration: outcome + win condition, statuses move to PENDING.
pub async fn apply_declaration<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: PodDeclaration,
) -> Result<pods::Model, sea_orm::DbErr> {
    let pod = pods::ActiveModel {
        id: Set(dto.id),
        league_id: NotSet,
        created_by: NotSet,
        status: Set(pods::PodStatus::Pending),
        confirm_status: Set(pods::ConfirmStatus::Pending),
        outcome: Set(Some(dto.outcome)),
        win_condition_id: Set(dto.win_condition_id),
        deleted_at: NotSet,
        created_at: NotSet,
        updated_at: Set(time::OffsetDateTime::now_utc()),
    };
    pod.update(conn).await
}

/// Set lifecycle + confirmation status together (the engine keeps them in lockstep).
pub async fn update_statuses<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    pod_id: i64,
    status: pods::PodStatus,
    confirm_status: pods::ConfirmStatus,
) -> Result<pods::Model, sea_orm::DbErr> {
    let pod = pods::ActiveModel {
        id: Set(pod_id),
        league_id: NotSet,
        created_by: NotSet,
        status: Set(status),
        confirm_status: Set(confirm_status),
        outcome: NotSet,
        win_condition_id: NotSet,
        deleted_at: NotSet,
        created_at: NotSet,
        updated_at: Set(time::OffsetDateTime::now_utc()),
    };
    pod.update(conn).await
}

/// Soft-delete: the pod disappears from active queries but stays in storage.
pub async fn soft_delete<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    pod_id: i64,
) -> Result<(), sea_orm::DbErr> {
    let now = time::OffsetDateTime::now_utc();
    let pod = pods::ActiveModel {
        id: Set(pod_id),
        league_id: NotSet,
        created_by: NotSet,
        status: NotSet,
        confirm_status: NotSet,
        outcome: NotSet,
        win_condition_id: NotSet,
        deleted_at: Set(Some(now)),
        created_at: NotSet,
        updated_at: Set(now),
    };
    pod.update(conn).await?;
    Ok(())
}

pub async fn find_all_by_league<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    league_id: i64,
    status: Option<pods::PodStatus>,
) -> Result<Vec<pods::Model>, sea_orm::DbErr> {
    let mut query = pods::Entity::find()
        .filter(pods::Column::LeagueId.eq(league_id))
        .filter(pods::Column::DeletedAt.is_null());
    if let Some(status) = status {
        query = query.filter(pods::Column::Status.eq(status));
    }
    query.order_by_desc(pods::Column::CreatedAt).all(conn).await
}
