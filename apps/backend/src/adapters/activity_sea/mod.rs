//! SeaORM adapter for the activity audit log.

use sea_orm::{ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, NotSet, QueryFilter, QueryOrder, Set};

use crate::entities::activity_log;

pub async fn create_activity<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    actor_id: i64,
    action: &str,
    target_kind: &str,
    target_id: i64,
    detail: Option<serde_json::Value>,
) -> Result<activity_log::Model, sea_orm::DbErr> {
    let entry = activity_log::ActiveModel {
        id: NotSet,
        actor_id: Set(Some(actor_id)),
        action: Set(action.to_string()),
        target_kind: Set(target_kind.to_string()),
        target_id: Set(target_id),
        detail: Set(detail),
        created_at: Set(time::OffsetDateTime::now_utc()),
    };
    entry.insert(conn).await
}

pub async fn find_all_by_target<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    target_kind: &str,
    target_id: i64,
) -> Result<Vec<activity_log::Model>, sea_orm::DbErr> {
    activity_log::Entity::find()
        .filter(activity_log::Column::TargetKind.eq(target_kind))
        .filter(activity_log::Column::TargetId.eq(target_id))
        .order_by_asc(activity_log::Column::Id)
        .all(conn)
        .await
}
