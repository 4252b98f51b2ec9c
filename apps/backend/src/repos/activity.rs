//! Activity log repository.

use sea_orm::ConnectionTrait;

use crate::adapters::activity_sea as activity_adapter;
use crate::entities::activity_log;
use crate::errors::domain::DomainError;

pub async fn record<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    actor_id: i64,
    action: &str,
    target_kind: &str,
    target_id: i64,
    detail: Option<serde_json::Value>,
) -> Result<activity_log::Model, DomainError> {
    Ok(activity_adapter::create_activity(conn, actor_id, action, target_kind, target_id, detail)
        .await?)
}

pub async fn find_all_by_target<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    target_kind: &str,
    target_id: i64,
) -> Result<Vec<activity_log::Model>, DomainError> {
    Ok(activity_adapter::find_all_by_target(conn, target_kind, target_id).await?)
}
