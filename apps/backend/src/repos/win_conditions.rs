//! Win condition catalogue lookups.

use sea_orm::ConnectionTrait;

use crate::adapters::win_conditions_sea as win_conditions_adapter;
use crate::entities::win_conditions;
use crate::errors::domain::{DomainError, NotFoundKind};

pub async fn require_win_condition<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: i64,
) -> Result<win_conditions::Model, DomainError> {
    win_conditions_adapter::find_by_id(conn, id)
        .await?
        .ok_or_else(|| {
            DomainError::not_found(
                NotFoundKind::WinCondition,
                format!("Win condition {id} not found"),
            )
        })
}

pub async fn find_by_slug<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    slug: &str,
) -> Result<Option<win_conditions::Model>, DomainError> {
    Ok(win_conditions_adapter::find_by_slug(conn, slug).await?)
}

pub async fn find_all<C: ConnectionTrait + Send + Sync>(
    conn: &C,
) -> Result<Vec<win_conditions::Model>, DomainError> {
    Ok(win_conditions_adapter::find_all(conn).await?)
}
