//! League membership repository: enrollment checks and standings counters.

use sea_orm::ConnectionTrait;

use crate::adapters::league_members_sea as members_adapter;
use crate::entities::league_members;
use crate::errors::domain::DomainError;

pub async fn find_membership<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    league_id: i64,
    user_id: i64,
) -> Result<Option<league_members::Model>, DomainError> {
    Ok(members_adapter::find_membership(conn, league_id, user_id).await?)
}

pub async fn is_member<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    league_id: i64,
    user_id: i64,
) -> Result<bool, DomainError> {
    Ok(find_membership(conn, league_id, user_id).await?.is_some())
}

pub async fn create_membership<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    league_id: i64,
    user_id: i64,
) -> Result<league_members::Model, DomainError> {
    Ok(members_adapter::create_membership(conn, league_id, user_id).await?)
}

pub async fn increment_counters<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    league_id: i64,
    user_id: i64,
    wins: i32,
    losses: i32,
    draws: i32,
) -> Result<(), DomainError> {
    Ok(members_adapter::increment_counters(conn, league_id, user_id, wins, losses, draws).await?)
}
