//! League repository functions.

use sea_orm::ConnectionTrait;

use crate::adapters::leagues_sea as leagues_adapter;
use crate::entities::leagues;
use crate::errors::domain::{DomainError, NotFoundKind};

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    league_id: i64,
) -> Result<Option<leagues::Model>, DomainError> {
    Ok(leagues_adapter::find_by_id(conn, league_id).await?)
}

pub async fn require_league<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    league_id: i64,
) -> Result<leagues::Model, DomainError> {
    find_by_id(conn, league_id).await?.ok_or_else(|| {
        DomainError::not_found(NotFoundKind::League, format!("League {league_id} not found"))
    })
}

pub async fn create_league<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    name: &str,
    status: leagues::LeagueStatus,
) -> Result<leagues::Model, DomainError> {
    Ok(leagues_adapter::create_league(conn, name, status).await?)
}
