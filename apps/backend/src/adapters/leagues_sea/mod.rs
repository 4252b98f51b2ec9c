//! SeaORM adapter for leagues.

use sea_orm::{ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, NotSet, QueryFilter, Set};

use crate::entities::leagues;

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    league_id: i64,
) -> Result<Option<leagues::Model>, sea_orm::DbErr> {
    leagues::Entity::find()
        .filter(leagues::Column::Id.eq(league_id))
        .one(conn)
        .await
}

pub async fn create_league<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    name: &str,
    status: leagues::LeagueStatus,
) -> Result<leagues::Model, sea_orm::DbErr> {
    let now = time::OffsetDateTime::now_utc();
    let league = leagues::ActiveModel {
        id: NotSet,
        name: Set(name.to_string()),
        status: Set(status),
        created_at: Set(now),
        updated_at: Set(now),
    };
    league.insert(conn).await
}
