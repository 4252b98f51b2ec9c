//! SeaORM adapter for league memberships and their standings counters.

use sea_orm::{ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, NotSet, QueryFilter, Set};

use crate::entities::league_members;

pub async fn find_membership<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    league_id: i64,
    user_id: i64,
) -> Result<Option<league_members::Model>, sea_orm::DbErr> {
    league_members::Entity::find()
        .filter(league_members::Column::LeagueId.eq(league_id))
        .filter(league_members::Column::UserId.eq(user_id))
        .one(conn)
        .await
}

pub async fn create_membership<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    league_id: i64,
    user_id: i64,
) -> Result<league_members::Model, sea_orm::DbErr> {
    let now = time::OffsetDateTime::now_utc();
    let member = league_members::ActiveModel {
        id: NotSet,
        league_id: Set(league_id),
        user_id: Set(user_id),
        wins: Set(0),
        losses: Set(0),
        draws: Set(0),
        joined_at: Set(now),
        updated_at: Set(now),
    };
    member.insert(conn).await
}

/// Bump the standings counters in place. Runs inside the finalize
/// transaction so the increment happens exactly once per pod.
pub async fn increment_counters<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    league_id: i64,
    user_id: i64,
    wins: i32,
    losses: i32,
    draws: i32,
) -> Result<(), sea_orm::DbErr> {
    use sea_orm::sea_query::Expr;

    let result = league_members::Entity::update_many()
        .col_expr(
            league_members::Column::Wins,
            Expr::col(league_members::Column::Wins).add(wins),
        )
        .col_expr(
            league_members::Column::Losses,
            Expr::col(league_members::Column::Losses).add(losses),
        )
        .col_expr(
            league_members::Column::Draws,
            Expr::col(league_members::Column::Draws).add(draws),
        )
        .col_expr(
            league_members::Column::UpdatedAt,
            Expr::val(time::OffsetDateTime::now_utc()).into(),
        )
        .filter(league_members::Column::LeagueId.eq(league_id))
        .filter(league_members::Column::UserId.eq(user_id))
        .exec(conn)
        .await?;

    if result.rows_affected == 0 {
        return Err(sea_orm::DbErr::RecordNotFound(
            "League membership not found".to_string(),
        ));
    }
    Ok(())
}
