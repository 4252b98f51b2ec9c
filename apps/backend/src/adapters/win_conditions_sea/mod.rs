//! SeaORM adapter for the win condition catalogue.

use sea_orm::{ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder};

use crate::entities::win_conditions;

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: i64,
) -> Result<Option<win_conditions::Model>, sea_orm::DbErr> {
    win_conditions::Entity::find_by_id(id).one(conn).await
}

pub async fn find_by_slug<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    slug: &str,
) -> Result<Option<win_conditions::Model>, sea_orm::DbErr> {
    win_conditions::Entity::find()
        .filter(win_conditions::Column::Slug.eq(slug))
        .one(conn)
        .await
}

pub async fn find_all<C: ConnectionTrait + Send + Sync>(
    conn: &C,
) -> Result<Vec<win_conditions::Model>, sea_orm::DbErr> {
    win_conditions::Entity::find()
        .order_by_asc(win_conditions::Column::Id)
        .all(conn)
        .await
}
