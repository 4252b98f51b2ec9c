//! SeaORM adapter for roles, role grants and the inheritance DAG.

use sea_orm::{ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, NotSet, QueryFilter, Set};

use crate::entities::{role_grants, role_inherits, roles, user_roles};

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    role_id: i64,
) -> Result<Option<roles::Model>, sea_orm::DbErr> {
    roles::Entity::find_by_id(role_id).one(conn).await
}

pub async fn find_by_name<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    name: &str,
) -> Result<Option<roles::Model>, sea_orm::DbErr> {
    roles::Entity::find()
        .filter(roles::Column::Name.eq(name))
        .one(conn)
        .await
}

pub async fn create_role<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    name: &str,
) -> Result<roles::Model, sea_orm::DbErr> {
    let role = roles::ActiveModel {
        id: NotSet,
        name: Set(name.to_string()),
        created_at: Set(time::OffsetDateTime::now_utc()),
    };
    role.insert(conn).await
}

/// All inheritance edges. The permission resolver and the cycle check both
/// traverse this adjacency list in memory.
pub async fn find_all_edges<C: ConnectionTrait + Send + Sync>(
    conn: &C,
) -> Result<Vec<role_inherits::Model>, sea_orm::DbErr> {
    role_inherits::Entity::find().all(conn).await
}

pub async fn create_edge<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    role_id: i64,
    parent_role_id: i64,
) -> Result<role_inherits::Model, sea_orm::DbErr> {
    let edge = role_inherits::ActiveModel {
        id: NotSet,
        role_id: Set(role_id),
        parent_role_id: Set(parent_role_id),
    };
    edge.insert(conn).await
}

pub async fn find_grants_by_roles<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    role_ids: &[i64],
) -> Result<Vec<role_grants::Model>, sea_orm::DbErr> {
    if role_ids.is_empty() {
        return Ok(Vec::new());
    }
    role_grants::Entity::find()
        .filter(role_grants::Column::RoleId.is_in(role_ids.to_vec()))
        .all(conn)
        .await
}

pub async fn create_grant<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    role_id: i64,
    permission: &str,
) -> Result<role_grants::Model, sea_orm::DbErr> {
    let grant = role_grants::ActiveModel {
        id: NotSet,
        role_id: Set(role_id),
        permission: Set(permission.to_string()),
    };
    grant.insert(conn).await
}

pub async fn find_role_ids_by_user<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: i64,
) -> Result<Vec<i64>, sea_orm::DbErr> {
    let rows = user_roles::Entity::find()
        .filter(user_roles::Column::UserId.eq(user_id))
        .all(conn)
        .await?;
    Ok(rows.into_iter().map(|r| r.role_id).collect())
}

pub async fn assign_role<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: i64,
    role_id: i64,
) -> Result<user_roles::Model, sea_orm::DbErr> {
    let assignment = user_roles::ActiveModel {
        id: NotSet,
        user_id: Set(user_id),
        role_id: Set(role_id),
    };
    assignment.insert(conn).await
}
