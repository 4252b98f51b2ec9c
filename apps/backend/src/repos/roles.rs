//! Role repository: roles, grants, user assignments and the DAG edges.

use sea_orm::ConnectionTrait;

use crate::adapters::roles_sea as roles_adapter;
use crate::entities::roles;
use crate::errors::domain::{DomainError, NotFoundKind};

/// One inheritance edge: `role_id` inherits from `parent_role_id`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoleEdge {
    pub role_id: i64,
    pub parent_role_id: i64,
}

pub async fn require_role<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    role_id: i64,
) -> Result<roles::Model, DomainError> {
    roles_adapter::find_by_id(conn, role_id)
        .await?
        .ok_or_else(|| {
            DomainError::not_found(NotFoundKind::Role, format!("Role {role_id} not found"))
        })
}

pub async fn find_by_name<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    name: &str,
) -> Result<Option<roles::Model>, DomainError> {
    Ok(roles_adapter::find_by_name(conn, name).await?)
}

pub async fn create_role<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    name: &str,
) -> Result<roles::Model, DomainError> {
    Ok(roles_adapter::create_role(conn, name).await?)
}

pub async fn find_all_edges<C: ConnectionTrait + Send + Sync>(
    conn: &C,
) -> Result<Vec<RoleEdge>, DomainError> {
    let rows = roles_adapter::find_all_edges(conn).await?;
    Ok(rows
        .into_iter()
        .map(|r| RoleEdge {
            role_id: r.role_id,
            parent_role_id: r.parent_role_id,
        })
        .collect())
}

/// Insert an inheritance edge. The caller is responsible for running the
/// cycle check first; this function only writes.
pub async fn create_edge<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    role_id: i64,
    parent_role_id: i64,
) -> Result<(), DomainError> {
    roles_adapter::create_edge(conn, role_id, parent_role_id).await?;
    Ok(())
}

pub async fn find_grants_by_roles<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    role_ids: &[i64],
) -> Result<Vec<(i64, String)>, DomainError> {
    let rows = roles_adapter::find_grants_by_roles(conn, role_ids).await?;
    Ok(rows.into_iter().map(|g| (g.role_id, g.permission)).collect())
}

pub async fn create_grant<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    role_id: i64,
    permission: &str,
) -> Result<(), DomainError> {
    roles_adapter::create_grant(conn, role_id, permission).await?;
    Ok(())
}

pub async fn find_role_ids_by_user<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: i64,
) -> Result<Vec<i64>, DomainError> {
    Ok(roles_adapter::find_role_ids_by_user(conn, user_id).await?)
}

pub async fn assign_role<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: i64,
    role_id: i64,
) -> Result<(), DomainError> {
    roles_adapter::assign_role(conn, user_id, role_id).await?;
    Ok(())
}
