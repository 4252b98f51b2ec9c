//! Permission resolution over the role-inheritance DAG.

pub mod graph;

use std::collections::HashSet;

use sea_orm::ConnectionTrait;

use crate::errors::domain::{DomainError, ValidationKind};
use crate::repos::roles;

pub use graph::RoleGraph;

/// Grants pod administration: overrides, forced transitions, participant edits.
pub const POD_ADMIN: &str = "pods.admin";

/// Grants role management: creating roles, grants, inheritance edges.
pub const ROLES_ADMIN: &str = "roles.admin";

/// Resolve the full permission set for a user: assigned roles plus
/// everything reachable through inheritance.
pub async fn resolve_permissions<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: i64,
) -> Result<HashSet<String>, DomainError> {
    let assigned = roles::find_role_ids_by_user(conn, user_id).await?;
    if assigned.is_empty() {
        return Ok(HashSet::new());
    }

    let edges = roles::find_all_edges(conn).await?;
    let graph = RoleGraph::from_edges(&edges);
    let effective: Vec<i64> = graph.reachable(&assigned).into_iter().collect();

    let grants = roles::find_grants_by_roles(conn, &effective).await?;
    Ok(grants.into_iter().map(|(_, permission)| permission).collect())
}

pub async fn has_permission<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: i64,
    permission: &str,
) -> Result<bool, DomainError> {
    Ok(resolve_permissions(conn, user_id).await?.contains(permission))
}

/// Add an inheritance edge, rejecting cycles before the write.
pub async fn add_inheritance<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    role_id: i64,
    parent_role_id: i64,
) -> Result<(), DomainError> {
    roles::require_role(conn, role_id).await?;
    roles::require_role(conn, parent_role_id).await?;

    let edges = roles::find_all_edges(conn).await?;
    let graph = RoleGraph::from_edges(&edges);
    if graph.would_create_cycle(role_id, parent_role_id) {
        return Err(DomainError::validation(
            ValidationKind::RoleCycle,
            format!("Role {role_id} inheriting {parent_role_id} would create a cycle"),
        ));
    }

    roles::create_edge(conn, role_id, parent_role_id).await
}
