//! Pod repository functions for the domain layer.

use sea_orm::ConnectionTrait;

use crate::adapters::pods_sea as pods_adapter;
use crate::entities::pods;
use crate::entities::pods::{ConfirmStatus, PodOutcome, PodStatus};
use crate::errors::domain::{DomainError, NotFoundKind};

/// Pod domain model.
///
/// Loaded from the database model (pods::Model) through repos functions;
/// soft-deleted pods never surface here.
#[derive(Debug, Clone, PartialEq)]
pub struct Pod {
    pub id: i64,
    pub league_id: i64,
    pub created_by: Option<i64>,
    pub status: PodStatus,
    pub confirm_status: ConfirmStatus,
    pub outcome: Option<PodOutcome>,
    pub win_condition_id: Option<i64>,
    pub created_at: time::OffsetDateTime,
    pub updated_at: time::OffsetDateTime,
}

impl Pod {
    pub fn is_complete(&self) -> bool {
        self.confirm_status == ConfirmStatus::Complete
    }
}

fn map_not_found(e: sea_orm::DbErr) -> DomainError {
    match e {
        sea_orm::DbErr::RecordNotFound(detail) => DomainError::not_found(NotFoundKind::Pod, detail),
        other => other.into(),
    }
}

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    pod_id: i64,
) -> Result<Option<Pod>, DomainError> {
    let pod = pods_adapter::find_by_id(conn, pod_id).await?;
    Ok(pod.map(Pod::from))
}

/// Find pod by ID or return a domain NotFound.
pub async fn require_pod<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    pod_id: i64,
) -> Result<Pod, DomainError> {
    let pod = pods_adapter::require_pod(conn, pod_id)
        .await
        .map_err(map_not_found)?;
    Ok(Pod::from(pod))
}

/// Load the pod under a row lock. Mutating flows call this first so that
/// per-pod transitions serialize on the storage side.
pub async fn require_pod_for_update<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    pod_id: i64,
) -> Result<Pod, DomainError> {
    let pod = pods_adapter::require_pod_for_update(conn, pod_id)
        .await
        .map_err(map_not_found)?;
    Ok(Pod::from(pod))
}

pub async fn create_pod<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: pods_adapter::PodCreate,
) -> Result<Pod, DomainError> {
    let pod = pods_adapter::create_pod(conn, dto).await?;
    Ok(Pod::from(pod))
}

pub async fn apply_declaration<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: pods_adapter::PodDeclaration,
) -> Result<Pod, DomainError> {
    let pod = pods_adapter::apply_declaration(conn, dto).await?;
    Ok(Pod::from(pod))
}

pub async fn update_statuses<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    pod_id: i64,
    status: PodStatus,
    confirm_status: ConfirmStatus,
) -> Result<Pod, DomainError> {
    let pod = pods_adapter::update_statuses(conn, pod_id, status, confirm_status).await?;
    Ok(Pod::from(pod))
}

pub async fn soft_delete<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    pod_id: i64,
) -> Result<(), DomainError> {
    pods_adapter::soft_delete(conn, pod_id).await?;
    Ok(())
}

pub async fn find_all_by_league<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    league_id: i64,
    status: Option<PodStatus>,
) -> Result<Vec<Pod>, DomainError> {
    let pods = pods_adapter::find_all_by_league(conn, league_id, status).await?;
    Ok(pods.into_iter().map(Pod::from).collect())
}

impl From<pods::Model> for Pod {
    fn from(model: pods::Model) -> Self {
        Self {
            id: model.id,
            league_id: model.league_id,
            created_by: model.created_by,
            status: model.status,
            confirm_status: model.confirm_status,
            outcome: model.outcome,
            win_condition_id: model.win_condition_id,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
