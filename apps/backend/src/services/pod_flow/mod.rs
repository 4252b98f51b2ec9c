//! Pod confirmation workflow service.
//!
//! All methods take an open transaction and expect to run as the only
//! writer for the pod: each mutating path loads the pod row with
//! `require_pod_for_update`, so concurrent calls on the same pod serialize
//! behind the row lock and the state machine observes one writer at a time.

mod admin;
mod confirmation;
mod creation;
mod results;

use sea_orm::DatabaseTransaction;
use tracing::info;

pub use admin::{AdminParticipant, AdminPodUpdate};

use crate::error::AppError;
use crate::errors::domain::DomainError;
use crate::permissions::{self, POD_ADMIN};
use crate::repos::pods;

/// Pod workflow domain service.
pub struct PodFlowService;

impl PodFlowService {
    pub fn new() -> Self {
        Self
    }

    /// Soft-delete a pod. Only the creator or a pod admin may delete, and a
    /// finalized pod is immutable to deletion.
    pub async fn delete_pod(
        &self,
        txn: &DatabaseTransaction,
        pod_id: i64,
        actor_id: i64,
    ) -> Result<(), AppError> {
        let pod = pods::require_pod_for_update(txn, pod_id).await?;

        if pod.created_by != Some(actor_id) && !is_pod_admin(txn, actor_id).await? {
            return Err(DomainError::eligibility(
                "Only the pod creator or an admin may delete a pod",
            )
            .into());
        }

        if pod.is_complete() {
            return Err(
                DomainError::state("A finalized pod cannot be deleted").into(),
            );
        }

        pods::soft_delete(txn, pod_id).await?;
        info!(pod_id, actor_id, "Pod soft-deleted");
        Ok(())
    }
}

impl Default for PodFlowService {
    fn default() -> Self {
        Self::new()
    }
}

pub(super) async fn is_pod_admin(
    txn: &DatabaseTransaction,
    user_id: i64,
) -> Result<bool, DomainError> {
    permissions::has_permission(txn, user_id, POD_ADMIN).await
}

/// Reject the call unless the actor holds the pod admin permission.
pub(super) async fn require_pod_admin(
    txn: &DatabaseTransaction,
    user_id: i64,
) -> Result<(), DomainError> {
    if is_pod_admin(txn, user_id).await? {
        Ok(())
    } else {
        Err(DomainError::eligibility(format!(
            "User {user_id} does not hold the {POD_ADMIN} permission"
        )))
    }
}
