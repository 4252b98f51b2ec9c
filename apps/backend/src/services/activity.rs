//! Audit trail for privileged mutations.
//!
//! Every admin write lands one activity row inside the same transaction as
//! the mutation itself, so the log never references a change that was
//! rolled back.

use sea_orm::DatabaseTransaction;

use crate::errors::domain::DomainError;
use crate::repos::activity;

pub const TARGET_POD: &str = "pod";

/// Admin actions recorded against a pod.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdminAction {
    PodUpdate,
    PodDelete,
    PodDeclare,
    ParticipantAdd,
    ParticipantRemove,
    ParticipantUpdate,
    ParticipantDqToggle,
}

impl AdminAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            AdminAction::PodUpdate => "admin.pod.update",
            AdminAction::PodDelete => "admin.pod.delete",
            AdminAction::PodDeclare => "admin.pod.declare",
            AdminAction::ParticipantAdd => "admin.pod.participant.add",
            AdminAction::ParticipantRemove => "admin.pod.participant.remove",
            AdminAction::ParticipantUpdate => "admin.pod.participant.update",
            AdminAction::ParticipantDqToggle => "admin.pod.participant.dq_toggle",
        }
    }
}

pub async fn record_pod_action(
    txn: &DatabaseTransaction,
    actor_id: i64,
    action: AdminAction,
    pod_id: i64,
    detail: Option<serde_json::Value>,
) -> Result<(), DomainError> {
    activity::record(txn, actor_id, action.as_str(), TARGET_POD, pod_id, detail).await?;
    Ok(())
}
