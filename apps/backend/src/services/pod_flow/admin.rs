//! Admin overrides for the pod workflow.
//!
//! Admins are identified by permission, not pod ownership. Every mutation
//! here records an activity row in the same transaction. Mutations on a
//! COMPLETE pod are rejected, except participant removal and the DQ toggle,
//! which remain available for corrective action.

use sea_orm::DatabaseTransaction;
use serde::Deserialize;
use tracing::info;

use super::{require_pod_admin, PodFlowService};
use crate::domain::confirmation::{
    toggle_disqualified, validate_results, validate_roster, MAX_POD_PLAYERS,
};
use crate::entities::pod_players::PlayerResult;
use crate::entities::pods::{ConfirmStatus, PodStatus};
use crate::error::AppError;
use crate::errors::domain::{DomainError, ValidationKind};
use crate::repos::{league_members, pod_players, pods};
use crate::services::activity::{self, AdminAction};

/// One participant row in a bulk replacement.
#[derive(Debug, Clone, Deserialize)]
pub struct AdminParticipant {
    pub player_id: i64,
    pub result: Option<PlayerResult>,
    #[serde(default)]
    pub confirmed: bool,
    pub turn_order: Option<i16>,
}

/// Bulk pod update: force a confirmation status, replace the roster, or both.
#[derive(Debug, Clone, Deserialize)]
pub struct AdminPodUpdate {
    pub confirm_status: Option<ConfirmStatus>,
    pub participants: Option<Vec<AdminParticipant>>,
}

impl PodFlowService {
    /// Bulk update: optionally replace the participant list, optionally
    /// force the confirmation status (bypassing the all-must-confirm rule).
    pub async fn admin_update_pod(
        &self,
        txn: &DatabaseTransaction,
        actor_id: i64,
        pod_id: i64,
        update: AdminPodUpdate,
    ) -> Result<pods::Pod, AppError> {
        require_pod_admin(txn, actor_id).await?;

        let AdminPodUpdate {
            confirm_status,
            participants,
        } = update;

        let pod = pods::require_pod_for_update(txn, pod_id).await?;
        if pod.is_complete() {
            return Err(DomainError::state("Pod is already finalized").into());
        }

        if let Some(roster) = &participants {
            let player_ids: Vec<i64> = roster.iter().map(|p| p.player_id).collect();
            validate_roster(&player_ids)?;
            let results: Vec<Option<PlayerResult>> = roster.iter().map(|p| p.result).collect();
            validate_results(&results)?;

            for entry in roster {
                if !league_members::is_member(txn, pod.league_id, entry.player_id).await? {
                    return Err(DomainError::validation(
                        ValidationKind::Other("NOT_ENROLLED".into()),
                        format!(
                            "Player {} is not enrolled in league {}",
                            entry.player_id, pod.league_id
                        ),
                    )
                    .into());
                }
            }

            pod_players::delete_all_by_pod(txn, pod_id).await?;
            for entry in roster {
                let row = pod_players::create_participant(
                    txn,
                    pod_players::ParticipantCreate {
                        pod_id,
                        player_id: entry.player_id,
                        confirmed: entry.confirmed,
                        result: entry.result,
                        turn_order: entry.turn_order,
                    },
                )
                .await?;
                if entry.confirmed {
                    pod_players::set_confirmed(txn, row.id, true).await?;
                }
            }
        }

        let pod = match &confirm_status {
            Some(ConfirmStatus::Complete) => {
                let roster = pod_players::find_all_by_pod(txn, pod_id).await?;
                self.finalize(txn, &pod, &roster).await?
            }
            Some(ConfirmStatus::Pending) => {
                pods::update_statuses(txn, pod_id, PodStatus::Pending, ConfirmStatus::Pending)
                    .await?
            }
            Some(ConfirmStatus::Open) => {
                pods::update_statuses(txn, pod_id, PodStatus::Active, ConfirmStatus::Open).await?
            }
            None => pods::require_pod(txn, pod_id).await?,
        };

        activity::record_pod_action(
            txn,
            actor_id,
            AdminAction::PodUpdate,
            pod_id,
            Some(serde_json::json!({
                "confirm_status": confirm_status,
                "participants_replaced": participants.map(|p| p.len()),
            })),
        )
        .await?;

        info!(pod_id, actor_id, "Admin updated pod");
        Ok(pod)
    }

    /// Admin soft-delete. Same finality rule as the normal path: a pod that
    /// reached COMPLETE stays on the record.
    pub async fn admin_delete_pod(
        &self,
        txn: &DatabaseTransaction,
        actor_id: i64,
        pod_id: i64,
    ) -> Result<(), AppError> {
        require_pod_admin(txn, actor_id).await?;

        let pod = pods::require_pod_for_update(txn, pod_id).await?;
        if pod.is_complete() {
            return Err(DomainError::state("A finalized pod cannot be deleted").into());
        }

        pods::soft_delete(txn, pod_id).await?;
        activity::record_pod_action(txn, actor_id, AdminAction::PodDelete, pod_id, None).await?;

        info!(pod_id, actor_id, "Admin deleted pod");
        Ok(())
    }

    /// Add a participant to a non-completed pod, bypassing the
    /// one-open-pod-per-league rule.
    pub async fn admin_add_participant(
        &self,
        txn: &DatabaseTransaction,
        actor_id: i64,
        pod_id: i64,
        player_id: i64,
    ) -> Result<pod_players::Participant, AppError> {
        require_pod_admin(txn, actor_id).await?;

        let pod = pods::require_pod_for_update(txn, pod_id).await?;
        if pod.is_complete() {
            return Err(DomainError::state("Pod is already finalized").into());
        }

        let count = pod_players::count_by_pod(txn, pod_id).await?;
        if count as usize >= MAX_POD_PLAYERS {
            return Err(DomainError::validation(
                ValidationKind::PodFull,
                format!("Pod {pod_id} already holds {MAX_POD_PLAYERS} players"),
            )
            .into());
        }

        if pod_players::find_by_pod_and_player(txn, pod_id, player_id)
            .await?
            .is_some()
        {
            return Err(DomainError::validation(
                ValidationKind::AlreadyJoined,
                format!("Player {player_id} already joined pod {pod_id}"),
            )
            .into());
        }

        if !league_members::is_member(txn, pod.league_id, player_id).await? {
            return Err(DomainError::validation(
                ValidationKind::Other("NOT_ENROLLED".into()),
                format!(
                    "Player {player_id} is not enrolled in league {}",
                    pod.league_id
                ),
            )
            .into());
        }

        let participant = pod_players::create_participant(
            txn,
            pod_players::ParticipantCreate::unconfirmed(pod_id, player_id),
        )
        .await?;

        activity::record_pod_action(
            txn,
            actor_id,
            AdminAction::ParticipantAdd,
            pod_id,
            Some(serde_json::json!({ "player_id": player_id })),
        )
        .await?;

        Ok(participant)
    }

    /// Remove a participant. Allowed on completed pods for corrective
    /// action; standings counters are never retroactively adjusted.
    pub async fn admin_remove_participant(
        &self,
        txn: &DatabaseTransaction,
        actor_id: i64,
        pod_id: i64,
        player_id: i64,
    ) -> Result<(), AppError> {
        require_pod_admin(txn, actor_id).await?;

        pods::require_pod_for_update(txn, pod_id).await?;
        let participant = pod_players::require_participant(txn, pod_id, player_id).await?;
        pod_players::delete_participant(txn, participant.id).await?;

        activity::record_pod_action(
            txn,
            actor_id,
            AdminAction::ParticipantRemove,
            pod_id,
            Some(serde_json::json!({ "player_id": player_id })),
        )
        .await?;

        info!(pod_id, player_id, actor_id, "Admin removed participant");
        Ok(())
    }

    /// Overwrite one participant's declared result.
    pub async fn admin_update_participant(
        &self,
        txn: &DatabaseTransaction,
        actor_id: i64,
        pod_id: i64,
        player_id: i64,
        result: Option<PlayerResult>,
    ) -> Result<pod_players::Participant, AppError> {
        require_pod_admin(txn, actor_id).await?;

        let pod = pods::require_pod_for_update(txn, pod_id).await?;
        if pod.is_complete() {
            return Err(DomainError::state("Pod is already finalized").into());
        }

        let participant = pod_players::require_participant(txn, pod_id, player_id).await?;

        // The single-winner invariant holds across admin edits too
        if result == Some(PlayerResult::Win) {
            let participants = pod_players::find_all_by_pod(txn, pod_id).await?;
            let results: Vec<Option<PlayerResult>> = participants
                .iter()
                .map(|p| {
                    if p.id == participant.id {
                        result
                    } else {
                        p.result
                    }
                })
                .collect();
            validate_results(&results)?;
        }

        let updated = pod_players::update_participant(
            txn,
            participant.id,
            pod_players::ParticipantUpdate {
                result: Some(result),
                ..pod_players::ParticipantUpdate::default()
            },
        )
        .await?;

        activity::record_pod_action(
            txn,
            actor_id,
            AdminAction::ParticipantUpdate,
            pod_id,
            Some(serde_json::json!({ "player_id": player_id, "result": result })),
        )
        .await?;

        Ok(updated)
    }

    /// Toggle a participant in or out of DISQUALIFIED. Allowed on completed
    /// pods; the pre-DQ result is stashed and restored on the second toggle.
    pub async fn admin_toggle_disqualified(
        &self,
        txn: &DatabaseTransaction,
        actor_id: i64,
        pod_id: i64,
        player_id: i64,
    ) -> Result<pod_players::Participant, AppError> {
        require_pod_admin(txn, actor_id).await?;

        pods::require_pod_for_update(txn, pod_id).await?;
        let participant = pod_players::require_participant(txn, pod_id, player_id).await?;

        let (result, prior_result) =
            toggle_disqualified(participant.result, participant.prior_result);
        let updated =
            pod_players::set_result_with_prior(txn, participant.id, result, prior_result).await?;

        activity::record_pod_action(
            txn,
            actor_id,
            AdminAction::ParticipantDqToggle,
            pod_id,
            Some(serde_json::json!({ "player_id": player_id, "result": result })),
        )
        .await?;

        info!(pod_id, player_id, actor_id, ?result, "Admin toggled disqualification");
        Ok(updated)
    }
}
